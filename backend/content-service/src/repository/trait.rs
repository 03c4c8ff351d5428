use crate::error::Result;
use crate::models::{
    Category, Comment, CommentWithAuthor, NewPost, NewUser, Post, PostStatus, PostUpdate,
    PostWithLikes, User, UserUpdate,
};
use uuid::Uuid;

/// Storage operations used by the service layer.
///
/// Lookups return `Ok(None)` for missing rows; mutations on missing rows
/// return `Ok(false)`. Only storage failures surface as errors.
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    // Users

    async fn create_user(&self, user: NewUser) -> Result<User>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_user_by_telephone(&self, telephone: &str) -> Result<Option<User>>;

    /// Newest first
    async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>>;

    async fn count_users(&self) -> Result<i64>;

    /// Fails with `ValidationError` when the telephone belongs to another user
    async fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<Option<User>>;

    /// Removes the user's posts, comments and likes with it
    async fn delete_user(&self, id: Uuid) -> Result<bool>;

    /// Lookup-or-create the `SYSTEM_AUTHOR_ROLE` account named `name`.
    ///
    /// Safe under concurrent callers: every call with the same name returns
    /// the same row and at most one row is ever stored.
    async fn find_or_create_system_author(&self, name: &str) -> Result<User>;

    // Categories

    async fn create_category(&self, name: &str) -> Result<Category>;

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>>;

    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn update_category(&self, id: Uuid, name: &str) -> Result<Option<Category>>;

    async fn delete_category(&self, id: Uuid) -> Result<bool>;

    // Posts

    /// Insert a post with status `Pending`
    async fn create_post(&self, post: NewPost) -> Result<Post>;

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>>;

    /// Newest first
    async fn list_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>>;

    async fn count_posts(&self) -> Result<i64>;

    /// Most liked first; ties go to the newer post
    async fn list_posts_by_likes(&self, limit: i64, offset: i64) -> Result<Vec<PostWithLikes>>;

    async fn list_user_posts(&self, user_id: Uuid) -> Result<Vec<Post>>;

    async fn update_post(&self, id: Uuid, update: PostUpdate) -> Result<Option<Post>>;

    async fn set_post_status(&self, id: Uuid, status: PostStatus) -> Result<Option<Post>>;

    async fn delete_post(&self, id: Uuid) -> Result<bool>;

    // Comments

    async fn create_comment(&self, post_id: Uuid, user_id: Uuid, content: &str) -> Result<Comment>;

    /// Oldest first, joined with author names
    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>>;

    // Likes

    /// Returns false if the like already existed
    async fn create_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool>;

    /// Returns false if there was nothing to delete
    async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool>;

    async fn is_liked(&self, user_id: Uuid, post_id: Uuid) -> Result<bool>;

    async fn count_likes(&self, post_id: Uuid) -> Result<i64>;
}
