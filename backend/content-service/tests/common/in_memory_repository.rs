//! In-memory ContentRepository for Integration Tests
//!
//! Mirrors the PostgreSQL repository's observable behaviour (uniqueness,
//! ordering, foreign keys) without a database. One mutex guards all tables,
//! so every operation is atomic.

use chrono::Utc;
use content_service::error::{AppError, Result};
use content_service::models::{
    Category, Comment, CommentWithAuthor, NewPost, NewUser, Post, PostStatus, PostUpdate,
    PostWithLikes, User, UserUpdate, SYSTEM_AUTHOR_ROLE,
};
use content_service::repository::ContentRepository;
use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    /// Insertion order; newest last
    posts: Vec<Post>,
    comments: Vec<Comment>,
    likes: HashSet<(Uuid, Uuid)>,
}

#[derive(Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
    /// When set, every comment insert fails
    fail_comment_inserts: Mutex<bool>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_comment_inserts(&self) {
        *self.fail_comment_inserts.lock().unwrap() = true;
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    /// Users whose role matches `role`
    pub fn users_with_role(&self, role: &str) -> Vec<User> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect()
    }

    pub fn comments_for(&self, post_id: Uuid) -> Vec<Comment> {
        self.tables
            .lock()
            .unwrap()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    pub fn comment_count(&self) -> usize {
        self.tables.lock().unwrap().comments.len()
    }

    pub fn post(&self, post_id: Uuid) -> Option<Post> {
        self.tables
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
    }

    /// Store a user with a fixed role, bypassing registration
    pub fn insert_user(&self, name: &str, role: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            telephone: None,
            password_hash: None,
            role: role.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().users.push(user.clone());
        user
    }
}

#[async_trait::async_trait]
impl ContentRepository for InMemoryRepository {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.telephone.as_deref() == Some(user.telephone.as_str()))
        {
            return Err(AppError::ValidationError("User exist".to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            telephone: Some(user.telephone),
            password_hash: Some(user.password_hash),
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_telephone(&self, telephone: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.telephone.as_deref() == Some(telephone))
            .cloned())
    }

    async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .rev()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count_users(&self) -> Result<i64> {
        Ok(self.tables.lock().unwrap().users.len() as i64)
    }

    async fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<Option<User>> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.id != id && u.telephone.as_deref() == Some(update.telephone.as_str()))
        {
            return Err(AppError::ValidationError(
                "Telephone already in use by another user".to_string(),
            ));
        }

        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|u| {
            u.name = update.name;
            u.telephone = Some(update.telephone);
            u.password_hash = Some(update.password_hash);
            u.role = update.role;
            u.updated_at = Utc::now();
            u.clone()
        }))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }

        let removed_posts: HashSet<Uuid> = tables
            .posts
            .iter()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        tables.posts.retain(|p| p.user_id != id);
        tables
            .comments
            .retain(|c| c.user_id != id && !removed_posts.contains(&c.post_id));
        tables
            .likes
            .retain(|(user_id, post_id)| *user_id != id && !removed_posts.contains(post_id));
        Ok(true)
    }

    async fn find_or_create_system_author(&self, name: &str) -> Result<User> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables
            .users
            .iter()
            .find(|u| u.name == name && u.role == SYSTEM_AUTHOR_ROLE)
        {
            return Ok(existing.clone());
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            telephone: None,
            password_hash: None,
            role: SYSTEM_AUTHOR_ROLE.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn create_category(&self, name: &str) -> Result<Category> {
        let mut tables = self.tables.lock().unwrap();
        if tables.categories.iter().any(|c| c.name == name) {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.tables.lock().unwrap().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn update_category(&self, id: Uuid, name: &str) -> Result<Option<Category>> {
        let mut tables = self.tables.lock().unwrap();
        if tables.categories.iter().any(|c| c.name == name && c.id != id) {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                name
            )));
        }

        Ok(tables.categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.name = name.to_string();
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.lock().unwrap();
        if tables.posts.iter().any(|p| p.category_id == id) {
            return Err(AppError::Conflict("Category still has posts".to_string()));
        }

        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        Ok(tables.categories.len() != before)
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let created = Post {
            id: Uuid::new_v4(),
            user_id: post.user_id,
            category_id: post.category_id,
            title: post.title,
            head_img: post.head_img,
            content: post.content,
            status: PostStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables.posts.push(created.clone());
        Ok(created)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .posts
            .iter()
            .rev()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count_posts(&self) -> Result<i64> {
        Ok(self.tables.lock().unwrap().posts.len() as i64)
    }

    async fn list_posts_by_likes(&self, limit: i64, offset: i64) -> Result<Vec<PostWithLikes>> {
        let tables = self.tables.lock().unwrap();
        // Newest first, so the stable sort leaves ties newest first
        let mut ranked: Vec<PostWithLikes> = tables
            .posts
            .iter()
            .rev()
            .map(|post| PostWithLikes {
                post: post.clone(),
                like_count: tables.likes.iter().filter(|(_, p)| *p == post.id).count() as i64,
            })
            .collect();
        ranked.sort_by(|a, b| b.like_count.cmp(&a.like_count));

        Ok(ranked
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn list_user_posts(&self, user_id: Uuid) -> Result<Vec<Post>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .posts
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_post(&self, id: Uuid, update: PostUpdate) -> Result<Option<Post>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter_mut().find(|p| p.id == id).map(|p| {
            p.category_id = update.category_id;
            p.title = update.title;
            p.head_img = update.head_img;
            p.content = update.content;
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn set_post_status(&self, id: Uuid, status: PostStatus) -> Result<Option<Post>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter_mut().find(|p| p.id == id).map(|p| {
            p.status = status;
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        tables.comments.retain(|c| c.post_id != id);
        tables.likes.retain(|(_, post_id)| *post_id != id);
        Ok(tables.posts.len() != before)
    }

    async fn create_comment(&self, post_id: Uuid, user_id: Uuid, content: &str) -> Result<Comment> {
        if *self.fail_comment_inserts.lock().unwrap() {
            return Err(AppError::DatabaseError("comment insert failed".to_string()));
        }

        let mut tables = self.tables.lock().unwrap();
        if !tables.posts.iter().any(|p| p.id == post_id) {
            return Err(AppError::DatabaseError(
                "violates foreign key constraint comments_post_id_fkey".to_string(),
            ));
        }

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .filter_map(|c| {
                tables
                    .users
                    .iter()
                    .find(|u| u.id == c.user_id)
                    .map(|u| CommentWithAuthor {
                        comment: c.clone(),
                        author_name: u.name.clone(),
                    })
            })
            .collect())
    }

    async fn create_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        Ok(self.tables.lock().unwrap().likes.insert((user_id, post_id)))
    }

    async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        Ok(self.tables.lock().unwrap().likes.remove(&(user_id, post_id)))
    }

    async fn is_liked(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .likes
            .contains(&(user_id, post_id)))
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<i64> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .likes
            .iter()
            .filter(|(_, p)| *p == post_id)
            .count() as i64)
    }
}
