use super::ContentRepository;
use crate::error::{AppError, Result};
use crate::models::{
    Category, Comment, CommentWithAuthor, NewPost, NewUser, Post, PostStatus, PostUpdate,
    PostWithLikes, User, UserUpdate, SYSTEM_AUTHOR_ROLE,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, telephone, password_hash, role, created_at, updated_at";
const POST_COLUMNS: &str =
    "id, user_id, category_id, title, head_img, content, status, created_at, updated_at";

/// PostgreSQL-backed content repository
#[derive(Clone)]
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait::async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let query = format!(
            "INSERT INTO users (name, telephone, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&user.name)
            .bind(&user.telephone)
            .bind(&user.password_hash)
            .bind(&user.role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::ValidationError("User exist".to_string())
                } else {
                    e.into()
                }
            })
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_telephone(&self, telephone: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE telephone = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(telephone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let users = sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn count_users(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<Option<User>> {
        let query = format!(
            "UPDATE users \
             SET name = $2, telephone = $3, password_hash = $4, role = $5, updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&update.name)
            .bind(&update.telephone)
            .bind(&update.password_hash)
            .bind(&update.role)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::ValidationError("Telephone already in use by another user".to_string())
                } else {
                    e.into()
                }
            })
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_or_create_system_author(&self, name: &str) -> Result<User> {
        // Racing inserts collapse on the partial unique index; the loser
        // falls through to the select and sees the winner's row. The
        // conflict predicate must match the index predicate.
        let insert = format!(
            "INSERT INTO users (name, role) VALUES ($1, $2) \
             ON CONFLICT (name) WHERE role = '{SYSTEM_AUTHOR_ROLE}' DO NOTHING \
             RETURNING {USER_COLUMNS}"
        );

        if let Some(user) = sqlx::query_as::<_, User>(&insert)
            .bind(name)
            .bind(SYSTEM_AUTHOR_ROLE)
            .fetch_optional(&self.pool)
            .await?
        {
            debug!(user_id = %user.id, "created system author");
            return Ok(user);
        }

        let select = format!("SELECT {USER_COLUMNS} FROM users WHERE name = $1 AND role = $2");
        let user = sqlx::query_as::<_, User>(&select)
            .bind(name)
            .bind(SYSTEM_AUTHOR_ROLE)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create_category(&self, name: &str) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Category '{}' already exists", name))
            } else {
                e.into()
            }
        })
    }

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn update_category(&self, id: Uuid, name: &str) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Category '{}' already exists", name))
            } else {
                e.into()
            }
        })
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict("Category still has posts".to_string())
                } else {
                    e.into()
                }
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        let query = format!(
            "INSERT INTO posts (user_id, category_id, title, head_img, content, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {POST_COLUMNS}"
        );

        let post = sqlx::query_as::<_, Post>(&query)
            .bind(post.user_id)
            .bind(post.category_id)
            .bind(&post.title)
            .bind(&post.head_img)
            .bind(&post.content)
            .bind(PostStatus::Pending)
            .fetch_one(&self.pool)
            .await?;

        Ok(post)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn list_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let posts = sqlx::query_as::<_, Post>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn count_posts(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn list_posts_by_likes(&self, limit: i64, offset: i64) -> Result<Vec<PostWithLikes>> {
        let posts = sqlx::query_as::<_, PostWithLikes>(
            r#"
            SELECT p.id, p.user_id, p.category_id, p.title, p.head_img, p.content, p.status,
                   p.created_at, p.updated_at, COUNT(l.post_id) AS like_count
            FROM posts p
            LEFT JOIN likes l ON l.post_id = p.id
            GROUP BY p.id
            ORDER BY like_count DESC, p.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn list_user_posts(&self, user_id: Uuid) -> Result<Vec<Post>> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let posts = sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn update_post(&self, id: Uuid, update: PostUpdate) -> Result<Option<Post>> {
        let query = format!(
            "UPDATE posts \
             SET category_id = $2, title = $3, head_img = $4, content = $5, updated_at = NOW() \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(update.category_id)
            .bind(&update.title)
            .bind(&update.head_img)
            .bind(&update.content)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn set_post_status(&self, id: Uuid, status: PostStatus) -> Result<Option<Post>> {
        let query = format!(
            "UPDATE posts SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {POST_COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_comment(&self, post_id: Uuid, user_id: Uuid, content: &str) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.post_id, c.user_id, c.content, c.created_at, c.updated_at,
                   u.name AS author_name
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn create_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO likes (user_id, post_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, post_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn is_liked(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND post_id = $2)",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
