/// Data models for content-service
///
/// - User: accounts, including the reserved system author and admins
/// - Category: post categories, unique by name
/// - Post: image posts moving Pending -> Approved
/// - Comment / Like: per-post interactions
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Display name of the account that authors machine-generated comments
pub const SYSTEM_AUTHOR_NAME: &str = "AI";
/// Role tag reserved for the system author
pub const SYSTEM_AUTHOR_ROLE: &str = "AI";
pub const ADMIN_ROLE: &str = "Admin";
pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub telephone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub telephone: Option<String>,
    pub role: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            telephone: user.telephone.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub telephone: String,
    pub password_hash: String,
    pub role: String,
}

/// Replacement account fields written by an admin
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub telephone: String,
    pub password_hash: String,
    pub role: String,
}

/// One page of accounts, newest first
#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub data: Vec<UserDto>,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    #[serde(rename = "pageNum")]
    pub page_num: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar")]
pub enum PostStatus {
    Pending,
    Approved,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Pending => "Pending",
            PostStatus::Approved => "Approved",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub head_img: String,
    pub content: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a post insert; status always starts at Pending
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub head_img: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub category_id: Uuid,
    pub title: String,
    pub head_img: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment joined with its author's display name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub comment: Comment,
    pub author_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Post row with its like total
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostWithLikes {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub post: Post,
    pub like_count: i64,
}

/// Entry of the like ranking; `rank` starts at 1 on the first page
#[derive(Debug, Clone, Serialize)]
pub struct RankedPost {
    #[serde(flatten)]
    pub post: Post,
    pub like_count: i64,
    pub rank: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankPage {
    pub data: Vec<RankedPost>,
    pub total: i64,
}

/// Post with everything a detail view needs
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub category: Option<Category>,
    pub author: Option<UserDto>,
    pub comments: Vec<CommentWithAuthor>,
    pub like_count: i64,
}

/// One page of posts, newest first
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub data: Vec<Post>,
    pub total: i64,
}
