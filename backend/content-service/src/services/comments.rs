/// Comment service - human comments on posts
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentWithAuthor};
use crate::repository::ContentRepository;
use std::sync::Arc;
use uuid::Uuid;

pub struct CommentService {
    repo: Arc<dyn ContentRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self { repo }
    }

    async fn ensure_post(&self, post_id: Uuid) -> Result<()> {
        match self.repo.find_post(post_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Post does not exist".to_string())),
        }
    }

    pub async fn add_comment(&self, post_id: Uuid, user_id: Uuid, content: &str) -> Result<Comment> {
        self.ensure_post(post_id).await?;
        self.repo.create_comment(post_id, user_id, content).await
    }

    /// Oldest first
    pub async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        self.ensure_post(post_id).await?;
        self.repo.list_comments(post_id).await
    }
}
