/// Like service
use crate::error::{AppError, Result};
use crate::repository::ContentRepository;
use std::sync::Arc;
use uuid::Uuid;

pub struct LikeService {
    repo: Arc<dyn ContentRepository>,
}

impl LikeService {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self { repo }
    }

    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        if self.repo.find_post(post_id).await?.is_none() {
            return Err(AppError::NotFound("Post does not exist".to_string()));
        }

        if !self.repo.create_like(user_id, post_id).await? {
            return Err(AppError::Conflict("Post already liked".to_string()));
        }
        Ok(())
    }

    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        if !self.repo.delete_like(user_id, post_id).await? {
            return Err(AppError::NotFound("Like does not exist".to_string()));
        }
        Ok(())
    }

    pub async fn is_liked(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        self.repo.is_liked(user_id, post_id).await
    }
}
