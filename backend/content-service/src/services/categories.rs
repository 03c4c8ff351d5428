/// Category service
use crate::error::{AppError, Result};
use crate::models::Category;
use crate::repository::ContentRepository;
use std::sync::Arc;
use uuid::Uuid;

pub struct CategoryService {
    repo: Arc<dyn ContentRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, name: &str) -> Result<Category> {
        self.repo.create_category(name).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Category> {
        self.repo
            .find_category_by_id(id)
            .await?
            .ok_or(AppError::CategoryNotFound)
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        self.repo.list_categories().await
    }

    pub async fn update(&self, id: Uuid, name: &str) -> Result<Category> {
        self.repo
            .update_category(id, name)
            .await?
            .ok_or(AppError::CategoryNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repo.delete_category(id).await? {
            return Err(AppError::CategoryNotFound);
        }
        Ok(())
    }
}
