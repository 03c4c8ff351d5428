/// Category handlers
use crate::error::Result;
use crate::response::{success, success_empty};
use crate::services::CategoryService;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: String,
}

pub async fn create_category(
    state: web::Data<AppState>,
    req: web::Json<CategoryRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let category = CategoryService::new(state.repo.clone())
        .create(&req.name)
        .await?;
    Ok(success(serde_json::json!({ "category": category }), "Create Success"))
}

pub async fn update_category(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    req: web::Json<CategoryRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let category = CategoryService::new(state.repo.clone())
        .update(*id, &req.name)
        .await?;
    Ok(success(serde_json::json!({ "category": category }), "Update Success"))
}

pub async fn show_category(state: web::Data<AppState>, id: web::Path<Uuid>) -> Result<HttpResponse> {
    let category = CategoryService::new(state.repo.clone()).get(*id).await?;
    Ok(success(serde_json::json!({ "category": category }), "Success"))
}

pub async fn delete_category(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    CategoryService::new(state.repo.clone()).delete(*id).await?;
    Ok(success_empty("Delete Success"))
}

pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse> {
    let categories = CategoryService::new(state.repo.clone()).list().await?;
    Ok(success(serde_json::json!({ "categories": categories }), "Success"))
}
