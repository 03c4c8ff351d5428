/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::middleware::{AdminUser, AuthUser};
use crate::response::success;
use crate::services::{PostInput, PostService};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "category_name is required"))]
    pub category_name: String,
    #[validate(length(min = 1, max = 10, message = "title must be 1-10 characters"))]
    pub title: String,
    #[serde(default)]
    pub head_img: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

impl From<CreatePostRequest> for PostInput {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            category_name: req.category_name,
            title: req.title,
            head_img: req.head_img,
            content: req.content,
        }
    }
}

/// Create a new post.
///
/// Responds once the post row is stored; the AI comment arrives later.
pub async fn create_post(
    state: web::Data<AppState>,
    user: AuthUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let service = PostService::with_annotations(state.repo.clone(), state.annotations.clone());
    let post = service.create_post(user.id, req.into()).await?;

    Ok(success(serde_json::json!({ "post": post }), "Create Success"))
}

/// Update a post
pub async fn update_post(
    state: web::Data<AppState>,
    user: AuthUser,
    post_id: web::Path<Uuid>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let service = PostService::new(state.repo.clone());
    let post = service
        .update_post(*post_id, user.id, user.is_admin(), req.into())
        .await?;

    Ok(success(serde_json::json!({ "post": post }), "Update Success"))
}

/// Get a post with comments and like count
pub async fn get_post(state: web::Data<AppState>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new(state.repo.clone());
    let detail = service.get_post_detail(*post_id).await?;

    Ok(success(detail, "Show Success"))
}

/// Delete a post
pub async fn delete_post(
    state: web::Data<AppState>,
    user: AuthUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new(state.repo.clone());
    let post = service
        .delete_post(*post_id, user.id, user.is_admin())
        .await?;

    Ok(success(serde_json::json!({ "post": post }), "Delete Success"))
}

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(rename = "pageNum", default = "default_page_num")]
    pub page_num: i64,
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_num() -> i64 {
    1
}

fn default_page_size() -> i64 {
    crate::services::posts::DEFAULT_PAGE_SIZE
}

/// List posts newest first, with the total count
pub async fn page_list(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let service = PostService::new(state.repo.clone());
    let page = service.page(query.page_num, query.page_size).await?;

    Ok(success(page, "Success"))
}

/// Posts ranked by like count, with the total post count
pub async fn like_rank(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let service = PostService::new(state.repo.clone());
    let ranking = service.like_rank(query.page_num, query.page_size).await?;

    Ok(success(ranking, "Success"))
}

/// Get posts for a user
pub async fn get_user_posts(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new(state.repo.clone());
    let posts = service.user_posts(*user_id).await?;

    Ok(success(serde_json::json!({ "posts": posts }), "Success"))
}

/// Moderation: approve a pending post
pub async fn approve_post(
    state: web::Data<AppState>,
    admin: AdminUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new(state.repo.clone());
    let post = service.approve(*post_id).await?;

    tracing::info!(post_id = %post.id, admin_id = %admin.0.id, "post approved by admin");
    Ok(success(serde_json::json!({ "post": post }), "Post approved successfully"))
}
