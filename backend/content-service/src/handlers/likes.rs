/// Like handlers
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::response::{success, success_empty};
use crate::services::LikeService;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

pub async fn like_post(
    state: web::Data<AppState>,
    user: AuthUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    LikeService::new(state.repo.clone())
        .like(user.id, *post_id)
        .await?;
    Ok(success_empty("Liked"))
}

pub async fn unlike_post(
    state: web::Data<AppState>,
    user: AuthUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    LikeService::new(state.repo.clone())
        .unlike(user.id, *post_id)
        .await?;
    Ok(success_empty("Unliked"))
}

pub async fn is_liked(
    state: web::Data<AppState>,
    user: AuthUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let liked = LikeService::new(state.repo.clone())
        .is_liked(user.id, *post_id)
        .await?;
    Ok(success(serde_json::json!({ "isLiked": liked }), "Success"))
}
