/// Comment handlers
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::response::success;
use crate::services::CommentService;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

pub async fn add_comment(
    state: web::Data<AppState>,
    user: AuthUser,
    post_id: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new(state.repo.clone());
    let comment = service.add_comment(*post_id, user.id, &req.content).await?;

    Ok(success(
        serde_json::json!({ "comment": comment }),
        "Comment added successfully",
    ))
}

pub async fn list_comments(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new(state.repo.clone());
    let comments = service.list_comments(*post_id).await?;

    Ok(success(
        serde_json::json!({ "comments": comments }),
        "Comments retrieved successfully",
    ))
}
