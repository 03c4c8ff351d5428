/// Account handlers: register, login, current user
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::response::success;
use crate::services::UserService;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(max = 50, message = "name must be at most 50 characters"))]
    pub name: Option<String>,
    #[validate(length(equal = 11, message = "telephone must be 11 digits"))]
    pub telephone: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(equal = 11, message = "telephone must be 11 digits"))]
    pub telephone: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = UserService::new(state.repo.clone(), state.jwt.clone());
    let token = service
        .register(req.name.as_deref(), &req.telephone, &req.password)
        .await?;

    Ok(success(serde_json::json!({ "token": token }), "Register Success"))
}

pub async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> Result<HttpResponse> {
    req.validate()?;

    let service = UserService::new(state.repo.clone(), state.jwt.clone());
    let token = service.login(&req.telephone, &req.password).await?;

    Ok(success(serde_json::json!({ "token": token }), "Login Success"))
}

pub async fn info(state: web::Data<AppState>, user: AuthUser) -> Result<HttpResponse> {
    let service = UserService::new(state.repo.clone(), state.jwt.clone());
    let user = service.info(user.id).await?;

    Ok(success(serde_json::json!({ "user": user }), "Success"))
}
