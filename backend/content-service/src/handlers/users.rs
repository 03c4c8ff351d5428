/// Admin account management handlers
use crate::error::Result;
use crate::middleware::AdminUser;
use crate::response::{success, success_empty};
use crate::services::users::DEFAULT_USER_PAGE_SIZE;
use crate::services::{AccountInput, UserService};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AccountRequest {
    #[validate(length(max = 50, message = "name must be at most 50 characters"))]
    pub name: Option<String>,
    #[validate(length(equal = 11, message = "telephone must be 11 digits"))]
    pub telephone: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    pub role: Option<String>,
}

impl From<AccountRequest> for AccountInput {
    fn from(req: AccountRequest) -> Self {
        Self {
            name: req.name,
            telephone: req.telephone,
            password: req.password,
            role: req.role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserPageParams {
    #[serde(rename = "pageNum", default = "default_page_num")]
    pub page_num: i64,
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_num() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_USER_PAGE_SIZE
}

pub async fn create_user(
    state: web::Data<AppState>,
    admin: AdminUser,
    req: web::Json<AccountRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let service = UserService::new(state.repo.clone(), state.jwt.clone());
    let user = service.create_account(req.into()).await?;

    tracing::debug!(admin_id = %admin.0.id, user_id = %user.id, "admin created account");
    Ok(success(serde_json::json!({ "user": user }), "User created successfully"))
}

pub async fn update_user(
    state: web::Data<AppState>,
    _admin: AdminUser,
    user_id: web::Path<Uuid>,
    req: web::Json<AccountRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let service = UserService::new(state.repo.clone(), state.jwt.clone());
    let user = service.update_account(*user_id, req.into()).await?;

    Ok(success(serde_json::json!({ "user": user }), "User updated successfully"))
}

pub async fn delete_user(
    state: web::Data<AppState>,
    _admin: AdminUser,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    UserService::new(state.repo.clone(), state.jwt.clone())
        .delete_account(*user_id)
        .await?;
    Ok(success_empty("User deleted successfully"))
}

pub async fn list_users(
    state: web::Data<AppState>,
    _admin: AdminUser,
    query: web::Query<UserPageParams>,
) -> Result<HttpResponse> {
    let service = UserService::new(state.repo.clone(), state.jwt.clone());
    let page = service.list_accounts(query.page_num, query.page_size).await?;

    Ok(success(page, "Success"))
}

pub async fn get_user(
    state: web::Data<AppState>,
    _admin: AdminUser,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = UserService::new(state.repo.clone(), state.jwt.clone());
    let user = service.get_account(*user_id).await?;

    Ok(success(serde_json::json!({ "user": user }), "Success"))
}
