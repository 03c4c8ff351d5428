/// Account service - registration, login, profile lookup and admin account
/// management
use crate::auth::{password, JwtKeys};
use crate::error::{AppError, Result};
use crate::models::{NewUser, User, UserDto, UserPage, UserUpdate, ADMIN_ROLE, DEFAULT_ROLE};
use crate::repository::ContentRepository;
use crate::services::paging::PageWindow;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

const GENERATED_NAME_LEN: usize = 10;
const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DEFAULT_USER_PAGE_SIZE: i64 = 10;

/// Account fields supplied by an admin, already validated for shape
#[derive(Debug, Clone)]
pub struct AccountInput {
    pub name: Option<String>,
    pub telephone: String,
    pub password: String,
    pub role: Option<String>,
}

pub struct UserService {
    repo: Arc<dyn ContentRepository>,
    jwt: Arc<JwtKeys>,
}

impl UserService {
    pub fn new(repo: Arc<dyn ContentRepository>, jwt: Arc<JwtKeys>) -> Self {
        Self { repo, jwt }
    }

    fn issue_token(&self, user: &User) -> Result<String> {
        self.jwt
            .issue_access_token(user)
            .map_err(|e| AppError::Internal(format!("token generation failed: {e}")))
    }

    /// Register and return an access token. A missing name is replaced by a
    /// random one.
    pub async fn register(&self, name: Option<&str>, telephone: &str, password: &str) -> Result<String> {
        let user = self
            .insert_account(name, telephone, password, DEFAULT_ROLE)
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        self.issue_token(&user)
    }

    async fn insert_account(
        &self,
        name: Option<&str>,
        telephone: &str,
        password: &str,
        role: &str,
    ) -> Result<User> {
        if self.repo.find_user_by_telephone(telephone).await?.is_some() {
            return Err(AppError::ValidationError("User exist".to_string()));
        }

        self.repo
            .create_user(NewUser {
                name: display_name(name),
                telephone: telephone.to_string(),
                password_hash: password::hash_password(password)?,
                role: role.to_string(),
            })
            .await
    }

    pub async fn login(&self, telephone: &str, password: &str) -> Result<String> {
        let user = self
            .repo
            .find_user_by_telephone(telephone)
            .await?
            .ok_or_else(|| AppError::ValidationError("User does not exist".to_string()))?;

        // System accounts have no password and can never log in
        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Wrong password".to_string()))?;

        if !password::verify_password(password, hash)? {
            return Err(AppError::BadRequest("Wrong password".to_string()));
        }

        self.issue_token(&user)
    }

    pub async fn info(&self, user_id: Uuid) -> Result<UserDto> {
        self.repo
            .find_user_by_id(user_id)
            .await?
            .as_ref()
            .map(UserDto::from)
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
    }

    // Admin account management

    /// Create an account with any assignable role
    pub async fn create_account(&self, input: AccountInput) -> Result<UserDto> {
        let role = assignable_role(input.role.as_deref())?;
        let user = self
            .insert_account(input.name.as_deref(), &input.telephone, &input.password, role)
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "account created by admin");
        Ok(UserDto::from(&user))
    }

    /// Replace an account's name, telephone, password and role
    pub async fn update_account(&self, user_id: Uuid, input: AccountInput) -> Result<UserDto> {
        let role = assignable_role(input.role.as_deref())?;

        if self.repo.find_user_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if let Some(owner) = self.repo.find_user_by_telephone(&input.telephone).await? {
            if owner.id != user_id {
                return Err(AppError::ValidationError(
                    "Telephone already in use by another user".to_string(),
                ));
            }
        }

        let user = self
            .repo
            .update_user(
                user_id,
                UserUpdate {
                    name: display_name(input.name.as_deref()),
                    telephone: input.telephone,
                    password_hash: password::hash_password(&input.password)?,
                    role: role.to_string(),
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!(user_id = %user.id, role = %user.role, "account updated by admin");
        Ok(UserDto::from(&user))
    }

    pub async fn delete_account(&self, user_id: Uuid) -> Result<()> {
        if !self.repo.delete_user(user_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        tracing::info!(user_id = %user_id, "account deleted by admin");
        Ok(())
    }

    pub async fn get_account(&self, user_id: Uuid) -> Result<UserDto> {
        self.repo
            .find_user_by_id(user_id)
            .await?
            .as_ref()
            .map(UserDto::from)
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))
    }

    /// Newest-first page of accounts
    pub async fn list_accounts(&self, page_num: i64, page_size: i64) -> Result<UserPage> {
        let window = PageWindow::new(page_num, page_size)?;

        let data = self
            .repo
            .list_users(window.page_size, window.offset)
            .await?
            .iter()
            .map(UserDto::from)
            .collect();
        let total = self.repo.count_users().await?;

        Ok(UserPage {
            data,
            total,
            total_pages: window.page_count(total),
            page_num: window.page_num,
            page_size: window.page_size,
        })
    }

    /// Make sure the account with `telephone` exists and holds the admin role.
    ///
    /// An existing account keeps its name and password; only its role changes.
    pub async fn ensure_admin(&self, telephone: &str, password: &str) -> Result<UserDto> {
        let user = match self.repo.find_user_by_telephone(telephone).await? {
            Some(user) if user.is_admin() => user,
            Some(user) => {
                let password_hash = match user.password_hash.clone() {
                    Some(hash) => hash,
                    None => password::hash_password(password)?,
                };
                let promoted = self
                    .repo
                    .update_user(
                        user.id,
                        UserUpdate {
                            name: user.name.clone(),
                            telephone: telephone.to_string(),
                            password_hash,
                            role: ADMIN_ROLE.to_string(),
                        },
                    )
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
                tracing::info!(user_id = %promoted.id, "existing account promoted to admin");
                promoted
            }
            None => {
                let created = self
                    .insert_account(None, telephone, password, ADMIN_ROLE)
                    .await?;
                tracing::info!(user_id = %created.id, "admin account created");
                created
            }
        };

        Ok(UserDto::from(&user))
    }
}

/// Roles an admin may hand out. The system author role is never assignable.
fn assignable_role(role: Option<&str>) -> Result<&'static str> {
    match role.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(DEFAULT_ROLE),
        Some(r) if r == DEFAULT_ROLE => Ok(DEFAULT_ROLE),
        Some(r) if r == ADMIN_ROLE => Ok(ADMIN_ROLE),
        Some(other) => Err(AppError::ValidationError(format!("Unknown role '{}'", other))),
    }
}

fn display_name(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => random_name(GENERATED_NAME_LEN),
    }
}

fn random_name(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| NAME_ALPHABET[rng.gen_range(0..NAME_ALPHABET.len())] as char)
        .collect()
}
