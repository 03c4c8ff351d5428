/// Configuration management for Content Service
///
/// Process settings come from environment variables (a `.env` file is loaded
/// first when present). Provider tuning such as `MaxTokens` lives in a small
/// JSON settings file read once at startup.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vision_client::{ProviderKind, VisionConfig};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// JWT key material
    pub jwt: JwtConfig,
    /// Uploaded image storage
    pub assets: AssetConfig,
    /// Background annotation
    pub annotation: AnnotationConfig,
    /// Vision provider
    pub vision: VisionProviderConfig,
    /// Admin account provisioned at startup, if configured
    pub admin: Option<AdminConfig>,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub private_key_pem: Option<String>,
    pub public_key_pem: Option<String>,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("private_key_pem", &self.private_key_pem.as_ref().map(|_| "<redacted>"))
            .field("public_key_pem", &self.public_key_pem.is_some())
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub telephone: String,
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("telephone", &self.telephone)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminConfig {
    /// Both variables set, or neither
    fn from_vars(telephone: Option<String>, password: Option<String>) -> Result<Option<Self>, String> {
        match (telephone, password) {
            (Some(telephone), Some(password)) => {
                if telephone.len() != 11 {
                    return Err("ADMIN_TELEPHONE must be 11 digits".to_string());
                }
                if password.len() < 6 {
                    return Err("ADMIN_PASSWORD must be at least 6 characters".to_string());
                }
                Ok(Some(Self {
                    telephone,
                    password,
                }))
            }
            (None, None) => Ok(None),
            _ => Err("ADMIN_TELEPHONE and ADMIN_PASSWORD must be set together".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Directory uploaded images are written to and served from
    pub dir: PathBuf,
    /// Upload size limit in bytes
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationConfig {
    pub queue_capacity: usize,
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionProviderConfig {
    pub provider: ProviderKind,
    /// Overrides the provider's default endpoint
    pub endpoint: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
    /// Name of the environment variable holding the provider API key
    pub api_key_env: String,
    /// JSON settings file (`{"MaxTokens": 300}`)
    pub settings_path: PathBuf,
}

/// Provider settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(rename = "MaxTokens")]
    pub max_tokens: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self { max_tokens: 300 }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read settings file {}: {}", path.display(), e))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("invalid settings JSON: {}", e))
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("CONTENT_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("CONTENT_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "*".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/sketchbook".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            jwt: JwtConfig {
                private_key_pem: std::env::var("JWT_PRIVATE_KEY_PEM").ok(),
                public_key_pem: std::env::var("JWT_PUBLIC_KEY_PEM").ok(),
            },
            assets: AssetConfig {
                dir: std::env::var("ASSET_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("assets/images")),
                max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10 * 1024 * 1024),
            },
            annotation: AnnotationConfig {
                queue_capacity: std::env::var("ANNOTATION_QUEUE_CAPACITY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(100),
                workers: std::env::var("ANNOTATION_WORKERS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(4),
            },
            vision: VisionProviderConfig {
                provider: match std::env::var("VISION_PROVIDER") {
                    Ok(value) => value.parse()?,
                    Err(_) => ProviderKind::Chat,
                },
                endpoint: std::env::var("VISION_ENDPOINT")
                    .ok()
                    .filter(|v| !v.trim().is_empty()),
                model: std::env::var("VISION_MODEL")
                    .unwrap_or_else(|_| vision_client::config::DEFAULT_MODEL.to_string()),
                timeout_secs: std::env::var("VISION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(vision_client::config::DEFAULT_TIMEOUT_SECS),
                api_key_env: std::env::var("VISION_API_KEY_ENV")
                    .unwrap_or_else(|_| "OPENAI_API_KEY".to_string()),
                settings_path: std::env::var("SETTINGS_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./config.json")),
            },
            admin: AdminConfig::from_vars(
                std::env::var("ADMIN_TELEPHONE").ok().filter(|v| !v.is_empty()),
                std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
            )?,
        })
    }

    /// Build the immutable vision client configuration
    pub fn vision_config(&self, settings: &Settings) -> VisionConfig {
        let vision = &self.vision;
        let mut config = VisionConfig::new(vision.provider, settings.max_tokens, &self.assets.dir)
            .with_model(vision.model.clone())
            .with_timeout(Duration::from_secs(vision.timeout_secs));

        if let Some(endpoint) = &vision.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        if let Ok(key) = std::env::var(&vision.api_key_env) {
            config = config.with_api_key(key);
        }

        config
    }
}
