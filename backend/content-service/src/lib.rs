/// Content Service Library
///
/// Image posts with categories, comments and likes. Every new post with an
/// image gets a best-effort AI critique, produced in the background and stored
/// as a comment from the reserved system author.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the route table
/// - `models`: Data structures for users, categories, posts, comments, likes
/// - `services`: Business logic layer
/// - `repository`: Persistence seam and its PostgreSQL implementation
/// - `jobs`: Background annotation queue and workers
/// - `auth`: Token issuance and password hashing
/// - `middleware`: HTTP middleware for authentication
/// - `error`: Error types and handling
/// - `response`: Uniform response envelope
/// - `config`: Configuration management
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod response;
pub mod services;
pub mod state;

pub use config::{Config, Settings};
pub use error::{AppError, Result};
pub use state::AppState;
