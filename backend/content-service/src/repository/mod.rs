/// Persistence layer for content-service
///
/// `ContentRepository` is the seam between services and storage. The Postgres
/// implementation is used in production; tests provide their own.
mod postgres_repository;
mod r#trait;

pub use postgres_repository::PostgresContentRepository;
pub use r#trait::ContentRepository;
