/// Shared application state handed to every handler
use crate::auth::JwtKeys;
use crate::jobs::AnnotationQueue;
use crate::repository::ContentRepository;
use crate::services::AssetStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ContentRepository>,
    /// `None` when no vision provider is configured
    pub annotations: Option<AnnotationQueue>,
    pub jwt: Arc<JwtKeys>,
    pub assets: Arc<AssetStore>,
}
