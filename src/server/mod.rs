//! HTTP service
//!
//! Exposes the crawler as a JSON API. Each `POST /scrape` runs one crawl
//! in-process and answers with the same report the CLI prints.

mod handlers;

pub use handlers::status_for;

use crate::config::CrawlProfile;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state for the HTTP handlers
#[derive(Clone, Default)]
pub struct AppState {
    /// Deployment profile applied to every request
    pub profile: Arc<CrawlProfile>,

    /// SHA-256 of the profile file, when one was loaded
    pub profile_hash: Option<String>,
}

impl AppState {
    pub fn new(profile: CrawlProfile) -> Self {
        Self {
            profile: Arc::new(profile),
            profile_hash: None,
        }
    }

    /// Attaches the hash of the profile file this service was started with
    pub fn with_profile_hash(mut self, hash: impl Into<String>) -> Self {
        self.profile_hash = Some(hash.into());
        self
    }
}

/// Builds the service router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/scrape", post(handlers::scrape))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
