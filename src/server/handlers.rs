//! Request handlers for the HTTP service.

use crate::config::{CrawlConfig, CrawlRequest};
use crate::crawler::run_crawl;
use crate::output::CrawlReport;
use crate::server::AppState;
use crate::HarvestError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// Maps a crawl-level fault onto an HTTP status
pub fn status_for(error: &HarvestError) -> StatusCode {
    match error {
        HarvestError::SeedUnreachable { .. } => StatusCode::OK,
        HarvestError::Config(_) | HarvestError::Url(_) => StatusCode::UNPROCESSABLE_ENTITY,
        HarvestError::CrawlTimeout { .. } => StatusCode::REQUEST_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "site-harvest" }))
}

// GET /
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Site Harvest API",
        "version": env!("CARGO_PKG_VERSION"),
        "profileHash": state.profile_hash,
        "endpoints": {
            "health": "/health",
            "scrape": "/scrape"
        }
    }))
}

// POST /scrape
pub async fn scrape(
    State(state): State<AppState>,
    payload: Result<Json<CrawlRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return detail(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    let config = match CrawlConfig::new(&request, &state.profile) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!("Rejected scrape request for {}: {}", request.url, e);
            return detail(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
        }
    };

    tracing::info!(
        "Scrape requested for {} (depth {}, pages {})",
        config.seed_url,
        config.max_depth,
        config.max_pages
    );

    match run_crawl(config).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) if e.is_crawl_reported() => {
            (StatusCode::OK, Json(CrawlReport::from_error(&e))).into_response()
        }
        Err(e) => {
            tracing::error!("Scrape of {} failed: {}", request.url, e);
            detail(status_for(&e), e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    #[test]
    fn test_status_mapping() {
        let seed = HarvestError::SeedUnreachable {
            url: "https://example.com/".to_string(),
            reason: "connection failed".to_string(),
        };
        assert_eq!(status_for(&seed), StatusCode::OK);
        assert_eq!(
            status_for(&HarvestError::CrawlTimeout { seconds: 300 }),
            StatusCode::REQUEST_TIMEOUT
        );
        assert_eq!(
            status_for(&HarvestError::Config(ConfigError::Validation("x".into()))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&HarvestError::CrawlFailure("worker failed".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
