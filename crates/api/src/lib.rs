//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the in-memory store
//! - Rate locking against the injected rate source
//! - A uniform JSON error body for every failure

pub mod routes;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use fiado_core::rate::RateSource;
use fiado_shared::AppError;
use fiado_store::Store;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger and quote store.
    pub store: Arc<Store>,
    /// Reference exchange rate source.
    pub rates: Arc<dyn RateSource>,
}

/// Wrapper turning an [`AppError`] into a JSON error response.
///
/// Handlers return `Result<_, ApiError>` and use `?`; the status code and
/// machine-readable code come straight from the error taxonomy.
pub struct ApiError(AppError);

impl<E: Into<AppError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %err, code = err.error_code(), "request failed");
        }
        (
            status,
            Json(json!({
                "error": err.error_code(),
                "message": err.to_string(),
            })),
        )
            .into_response()
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
