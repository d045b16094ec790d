mod error;
mod handlers;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use error::ApiError;
#[allow(unused_imports)]
pub use handlers::{ask, health, home, not_found};
pub use models::{AskRequest, AskResponse, ErrorResponse, HealthResponse};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/ask", post(ask))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
