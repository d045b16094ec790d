use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::AppState;

use super::error::ApiError;
use super::models::{AskRequest, AskResponse, ErrorResponse, HealthResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "gemini-relay",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(payload) = payload?;
    let prompt = payload.prompt.as_deref().unwrap_or_default();

    let response = state.relay.submit_prompt(prompt).await?;

    Ok(Json(AskResponse { response }))
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found"))).into_response()
}
