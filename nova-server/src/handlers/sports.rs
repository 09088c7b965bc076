//! `/api/sports` routes: thin passthroughs to the sports scraper.
//!
//! Success answers 200 with the upstream JSON; any failure answers 500 with
//! an empty array.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::warn;

use crate::AppState;

async fn passthrough(state: &AppState, endpoint: &[&str]) -> Response {
    match state.sports.proxy_request(endpoint).await {
        Ok(body) => Json(body).into_response(),
        Err(err) => {
            warn!(
                endpoint = %endpoint.join("/"),
                kind = %err.kind(),
                error = %err,
                "sports proxy failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!([]))).into_response()
        }
    }
}

pub async fn live(State(state): State<AppState>) -> Response {
    passthrough(&state, &["matches", "live"]).await
}

pub async fn all_today(State(state): State<AppState>) -> Response {
    passthrough(&state, &["matches", "all-today"]).await
}

pub async fn all_popular(State(state): State<AppState>) -> Response {
    passthrough(&state, &["matches", "all", "popular"]).await
}

pub async fn sports(State(state): State<AppState>) -> Response {
    passthrough(&state, &["sports"]).await
}

pub async fn by_sport(
    State(state): State<AppState>,
    Path(sport): Path<String>,
) -> Response {
    passthrough(&state, &["matches", &sport]).await
}

pub async fn stream(
    State(state): State<AppState>,
    Path((source, id)): Path<(String, String)>,
) -> Response {
    passthrough(&state, &["stream", &source, &id]).await
}
