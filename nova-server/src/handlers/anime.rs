//! Anime routes mounted directly under `/api`. Extractor failures answer
//! 500 with `{"error": message}`.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use nova_core::providers::fetch_home;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, infra::errors::AppResult};

#[derive(Debug, Deserialize)]
pub struct WatchQuery {
    server: Option<String>,
}

pub async fn home(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let home = fetch_home(state.anime.as_ref()).await?;
    Ok(Json(json!({ "results": home })))
}

pub async fn trending(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let results = state.anime.trending().await?;
    Ok(Json(json!({ "results": results })))
}

pub async fn popular(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let results = state.anime.most_popular().await?;
    Ok(Json(json!({ "results": results })))
}

pub async fn search(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> AppResult<Json<Value>> {
    let results = state.anime.search(&query).await?;
    Ok(Json(json!({ "results": results })))
}

pub async fn info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    Ok(Json(state.anime.info(&id).await?))
}

pub async fn watch(
    State(state): State<AppState>,
    Path(episode_id): Path<String>,
    Query(query): Query<WatchQuery>,
) -> AppResult<Json<Value>> {
    let sources = state
        .anime
        .episode_sources(&episode_id, query.server.as_deref())
        .await?;
    Ok(Json(json!({ "results": sources })))
}

/// Server listing is not offered by the extractor.
pub async fn servers(Path(_episode_id): Path<String>) -> Json<Value> {
    Json(json!({ "results": [] }))
}
