mod common;

use std::{collections::HashMap, time::Duration};

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
};
use common::{UNREACHABLE, metadata_config, spawn_upstream};
use nova_core::{
    Fallback, UpstreamError, UpstreamErrorKind, providers::TmdbClient,
};
use serde_json::{Value, json};

async fn echo_query(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "page": 1,
        "results": [{
            "id": 550,
            "title": "Fight Club",
            "vote_average": 8.4,
            "seen_query": params,
        }]
    }))
}

fn tmdb_router() -> Router {
    Router::new()
        .route("/3/trending/movie/week", get(echo_query))
        .route("/3/discover/tv", get(echo_query))
        .route(
            "/3/tv/{id}/season/{season}",
            get(|Path((id, season)): Path<(u64, u32)>| async move {
                if season == 1 {
                    Json(json!({
                        "id": id,
                        "episodes": [{"id": 1, "name": "Pilot", "episode_number": 1, "season_number": 1}]
                    }))
                } else {
                    Json(json!({"id": id}))
                }
            }),
        )
        .route(
            "/3/movie/{id}",
            get(|Path(id): Path<u64>| async move {
                if id == 404 {
                    Err(StatusCode::NOT_FOUND)
                } else {
                    Ok(Json(json!({"id": id, "title": "Found", "runtime": 120})))
                }
            }),
        )
        .route("/3/movie/now_playing", get(|| async { "<html>not json</html>" }))
        .route(
            "/3/movie/top_rated",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({"results": []}))
            }),
        )
}

#[tokio::test]
async fn every_request_carries_api_key_and_language() {
    let base = spawn_upstream(tmdb_router()).await;
    let client = TmdbClient::new(&metadata_config(&format!("{base}/3"))).unwrap();

    let movies = client.trending_movies().await.expect("trending");
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Fight Club");
    let seen = &movies[0].extra["seen_query"];
    assert_eq!(seen["api_key"], json!("test-key"));
    assert_eq!(seen["language"], json!("en-US"));
}

#[tokio::test]
async fn anime_discovery_filters_japanese_animation() {
    let base = spawn_upstream(tmdb_router()).await;
    let client = TmdbClient::new(&metadata_config(&format!("{base}/3"))).unwrap();

    let series = client.popular_anime().await.expect("anime");
    let seen = &series[0].extra["seen_query"];
    assert_eq!(seen["with_genres"], json!("16"));
    assert_eq!(seen["with_original_language"], json!("ja"));
    assert_eq!(seen["sort_by"], json!("popularity.desc"));
}

#[tokio::test]
async fn season_without_episodes_is_empty() {
    let base = spawn_upstream(tmdb_router()).await;
    let client = TmdbClient::new(&metadata_config(&format!("{base}/3"))).unwrap();

    let episodes = client.season_episodes(1399, 1).await.unwrap();
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0].name, "Pilot");

    assert!(client.season_episodes(1399, 9).await.unwrap().is_empty());
}

#[tokio::test]
async fn failures_are_classified_by_kind() {
    let base = spawn_upstream(tmdb_router()).await;
    let mut config = metadata_config(&format!("{base}/3"));
    config.timeout = Duration::from_millis(100);
    let client = TmdbClient::new(&config).unwrap();

    let err = client.movie_details(404).await.expect_err("missing");
    assert!(matches!(err, UpstreamError::Status { status: 404, .. }));

    let err = client.now_playing_movies().await.expect_err("html body");
    assert_eq!(err.kind(), UpstreamErrorKind::Decode);

    let err = client.top_rated_movies().await.expect_err("slow upstream");
    assert_eq!(err.kind(), UpstreamErrorKind::Timeout);

    let details = client.movie_details(27205).await.expect("found");
    assert_eq!(details.runtime, Some(120));
}

#[tokio::test]
async fn unreachable_upstream_collapses_to_empty_values() {
    let client = TmdbClient::new(&metadata_config(UNREACHABLE)).unwrap();

    let err = client.trending_series().await.expect_err("unreachable");
    assert_eq!(err.kind(), UpstreamErrorKind::Transport);

    assert!(client.search_movies("matrix").await.or_empty("search").is_empty());
    assert!(client.series_details(1).await.or_none("details").is_none());
}

#[tokio::test]
async fn error_endpoints_never_leak_the_api_key() {
    let client = TmdbClient::new(&metadata_config(UNREACHABLE)).unwrap();
    let err = client.popular_movies(2).await.expect_err("unreachable");
    assert!(!err.to_string().contains("test-key"));
}
