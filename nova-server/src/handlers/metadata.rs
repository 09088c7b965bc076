//! `/api/metadata` routes.
//!
//! Every upstream failure collapses to `[]` for lists and `null` for single
//! lookups, answered with HTTP 200. A path id that is not a TMDB id never
//! reaches the upstream.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use nova_core::{
    Fallback,
    models::{
        MultiSearchResult, TmdbEpisode, TmdbMovie, TmdbSeries,
        TmdbSeriesDetails, TmdbVideo,
    },
};
use serde::Deserialize;
use tracing::debug;

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    /// Requested page, `1` when absent or not a positive number.
    fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    query: Option<String>,
}

impl SearchQuery {
    fn term(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

fn parse_id(raw: &str) -> Option<u64> {
    let id = raw.trim().parse().ok();
    if id.is_none() {
        debug!(id = raw, "ignoring non-numeric metadata id");
    }
    id
}

pub async fn trending_movies(State(state): State<AppState>) -> Json<Vec<TmdbMovie>> {
    Json(state.tmdb.trending_movies().await.or_empty("trending_movies"))
}

pub async fn trending_series(State(state): State<AppState>) -> Json<Vec<TmdbSeries>> {
    Json(state.tmdb.trending_series().await.or_empty("trending_series"))
}

pub async fn popular_movies(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<Vec<TmdbMovie>> {
    Json(
        state
            .tmdb
            .popular_movies(query.page())
            .await
            .or_empty("popular_movies"),
    )
}

pub async fn popular_series(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<Vec<TmdbSeries>> {
    Json(
        state
            .tmdb
            .popular_series(query.page())
            .await
            .or_empty("popular_series"),
    )
}

pub async fn now_playing_movies(State(state): State<AppState>) -> Json<Vec<TmdbMovie>> {
    Json(
        state
            .tmdb
            .now_playing_movies()
            .await
            .or_empty("now_playing_movies"),
    )
}

pub async fn top_rated_movies(State(state): State<AppState>) -> Json<Vec<TmdbMovie>> {
    Json(state.tmdb.top_rated_movies().await.or_empty("top_rated_movies"))
}

pub async fn top_rated_series(State(state): State<AppState>) -> Json<Vec<TmdbSeries>> {
    Json(state.tmdb.top_rated_series().await.or_empty("top_rated_series"))
}

pub async fn movie_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Option<TmdbMovie>> {
    let Some(id) = parse_id(&id) else {
        return Json(None);
    };
    Json(state.tmdb.movie_details(id).await.or_none("movie_details"))
}

pub async fn series_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Option<TmdbSeriesDetails>> {
    let Some(id) = parse_id(&id) else {
        return Json(None);
    };
    Json(state.tmdb.series_details(id).await.or_none("series_details"))
}

pub async fn season_episodes(
    State(state): State<AppState>,
    Path((id, season)): Path<(String, String)>,
) -> Json<Vec<TmdbEpisode>> {
    let (Some(id), Ok(season)) = (parse_id(&id), season.trim().parse::<u32>())
    else {
        return Json(Vec::new());
    };
    Json(
        state
            .tmdb
            .season_episodes(id, season)
            .await
            .or_empty("season_episodes"),
    )
}

pub async fn movie_videos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<TmdbVideo>> {
    let Some(id) = parse_id(&id) else {
        return Json(Vec::new());
    };
    Json(state.tmdb.movie_videos(id).await.or_empty("movie_videos"))
}

pub async fn series_videos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<TmdbVideo>> {
    let Some(id) = parse_id(&id) else {
        return Json(Vec::new());
    };
    Json(state.tmdb.series_videos(id).await.or_empty("series_videos"))
}

pub async fn search_movies(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<TmdbMovie>> {
    let Some(term) = query.term() else {
        return Json(Vec::new());
    };
    Json(state.tmdb.search_movies(term).await.or_empty("search_movies"))
}

pub async fn search_series(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<TmdbSeries>> {
    let Some(term) = query.term() else {
        return Json(Vec::new());
    };
    Json(state.tmdb.search_series(term).await.or_empty("search_series"))
}

pub async fn search_multi(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<MultiSearchResult>> {
    let Some(term) = query.term() else {
        return Json(Vec::new());
    };
    Json(state.tmdb.search_multi(term).await.or_empty("search_multi"))
}

pub async fn movies_by_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Json<Vec<TmdbMovie>> {
    let Ok(genre_id) = genre_id.trim().parse::<u32>() else {
        return Json(Vec::new());
    };
    Json(
        state
            .tmdb
            .movies_by_genre(genre_id, query.page())
            .await
            .or_empty("movies_by_genre"),
    )
}

pub async fn series_by_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Json<Vec<TmdbSeries>> {
    let Ok(genre_id) = genre_id.trim().parse::<u32>() else {
        return Json(Vec::new());
    };
    Json(
        state
            .tmdb
            .series_by_genre(genre_id, query.page())
            .await
            .or_empty("series_by_genre"),
    )
}

pub async fn trending_anime(State(state): State<AppState>) -> Json<Vec<TmdbMovie>> {
    Json(state.tmdb.trending_anime().await.or_empty("trending_anime"))
}

pub async fn popular_anime(State(state): State<AppState>) -> Json<Vec<TmdbSeries>> {
    Json(state.tmdb.popular_anime().await.or_empty("popular_anime"))
}
