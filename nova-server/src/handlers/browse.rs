//! Landing page rows.
//!
//! Every source is fetched concurrently and settles on its own: a failing
//! upstream is logged and leaves its rows empty, and the endpoint still
//! answers 200.

use axum::{Json, extract::State};
use chrono::Utc;
use nova_core::{
    Fallback,
    models::{AnimeHome, AnimeResult, ContentItem, TmdbMovie, TmdbSeries},
    providers::fetch_home,
};
use serde::Serialize;

use crate::AppState;

const ROW_LIMIT: usize = 10;
const LIVE_ROW_LIMIT: usize = 8;
const GENRE_ACTION: u32 = 28;

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseHome {
    pub trending_anime: Vec<ContentItem>,
    pub popular_anime: Vec<ContentItem>,
    pub latest_anime: Vec<ContentItem>,
    pub trending_movies: Vec<ContentItem>,
    pub top_rated_movies: Vec<ContentItem>,
    pub now_playing_movies: Vec<ContentItem>,
    pub action_movies: Vec<ContentItem>,
    pub trending_series: Vec<ContentItem>,
    pub top_rated_series: Vec<ContentItem>,
    pub popular_series: Vec<ContentItem>,
    pub live_sports: Vec<ContentItem>,
}

fn row<T>(
    items: Vec<T>,
    limit: usize,
    to_card: impl Fn(&T) -> ContentItem,
) -> Vec<ContentItem> {
    items.iter().take(limit).map(to_card).collect()
}

pub async fn home(State(state): State<AppState>) -> Json<BrowseHome> {
    let tmdb = &state.tmdb;
    let (
        anime,
        trending_movies,
        trending_series,
        live_matches,
        top_rated_movies,
        now_playing_movies,
        top_rated_series,
        popular_series,
        action_movies,
    ) = tokio::join!(
        fetch_home(state.anime.as_ref()),
        tmdb.trending_movies(),
        tmdb.trending_series(),
        state.sports.live_matches(),
        tmdb.top_rated_movies(),
        tmdb.now_playing_movies(),
        tmdb.top_rated_series(),
        tmdb.popular_series(1),
        tmdb.movies_by_genre(GENRE_ACTION, 1),
    );

    let normalizer = state.normalizer.as_ref();
    let movie = |m: &TmdbMovie| normalizer.movie(m);
    let series = |s: &TmdbSeries| normalizer.series(s);
    let anime_card = |a: &AnimeResult| normalizer.anime(a);
    let now = Utc::now();

    let AnimeHome {
        trending,
        latest_episodes,
        most_popular,
        ..
    } = anime.or_empty("browse_anime_home");

    Json(BrowseHome {
        trending_anime: row(trending, ROW_LIMIT, anime_card),
        popular_anime: row(most_popular, ROW_LIMIT, anime_card),
        latest_anime: row(latest_episodes, ROW_LIMIT, anime_card),
        trending_movies: row(
            trending_movies.or_empty("browse_trending_movies"),
            ROW_LIMIT,
            movie,
        ),
        top_rated_movies: row(
            top_rated_movies.or_empty("browse_top_rated_movies"),
            ROW_LIMIT,
            movie,
        ),
        now_playing_movies: row(
            now_playing_movies.or_empty("browse_now_playing_movies"),
            ROW_LIMIT,
            movie,
        ),
        action_movies: row(
            action_movies.or_empty("browse_action_movies"),
            ROW_LIMIT,
            movie,
        ),
        trending_series: row(
            trending_series.or_empty("browse_trending_series"),
            ROW_LIMIT,
            series,
        ),
        top_rated_series: row(
            top_rated_series.or_empty("browse_top_rated_series"),
            ROW_LIMIT,
            series,
        ),
        popular_series: row(
            popular_series.or_empty("browse_popular_series"),
            ROW_LIMIT,
            series,
        ),
        live_sports: row(
            live_matches.or_empty("browse_live_sports"),
            LIVE_ROW_LIMIT,
            |m| normalizer.sports_match(m, now),
        ),
    })
}
