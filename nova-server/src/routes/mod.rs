//! Route table. Paths use axum's `{param}` syntax.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    handlers::{anime, auth, browse, health, metadata, sports},
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health))
        .nest("/api", api_router())
}

fn api_router() -> Router<AppState> {
    Router::new()
        .merge(anime_routes())
        .nest("/auth", auth_routes())
        .nest("/sports", sports_routes())
        .nest("/metadata", metadata_routes())
        .route("/browse/home", get(browse::home))
}

fn anime_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(anime::home))
        .route("/trending", get(anime::trending))
        .route("/popular", get(anime::popular))
        .route("/search/{query}", get(anime::search))
        .route("/info/{id}", get(anime::info))
        .route("/watch/{episode_id}", get(anime::watch))
        .route("/servers/{episode_id}", get(anime::servers))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
}

fn sports_routes() -> Router<AppState> {
    Router::new()
        .route("/matches/live", get(sports::live))
        .route("/matches/all-today", get(sports::all_today))
        .route("/matches/all/popular", get(sports::all_popular))
        .route("/matches/{sport}", get(sports::by_sport))
        .route("/sports", get(sports::sports))
        .route("/stream/{source}/{id}", get(sports::stream))
}

fn metadata_routes() -> Router<AppState> {
    Router::new()
        .route("/trending/movies", get(metadata::trending_movies))
        .route("/trending/series", get(metadata::trending_series))
        .route("/popular/movies", get(metadata::popular_movies))
        .route("/popular/series", get(metadata::popular_series))
        .route("/now-playing/movies", get(metadata::now_playing_movies))
        .route("/top-rated/movies", get(metadata::top_rated_movies))
        .route("/top-rated/series", get(metadata::top_rated_series))
        .route("/movie/{id}", get(metadata::movie_details))
        .route("/movie/{id}/videos", get(metadata::movie_videos))
        .route("/series/{id}", get(metadata::series_details))
        .route("/series/{id}/videos", get(metadata::series_videos))
        .route(
            "/series/{id}/season/{season}",
            get(metadata::season_episodes),
        )
        .route("/search/movies", get(metadata::search_movies))
        .route("/search/series", get(metadata::search_series))
        .route("/search/multi", get(metadata::search_multi))
        .route("/discover/movies/{genre_id}", get(metadata::movies_by_genre))
        .route("/discover/series/{genre_id}", get(metadata::series_by_genre))
        .route("/anime/trending", get(metadata::trending_anime))
        .route("/anime/popular", get(metadata::popular_anime))
}
