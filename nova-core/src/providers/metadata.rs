//! TMDB-compatible metadata client.

use nova_config::MetadataUpstreamConfig;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::{
    models::{
        MultiSearchResult, Paged, TmdbEpisode, TmdbMovie, TmdbSeries,
        TmdbSeriesDetails, TmdbVideo, tmdb::SeasonBody,
    },
    upstream::{UpstreamClient, UpstreamResult},
};

pub const PLACEHOLDER_POSTER: &str =
    "https://via.placeholder.com/500x750?text=No+Image";

pub const GENRE_ANIMATION: u32 = 16;
pub const GENRE_ACTION: u32 = 28;

const POPULARITY_DESC: &str = "popularity.desc";

/// Movie genre ids to display names.
pub const MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Acción"),
    (12, "Aventura"),
    (16, "Animación"),
    (35, "Comedia"),
    (80, "Crimen"),
    (99, "Documental"),
    (18, "Drama"),
    (10751, "Familia"),
    (14, "Fantasía"),
    (36, "Historia"),
    (27, "Terror"),
    (10402, "Música"),
    (9648, "Misterio"),
    (10749, "Romance"),
    (878, "Sci-Fi"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "Guerra"),
    (37, "Western"),
];

/// Series genre ids to display names.
pub const SERIES_GENRES: &[(u32, &str)] = &[
    (10759, "Acción"),
    (16, "Animación"),
    (35, "Comedia"),
    (80, "Crimen"),
    (99, "Documental"),
    (18, "Drama"),
    (10751, "Familia"),
    (10762, "Kids"),
    (9648, "Misterio"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War"),
    (37, "Western"),
];

pub fn movie_genre_name(id: u32) -> Option<&'static str> {
    lookup_genre(MOVIE_GENRES, id)
}

pub fn series_genre_name(id: u32) -> Option<&'static str> {
    lookup_genre(SERIES_GENRES, id)
}

fn lookup_genre(table: &[(u32, &'static str)], id: u32) -> Option<&'static str> {
    table
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
}

/// Build a poster URL, or the placeholder image when the item has no art.
pub fn image_url(image_base_url: &str, path: Option<&str>, size: &str) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => {
            format!("{}/{size}{path}", image_base_url.trim_end_matches('/'))
        }
        None => PLACEHOLDER_POSTER.to_string(),
    }
}

pub fn backdrop_url(
    image_base_url: &str,
    path: Option<&str>,
    size: &str,
) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|path| format!("{}/{size}{path}", image_base_url.trim_end_matches('/')))
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    upstream: UpstreamClient,
}

impl TmdbClient {
    pub fn new(config: &MetadataUpstreamConfig) -> UpstreamResult<Self> {
        let mut builder = UpstreamClient::builder("tmdb", &config.base_url)
            .timeout(config.timeout);
        if let Some(api_key) = &config.api_key {
            builder = builder.default_query("api_key", api_key);
        }
        let upstream = builder.default_query("language", &config.language).build()?;

        Ok(Self { upstream })
    }

    async fn list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> UpstreamResult<Vec<T>> {
        self.upstream
            .get_json::<Paged<T>, _>(segments, query)
            .await
            .map(|paged| paged.results)
    }

    #[instrument(skip(self))]
    pub async fn trending_movies(&self) -> UpstreamResult<Vec<TmdbMovie>> {
        self.list(&["trending", "movie", "week"], &[]).await
    }

    #[instrument(skip(self))]
    pub async fn trending_series(&self) -> UpstreamResult<Vec<TmdbSeries>> {
        self.list(&["trending", "tv", "week"], &[]).await
    }

    #[instrument(skip(self))]
    pub async fn popular_movies(&self, page: u32) -> UpstreamResult<Vec<TmdbMovie>> {
        self.list(&["movie", "popular"], &[("page", page.to_string())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn popular_series(&self, page: u32) -> UpstreamResult<Vec<TmdbSeries>> {
        self.list(&["tv", "popular"], &[("page", page.to_string())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn now_playing_movies(&self) -> UpstreamResult<Vec<TmdbMovie>> {
        self.list(&["movie", "now_playing"], &[]).await
    }

    #[instrument(skip(self))]
    pub async fn top_rated_movies(&self) -> UpstreamResult<Vec<TmdbMovie>> {
        self.list(&["movie", "top_rated"], &[]).await
    }

    #[instrument(skip(self))]
    pub async fn top_rated_series(&self) -> UpstreamResult<Vec<TmdbSeries>> {
        self.list(&["tv", "top_rated"], &[]).await
    }

    #[instrument(skip(self))]
    pub async fn movie_details(&self, id: u64) -> UpstreamResult<TmdbMovie> {
        self.upstream
            .get_json(&["movie".to_string(), id.to_string()], &[])
            .await
    }

    #[instrument(skip(self))]
    pub async fn series_details(&self, id: u64) -> UpstreamResult<TmdbSeriesDetails> {
        self.upstream
            .get_json(&["tv".to_string(), id.to_string()], &[])
            .await
    }

    /// Episodes of one season; a body without `episodes` yields an empty list.
    #[instrument(skip(self))]
    pub async fn season_episodes(
        &self,
        id: u64,
        season: u32,
    ) -> UpstreamResult<Vec<TmdbEpisode>> {
        let segments = [
            "tv".to_string(),
            id.to_string(),
            "season".to_string(),
            season.to_string(),
        ];
        self.upstream
            .get_json::<SeasonBody, _>(&segments, &[])
            .await
            .map(|body| body.episodes.unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub async fn search_movies(&self, query: &str) -> UpstreamResult<Vec<TmdbMovie>> {
        self.list(&["search", "movie"], &[("query", query.to_string())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn search_series(&self, query: &str) -> UpstreamResult<Vec<TmdbSeries>> {
        self.list(&["search", "tv"], &[("query", query.to_string())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn search_multi(
        &self,
        query: &str,
    ) -> UpstreamResult<Vec<MultiSearchResult>> {
        self.list(&["search", "multi"], &[("query", query.to_string())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn movie_videos(&self, id: u64) -> UpstreamResult<Vec<TmdbVideo>> {
        let id = id.to_string();
        self.list(&["movie", id.as_str(), "videos"], &[]).await
    }

    #[instrument(skip(self))]
    pub async fn series_videos(&self, id: u64) -> UpstreamResult<Vec<TmdbVideo>> {
        let id = id.to_string();
        self.list(&["tv", id.as_str(), "videos"], &[]).await
    }

    #[instrument(skip(self))]
    pub async fn movies_by_genre(
        &self,
        genre_id: u32,
        page: u32,
    ) -> UpstreamResult<Vec<TmdbMovie>> {
        self.list(
            &["discover", "movie"],
            &[
                ("with_genres", genre_id.to_string()),
                ("page", page.to_string()),
                ("sort_by", POPULARITY_DESC.to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn series_by_genre(
        &self,
        genre_id: u32,
        page: u32,
    ) -> UpstreamResult<Vec<TmdbSeries>> {
        self.list(
            &["discover", "tv"],
            &[
                ("with_genres", genre_id.to_string()),
                ("page", page.to_string()),
                ("sort_by", POPULARITY_DESC.to_string()),
            ],
        )
        .await
    }

    /// Japanese animation films, most popular first.
    #[instrument(skip(self))]
    pub async fn trending_anime(&self) -> UpstreamResult<Vec<TmdbMovie>> {
        self.list(&["discover", "movie"], &anime_discovery_query())
            .await
    }

    /// Japanese animated series, most popular first.
    #[instrument(skip(self))]
    pub async fn popular_anime(&self) -> UpstreamResult<Vec<TmdbSeries>> {
        self.list(&["discover", "tv"], &anime_discovery_query()).await
    }
}

fn anime_discovery_query() -> [(&'static str, String); 3] {
    [
        ("with_genres", GENRE_ANIMATION.to_string()),
        ("with_original_language", "ja".to_string()),
        ("sort_by", POPULARITY_DESC.to_string()),
    ]
}
