//! Normalization of provider payloads into [`ContentItem`] cards.

use chrono::{DateTime, Utc};

use crate::{
    models::{AnimeResult, ContentItem, Match, TmdbMovie, TmdbSeries},
    providers::metadata::{image_url, movie_genre_name, series_genre_name},
};

const POSTER_SIZE: &str = "w500";
const UNKNOWN_YEAR: &str = "N/A";

const POPULAR_MATCH_RATING: u32 = 95;
const REGULAR_MATCH_RATING: u32 = 80;

const SPORT_IMAGES: &[(&str, &str)] = &[
    ("football", "https://images.unsplash.com/photo-1508098682722-e99c43a406b2?w=400&q=80"),
    ("basketball", "https://images.unsplash.com/photo-1546519638-68e109498ffc?w=400&q=80"),
    ("tennis", "https://images.unsplash.com/photo-1554068865-24cecd4e34b8?w=400&q=80"),
    ("f1", "https://images.unsplash.com/photo-1541889766-64879f48c8e4?w=400&q=80"),
    ("motorsport", "https://images.unsplash.com/photo-1541889766-64879f48c8e4?w=400&q=80"),
    ("cricket", "https://images.unsplash.com/photo-1531415074968-036ba1b575da?w=400&q=80"),
    ("golf", "https://images.unsplash.com/photo-1535131749006-b7f58c99034b?w=400&q=80"),
    ("boxing", "https://images.unsplash.com/photo-1549719386-74dfcbf7dbed?w=400&q=80"),
    ("mma", "https://images.unsplash.com/photo-1549719386-74dfcbf7dbed?w=400&q=80"),
];
const TEAM_AVATAR_BASE: &str = "https://ui-avatars.com/api/";
const DEFAULT_SPORT_IMAGE: &str =
    "https://images.unsplash.com/photo-1461896836934-0c0f71d2?w=400&q=80";

/// Converts provider records into cards. Holds the image base so poster
/// URLs match the configured metadata provider.
#[derive(Debug, Clone)]
pub struct ContentNormalizer {
    image_base_url: String,
}

impl ContentNormalizer {
    pub fn new(image_base_url: impl Into<String>) -> Self {
        Self {
            image_base_url: image_base_url.into(),
        }
    }

    pub fn movie(&self, movie: &TmdbMovie) -> ContentItem {
        let badge = movie
            .genre_ids
            .iter()
            .find_map(|id| movie_genre_name(*id))
            .map(str::to_string)
            .or_else(|| {
                movie
                    .genres
                    .as_ref()
                    .and_then(|genres| genres.first())
                    .map(|genre| genre.name.clone())
            });

        ContentItem {
            id: movie.id.to_string(),
            title: movie.title.clone(),
            image: image_url(
                &self.image_base_url,
                movie.poster_path.as_deref(),
                POSTER_SIZE,
            ),
            rating: Some(percent_rating(movie.vote_average)),
            kind: Some("Movie".to_string()),
            year: Some(year_of(movie.release_date.as_deref())),
            badge,
            is_live: None,
        }
    }

    pub fn series(&self, series: &TmdbSeries) -> ContentItem {
        let badge = series
            .genre_ids
            .iter()
            .find_map(|id| series_genre_name(*id))
            .map(str::to_string);

        ContentItem {
            id: series.id.to_string(),
            title: series.name.clone(),
            image: image_url(
                &self.image_base_url,
                series.poster_path.as_deref(),
                POSTER_SIZE,
            ),
            rating: Some(percent_rating(series.vote_average)),
            kind: Some("TV".to_string()),
            year: Some(year_of(series.first_air_date.as_deref())),
            badge,
            is_live: None,
        }
    }

    pub fn anime(&self, anime: &AnimeResult) -> ContentItem {
        anime_item(anime)
    }

    pub fn sports_match(&self, item: &Match, now: DateTime<Utc>) -> ContentItem {
        match_item(item, now)
    }
}

pub fn anime_item(anime: &AnimeResult) -> ContentItem {
    let info = anime.tv_info.as_ref();
    let kind = info
        .and_then(|info| info.show_type.clone())
        .filter(|kind| !kind.is_empty())
        .unwrap_or_else(|| "TV".to_string());
    let badge = info.and_then(|info| {
        if info.dub.is_some_and(|n| n > 0) {
            Some("DUB".to_string())
        } else if info.sub.is_some_and(|n| n > 0) {
            Some("SUB".to_string())
        } else {
            None
        }
    });

    ContentItem {
        id: anime.id.clone(),
        title: anime.title.clone(),
        image: anime.poster.clone(),
        rating: None,
        kind: Some(kind),
        year: None,
        badge,
        is_live: None,
    }
}

pub fn match_item(item: &Match, now: DateTime<Utc>) -> ContentItem {
    let is_live = item.is_live(now);
    ContentItem {
        id: item.id.clone(),
        title: item.title.clone(),
        image: match_poster_url(item),
        rating: Some(if item.is_popular() {
            POPULAR_MATCH_RATING
        } else {
            REGULAR_MATCH_RATING
        }),
        kind: Some("Sports".to_string()),
        year: None,
        badge: is_live.then(|| "LIVE".to_string()),
        is_live: Some(is_live),
    }
}

/// Poster for a match: an absolute poster URL from the scraper, then a
/// generated card from both team badges, then a stock image for the sport.
pub fn match_poster_url(item: &Match) -> String {
    if let Some(poster) = item
        .poster
        .as_deref()
        .filter(|p| p.starts_with("http://") || p.starts_with("https://"))
    {
        return poster.to_string();
    }

    if let Some(teams) = &item.teams
        && let (Some(home), Some(away)) = (&teams.home, &teams.away)
        && home.badge.is_some()
        && away.badge.is_some()
    {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("name", &format!("{} {}", home.name, away.name))
            .append_pair("background", "0D0D11")
            .append_pair("color", "fff")
            .append_pair("size", "500")
            .finish();
        return format!("{TEAM_AVATAR_BASE}?{query}");
    }

    let category = item.category.to_ascii_lowercase();
    SPORT_IMAGES
        .iter()
        .find(|(sport, _)| *sport == category)
        .map(|(_, image)| *image)
        .unwrap_or(DEFAULT_SPORT_IMAGE)
        .to_string()
}

fn percent_rating(vote_average: f64) -> u32 {
    (vote_average * 10.0).round().clamp(0.0, 100.0) as u32
}

fn year_of(date: Option<&str>) -> String {
    date.and_then(|d| d.split('-').next())
        .filter(|year| !year.is_empty())
        .unwrap_or(UNKNOWN_YEAR)
        .to_string()
}
