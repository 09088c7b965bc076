use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3030;

pub const DEFAULT_CORS_ORIGINS: &[&str] =
    &["http://localhost:5173", "http://localhost:3000"];
pub const DEFAULT_CORS_METHODS: &[&str] = &["GET", "POST", "OPTIONS"];
pub const DEFAULT_CORS_HEADERS: &[&str] = &["Content-Type", "Authorization"];

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_TMDB_LANGUAGE: &str = "en-US";
pub const DEFAULT_TMDB_TIMEOUT: Duration = Duration::from_secs(15);

pub const DEFAULT_ANIME_BASE_URL: &str = "http://localhost:3000/anime/hianime";
pub const DEFAULT_ANIME_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_SPORTS_BASE_URL: &str = "https://streamed.pk/api";
pub const DEFAULT_SPORTS_REFERER: &str = "https://streamed.pk/";
pub const DEFAULT_SPORTS_ORIGIN: &str = "https://streamed.pk";
pub const DEFAULT_SPORTS_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_SPORTS_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_PASSWORD_PEPPER: &str = "change-me-password-pepper";
pub const DEFAULT_TOKEN_KEY: &str = "change-me-token-hmac-key";

pub const DEFAULT_SEED_USERNAME: &str = "user";
pub const DEFAULT_SEED_PASSWORD: &str = "password";
pub const DEFAULT_SEED_EMAIL: &str = "user@nova.com";
