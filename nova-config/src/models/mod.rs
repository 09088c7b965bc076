pub mod sources;

use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PASSWORD_PEPPER, DEFAULT_TOKEN_KEY};

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub dev_mode: bool,
    pub metadata_api: MetadataUpstreamConfig,
    pub anime_api: AnimeUpstreamConfig,
    pub sports_api: SportsUpstreamConfig,
    pub auth: AuthConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
}

impl CorsConfig {
    pub fn is_wildcard_included(&self) -> bool {
        self.allowed_origins
            .iter()
            .any(|origin| origin.trim() == "*")
    }
}

/// TMDB-compatible metadata provider.
#[derive(Debug, Clone)]
pub struct MetadataUpstreamConfig {
    pub base_url: String,
    pub image_base_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub timeout: Duration,
}

/// Anime extraction service exposing a REST facade.
#[derive(Debug, Clone)]
pub struct AnimeUpstreamConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Sports scraping API. The browser headers are sent on every request.
#[derive(Debug, Clone)]
pub struct SportsUpstreamConfig {
    pub base_url: String,
    pub referer: String,
    pub origin: String,
    pub user_agent: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub password_pepper: String,
    pub token_key: String,
    pub token_mode: TokenMode,
    pub seed_user: Option<SeedUserConfig>,
}

impl AuthConfig {
    pub fn is_default_pepper(&self) -> bool {
        self.password_pepper == DEFAULT_PASSWORD_PEPPER
    }

    pub fn is_default_token_key(&self) -> bool {
        self.token_key == DEFAULT_TOKEN_KEY
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUserConfig {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// How session tokens are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenMode {
    /// Fixed login token and timestamp-derived registration tokens.
    #[default]
    Mock,
    /// Random tokens carrying an HMAC-SHA-256 signature.
    Signed,
}

impl FromStr for TokenMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(TokenMode::Mock),
            "signed" => Ok(TokenMode::Signed),
            other => Err(format!("unknown token mode '{other}'")),
        }
    }
}

impl fmt::Display for TokenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenMode::Mock => f.write_str("mock"),
            TokenMode::Signed => f.write_str("signed"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
