use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util::{non_empty, parse_csv};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    #[serde(default)]
    pub metadata: FileMetadataConfig,
    #[serde(default)]
    pub anime: FileAnimeConfig,
    #[serde(default)]
    pub sports: FileSportsConfig,
    #[serde(default)]
    pub auth: FileAuthConfig,
    pub dev_mode: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_headers: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileMetadataConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Humantime duration, e.g. `"15s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAnimeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileSportsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_pepper: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_user: Option<FileSeedUserConfig>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileSeedUserConfig {
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn default_seed_enabled() -> bool {
    true
}

/// Environment-derived configuration values. Ports, flags, durations and
/// token modes are kept raw so the loader can report invalid values with
/// context.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<String>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub cors_allowed_methods: Option<Vec<String>>,
    pub cors_allowed_headers: Option<Vec<String>>,
    pub dev_mode: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub tmdb_image_base_url: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub tmdb_language: Option<String>,
    pub tmdb_timeout: Option<String>,
    pub anime_base_url: Option<String>,
    pub anime_timeout: Option<String>,
    pub sports_base_url: Option<String>,
    pub sports_referer: Option<String>,
    pub sports_origin: Option<String>,
    pub sports_user_agent: Option<String>,
    pub sports_timeout: Option<String>,
    pub auth_password_pepper: Option<String>,
    pub auth_token_key: Option<String>,
    pub auth_token_mode: Option<String>,
    pub seed_username: Option<String>,
    pub seed_password: Option<String>,
    pub seed_email: Option<String>,
    pub seed_disabled: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).and_then(non_empty);

        Self {
            config_path: var("NOVA_CONFIG_PATH").map(PathBuf::from),
            server_host: var("SERVER_HOST"),
            server_port: var("SERVER_PORT"),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_csv(&raw)),
            cors_allowed_methods: var("CORS_ALLOWED_METHODS")
                .map(|raw| parse_csv(&raw)),
            cors_allowed_headers: var("CORS_ALLOWED_HEADERS")
                .map(|raw| parse_csv(&raw)),
            dev_mode: var("DEV_MODE"),

            tmdb_base_url: var("TMDB_BASE_URL"),
            tmdb_image_base_url: var("TMDB_IMAGE_BASE_URL"),
            tmdb_api_key: var("TMDB_API_KEY"),
            tmdb_language: var("TMDB_LANGUAGE"),
            tmdb_timeout: var("TMDB_TIMEOUT"),

            anime_base_url: var("ANIME_API_BASE_URL"),
            anime_timeout: var("ANIME_API_TIMEOUT"),

            sports_base_url: var("SPORTS_API_BASE_URL"),
            sports_referer: var("SPORTS_API_REFERER"),
            sports_origin: var("SPORTS_API_ORIGIN"),
            sports_user_agent: var("SPORTS_API_USER_AGENT"),
            sports_timeout: var("SPORTS_API_TIMEOUT"),

            auth_password_pepper: var("AUTH_PASSWORD_PEPPER"),
            auth_token_key: var("AUTH_TOKEN_KEY"),
            auth_token_mode: var("AUTH_TOKEN_MODE"),
            seed_username: var("AUTH_SEED_USERNAME"),
            seed_password: var("AUTH_SEED_PASSWORD"),
            seed_email: var("AUTH_SEED_EMAIL"),
            seed_disabled: var("AUTH_SEED_DISABLED"),
        }
    }
}
