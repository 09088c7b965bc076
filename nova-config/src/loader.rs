use once_cell::sync::Lazy;
use std::{fs, path::PathBuf, time::Duration};
use thiserror::Error;

use crate::{
    constants::*,
    models::{
        AnimeUpstreamConfig, AuthConfig, Config, ConfigMetadata, CorsConfig,
        MetadataUpstreamConfig, SeedUserConfig, ServerConfig,
        SportsUpstreamConfig, TokenMode,
        sources::{EnvConfig, FileConfig},
    },
    util::{parse_bool, parse_duration},
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![PathBuf::from("nova.toml"), PathBuf::from("config/nova.toml")]
});

#[derive(Debug, Default, Clone)]
struct ConfigLoaderOptions {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    /// Read this file instead of looking for `.env` in the working
    /// directory.
    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env` (if present) into the process environment, then resolve
    /// the configuration from the file and the environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Resolve the configuration against an already gathered environment.
    /// The process environment and `.env` files are not consulted.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) = compose_config(file_config, env, config_path)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let mut source = ConfigPathSource::default();

        if let Some(explicit) = &self.options.config_path {
            source.explicit = Some(explicit.clone());
        } else if let Some(from_env) = &env.config_path {
            source.env = Some(from_env.clone());
        } else {
            source.default = DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
                .cloned();
        }

        let Some((path, provenance)) = source.resolved_path() else {
            return Ok((None, None));
        };

        if !path.exists() {
            if provenance.is_explicit() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| {
                ConfigLoadError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;

        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if config_path.is_none() {
        warnings.push_with_hint(
            "No nova.toml detected; using defaults and environment variables",
            "Create nova.toml or point NOVA_CONFIG_PATH at a configuration file",
        );
    }

    let FileConfig {
        server: file_server,
        cors: file_cors,
        metadata: file_metadata,
        anime: file_anime,
        sports: file_sports,
        auth: file_auth,
        dev_mode: file_dev_mode,
    } = file_config.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: match env.server_port {
            Some(raw) => parse_env_value("SERVER_PORT", raw, |value| {
                value.trim().parse::<u16>().ok()
            })?,
            None => file_server.port.unwrap_or(DEFAULT_PORT),
        },
    };

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .or(file_cors.allowed_origins)
            .unwrap_or_else(|| to_owned_list(DEFAULT_CORS_ORIGINS)),
        allowed_methods: env
            .cors_allowed_methods
            .or(file_cors.allowed_methods)
            .unwrap_or_else(|| to_owned_list(DEFAULT_CORS_METHODS)),
        allowed_headers: env
            .cors_allowed_headers
            .or(file_cors.allowed_headers)
            .unwrap_or_else(|| to_owned_list(DEFAULT_CORS_HEADERS)),
    };

    let dev_mode = match env.dev_mode {
        Some(raw) => parse_env_value("DEV_MODE", raw, parse_bool)?,
        None => file_dev_mode.unwrap_or(false),
    };

    let metadata_api = MetadataUpstreamConfig {
        base_url: env
            .tmdb_base_url
            .or(file_metadata.base_url)
            .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
        image_base_url: env
            .tmdb_image_base_url
            .or(file_metadata.image_base_url)
            .unwrap_or_else(|| DEFAULT_TMDB_IMAGE_BASE_URL.to_string()),
        api_key: env
            .tmdb_api_key
            .or(file_metadata.api_key)
            .filter(|key| !key.trim().is_empty()),
        language: env
            .tmdb_language
            .or(file_metadata.language)
            .unwrap_or_else(|| DEFAULT_TMDB_LANGUAGE.to_string()),
        timeout: resolve_duration(
            "TMDB_TIMEOUT",
            env.tmdb_timeout.or(file_metadata.timeout),
            DEFAULT_TMDB_TIMEOUT,
        )?,
    };

    let anime_api = AnimeUpstreamConfig {
        base_url: env
            .anime_base_url
            .or(file_anime.base_url)
            .unwrap_or_else(|| DEFAULT_ANIME_BASE_URL.to_string()),
        timeout: resolve_duration(
            "ANIME_API_TIMEOUT",
            env.anime_timeout.or(file_anime.timeout),
            DEFAULT_ANIME_TIMEOUT,
        )?,
    };

    let sports_api = SportsUpstreamConfig {
        base_url: env
            .sports_base_url
            .or(file_sports.base_url)
            .unwrap_or_else(|| DEFAULT_SPORTS_BASE_URL.to_string()),
        referer: env
            .sports_referer
            .or(file_sports.referer)
            .unwrap_or_else(|| DEFAULT_SPORTS_REFERER.to_string()),
        origin: env
            .sports_origin
            .or(file_sports.origin)
            .unwrap_or_else(|| DEFAULT_SPORTS_ORIGIN.to_string()),
        user_agent: env
            .sports_user_agent
            .or(file_sports.user_agent)
            .unwrap_or_else(|| DEFAULT_SPORTS_USER_AGENT.to_string()),
        timeout: resolve_duration(
            "SPORTS_API_TIMEOUT",
            env.sports_timeout.or(file_sports.timeout),
            DEFAULT_SPORTS_TIMEOUT,
        )?,
    };

    let token_mode = match env.auth_token_mode.or(file_auth.token_mode) {
        Some(raw) => raw
            .parse::<TokenMode>()
            .map_err(|reason| ConfigLoadError::InvalidTokenMode { reason })?,
        None => TokenMode::default(),
    };

    let file_seed_enabled =
        file_auth.seed_user.as_ref().is_none_or(|seed| seed.enabled);
    let file_seed = file_auth.seed_user.unwrap_or_default();
    let seed_enabled = match env.seed_disabled {
        Some(raw) => !parse_env_value("AUTH_SEED_DISABLED", raw, parse_bool)?,
        None => file_seed_enabled,
    };
    let seed_user = seed_enabled.then(|| SeedUserConfig {
        username: env
            .seed_username
            .or(file_seed.username)
            .unwrap_or_else(|| DEFAULT_SEED_USERNAME.to_string()),
        password: env
            .seed_password
            .or(file_seed.password)
            .unwrap_or_else(|| DEFAULT_SEED_PASSWORD.to_string()),
        email: env
            .seed_email
            .or(file_seed.email)
            .unwrap_or_else(|| DEFAULT_SEED_EMAIL.to_string()),
    });

    let auth = AuthConfig {
        password_pepper: env
            .auth_password_pepper
            .or(file_auth.password_pepper)
            .unwrap_or_else(|| DEFAULT_PASSWORD_PEPPER.to_string()),
        token_key: env
            .auth_token_key
            .or(file_auth.token_key)
            .unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_string()),
        token_mode,
        seed_user,
    };

    let config = Config {
        server,
        cors,
        dev_mode,
        metadata_api,
        anime_api,
        sports_api,
        auth,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    };

    let guard_warnings = validation::apply_guard_rails(&config)?;
    warnings.extend(guard_warnings);

    Ok((config, warnings))
}

fn resolve_duration(
    key: &'static str,
    raw: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigLoadError> {
    match raw {
        Some(value) => parse_duration(&value)
            .ok_or(ConfigLoadError::InvalidDuration { key, value }),
        None => Ok(default),
    }
}

fn parse_env_value<T>(
    key: &'static str,
    value: String,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, ConfigLoadError> {
    parse(&value).ok_or(ConfigLoadError::InvalidValue { key, value })
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid duration `{value}` for {key}")]
    InvalidDuration { key: &'static str, value: String },
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid AUTH_TOKEN_MODE: {reason}")]
    InvalidTokenMode { reason: String },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug, Default)]
struct ConfigPathSource {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl ConfigPathSource {
    fn resolved_path(&self) -> Option<(PathBuf, ConfigPathProvenance)> {
        if let Some(path) = &self.explicit {
            return Some((path.clone(), ConfigPathProvenance::Explicit));
        }
        if let Some(path) = &self.env {
            return Some((path.clone(), ConfigPathProvenance::Env));
        }
        self.default
            .as_ref()
            .map(|path| (path.clone(), ConfigPathProvenance::Default))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigPathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigPathProvenance {
    fn is_explicit(self) -> bool {
        matches!(
            self,
            ConfigPathProvenance::Explicit | ConfigPathProvenance::Env
        )
    }
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}
