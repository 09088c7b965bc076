use axum::http::{HeaderValue, Method, header::HeaderName};
use thiserror::Error;
use url::Url;

use crate::models::{AuthConfig, Config, CorsConfig, TokenMode};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("authentication secret {field} {reason}")]
    WeakSecret { field: &'static str, reason: String },
    #[error("CORS wildcard origins are not allowed when DEV_MODE is false")]
    DangerousCorsWildcard,
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
    #[error("invalid {upstream} base URL `{value}`")]
    InvalidUpstreamUrl {
        upstream: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if !config.dev_mode && config.cors.is_wildcard_included() {
        return Err(ConfigGuardRailError::DangerousCorsWildcard);
    }

    validate_cors(&config.cors, config.dev_mode)?;

    validate_upstream_url("metadata", &config.metadata_api.base_url)?;
    validate_upstream_url("metadata image", &config.metadata_api.image_base_url)?;
    validate_upstream_url("anime", &config.anime_api.base_url)?;
    validate_upstream_url("sports", &config.sports_api.base_url)?;

    enforce_secrets(&config.auth, &mut warnings)?;

    if config.metadata_api.api_key.is_none() {
        warnings.push_with_hint(
            "TMDB_API_KEY not set; metadata endpoints will return empty results",
            "Set TMDB_API_KEY or metadata.api_key in nova.toml",
        );
    }

    Ok(warnings)
}

fn enforce_secrets(
    auth: &AuthConfig,
    warnings: &mut ConfigWarnings,
) -> Result<(), ConfigGuardRailError> {
    const MIN_SECRET_LENGTH: usize = 32;

    match auth.token_mode {
        TokenMode::Signed => {
            if auth.is_default_token_key() {
                return Err(ConfigGuardRailError::WeakSecret {
                    field: "AUTH_TOKEN_KEY",
                    reason: "uses the default placeholder value".into(),
                });
            }
            if auth.token_key.len() < MIN_SECRET_LENGTH {
                return Err(ConfigGuardRailError::WeakSecret {
                    field: "AUTH_TOKEN_KEY",
                    reason: format!(
                        "must be at least {MIN_SECRET_LENGTH} characters"
                    ),
                });
            }
        }
        TokenMode::Mock => {
            warnings.push_with_hint(
                "AUTH_TOKEN_MODE is mock; session tokens are predictable",
                "Set AUTH_TOKEN_MODE=signed with a strong AUTH_TOKEN_KEY",
            );
        }
    }

    if auth.is_default_pepper() {
        warnings.push_with_hint(
            "AUTH_PASSWORD_PEPPER uses the default placeholder value",
            "Set AUTH_PASSWORD_PEPPER to a random string of 32+ characters",
        );
    }

    if let Some(seed) = &auth.seed_user
        && seed.username.trim().is_empty()
    {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "AUTH_SEED_USERNAME",
            reason: "must not be empty".into(),
        });
    }

    Ok(())
}

fn validate_upstream_url(
    upstream: &'static str,
    value: &str,
) -> Result<(), ConfigGuardRailError> {
    Url::parse(value).map(|_| ()).map_err(|source| {
        ConfigGuardRailError::InvalidUpstreamUrl {
            upstream,
            value: value.to_string(),
            source,
        }
    })
}

fn validate_cors(
    cors: &CorsConfig,
    dev_mode: bool,
) -> Result<(), ConfigGuardRailError> {
    if cors.allowed_origins.is_empty() && !dev_mode {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: "CORS_ALLOWED_ORIGINS must include at least one origin"
                .into(),
        });
    }

    for origin in &cors.allowed_origins {
        if origin.trim() == "*" {
            continue;
        }
        HeaderValue::from_str(origin).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid origin `{origin}` in CORS_ALLOWED_ORIGINS"
                ),
            }
        })?;
    }

    if cors.allowed_methods.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason:
                "CORS_ALLOWED_METHODS must include at least one HTTP method"
                    .into(),
        });
    }

    for method in &cors.allowed_methods {
        Method::from_bytes(method.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid HTTP method `{method}` in CORS_ALLOWED_METHODS"
                ),
            }
        })?;
    }

    for header in &cors.allowed_headers {
        HeaderName::from_bytes(header.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid header name `{header}` in CORS_ALLOWED_HEADERS"
                ),
            }
        })?;
    }

    Ok(())
}
