use std::sync::Arc;

use anyhow::{Context, Result};
use nova_config::Config;
use nova_core::{
    auth::{AuthCrypto, AuthService},
    content::ContentNormalizer,
    providers::{ExtractorClient, SportsClient, TmdbClient},
};
use tracing::{info, warn};

use super::app_state::AppState;

/// Build every upstream client and the auth service from configuration.
pub async fn wire_app_state(config: Arc<Config>) -> Result<AppState> {
    let auth_crypto = Arc::new(
        AuthCrypto::new(
            config.auth.password_pepper.as_bytes(),
            config.auth.token_key.as_bytes(),
        )
        .context("failed to initialize authentication crypto helpers")?,
    );
    wire_app_state_with_crypto(config, auth_crypto).await
}

/// Same as [`wire_app_state`] with a caller-built [`AuthCrypto`], so tests
/// can hash with cheap Argon2 parameters.
pub async fn wire_app_state_with_crypto(
    config: Arc<Config>,
    auth_crypto: Arc<AuthCrypto>,
) -> Result<AppState> {
    let metadata = &config.metadata_api;
    match &metadata.api_key {
        Some(key) => info!("TMDB API key configured (length: {})", key.len()),
        None => {
            warn!("TMDB_API_KEY not set - metadata requests will be rejected upstream")
        }
    }

    let tmdb = TmdbClient::new(metadata)
        .context("failed to build metadata client")?;
    let anime = ExtractorClient::new(&config.anime_api)
        .context("failed to build anime extractor client")?;
    let sports = SportsClient::new(&config.sports_api)
        .context("failed to build sports client")?;

    let auth = AuthService::with_crypto(&config.auth, auth_crypto)
        .await
        .context("failed to initialize auth service")?;
    info!(
        token_mode = %config.auth.token_mode,
        users = auth.user_count().await.unwrap_or_default(),
        "auth service ready"
    );

    let normalizer = ContentNormalizer::new(metadata.image_base_url.clone());

    Ok(AppState {
        config,
        tmdb: Arc::new(tmdb),
        anime: Arc::new(anime),
        sports: Arc::new(sports),
        auth: Arc::new(auth),
        normalizer: Arc::new(normalizer),
    })
}
