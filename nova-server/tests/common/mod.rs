#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use anyhow::{Result, anyhow};
use axum::{Router, http::HeaderValue};
use axum_test::TestServer;
use nova_config::{
    AnimeUpstreamConfig, AuthConfig, Config, ConfigMetadata, CorsConfig,
    MetadataUpstreamConfig, SeedUserConfig, ServerConfig,
    SportsUpstreamConfig, TokenMode,
};
use nova_core::auth::{AuthCrypto, crypto::minimal_params};
use nova_server::infra::{app::create_app, startup::wire_app_state_with_crypto};
use tokio::net::TcpListener;

/// An address nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Serve `router` on an ephemeral localhost port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake upstream");
    });
    format!("http://{addr}")
}

/// Base URLs for the three providers.
#[derive(Debug, Clone)]
pub struct Upstreams {
    pub tmdb: String,
    pub anime: String,
    pub sports: String,
}

impl Upstreams {
    pub fn unreachable() -> Self {
        Self {
            tmdb: UNREACHABLE.to_string(),
            anime: UNREACHABLE.to_string(),
            sports: UNREACHABLE.to_string(),
        }
    }
}

pub fn test_config(upstreams: &Upstreams, token_mode: TokenMode) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".into()],
            allowed_methods: vec!["GET".into(), "POST".into(), "OPTIONS".into()],
            allowed_headers: vec!["Content-Type".into(), "Authorization".into()],
        },
        dev_mode: false,
        metadata_api: MetadataUpstreamConfig {
            base_url: upstreams.tmdb.clone(),
            image_base_url: "https://image.tmdb.org/t/p".into(),
            api_key: Some("test-key".into()),
            language: "en-US".into(),
            timeout: Duration::from_secs(5),
        },
        anime_api: AnimeUpstreamConfig {
            base_url: upstreams.anime.clone(),
            timeout: Duration::from_secs(5),
        },
        sports_api: SportsUpstreamConfig {
            base_url: upstreams.sports.clone(),
            referer: "https://streamed.pk/".into(),
            origin: "https://streamed.pk".into(),
            user_agent: "Mozilla/5.0 (test)".into(),
            timeout: Duration::from_secs(5),
        },
        auth: AuthConfig {
            password_pepper: "test-pepper".into(),
            token_key: "test-token-key-with-enough-bytes-000".into(),
            token_mode,
            seed_user: Some(SeedUserConfig {
                username: "user".into(),
                password: "password".into(),
                email: "user@nova.com".into(),
            }),
        },
        metadata: ConfigMetadata::default(),
    }
}

pub async fn build_test_server(config: Config) -> Result<TestServer> {
    let crypto = Arc::new(
        AuthCrypto::with_params(
            config.auth.password_pepper.as_bytes(),
            config.auth.token_key.as_bytes(),
            minimal_params(),
        )
        .map_err(|err| anyhow!(err.to_string()))?,
    );
    let state = wire_app_state_with_crypto(Arc::new(config), crypto).await?;
    TestServer::new(create_app(state)).map_err(|err| anyhow!(err.to_string()))
}

/// Server whose upstreams all refuse connections.
pub async fn offline_server(token_mode: TokenMode) -> Result<TestServer> {
    build_test_server(test_config(&Upstreams::unreachable(), token_mode)).await
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("header value")
}

