#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use nova_config::{
    AnimeUpstreamConfig, MetadataUpstreamConfig, SportsUpstreamConfig,
};
use tokio::net::TcpListener;

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

/// An address nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

pub fn metadata_config(base_url: &str) -> MetadataUpstreamConfig {
    MetadataUpstreamConfig {
        base_url: base_url.to_string(),
        image_base_url: "https://image.tmdb.org/t/p".to_string(),
        api_key: Some("test-key".to_string()),
        language: "en-US".to_string(),
        timeout: Duration::from_secs(5),
    }
}

pub fn anime_config(base_url: &str) -> AnimeUpstreamConfig {
    AnimeUpstreamConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
    }
}

pub fn sports_config(base_url: &str) -> SportsUpstreamConfig {
    SportsUpstreamConfig {
        base_url: base_url.to_string(),
        referer: "https://streamed.pk/".to_string(),
        origin: "https://streamed.pk".to_string(),
        user_agent: "Mozilla/5.0 (test)".to_string(),
        timeout: Duration::from_secs(5),
    }
}
