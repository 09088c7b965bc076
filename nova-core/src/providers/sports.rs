//! Sports scraper access.
//!
//! The scraper sits behind bot protection, so every request carries a
//! desktop browser `User-Agent` together with matching `Referer`/`Origin`.

use nova_config::SportsUpstreamConfig;
use serde_json::Value;
use tracing::instrument;

use crate::{
    models::Match,
    upstream::{UpstreamClient, UpstreamResult},
};

#[derive(Debug, Clone)]
pub struct SportsClient {
    upstream: UpstreamClient,
}

impl SportsClient {
    pub fn new(config: &SportsUpstreamConfig) -> UpstreamResult<Self> {
        let upstream = UpstreamClient::builder("sports", &config.base_url)
            .timeout(config.timeout)
            .default_header("user-agent", &config.user_agent)
            .default_header("referer", &config.referer)
            .default_header("origin", &config.origin)
            .build()?;
        Ok(Self { upstream })
    }

    /// GET `endpoint` (given as path segments) and return the body untouched.
    #[instrument(skip(self))]
    pub async fn proxy_request(&self, endpoint: &[&str]) -> UpstreamResult<Value> {
        self.upstream.get_json(endpoint, &[]).await
    }

    /// Live matches decoded for the landing rows.
    #[instrument(skip(self))]
    pub async fn live_matches(&self) -> UpstreamResult<Vec<Match>> {
        self.upstream.get_json(&["matches", "live"], &[]).await
    }
}
