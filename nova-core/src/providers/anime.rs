//! Anime extractor access.
//!
//! [`AnimeProvider`] is the seam the HTTP layer talks to; [`ExtractorClient`]
//! implements it against an extractor service that exposes a REST facade.

use async_trait::async_trait;
use nova_config::AnimeUpstreamConfig;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::{
    models::{AnimeHome, AnimeResult, anime::ResultsEnvelope},
    upstream::{UpstreamClient, UpstreamResult},
};

#[async_trait]
pub trait AnimeProvider: Send + Sync {
    async fn trending(&self) -> UpstreamResult<Vec<AnimeResult>>;
    async fn spotlight(&self) -> UpstreamResult<Vec<AnimeResult>>;
    async fn most_popular(&self) -> UpstreamResult<Vec<AnimeResult>>;
    async fn recent_episodes(&self) -> UpstreamResult<Vec<AnimeResult>>;
    async fn search(&self, query: &str) -> UpstreamResult<Vec<AnimeResult>>;
    /// Details for one title, returned as the extractor sent them.
    async fn info(&self, id: &str) -> UpstreamResult<Value>;
    /// Streaming sources for one episode, optionally from a named server.
    async fn episode_sources(
        &self,
        episode_id: &str,
        server: Option<&str>,
    ) -> UpstreamResult<Value>;
}

/// Build the landing payload.
///
/// Trending and spotlight are both required; either failure fails the call.
/// The two secondary rows degrade instead: latest episodes fall back to the
/// trending list and most popular falls back to empty.
pub async fn fetch_home<P>(provider: &P) -> UpstreamResult<AnimeHome>
where
    P: AnimeProvider + ?Sized,
{
    let (trending, spotlights) =
        tokio::try_join!(provider.trending(), provider.spotlight())?;
    let (recent, popular) =
        tokio::join!(provider.recent_episodes(), provider.most_popular());

    let latest_episodes = match recent {
        Ok(items) => items,
        Err(err) => {
            warn!(kind = %err.kind(), error = %err, "recent episodes unavailable; reusing trending");
            trending.clone()
        }
    };
    let most_popular = match popular {
        Ok(items) => items,
        Err(err) => {
            warn!(kind = %err.kind(), error = %err, "most popular unavailable");
            Vec::new()
        }
    };

    Ok(AnimeHome {
        trending,
        spotlights,
        latest_episodes,
        most_popular,
    })
}

#[derive(Debug, Clone)]
pub struct ExtractorClient {
    upstream: UpstreamClient,
}

impl ExtractorClient {
    pub fn new(config: &AnimeUpstreamConfig) -> UpstreamResult<Self> {
        let upstream = UpstreamClient::builder("anime", &config.base_url)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { upstream })
    }

    async fn list(&self, segments: &[&str]) -> UpstreamResult<Vec<AnimeResult>> {
        self.upstream
            .get_json::<ResultsEnvelope<AnimeResult>, _>(segments, &[])
            .await
            .map(|envelope| envelope.results)
    }
}

#[async_trait]
impl AnimeProvider for ExtractorClient {
    #[instrument(skip(self))]
    async fn trending(&self) -> UpstreamResult<Vec<AnimeResult>> {
        self.list(&["trending"]).await
    }

    #[instrument(skip(self))]
    async fn spotlight(&self) -> UpstreamResult<Vec<AnimeResult>> {
        self.list(&["spotlight"]).await
    }

    #[instrument(skip(self))]
    async fn most_popular(&self) -> UpstreamResult<Vec<AnimeResult>> {
        self.list(&["most-popular"]).await
    }

    #[instrument(skip(self))]
    async fn recent_episodes(&self) -> UpstreamResult<Vec<AnimeResult>> {
        self.list(&["recent-episodes"]).await
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> UpstreamResult<Vec<AnimeResult>> {
        self.list(&[query]).await
    }

    #[instrument(skip(self))]
    async fn info(&self, id: &str) -> UpstreamResult<Value> {
        self.upstream
            .get_json(&["info"], &[("id", id.to_string())])
            .await
    }

    #[instrument(skip(self))]
    async fn episode_sources(
        &self,
        episode_id: &str,
        server: Option<&str>,
    ) -> UpstreamResult<Value> {
        let query: Vec<(&str, String)> = server
            .filter(|s| !s.is_empty())
            .map(|s| vec![("server", s.to_string())])
            .unwrap_or_default();
        self.upstream.get_json(&["watch", episode_id], &query).await
    }
}
