//! Shared HTTP plumbing for the third-party providers.

mod error;

pub use error::{Fallback, UpstreamError, UpstreamErrorKind, UpstreamResult};

use std::time::Duration;

use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// JSON GET client bound to one provider base URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    name: &'static str,
    http: Client,
    base_url: Url,
    default_query: Vec<(String, String)>,
}

#[derive(Debug)]
pub struct UpstreamClientBuilder {
    name: &'static str,
    base_url: String,
    timeout: Option<Duration>,
    headers: Vec<(&'static str, String)>,
    default_query: Vec<(String, String)>,
}

impl UpstreamClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn default_header(
        mut self,
        name: &'static str,
        value: impl Into<String>,
    ) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn default_query(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_query.push((key.into(), value.into()));
        self
    }

    pub fn build(self) -> UpstreamResult<UpstreamClient> {
        let base_url = Url::parse(&self.base_url).map_err(|_| {
            UpstreamError::InvalidBaseUrl {
                url: self.base_url.clone(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl { url: self.base_url });
        }

        let mut headers = HeaderMap::new();
        for (name, value) in self.headers {
            let header_name = HeaderName::from_static(name);
            let header_value = HeaderValue::from_str(&value).map_err(|_| {
                UpstreamError::InvalidConfig {
                    detail: format!("invalid value for header {name}"),
                }
            })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|err| UpstreamError::InvalidConfig {
            detail: err.to_string(),
        })?;

        Ok(UpstreamClient {
            name: self.name,
            http,
            base_url,
            default_query: self.default_query,
        })
    }
}

impl UpstreamClient {
    /// `name` tags log lines and error endpoints; `header` names passed to
    /// [`UpstreamClientBuilder::default_header`] must be lowercase.
    pub fn builder(
        name: &'static str,
        base_url: impl Into<String>,
    ) -> UpstreamClientBuilder {
        UpstreamClientBuilder {
            name,
            base_url: base_url.into(),
            timeout: None,
            headers: Vec::new(),
            default_query: Vec::new(),
        }
    }

    /// Join `segments` onto the base URL. Each segment is percent-encoded on
    /// its own, so a `/` inside a caller-supplied id stays inside that
    /// segment.
    pub fn endpoint_url<S: AsRef<str>>(
        &self,
        segments: &[S],
        query: &[(&str, String)],
    ) -> UpstreamResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                UpstreamError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                }
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment.as_ref());
            }
        }

        if !self.default_query.is_empty() || !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.default_query {
                pairs.append_pair(key, value);
            }
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// GET `segments` and decode the JSON body as `T`.
    pub async fn get_json<T, S>(
        &self,
        segments: &[S],
        query: &[(&str, String)],
    ) -> UpstreamResult<T>
    where
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        let url = self.endpoint_url(segments, query)?;
        let endpoint = format!("{}:{}", self.name, url.path());
        debug!(upstream = self.name, path = url.path(), "upstream request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| UpstreamError::from_reqwest(&endpoint, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| UpstreamError::from_reqwest(&endpoint, err))?;

        serde_json::from_slice(&body).map_err(|err| UpstreamError::Decode {
            endpoint,
            detail: err.to_string(),
        })
    }
}
