//! Cached HTTP session
//!
//! This module wraps a reqwest client together with the on-disk response
//! cache. Every GET goes through the cache: a hit is served from local
//! storage without touching the network, a miss performs the request,
//! fails fast on a non-success status, and stores the body on success.

use crate::cache::ResponseCache;
use crate::config::Settings;
use crate::{Result, ScrapeError};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("docscrape/", env!("CARGO_PKG_VERSION"));

/// HTTP session with a persistent response cache
pub struct Session {
    client: Client,
    cache: ResponseCache,
}

impl Session {
    /// Creates a session whose cache lives at the configured path.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = build_http_client()?;
        let cache = ResponseCache::open(&settings.cache_path())?;
        Ok(Self { client, cache })
    }

    /// Fetches a URL, serving from the cache when possible.
    ///
    /// On a cache miss the request goes to the network; a non-success
    /// status is an error and nothing is cached. Successful bodies are
    /// stored before being returned.
    pub async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        if let Some(cached) = self.cache.get(url.as_str())? {
            tracing::debug!("cache hit for {}", url);
            return Ok(cached.body);
        }

        tracing::debug!("fetching {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?
            .to_vec();

        self.cache.put(url.as_str(), status.as_u16(), &body)?;
        Ok(body)
    }

    /// Fetches a URL and parses the body as an HTML document.
    pub async fn get_html(&self, url: &Url) -> Result<Html> {
        let body = self.get_bytes(url).await?;
        let text = String::from_utf8_lossy(&body);
        Ok(Html::parse_document(&text))
    }

    /// Empties the response cache; subsequent requests re-fetch from
    /// the network.
    pub fn clear_cache(&self) -> Result<usize> {
        let dropped = self.cache.clear()?;
        tracing::info!("response cache cleared ({} entries dropped)", dropped);
        Ok(dropped)
    }
}

/// Builds the HTTP client used for all requests
fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}
