//! Proxy for the public bookmark ("thoughts") feed.
//!
//! A successful upstream body is passed through unchanged and reused for
//! the revalidation window. Any failure (transport error, non-2xx status,
//! body that is not JSON) yields a 500 with a fixed empty-feed body so the
//! page can render an empty state.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::IgnoredAny;

use crate::config::BookmarkConfig;
use crate::error::{Result, SiteError};

/// Body served when the upstream feed cannot be loaded.
pub const FALLBACK_BODY: &str =
    r#"{"thoughts":[],"username":"","meechumUrl":"","error":"Failed to load thoughts"}"#;

/// One proxied response, ready to be written to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: String,
    pub cache_control: Option<String>,
}

impl ProxyResponse {
    fn ok(body: String, revalidate: Duration) -> Self {
        Self {
            status: 200,
            body,
            cache_control: Some(cache_control(revalidate)),
        }
    }

    /// The fixed failure response.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            status: 500,
            body: FALLBACK_BODY.to_string(),
            cache_control: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `Cache-Control` header for a successful response.
#[must_use]
pub fn cache_control(revalidate: Duration) -> String {
    format!(
        "public, s-maxage={}, stale-while-revalidate",
        revalidate.as_secs()
    )
}

#[derive(Debug, Clone)]
struct CachedBody {
    body: String,
    fetched_at: Instant,
}

/// Fetches and memoises the upstream bookmark feed.
#[derive(Debug)]
pub struct BookmarkProxy {
    client: Client,
    config: BookmarkConfig,
    cache: Mutex<Option<CachedBody>>,
}

impl BookmarkProxy {
    pub fn new(config: BookmarkConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            config,
            cache: Mutex::new(None),
        })
    }

    #[must_use]
    pub fn config(&self) -> &BookmarkConfig {
        &self.config
    }

    /// Serve the feed, from cache while it is fresh.
    pub fn fetch(&self) -> ProxyResponse {
        if let Some(body) = self.cached_body() {
            tracing::debug!("serving cached bookmark feed");
            return ProxyResponse::ok(body, self.config.revalidate);
        }

        match self.fetch_upstream() {
            Ok(body) => {
                self.store(&body);
                ProxyResponse::ok(body, self.config.revalidate)
            }
            Err(error) => {
                tracing::error!(
                    %error,
                    url = %self.config.upstream_url,
                    "error fetching bookmark feed"
                );
                ProxyResponse::fallback()
            }
        }
    }

    /// Drop the memoised body so the next fetch goes upstream.
    pub fn invalidate(&self) {
        *self.lock_cache() = None;
    }

    fn fetch_upstream(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.config.upstream_url)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        serde_json::from_str::<IgnoredAny>(&body)?;
        tracing::info!(bytes = body.len(), "fetched bookmark feed");
        Ok(body)
    }

    fn cached_body(&self) -> Option<String> {
        let guard = self.lock_cache();
        guard
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.config.revalidate)
            .map(|cached| cached.body.clone())
    }

    fn store(&self, body: &str) {
        if self.config.revalidate.is_zero() {
            return;
        }
        *self.lock_cache() = Some(CachedBody {
            body: body.to_string(),
            fetched_at: Instant::now(),
        });
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<CachedBody>> {
        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
