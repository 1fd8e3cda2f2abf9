//! Byte transport for structure documents and assets.
//!
//! Everything the GUI pulls from outside (structure, stylesheet, modules,
//! media) goes through a [`Fetcher`]. The production [`DefaultFetcher`]
//! serves `http(s)://` URLs with `reqwest` and everything else from the local
//! filesystem, resolving relative paths against a base directory.

mod retry;
mod transport;

use crate::config::FetchConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use bytes::Bytes;
use retry::RetryPolicy;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;

/// Raw result of a successful fetch.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub body: Bytes,
    /// `Content-Type` as reported by the transport, if any.
    pub content_type: Option<String>,
}

/// Minimal transport interface used by the registry and resource cache.
///
/// This trait lets tests provide deterministic bodies without network calls
/// while the production path uses [`DefaultFetcher`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Fetched, FetchError>;
}

/// Where a URL points once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    Http(reqwest::Url),
    File(PathBuf),
}

/// HTTP(S) + filesystem fetcher with timeout and bounded retries.
pub struct DefaultFetcher {
    http: reqwest::Client,
    base_dir: PathBuf,
    retry_policy: RetryPolicy,
}

impl DefaultFetcher {
    pub fn new(config: &FetchConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self::new_with_retry_policy(
            Duration::from_secs(config.timeout_secs),
            base_dir.into(),
            RetryPolicy::with_max_attempts(config.max_attempts),
        )
    }

    fn new_with_retry_policy(timeout: Duration, base_dir: PathBuf, retry_policy: RetryPolicy) -> Self {
        Self {
            http: transport::build_http_client(timeout),
            base_dir,
            retry_policy,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn locate(&self, url: &str) -> Result<Location, FetchError> {
        let parsed = match reqwest::Url::parse(url) {
            Ok(parsed) => parsed,
            // Not an absolute URL: a path relative to the base directory.
            Err(_) => return Ok(Location::File(self.base_dir.join(url))),
        };
        match parsed.scheme() {
            "http" | "https" => Ok(Location::Http(parsed)),
            "file" => parsed
                .to_file_path()
                .map(Location::File)
                .map_err(|_| FetchError::UnsupportedScheme("file".into())),
            // Single-letter schemes are drive letters (`C:\...`).
            scheme if scheme.len() == 1 => Ok(Location::File(PathBuf::from(url))),
            scheme => Err(FetchError::UnsupportedScheme(scheme.to_string())),
        }
    }

    async fn http_get_with_retries(&self, url: reqwest::Url) -> Result<Fetched, FetchError> {
        let mut attempt: u32 = 0;
        loop {
            match transport::http_get(&self.http, url.clone()).await {
                Ok(fetched) => return Ok(fetched),
                Err(err) => {
                    if !self.retry_policy.should_retry(&err, attempt) {
                        return Err(err);
                    }
                    let delay = self.retry_policy.retry_delay_for(attempt);
                    tracing::debug!(%url, attempt, error = %err, "retrying fetch");
                    attempt = attempt.saturating_add(1);
                    sleep(delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl Fetcher for DefaultFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched, FetchError> {
        match self.locate(url)? {
            Location::Http(url) => self.http_get_with_retries(url).await,
            Location::File(path) => transport::read_file(&path).await,
        }
    }
}
