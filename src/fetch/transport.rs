//! HTTP and filesystem transport helpers.

use super::Fetched;
use crate::error::FetchError;
use std::path::Path;
use std::time::Duration;

/// Build an HTTP client with timeout applied.
pub(super) fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Issue one GET and collect the body; non-2xx statuses are errors.
pub(super) async fn http_get(http: &reqwest::Client, url: reqwest::Url) -> Result<Fetched, FetchError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?;
    Ok(Fetched { body, content_type })
}

/// Read a local file; the content kind is left to extension sniffing.
pub(super) async fn read_file(path: &Path) -> Result<Fetched, FetchError> {
    let body = tokio::fs::read(path).await?;
    Ok(Fetched {
        body: body.into(),
        content_type: None,
    })
}
