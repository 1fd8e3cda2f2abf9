//! Shared test fixtures for structure, resource, and widget test modules.
//!
//! Keeping the scripted fetcher and temp dir helpers here prevents each test
//! module from rebuilding ad-hoc transport fakes.

use crate::error::FetchError;
use crate::fetch::{Fetched, Fetcher};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Notify;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("sss-guis-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// One-shot barrier holding scripted fetches until opened.
#[derive(Debug, Default)]
pub struct Gate {
    open: AtomicBool,
    notify: Notify,
}

impl Gate {
    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            if self.open.load(Ordering::SeqCst) {
                return;
            }
            notified.await;
        }
    }
}

#[derive(Debug, Clone)]
enum MockResponse {
    Body {
        body: Bytes,
        content_type: Option<String>,
    },
    Status(u16),
    Hang,
}

/// Scripted [`Fetcher`] counting calls per URL. Unscripted URLs answer 404.
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: HashMap<String, MockResponse>,
    calls: Mutex<HashMap<String, usize>>,
    gate: Mutex<Option<Arc<Gate>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &[u8], content_type: Option<&str>) -> Self {
        self.responses.insert(
            url.to_string(),
            MockResponse::Body {
                body: Bytes::copy_from_slice(body),
                content_type: content_type.map(str::to_string),
            },
        );
        self
    }

    pub fn with_json(self, url: &str, value: &Value) -> Self {
        self.with_body(url, value.to_string().as_bytes(), Some("application/json"))
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), MockResponse::Status(status));
        self
    }

    /// Never answer `url`.
    pub fn with_hang(mut self, url: &str) -> Self {
        self.responses.insert(url.to_string(), MockResponse::Hang);
        self
    }

    /// Hold every subsequent fetch until the returned gate opens.
    pub fn gate(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.gate.lock() = Some(gate.clone());
        gate
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched, FetchError> {
        *self.calls.lock().entry(url.to_string()).or_default() += 1;
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.wait().await;
        }
        match self.responses.get(url) {
            Some(MockResponse::Body { body, content_type }) => Ok(Fetched {
                body: body.clone(),
                content_type: content_type.clone(),
            }),
            Some(MockResponse::Status(status)) => Err(FetchError::Status(*status)),
            Some(MockResponse::Hang) => std::future::pending().await,
            None => Err(FetchError::Status(404)),
        }
    }
}

/// Build a list-form structure document.
pub fn structure_json(types: &[&str], widgets: Value, main: Value) -> Value {
    json!({
        "types": types,
        "widgets": widgets,
        "main": main,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[tokio::test]
    async fn mock_fetcher_counts_and_defaults_to_404() {
        let fetcher = MockFetcher::new().with_body("a", b"x", Some("text/plain"));
        assert_eq!(&fetcher.fetch("a").await.unwrap().body[..], b"x");
        assert!(matches!(
            fetcher.fetch("b").await,
            Err(FetchError::Status(404))
        ));
        assert_eq!(fetcher.calls("a"), 1);
        assert_eq!(fetcher.total_calls(), 2);
    }

    #[test]
    fn structure_fixture_has_expected_shape() {
        let doc = structure_json(&["text"], json!([[0, {"text": "hi"}]]), json!(0));
        assert_eq!(doc["types"][0], "text");
        assert_eq!(doc["main"], 0);
    }
}
