//! Deduplicating resource cache and module loader.
//!
//! Every asset the GUI needs (media, stylesheet, modules) is loaded through
//! one [`ResourceCache`]. Concurrent callers for the same URL share a single
//! in-flight fetch and observe the same outcome; completed loads stay cached
//! for the life of the cache, including failures.

pub mod kind;
mod module;
mod stylesheet;

pub use kind::{content_kind, MediaFamily, MediaSupport, Playability, StaticMediaSupport};
pub use module::{Module, ModuleHook, ModuleLoader};
pub use stylesheet::{load_stylesheet, Stylesheet};

use crate::error::ResourceError;
use crate::fetch::Fetcher;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Prefix of local handles minted for loaded resources.
pub const HANDLE_PREFIX: &str = "blob:sss/";

/// Locally addressable reference to the bytes of a loaded resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    url: Arc<str>,
    bytes: Bytes,
}

impl ResourceHandle {
    /// Local URL usable as a `src` attribute within the rendered page.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

/// A loaded resource: local handle plus detected content kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    source: Arc<str>,
    handle: ResourceHandle,
    content_kind: Arc<str>,
}

impl Resource {
    /// URL the resource was fetched from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn handle(&self) -> &ResourceHandle {
        &self.handle
    }

    /// Normalized MIME type, e.g. `image/png`.
    pub fn content_kind(&self) -> &str {
        &self.content_kind
    }

    pub fn bytes(&self) -> &Bytes {
        self.handle.bytes()
    }

    /// Decode the body as UTF-8 text.
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(self.bytes())
    }

    /// Self-contained `data:` URI carrying the resource bytes.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_kind,
            STANDARD.encode(self.bytes())
        )
    }
}

type Entry = Arc<OnceCell<Result<Resource, ResourceError>>>;

/// URL-keyed cache of fetch outcomes.
pub struct ResourceCache {
    fetcher: Arc<dyn Fetcher>,
    entries: Mutex<HashMap<String, Entry>>,
    handles: Mutex<HashMap<String, Resource>>,
    next_handle: AtomicU64,
}

impl ResourceCache {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
            handles: Mutex::new(HashMap::new()),
            next_handle: AtomicU64::new(0),
        }
    }

    /// Load `url`, reusing any completed or in-flight load of the same URL.
    ///
    /// Exactly one fetch is issued per distinct URL; every caller receives
    /// the same resource or the same error.
    pub async fn load(&self, url: &str) -> Result<Resource, ResourceError> {
        let entry = {
            let mut entries = self.entries.lock();
            entries.entry(url.to_string()).or_default().clone()
        };
        entry.get_or_init(|| self.fetch_resource(url)).await.clone()
    }

    /// Whether a load for `url` has been started.
    pub fn contains(&self, url: &str) -> bool {
        self.entries.lock().contains_key(url)
    }

    /// Resolve a handle URL minted by this cache back to its resource.
    pub fn resolve_handle(&self, handle_url: &str) -> Option<Resource> {
        self.handles.lock().get(handle_url).cloned()
    }

    /// Bytes behind a handle URL.
    pub fn blob(&self, handle_url: &str) -> Option<Bytes> {
        self.handles
            .lock()
            .get(handle_url)
            .map(|resource| resource.bytes().clone())
    }

    /// Number of URLs with a started or completed load.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live resource handles.
    pub fn handle_count(&self) -> usize {
        self.handles.lock().len()
    }

    async fn fetch_resource(&self, url: &str) -> Result<Resource, ResourceError> {
        tracing::debug!(url, "fetching resource");
        let fetched = self.fetcher.fetch(url).await.map_err(|err| {
            tracing::warn!(url, error = %err, "resource fetch failed");
            ResourceError::Fetch {
                url: url.to_string(),
                reason: err.to_string(),
            }
        })?;
        let content_kind = content_kind(url, fetched.content_type.as_deref());
        let id = self.next_handle.fetch_add(1, Ordering::Relaxed);
        let resource = Resource {
            source: Arc::from(url),
            handle: ResourceHandle {
                url: Arc::from(format!("{HANDLE_PREFIX}{id}")),
                bytes: fetched.body,
            },
            content_kind: Arc::from(content_kind),
        };
        self.handles
            .lock()
            .insert(resource.handle.url().to_string(), resource.clone());
        Ok(resource)
    }
}

impl Drop for ResourceCache {
    fn drop(&mut self) {
        let released = self.handles.get_mut().len();
        if released > 0 {
            tracing::debug!(released, "releasing resource handles");
        }
    }
}
