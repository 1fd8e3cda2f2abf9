//! Module loading with convergence tracking.
//!
//! Modules are fetched through the shared [`ResourceCache`]. Loading one
//! module may enqueue more (through the `on_loaded` hook), so
//! [`ModuleLoader::await_all`] keeps re-awaiting the outstanding set until
//! every requested module has loaded.

use super::{Resource, ResourceCache};
use crate::error::ResourceError;
use futures::stream::{FuturesUnordered, StreamExt};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::pin::pin;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// A successfully loaded module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    url: String,
    resource: Resource,
}

impl Module {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Module source decoded as UTF-8.
    pub fn source(&self) -> Result<&str, ResourceError> {
        self.resource.text().map_err(|err| ResourceError::ModuleLoad {
            url: self.url.clone(),
            reason: err.to_string(),
        })
    }
}

/// Callback run after a module's bytes arrive and before it counts as loaded.
///
/// Enqueuing further modules from here is how dependent modules join the
/// convergence wait.
pub type ModuleHook = Arc<dyn Fn(&ModuleLoader, &Module) -> Result<(), ResourceError> + Send + Sync>;

#[derive(Default)]
struct LoaderState {
    /// Requested URLs, in request order.
    order: Vec<String>,
    loaded: usize,
    tasks: Vec<(String, JoinHandle<()>)>,
    failure: Option<ResourceError>,
    modules: HashMap<String, Module>,
}

struct LoaderInner {
    cache: Arc<ResourceCache>,
    on_loaded: Option<ModuleHook>,
    state: Mutex<LoaderState>,
    progress: Notify,
}

/// Tracks requested vs. loaded module counts over a shared cache.
#[derive(Clone)]
pub struct ModuleLoader {
    inner: Arc<LoaderInner>,
}

impl ModuleLoader {
    pub fn new(cache: Arc<ResourceCache>) -> Self {
        Self::build(cache, None)
    }

    pub fn with_hook(cache: Arc<ResourceCache>, on_loaded: ModuleHook) -> Self {
        Self::build(cache, Some(on_loaded))
    }

    fn build(cache: Arc<ResourceCache>, on_loaded: Option<ModuleHook>) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                cache,
                on_loaded,
                state: Mutex::new(LoaderState::default()),
                progress: Notify::new(),
            }),
        }
    }

    /// Start loading `url` unless it was already requested.
    ///
    /// Must be called from within a Tokio runtime. Returns `false` for a
    /// repeated URL.
    pub fn enqueue(&self, url: &str) -> bool {
        let mut state = self.inner.state.lock();
        if state.order.iter().any(|known| known == url) {
            return false;
        }
        tracing::debug!(url, "enqueuing module");
        state.order.push(url.to_string());
        let loader = self.clone();
        let owned = url.to_string();
        let task = tokio::spawn(async move { loader.run(owned).await });
        state.tasks.push((url.to_string(), task));
        true
    }

    pub fn requested(&self) -> usize {
        self.inner.state.lock().order.len()
    }

    pub fn loaded_count(&self) -> usize {
        self.inner.state.lock().loaded
    }

    /// Loaded modules in request order.
    pub fn loaded(&self) -> Vec<Module> {
        let state = self.inner.state.lock();
        state
            .order
            .iter()
            .filter_map(|url| state.modules.get(url).cloned())
            .collect()
    }

    /// Wait until every requested module, including ones enqueued while
    /// waiting, has loaded. The first load failure aborts the wait, even
    /// while earlier modules are still in flight.
    pub async fn await_all(&self) -> Result<(), ResourceError> {
        let mut pending = FuturesUnordered::new();
        loop {
            let mut notified = pin!(self.inner.progress.notified());
            notified.as_mut().enable();

            {
                let mut state = self.inner.state.lock();
                if let Some(failure) = &state.failure {
                    return Err(failure.clone());
                }
                if state.loaded == state.order.len() {
                    return Ok(());
                }
                for (url, task) in std::mem::take(&mut state.tasks) {
                    pending.push(async move { (url, task.await) });
                }
            }

            tokio::select! {
                () = notified.as_mut() => {}
                Some((url, joined)) = pending.next(), if !pending.is_empty() => {
                    if let Err(err) = joined {
                        self.fail(ResourceError::ModuleLoad {
                            url,
                            reason: err.to_string(),
                        });
                        self.inner.progress.notify_waiters();
                    }
                }
            }
        }
    }

    async fn run(&self, url: String) {
        let outcome = match self.inner.cache.load(&url).await {
            Ok(resource) => {
                let module = Module {
                    url: url.clone(),
                    resource,
                };
                self.finish(module)
            }
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            let failure = match err {
                ResourceError::ModuleLoad { .. } => err,
                other => ResourceError::ModuleLoad {
                    url: url.clone(),
                    reason: other.to_string(),
                },
            };
            tracing::warn!(url = %url, error = %failure, "module failed to load");
            self.fail(failure);
        }
        self.inner.progress.notify_waiters();
    }

    fn finish(&self, module: Module) -> Result<(), ResourceError> {
        if let Some(hook) = &self.inner.on_loaded {
            hook(self, &module)?;
        }
        let mut state = self.inner.state.lock();
        state.loaded += 1;
        state.modules.insert(module.url.clone(), module);
        Ok(())
    }

    fn fail(&self, failure: ResourceError) {
        let mut state = self.inner.state.lock();
        if state.failure.is_none() {
            state.failure = Some(failure);
        }
    }
}
