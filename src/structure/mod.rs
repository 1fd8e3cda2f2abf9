//! Widget type declarations and structure document resolution.
//!
//! The [`StructureRegistry`] maps widget type names to factories and turns a
//! fetched structure document into a tree of configured widgets. Repeated
//! references to the same identifier produce independent instances; there is
//! no sharing between occurrences.

mod document;
mod scope;

pub use document::{StructureDocument, WidgetId, WidgetRecord};
pub use scope::Scope;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{GuiError, StructureError};
use crate::fetch::Fetcher;
use crate::render::Node;
use crate::widgets::{RenderContext, VoidWidget, Widget};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Zero-argument constructor for one widget type.
pub type WidgetFactory = Arc<dyn Fn() -> Box<dyn Widget> + Send + Sync>;

/// A widget that has been constructed and configured, ready to render once.
pub struct ConfiguredWidget {
    widget: Box<dyn Widget>,
    placeholder: Node,
}

impl ConfiguredWidget {
    pub(crate) fn new(widget: Box<dyn Widget>, placeholder: Node) -> Self {
        Self {
            widget,
            placeholder,
        }
    }

    /// The inert void widget used to fill empty slots.
    pub fn placeholder() -> Self {
        let widget: Box<dyn Widget> = Box::new(VoidWidget);
        let placeholder = Node::widget(widget.base_kind(), widget.type_name());
        Self::new(widget, placeholder)
    }

    pub fn type_name(&self) -> &'static str {
        self.widget.type_name()
    }

    /// Render the widget, consuming it.
    pub async fn render(mut self, cx: &RenderContext) -> Result<Node, GuiError> {
        self.widget.render(self.placeholder, cx).await
    }
}

impl fmt::Debug for ConfiguredWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredWidget")
            .field("type", &self.type_name())
            .finish_non_exhaustive()
    }
}

/// Registry of widget type factories plus the loaded structure document.
pub struct StructureRegistry {
    fetcher: Arc<dyn Fetcher>,
    declarations: RwLock<HashMap<String, WidgetFactory>>,
    document: OnceCell<Arc<StructureDocument>>,
    max_depth: usize,
}

impl StructureRegistry {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            declarations: RwLock::new(HashMap::new()),
            document: OnceCell::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply references may nest during resolution.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Declare a widget type. Each name may be declared once.
    pub fn declare_widget<F>(&self, type_name: &str, factory: F) -> Result<(), StructureError>
    where
        F: Fn() -> Box<dyn Widget> + Send + Sync + 'static,
    {
        let mut declarations = self.declarations.write();
        if declarations.contains_key(type_name) {
            return Err(StructureError::DuplicateType(type_name.to_string()));
        }
        declarations.insert(type_name.to_string(), Arc::new(factory));
        tracing::debug!(widget = type_name, "widget type declared");
        Ok(())
    }

    pub fn is_declared(&self, type_name: &str) -> bool {
        self.declarations.read().contains_key(type_name)
    }

    /// Declared type names, sorted.
    pub fn declared_types(&self) -> Vec<String> {
        let mut names: Vec<_> = self.declarations.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn factory(&self, type_name: &str) -> Option<WidgetFactory> {
        self.declarations.read().get(type_name).cloned()
    }

    /// Fetch and parse the structure at `url` (first call only) and resolve
    /// its root widget.
    pub async fn generate(&self, url: &str) -> Result<ConfiguredWidget, GuiError> {
        let document = self.load_document(url).await?;
        self.resolve(&document, document.main())
    }

    /// Load the document once; later calls reuse it whatever their URL.
    /// A failed load is not cached.
    pub async fn load_document(&self, url: &str) -> Result<Arc<StructureDocument>, StructureError> {
        self.document
            .get_or_try_init(|| async {
                tracing::debug!(url, "fetching structure");
                let fetched = self.fetcher.fetch(url).await.map_err(|err| {
                    StructureError::DocumentFetch {
                        url: url.to_string(),
                        reason: err.to_string(),
                    }
                })?;
                let document = StructureDocument::parse(&fetched.body).map_err(|reason| {
                    StructureError::DocumentParse {
                        url: url.to_string(),
                        reason,
                    }
                })?;
                tracing::info!(url, widgets = document.len(), "structure loaded");
                Ok::<_, StructureError>(Arc::new(document))
            })
            .await
            .cloned()
    }

    /// Install an in-memory document. Returns `false` if one is already loaded.
    pub fn set_document(&self, document: StructureDocument) -> bool {
        self.document.set(Arc::new(document)).is_ok()
    }

    pub fn document(&self) -> Option<Arc<StructureDocument>> {
        self.document.get().cloned()
    }

    /// Resolve a widget of the loaded document by identifier.
    pub fn widget(&self, id: impl Into<WidgetId>) -> Result<ConfiguredWidget, GuiError> {
        let document = self.document().ok_or(StructureError::NotLoaded)?;
        self.resolve(&document, &id.into())
    }

    /// Whether the loaded document has a record for `id`.
    pub fn widget_exists(&self, id: impl Into<WidgetId>) -> bool {
        self.document
            .get()
            .is_some_and(|document| document.record(&id.into()).is_some())
    }

    fn resolve(&self, document: &StructureDocument, id: &WidgetId) -> Result<ConfiguredWidget, GuiError> {
        Scope::new(self, document).resolve(id)
    }
}
