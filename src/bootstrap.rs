//! Startup sequence: configuration in, rendered [`Page`] out.
//!
//! 1. declare the core widget types
//! 2. enqueue the configured modules and wait for them to converge
//! 3. generate the structure while the stylesheet loads alongside
//! 4. render the root widget into the page body
//!
//! Any failure yields the single error page; no partial UI is produced.

use crate::config::{GuiConfig, LoadedGuiConfig};
use crate::error::GuiError;
use crate::fetch::{DefaultFetcher, Fetcher};
use crate::render::html::{escape_text, to_html_with};
use crate::render::{BaseKind, Node};
use crate::resources::{
    load_stylesheet, MediaSupport, Module, ModuleHook, ModuleLoader, ResourceCache,
    StaticMediaSupport, Stylesheet,
};
use crate::structure::StructureRegistry;
use crate::widgets::{register_core_widgets, RenderContext, TAB_SCRIPT};
use std::fmt::Write;
use std::sync::Arc;

const TITLE_SUFFIX: &str = " | SSS";
pub const ERROR_TITLE: &str = "Error | SSS";

/// Document title for a GUI called `name`.
pub fn page_title(name: &str) -> String {
    format!("{}{TITLE_SUFFIX}", name.trim())
}

/// A fully rendered GUI, or the error page that replaces it.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub stylesheet: Option<Stylesheet>,
    /// Loaded modules, in request order.
    pub modules: Vec<Module>,
    pub body: Node,
}

impl Page {
    pub fn error(error: &GuiError) -> Self {
        let mut body = Node::widget(BaseKind::Block, "error");
        body.push(Node::new(BaseKind::Heading).with_text("SSS"));
        body.push(Node::new(BaseKind::Paragraph).with_text(error.to_string()));
        Self {
            title: ERROR_TITLE.to_string(),
            stylesheet: None,
            modules: Vec::new(),
            body,
        }
    }

    pub fn is_error(&self) -> bool {
        self.title == ERROR_TITLE && self.body.class() == Some("error")
    }

    /// Serialize as a standalone HTML document.
    ///
    /// The stylesheet and module sources are inlined and every cached blob
    /// handle in the body becomes a `data:` URI, so the output has no
    /// references back into `cache`.
    pub fn to_html(&self, cache: &ResourceCache) -> String {
        let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape_text(&self.title));
        if let Some(stylesheet) = &self.stylesheet {
            let _ = writeln!(
                out,
                "<style>{}</style>",
                escape_end_tag(&stylesheet.text, "style")
            );
        }
        if !self.body.find_all_by_class("tabs").is_empty() {
            let _ = writeln!(out, "<script>{TAB_SCRIPT}</script>");
        }
        for module in &self.modules {
            match module.source() {
                Ok(source) => {
                    let _ = writeln!(
                        out,
                        "<script type=\"module\">{}</script>",
                        source.replace("</", "<\\/")
                    );
                }
                Err(_) => {
                    let _ = writeln!(
                        out,
                        "<script type=\"module\" src=\"{}\"></script>",
                        module.resource().data_uri()
                    );
                }
            }
        }
        out.push_str("</head>\n<body>");
        let rewrite = |url: &str| cache.resolve_handle(url).map(|resource| resource.data_uri());
        out.push_str(&to_html_with(&self.body, &rewrite));
        out.push_str("</body>\n</html>\n");
        out
    }
}

/// Escape every `</tag` in `source`, ignoring ASCII case, so inlined text
/// cannot close its element early.
fn escape_end_tag(source: &str, tag: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(at) = rest.find("</") {
        out.push_str(&rest[..at]);
        let after = &rest[at + 2..];
        let closes = after
            .get(..tag.len())
            .is_some_and(|name| name.eq_ignore_ascii_case(tag));
        out.push_str(if closes { "<\\/" } else { "</" });
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Owns the registries for one GUI and drives its startup.
pub struct Bootstrap {
    config: GuiConfig,
    registry: Arc<StructureRegistry>,
    cache: Arc<ResourceCache>,
    modules: ModuleLoader,
    media: Arc<dyn MediaSupport>,
}

impl Bootstrap {
    pub fn new(config: GuiConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self, GuiError> {
        let registry = StructureRegistry::new(fetcher.clone()).with_max_depth(config.max_depth);
        register_core_widgets(&registry)?;
        let cache = Arc::new(ResourceCache::new(fetcher));
        Ok(Self {
            modules: ModuleLoader::new(cache.clone()),
            config,
            registry: Arc::new(registry),
            cache,
            media: Arc::new(StaticMediaSupport),
        })
    }

    /// Bootstrap over the default transport, resolving relative URLs against
    /// the configuration file's directory.
    pub fn from_loaded(loaded: LoadedGuiConfig) -> Result<Self, GuiError> {
        let fetcher = DefaultFetcher::new(&loaded.config.fetch, loaded.base_dir);
        Self::new(loaded.config, Arc::new(fetcher))
    }

    /// Run `hook` for every module once its bytes arrive.
    pub fn with_module_hook(mut self, hook: ModuleHook) -> Self {
        self.modules = ModuleLoader::with_hook(self.cache.clone(), hook);
        self
    }

    pub fn with_media(mut self, media: Arc<dyn MediaSupport>) -> Self {
        self.media = media;
        self
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// Registry for declaring additional widget types before [`Self::run`].
    pub fn registry(&self) -> &Arc<StructureRegistry> {
        &self.registry
    }

    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }

    pub fn modules(&self) -> &ModuleLoader {
        &self.modules
    }

    pub async fn run(&self) -> Result<Page, GuiError> {
        tracing::info!(name = %self.config.name, "starting gui");
        for url in &self.config.modules {
            self.modules.enqueue(url);
        }

        let structure = async {
            self.modules.await_all().await?;
            tracing::info!(modules = self.modules.loaded_count(), "modules loaded");
            self.registry.generate(&self.config.structure).await
        };
        let stylesheet = async {
            load_stylesheet(&self.cache, &self.config.stylesheet)
                .await
                .map_err(GuiError::from)
        };
        let (root, stylesheet) = tokio::try_join!(structure, stylesheet)?;

        tracing::info!(root = root.type_name(), "rendering");
        let cx = RenderContext::new(self.cache.clone()).with_media(self.media.clone());
        let body = root.render(&cx).await?;
        tracing::info!(resources = self.cache.len(), "gui rendered");

        Ok(Page {
            title: page_title(&self.config.name),
            stylesheet: Some(stylesheet),
            modules: self.modules.loaded(),
            body,
        })
    }

    /// Like [`Self::run`], substituting the error page on failure.
    pub async fn page(&self) -> Page {
        match self.run().await {
            Ok(page) => page,
            Err(err) => {
                tracing::error!(error = %err, "gui failed to start");
                Page::error(&err)
            }
        }
    }
}
