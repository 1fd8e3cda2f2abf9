//! Widget contract and the core widget set.
//!
//! A widget is constructed by its factory, configured exactly once from its
//! structure record, then rendered exactly once into a [`Node`]. Composite
//! widgets resolve their children while configuring (through [`Scope`]) and
//! render them concurrently, appending results in declaration order.

mod color;
mod configuration;
mod container;
mod layout;
mod media;
mod tabs;
mod text;
mod textual;
mod void;

pub use color::is_css_color;
pub use configuration::Configuration;
pub use container::ContainerWidget;
pub use layout::LayoutWidget;
pub use media::{AudioWidget, Contain, ImageWidget, VideoWidget};
pub use tabs::{active_tab, select_tab, TabPosition, TabsWidget, TAB_SCRIPT};
pub use text::{BannerWidget, TextWidget};
pub use textual::{HorizontalAlign, Textual, VerticalAlign};
pub use void::VoidWidget;

use crate::error::{GuiError, StructureError};
use crate::render::{BaseKind, Node};
use crate::resources::{MediaSupport, ResourceCache, StaticMediaSupport};
use crate::structure::{ConfiguredWidget, Scope, StructureRegistry};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;

/// A renderable widget type.
///
/// Implement this trait to add custom widgets, then declare a factory with
/// [`StructureRegistry::declare_widget`].
#[async_trait]
pub trait Widget: Send {
    /// Type name used as the node class.
    fn type_name(&self) -> &'static str;

    /// Element kind of the placeholder node.
    fn base_kind(&self) -> BaseKind;

    /// Validate the configuration record and resolve any children.
    fn configure(&mut self, config: &Configuration<'_>, scope: &mut Scope<'_>) -> Result<(), GuiError>;

    /// Produce the final node from the placeholder.
    async fn render(&mut self, node: Node, cx: &RenderContext) -> Result<Node, GuiError>;
}

/// Services available while rendering.
#[derive(Clone)]
pub struct RenderContext {
    resources: Arc<ResourceCache>,
    media: Arc<dyn MediaSupport>,
}

impl RenderContext {
    pub fn new(resources: Arc<ResourceCache>) -> Self {
        Self {
            resources,
            media: Arc::new(StaticMediaSupport),
        }
    }

    /// Replace the media decodability probe.
    pub fn with_media(mut self, media: Arc<dyn MediaSupport>) -> Self {
        self.media = media;
        self
    }

    pub fn resources(&self) -> &ResourceCache {
        &self.resources
    }

    pub fn media(&self) -> &dyn MediaSupport {
        self.media.as_ref()
    }
}

/// Render `children` concurrently; results keep the input order.
pub async fn render_children(children: Vec<ConfiguredWidget>, cx: &RenderContext) -> Result<Vec<Node>, GuiError> {
    try_join_all(children.into_iter().map(|child| child.render(cx))).await
}

/// Declare the built-in widget types on `registry`.
pub fn register_core_widgets(registry: &StructureRegistry) -> Result<(), StructureError> {
    registry.declare_widget("null", || Box::new(VoidWidget))?;
    registry.declare_widget("void", || Box::new(VoidWidget))?;
    registry.declare_widget("layout", || Box::<LayoutWidget>::default())?;
    registry.declare_widget("container", || Box::<ContainerWidget>::default())?;
    registry.declare_widget("tabs", || Box::<TabsWidget>::default())?;
    registry.declare_widget("banner", || Box::<BannerWidget>::default())?;
    registry.declare_widget("text", || Box::<TextWidget>::default())?;
    registry.declare_widget("image", || Box::<ImageWidget>::default())?;
    registry.declare_widget("video", || Box::<VideoWidget>::default())?;
    registry.declare_widget("audio", || Box::<AudioWidget>::default())?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use crate::structure::StructureDocument;
    use crate::testsupport::MockFetcher;
    use serde_json::Value;

    /// Registry with core widgets and `document` installed.
    pub fn registry_for(document: Value) -> StructureRegistry {
        let registry = StructureRegistry::new(Arc::new(MockFetcher::new()));
        register_core_widgets(&registry).expect("core widgets");
        let document = StructureDocument::from_value(document).expect("valid document");
        registry.set_document(document);
        registry
    }

    pub fn context_with(fetcher: MockFetcher) -> RenderContext {
        RenderContext::new(Arc::new(ResourceCache::new(Arc::new(fetcher))))
    }

    /// Resolve and render the main widget.
    pub async fn render_main(document: Value, fetcher: MockFetcher) -> Result<Node, GuiError> {
        let registry = registry_for(document);
        let main = registry.document().expect("document").main().clone();
        let widget = registry.widget(main)?;
        widget.render(&context_with(fetcher)).await
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;
    use crate::testsupport::{structure_json, MockFetcher};
    use serde_json::json;

    #[test]
    fn core_widgets_are_declared_once() {
        let registry = StructureRegistry::new(Arc::new(MockFetcher::new()));
        register_core_widgets(&registry).unwrap();
        for name in [
            "null", "void", "layout", "container", "tabs", "banner", "text", "image", "video",
            "audio",
        ] {
            assert!(registry.is_declared(name), "{name} missing");
        }
        assert_eq!(
            register_core_widgets(&registry).unwrap_err(),
            StructureError::DuplicateType("null".into())
        );
    }

    #[tokio::test]
    async fn text_widget_round_trips_hello() {
        let node = render_main(
            structure_json(&["text"], json!([[0, {"text": "hello"}]]), json!(0)),
            MockFetcher::new(),
        )
        .await
        .unwrap();
        assert_eq!(node.class(), Some("text"));
        assert_eq!(node.text_content(), "hello");
    }

    #[tokio::test]
    async fn children_render_in_declaration_order_despite_completion_order() {
        let fetcher = MockFetcher::new()
            .with_body("a.png", b"A", None)
            .with_body("b.png", b"B", None);
        let gate = fetcher.gate();
        let registry = registry_for(structure_json(
            &["image"],
            json!([[0, {"source": "a.png"}], [0, {"source": "b.png"}]]),
            json!(0),
        ));
        let cx = context_with(fetcher);
        let children = vec![registry.widget(1usize).unwrap(), registry.widget(0usize).unwrap()];
        let release = async {
            tokio::task::yield_now().await;
            gate.open();
        };
        let (nodes, ()) = tokio::join!(render_children(children, &cx), release);
        let sources: Vec<_> = nodes
            .unwrap()
            .iter()
            .map(|node| {
                let handle = node.attribute("src").unwrap().to_string();
                cx.resources().resolve_handle(&handle).unwrap().source().to_string()
            })
            .collect();
        assert_eq!(sources, vec!["b.png", "a.png"]);
    }

    struct Shout {
        text: String,
    }

    #[async_trait]
    impl Widget for Shout {
        fn type_name(&self) -> &'static str {
            "shout"
        }

        fn base_kind(&self) -> BaseKind {
            BaseKind::Paragraph
        }

        fn configure(&mut self, config: &Configuration<'_>, _scope: &mut Scope<'_>) -> Result<(), GuiError> {
            self.text = config.label("text")?.to_uppercase();
            Ok(())
        }

        async fn render(&mut self, node: Node, _cx: &RenderContext) -> Result<Node, GuiError> {
            Ok(node.with_text(self.text.clone()))
        }
    }

    #[tokio::test]
    async fn custom_widgets_plug_into_composites() {
        let registry = registry_for(structure_json(
            &["container", "shout"],
            json!([[0, {"title": "t", "object": 1}], [1, {"text": "hey"}]]),
            json!(0),
        ));
        registry
            .declare_widget("shout", || Box::new(Shout { text: String::new() }))
            .unwrap();
        let node = registry
            .widget(0usize)
            .unwrap()
            .render(&context_with(MockFetcher::new()))
            .await
            .unwrap();
        let shouts = node.find_all_by_class("shout");
        let shout = shouts[0];
        assert_eq!(shout.kind(), BaseKind::Paragraph);
        assert_eq!(shout.text(), Some("HEY"));
    }
}
