use super::{Configuration, RenderContext, Widget};
use crate::error::GuiError;
use crate::render::{BaseKind, Node};
use crate::structure::Scope;
use async_trait::async_trait;

/// Blank widget filling unused slots. Renders hidden.
#[derive(Debug, Default, Clone, Copy)]
pub struct VoidWidget;

#[async_trait]
impl Widget for VoidWidget {
    fn type_name(&self) -> &'static str {
        "void"
    }

    fn base_kind(&self) -> BaseKind {
        BaseKind::Block
    }

    fn configure(&mut self, _config: &Configuration<'_>, _scope: &mut Scope<'_>) -> Result<(), GuiError> {
        Ok(())
    }

    async fn render(&mut self, mut node: Node, _cx: &RenderContext) -> Result<Node, GuiError> {
        node.set_attribute("hidden", "");
        node.set_style("display", "none");
        Ok(node)
    }
}
