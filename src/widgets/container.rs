use super::{Configuration, RenderContext, Widget};
use crate::error::GuiError;
use crate::render::{BaseKind, Node};
use crate::structure::{ConfiguredWidget, Scope};
use async_trait::async_trait;

/// A single child framed under a title.
#[derive(Debug, Default)]
pub struct ContainerWidget {
    title: String,
    child: Option<ConfiguredWidget>,
}

#[async_trait]
impl Widget for ContainerWidget {
    fn type_name(&self) -> &'static str {
        "container"
    }

    fn base_kind(&self) -> BaseKind {
        BaseKind::Fieldset
    }

    fn configure(&mut self, config: &Configuration<'_>, scope: &mut Scope<'_>) -> Result<(), GuiError> {
        self.title = config.label("title")?;
        let reference = config.reference("object")?;
        self.child = Some(scope.resolve_optional(reference.as_ref())?);
        Ok(())
    }

    async fn render(&mut self, mut node: Node, cx: &RenderContext) -> Result<Node, GuiError> {
        let child = self.child.take().unwrap_or_else(ConfiguredWidget::placeholder);
        let content = child.render(cx).await?;
        node.push(Node::new(BaseKind::Legend).with_text(self.title.clone()));
        node.push(content);
        Ok(node)
    }
}
