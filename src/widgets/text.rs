//! `text` and `banner`: the two textual widgets.

use super::textual::{HorizontalAlign, Textual};
use super::{Configuration, RenderContext, Widget};
use crate::error::GuiError;
use crate::render::{BaseKind, Node};
use crate::structure::Scope;
use async_trait::async_trait;

/// Inline run of text, left-aligned unless configured otherwise.
#[derive(Debug, Default)]
pub struct TextWidget {
    textual: Option<Textual>,
}

/// Heading text, centered unless configured otherwise.
#[derive(Debug, Default)]
pub struct BannerWidget {
    textual: Option<Textual>,
}

fn render_textual(textual: Option<&Textual>, mut node: Node) -> Node {
    if let Some(textual) = textual {
        textual.apply(&mut node);
    }
    node
}

#[async_trait]
impl Widget for TextWidget {
    fn type_name(&self) -> &'static str {
        "text"
    }

    fn base_kind(&self) -> BaseKind {
        BaseKind::Inline
    }

    fn configure(&mut self, config: &Configuration<'_>, _scope: &mut Scope<'_>) -> Result<(), GuiError> {
        self.textual = Some(Textual::configure(config, HorizontalAlign::Left)?);
        Ok(())
    }

    async fn render(&mut self, node: Node, _cx: &RenderContext) -> Result<Node, GuiError> {
        Ok(render_textual(self.textual.as_ref(), node))
    }
}

#[async_trait]
impl Widget for BannerWidget {
    fn type_name(&self) -> &'static str {
        "banner"
    }

    fn base_kind(&self) -> BaseKind {
        BaseKind::Heading
    }

    fn configure(&mut self, config: &Configuration<'_>, _scope: &mut Scope<'_>) -> Result<(), GuiError> {
        self.textual = Some(Textual::configure(config, HorizontalAlign::Center)?);
        Ok(())
    }

    async fn render(&mut self, node: Node, _cx: &RenderContext) -> Result<Node, GuiError> {
        Ok(render_textual(self.textual.as_ref(), node))
    }
}
