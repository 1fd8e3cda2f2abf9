use super::{render_children, Configuration, RenderContext, Widget};
use crate::error::GuiError;
use crate::render::{BaseKind, Node};
use crate::structure::{ConfiguredWidget, Scope};
use async_trait::async_trait;
use serde_json::Value;

/// Grid of child widgets sized by fractional column and row tracks.
#[derive(Debug, Default)]
pub struct LayoutWidget {
    columns: Vec<f64>,
    rows: Vec<f64>,
    children: Vec<ConfiguredWidget>,
}

impl LayoutWidget {
    pub fn capacity(&self) -> usize {
        self.columns.len() * self.rows.len()
    }
}

fn tracks(sizes: &[f64]) -> String {
    sizes
        .iter()
        .map(|size| format!("{size}fr"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl Widget for LayoutWidget {
    fn type_name(&self) -> &'static str {
        "layout"
    }

    fn base_kind(&self) -> BaseKind {
        BaseKind::Block
    }

    fn configure(&mut self, config: &Configuration<'_>, scope: &mut Scope<'_>) -> Result<(), GuiError> {
        self.columns = config.positive_numbers("columns")?;
        self.rows = config.positive_numbers("rows")?;
        let capacity = self.capacity();

        let Value::Array(items) = config.require("items")? else {
            return Err(config.error("items", "must be an array").into());
        };
        if items.len() > capacity {
            return Err(GuiError::Capacity {
                capacity,
                requested: items.len(),
            });
        }

        let mut children = Vec::with_capacity(capacity);
        for (index, item) in items.iter().enumerate() {
            let item = config.nested(format!("items[{index}]"), item)?;
            let reference = item.reference("object")?;
            children.push(scope.resolve_optional(reference.as_ref())?);
        }
        children.resize_with(capacity, ConfiguredWidget::placeholder);
        self.children = children;
        Ok(())
    }

    async fn render(&mut self, mut node: Node, cx: &RenderContext) -> Result<Node, GuiError> {
        node.set_style("display", "grid");
        node.set_style("grid-template-columns", tracks(&self.columns));
        node.set_style("grid-template-rows", tracks(&self.rows));
        for child in render_children(std::mem::take(&mut self.children), cx).await? {
            node.push(child);
        }
        Ok(node)
    }
}
