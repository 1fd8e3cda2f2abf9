//! `tabs`: named panels behind a row of selector buttons.
//!
//! Rendered shape:
//!
//! ```text
//! div.tabs
//! ├── div.tab-bar     button[data-tab] per tab, one carries `active`
//! └── div.tab-panels  div[data-tab] per tab, all but one `hidden`
//! ```

use super::{render_children, Configuration, RenderContext, Widget};
use crate::error::GuiError;
use crate::render::{BaseKind, Node};
use crate::structure::{ConfiguredWidget, Scope};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;

const TAB_ATTRIBUTE: &str = "data-tab";

/// Page script mirroring [`select_tab`] for clicks on tab buttons.
///
/// Emitted once per page that contains a `tabs` node.
pub const TAB_SCRIPT: &str = r#"document.addEventListener("click", (event) => {
  const button = event.target.closest(".tabs > .tab-bar > button[data-tab]");
  if (!button) return;
  const tabs = button.parentElement.parentElement;
  const name = button.dataset.tab;
  for (const other of tabs.querySelectorAll(":scope > .tab-bar > button[data-tab]")) {
    other.toggleAttribute("active", other.dataset.tab === name);
  }
  for (const panel of tabs.querySelectorAll(":scope > .tab-panels > div[data-tab]")) {
    panel.hidden = panel.dataset.tab !== name;
  }
});"#;

/// Side of the panel area the button bar sits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabPosition {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl TabPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

#[derive(Debug, Default)]
pub struct TabsWidget {
    position: TabPosition,
    names: Vec<String>,
    children: Vec<ConfiguredWidget>,
}

#[async_trait]
impl Widget for TabsWidget {
    fn type_name(&self) -> &'static str {
        "tabs"
    }

    fn base_kind(&self) -> BaseKind {
        BaseKind::Block
    }

    fn configure(&mut self, config: &Configuration<'_>, scope: &mut Scope<'_>) -> Result<(), GuiError> {
        self.position = config
            .optional::<TabPosition>("position", "one of top, right, bottom, left")?
            .unwrap_or_default();

        let items = config.array("items")?;
        let mut seen = HashSet::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let item = config.nested(format!("items[{index}]"), item)?;
            let name = item.label("name")?;
            if !seen.insert(name.clone()) {
                return Err(item.error("name", format!("duplicate tab name \"{name}\"")).into());
            }
            let reference = item.reference("object")?;
            self.children.push(scope.resolve_optional(reference.as_ref())?);
            self.names.push(name);
        }
        Ok(())
    }

    async fn render(&mut self, mut node: Node, cx: &RenderContext) -> Result<Node, GuiError> {
        let panels = render_children(std::mem::take(&mut self.children), cx).await?;

        let mut bar = Node::widget(BaseKind::Block, "tab-bar");
        let mut panel_area = Node::widget(BaseKind::Block, "tab-panels");
        for (name, content) in self.names.iter().zip(panels) {
            bar.push(
                Node::new(BaseKind::Button)
                    .with_text(name.clone())
                    .with_attribute(TAB_ATTRIBUTE, name.clone()),
            );
            let mut panel = Node::new(BaseKind::Block).with_attribute(TAB_ATTRIBUTE, name.clone());
            panel.push(content);
            panel_area.push(panel);
        }

        node.set_style("--position", self.position.as_str());
        node.push(bar);
        node.push(panel_area);
        if let Some(first) = self.names.first() {
            select_tab(&mut node, first);
        }
        Ok(node)
    }
}

/// Activate the tab called `name` in a rendered `tabs` node.
///
/// Returns false, leaving the node untouched, when no such tab exists.
pub fn select_tab(tabs: &mut Node, name: &str) -> bool {
    let [bar, panels] = tabs.children_mut() else {
        return false;
    };
    let known = bar
        .children()
        .iter()
        .any(|button| button.attribute(TAB_ATTRIBUTE) == Some(name));
    if !known {
        return false;
    }

    for button in bar.children_mut() {
        if button.attribute(TAB_ATTRIBUTE) == Some(name) {
            button.set_attribute("active", "");
        } else {
            button.remove_attribute("active");
        }
    }
    for panel in panels.children_mut() {
        if panel.attribute(TAB_ATTRIBUTE) == Some(name) {
            panel.remove_attribute("hidden");
        } else {
            panel.set_attribute("hidden", "");
        }
    }
    true
}

/// Name of the active tab of a rendered `tabs` node.
pub fn active_tab(tabs: &Node) -> Option<&str> {
    tabs.children()
        .first()?
        .children()
        .iter()
        .find(|button| button.has_attribute("active"))
        .and_then(|button| button.attribute(TAB_ATTRIBUTE))
}
