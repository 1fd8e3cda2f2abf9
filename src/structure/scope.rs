//! Resolution scope: the ancestry chain of a widget being configured.

use super::document::{StructureDocument, WidgetId};
use super::{ConfiguredWidget, StructureRegistry};
use crate::error::{GuiError, StructureError};
use crate::render::Node;
use crate::widgets::Configuration;

/// Passed to [`crate::widgets::Widget::configure`] so composite widgets can
/// resolve their children. Tracks which identifiers are currently being
/// resolved, so a structure that refers back into its own ancestry fails
/// with [`GuiError::RecursiveStructure`] instead of recursing forever.
pub struct Scope<'a> {
    registry: &'a StructureRegistry,
    document: &'a StructureDocument,
    ancestry: Vec<WidgetId>,
}

impl<'a> Scope<'a> {
    pub(super) fn new(registry: &'a StructureRegistry, document: &'a StructureDocument) -> Self {
        Self {
            registry,
            document,
            ancestry: Vec::new(),
        }
    }

    /// Identifiers currently being resolved, outermost first.
    pub fn ancestry(&self) -> &[WidgetId] {
        &self.ancestry
    }

    pub fn depth(&self) -> usize {
        self.ancestry.len()
    }

    /// Resolve `id` into a configured widget, recursively resolving whatever
    /// it references.
    pub fn resolve(&mut self, id: &WidgetId) -> Result<ConfiguredWidget, GuiError> {
        let id = &self.document.canonical_id(id);
        if self.ancestry.contains(id) {
            let chain = self
                .ancestry
                .iter()
                .chain(std::iter::once(id))
                .map(WidgetId::to_string)
                .collect();
            return Err(GuiError::RecursiveStructure {
                identifier: id.to_string(),
                chain,
            });
        }
        if self.ancestry.len() >= self.registry.max_depth() {
            return Err(GuiError::RecursiveStructure {
                identifier: id.to_string(),
                chain: Vec::new(),
            });
        }

        self.ancestry.push(id.clone());
        let result = self.instantiate(id);
        self.ancestry.pop();
        result
    }

    /// Resolve an optional reference; `None` yields the void placeholder.
    pub fn resolve_optional(&mut self, id: Option<&WidgetId>) -> Result<ConfiguredWidget, GuiError> {
        match id {
            Some(id) => self.resolve(id),
            None => Ok(ConfiguredWidget::placeholder()),
        }
    }

    fn instantiate(&mut self, id: &WidgetId) -> Result<ConfiguredWidget, GuiError> {
        let document = self.document;
        let record = document
            .record(id)
            .ok_or_else(|| StructureError::MissingWidget(id.to_string()))?;
        let type_name = document
            .types()
            .get(record.type_index)
            .ok_or_else(|| StructureError::UnknownType(format!("#{}", record.type_index)))?;
        let factory = self
            .registry
            .factory(type_name)
            .ok_or_else(|| StructureError::UnknownType(type_name.clone()))?;

        let mut widget = factory();
        let placeholder = Node::widget(widget.base_kind(), widget.type_name());
        let configuration = Configuration::new(widget.type_name(), &record.configuration);
        widget.configure(&configuration, self)?;
        tracing::trace!(%id, widget = type_name.as_str(), depth = self.depth(), "widget configured");
        Ok(ConfiguredWidget::new(widget, placeholder))
    }
}
