//! Retained node tree produced by widget rendering.
//!
//! A [`Node`] is the host-surface representation of a rendered widget: a base
//! kind (which maps onto an HTML tag), a class tagging the widget type,
//! attributes, inline style declarations, optional text, and ordered
//! children. The tree is plain data; [`html`] serializes it into a document.

pub mod html;

use std::collections::BTreeMap;

/// Element kinds a widget placeholder can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseKind {
    Block,
    Inline,
    Heading,
    Paragraph,
    Image,
    Audio,
    Video,
    Source,
    Fieldset,
    Legend,
    Button,
    Dialog,
}

impl BaseKind {
    /// HTML tag name for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Block => "div",
            Self::Inline => "span",
            Self::Heading => "h2",
            Self::Paragraph => "p",
            Self::Image => "img",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Source => "source",
            Self::Fieldset => "fieldset",
            Self::Legend => "legend",
            Self::Button => "button",
            Self::Dialog => "dialog",
        }
    }

    /// True for kinds serialized without children or a closing tag.
    pub fn is_void(self) -> bool {
        matches!(self, Self::Image | Self::Source)
    }
}

/// One node of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: BaseKind,
    class: Option<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(kind: BaseKind) -> Self {
        Self {
            kind,
            class: None,
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Build a widget placeholder tagged with its widget type.
    pub fn widget(kind: BaseKind, widget_type: &str) -> Self {
        let mut node = Self::new(kind);
        node.class = Some(widget_type.to_string());
        node
    }

    /// Builder form of [`Node::set_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Builder form of [`Node::set_attribute`].
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn kind(&self) -> BaseKind {
        self.kind
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Inline style declaration for `property`, if set.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.style.insert(property.to_string(), value.into());
    }

    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.style
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn is_hidden(&self) -> bool {
        self.has_attribute("hidden")
    }

    /// Concatenated text of this node and all descendants, hidden or not.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out, false);
        out
    }

    /// Concatenated text of the subtree, skipping hidden nodes.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out, true);
        out
    }

    fn collect_text(&self, out: &mut String, skip_hidden: bool) {
        if skip_hidden && self.is_hidden() {
            return;
        }
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out, skip_hidden);
        }
    }

    /// First node in depth-first order (self included) matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }

    /// All nodes in depth-first order (self included) tagged with `class`.
    pub fn find_all_by_class(&self, class: &str) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Node>) {
        if self.class() == Some(class) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_by_class(class, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_placeholder_carries_type_as_class() {
        let node = Node::widget(BaseKind::Inline, "text");
        assert_eq!(node.kind().tag(), "span");
        assert_eq!(node.class(), Some("text"));
        assert!(node.children().is_empty());
    }

    #[test]
    fn visible_text_skips_hidden_subtrees() {
        let mut root = Node::new(BaseKind::Block);
        root.push(Node::new(BaseKind::Inline).with_text("shown"));
        root.push(
            Node::new(BaseKind::Inline)
                .with_text("secret")
                .with_attribute("hidden", ""),
        );
        assert_eq!(root.text_content(), "shownsecret");
        assert_eq!(root.visible_text(), "shown");
    }

    #[test]
    fn find_all_by_class_walks_depth_first() {
        let mut root = Node::widget(BaseKind::Block, "layout");
        let mut nested = Node::widget(BaseKind::Block, "void");
        nested.push(Node::widget(BaseKind::Block, "void"));
        root.push(nested);
        root.push(Node::widget(BaseKind::Block, "void"));
        assert_eq!(root.find_all_by_class("void").len(), 3);
        assert!(root.find(&|n| n.class() == Some("layout")).is_some());
    }

    #[test]
    fn attributes_and_styles_round_through_setters() {
        let mut node = Node::new(BaseKind::Button);
        node.set_attribute("active", "");
        node.set_style("--position", "top");
        assert!(node.has_attribute("active"));
        assert_eq!(node.style("--position"), Some("top"));
        node.remove_attribute("active");
        assert!(!node.has_attribute("active"));
    }
}
