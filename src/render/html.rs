//! HTML serialization of rendered node trees.

use super::Node;
use std::fmt::Write;

/// Attributes whose values are resource locations and may be rewritten.
const URL_ATTRIBUTES: &[&str] = &["src", "href", "poster"];

/// Serialize a node tree into an HTML fragment.
pub fn to_html(node: &Node) -> String {
    to_html_with(node, &|_| None)
}

/// Serialize a node tree, letting `rewrite_url` replace resource locations.
///
/// The callback receives each URL-valued attribute and returns a replacement
/// (for example a `data:` URI for a cached blob handle) or `None` to keep it.
pub fn to_html_with(node: &Node, rewrite_url: &dyn Fn(&str) -> Option<String>) -> String {
    let mut out = String::new();
    write_node(node, &mut out, rewrite_url);
    out
}

fn write_node(node: &Node, out: &mut String, rewrite_url: &dyn Fn(&str) -> Option<String>) {
    let tag = node.kind().tag();
    out.push('<');
    out.push_str(tag);
    if let Some(class) = node.class() {
        let _ = write!(out, " class=\"{}\"", escape_attribute(class));
    }
    for (name, value) in node.attributes() {
        if value.is_empty() {
            let _ = write!(out, " {name}");
            continue;
        }
        let value = if URL_ATTRIBUTES.contains(&name) {
            rewrite_url(value).unwrap_or_else(|| value.to_string())
        } else {
            value.to_string()
        };
        let _ = write!(out, " {name}=\"{}\"", escape_attribute(&value));
    }
    let style = node
        .styles()
        .map(|(property, value)| format!("{property}:{value}"))
        .collect::<Vec<_>>()
        .join(";");
    if !style.is_empty() {
        let _ = write!(out, " style=\"{}\"", escape_attribute(&style));
    }
    out.push('>');
    if node.kind().is_void() {
        return;
    }
    if let Some(text) = node.text() {
        out.push_str(&escape_text(text));
    }
    for child in node.children() {
        write_node(child, out, rewrite_url);
    }
    let _ = write!(out, "</{tag}>");
}

/// Escape text content for placement between tags.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a value for placement inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::BaseKind;

    #[test]
    fn serializes_class_attributes_style_and_text() {
        let mut node = Node::widget(BaseKind::Inline, "text").with_text("a < b");
        node.set_style("--alignment", "left");
        node.set_attribute("title", "say \"hi\"");
        assert_eq!(
            to_html(&node),
            "<span class=\"text\" title=\"say &quot;hi&quot;\" style=\"--alignment:left\">a &lt; b</span>"
        );
    }

    #[test]
    fn void_kinds_have_no_closing_tag() {
        let node = Node::new(BaseKind::Image).with_attribute("src", "blob:sss/1");
        assert_eq!(to_html(&node), "<img src=\"blob:sss/1\">");
    }

    #[test]
    fn empty_attribute_values_serialize_as_flags() {
        let node = Node::new(BaseKind::Button).with_attribute("active", "");
        assert_eq!(to_html(&node), "<button active></button>");
    }

    #[test]
    fn rewrite_applies_only_to_url_attributes() {
        let mut node = Node::new(BaseKind::Video);
        node.set_attribute("controls", "controls");
        node.push(Node::new(BaseKind::Source).with_attribute("src", "blob:sss/7"));
        let html = to_html_with(&node, &|url| {
            (url == "blob:sss/7").then(|| "data:video/mp4;base64,AA==".to_string())
        });
        assert_eq!(
            html,
            "<video controls=\"controls\"><source src=\"data:video/mp4;base64,AA==\"></video>"
        );
    }
}
