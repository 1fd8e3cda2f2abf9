//! Shared configuration policy for text-bearing widgets (`text`, `banner`).

use super::color::is_css_color;
use super::Configuration;
use crate::error::ConfigError;
use crate::render::Node;
use serde::Deserialize;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Right,
    Center,
    Justify,
}

impl HorizontalAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
            Self::Justify => "justify",
        }
    }
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AlignSpec {
    Horizontal(HorizontalAlign),
    Pair {
        horizontal: Option<HorizontalAlign>,
        vertical: Option<VerticalAlign>,
    },
}

/// Validated text, alignment and color of a textual widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Textual {
    pub text: String,
    pub horizontal: HorizontalAlign,
    pub vertical: Option<VerticalAlign>,
    pub color: Option<String>,
}

impl Textual {
    /// Read `text`, `align` and `color`; `default_align` applies when
    /// `align` (or its horizontal part) is omitted.
    pub fn configure(config: &Configuration<'_>, default_align: HorizontalAlign) -> Result<Self, ConfigError> {
        let text = config.text("text")?;
        let (horizontal, vertical) = match config.optional::<AlignSpec>(
            "align",
            "one of left, right, center, justify or a {horizontal, vertical} pair",
        )? {
            None => (default_align, None),
            Some(AlignSpec::Horizontal(h)) => (h, None),
            Some(AlignSpec::Pair {
                horizontal,
                vertical,
            }) => (horizontal.unwrap_or(default_align), vertical),
        };
        let color = match config.get("color") {
            None => None,
            Some(value) => match value.as_str() {
                Some(color) if is_css_color(color) => Some(color.trim().to_string()),
                Some(color) => {
                    return Err(config.error("color", format!("\"{color}\" is not a valid color")))
                }
                None => return Err(config.error("color", "must be a string")),
            },
        };
        Ok(Self {
            text,
            horizontal,
            vertical,
            color,
        })
    }

    /// Write text and presentation properties onto `node`.
    pub fn apply(&self, node: &mut Node) {
        node.set_text(self.text.clone());
        node.set_style("--alignment", self.horizontal.as_str());
        if let Some(vertical) = self.vertical {
            node.set_style("--vertical-alignment", vertical.as_str());
        }
        if let Some(color) = &self.color {
            node.set_style("--color", color.clone());
        }
    }
}
