//! Media widgets: `image`, `audio` and `video`.
//!
//! All three load their `source` through the resource cache and probe the
//! detected content kind before rendering. An unsupported kind fails the
//! widget; an uncertain one renders with a warning.

use super::{Configuration, RenderContext, Widget};
use crate::error::{GuiError, ResourceError};
use crate::render::{BaseKind, Node};
use crate::resources::{MediaFamily, Playability, Resource};
use crate::structure::Scope;
use async_trait::async_trait;
use serde::Deserialize;

/// How visual media fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contain {
    Fit,
    Fill,
}

impl Contain {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Fill => "fill",
        }
    }
}

/// Load `source` and check that `family` can decode it.
async fn load_playable(
    cx: &RenderContext,
    family: MediaFamily,
    source: &str,
) -> Result<Resource, GuiError> {
    let resource = cx.resources().load(source).await?;
    match cx.media().can_play(family, resource.content_kind()) {
        Playability::Probably => {}
        Playability::Maybe => tracing::warn!(
            source,
            content_kind = resource.content_kind(),
            "{} support for this content kind is not guaranteed",
            family.name()
        ),
        Playability::No => {
            return Err(ResourceError::UnsupportedMedia {
                widget: family.name().to_string(),
                content_kind: resource.content_kind().to_string(),
            }
            .into())
        }
    }
    Ok(resource)
}

fn configure_source(config: &Configuration<'_>) -> Result<String, GuiError> {
    match config.require("source")?.as_str() {
        Some(source) if !source.trim().is_empty() => Ok(source.trim().to_string()),
        Some(_) => Err(config.error("source", "must not be empty").into()),
        None => Err(config.error("source", "must be a string").into()),
    }
}

fn configure_contain(config: &Configuration<'_>) -> Result<Option<Contain>, GuiError> {
    Ok(config.optional::<Contain>("contain", "either fit or fill")?)
}

/// Streamed media gets player controls and a typed `source` child.
fn attach_stream(mut node: Node, resource: &Resource) -> Node {
    node.set_attribute("controls", "controls");
    node.push(
        Node::new(BaseKind::Source)
            .with_attribute("src", resource.handle().url())
            .with_attribute("type", resource.content_kind()),
    );
    node
}

#[derive(Debug, Default)]
pub struct ImageWidget {
    source: String,
    contain: Option<Contain>,
}

#[async_trait]
impl Widget for ImageWidget {
    fn type_name(&self) -> &'static str {
        "image"
    }

    fn base_kind(&self) -> BaseKind {
        BaseKind::Image
    }

    fn configure(&mut self, config: &Configuration<'_>, _scope: &mut Scope<'_>) -> Result<(), GuiError> {
        self.source = configure_source(config)?;
        self.contain = configure_contain(config)?;
        Ok(())
    }

    async fn render(&mut self, mut node: Node, cx: &RenderContext) -> Result<Node, GuiError> {
        let resource = load_playable(cx, MediaFamily::Image, &self.source).await?;
        if let Some(contain) = self.contain {
            node.set_attribute("contain", contain.as_str());
        }
        node.set_attribute("src", resource.handle().url());
        Ok(node)
    }
}

#[derive(Debug, Default)]
pub struct VideoWidget {
    source: String,
    contain: Option<Contain>,
}

#[async_trait]
impl Widget for VideoWidget {
    fn type_name(&self) -> &'static str {
        "video"
    }

    fn base_kind(&self) -> BaseKind {
        BaseKind::Video
    }

    fn configure(&mut self, config: &Configuration<'_>, _scope: &mut Scope<'_>) -> Result<(), GuiError> {
        self.source = configure_source(config)?;
        self.contain = configure_contain(config)?;
        Ok(())
    }

    async fn render(&mut self, mut node: Node, cx: &RenderContext) -> Result<Node, GuiError> {
        let resource = load_playable(cx, MediaFamily::Video, &self.source).await?;
        if let Some(contain) = self.contain {
            node.set_attribute("contain", contain.as_str());
        }
        Ok(attach_stream(node, &resource))
    }
}

#[derive(Debug, Default)]
pub struct AudioWidget {
    source: String,
}

#[async_trait]
impl Widget for AudioWidget {
    fn type_name(&self) -> &'static str {
        "audio"
    }

    fn base_kind(&self) -> BaseKind {
        BaseKind::Audio
    }

    fn configure(&mut self, config: &Configuration<'_>, _scope: &mut Scope<'_>) -> Result<(), GuiError> {
        self.source = configure_source(config)?;
        Ok(())
    }

    async fn render(&mut self, node: Node, cx: &RenderContext) -> Result<Node, GuiError> {
        let resource = load_playable(cx, MediaFamily::Audio, &self.source).await?;
        Ok(attach_stream(node, &resource))
    }
}
