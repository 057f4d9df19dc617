use std::path::Path;

use anyhow::Context as _;
use serde_json::Value;

use crate::foundation::error::LayoutResult;

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Plain description of a story document, as read off the DOM.
///
/// Every field is what the browser layer can supply as strings or loose
/// values; nothing here is interpreted until planning.
pub struct Storyboard {
    /// Sections in document order.
    #[serde(default)]
    pub sections: Vec<SectionDescriptor>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// One `.story-section` element.
pub struct SectionDescriptor {
    /// `data-section` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Element id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `.layer` elements inside the section.
    #[serde(default)]
    pub layers: Vec<LayerDescriptor>,
    /// `.parallax-item` elements inside the section.
    #[serde(default)]
    pub items: Vec<ItemDescriptor>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// One `.layer` element.
pub struct LayerDescriptor {
    /// Class list of the layer element.
    #[serde(default)]
    pub classes: Vec<String>,
    /// `data-speed` attribute, number or string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Value>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// One `.parallax-item` element.
pub struct ItemDescriptor {
    /// `data-key` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// First embedded image, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaDescriptor>,
    /// Class lists of the item's ancestors, nearest first.
    #[serde(default)]
    pub ancestor_classes: Vec<Vec<String>>,
    /// `data-*` fallbacks used when no override supplies a value.
    #[serde(default)]
    pub data: ItemData,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Embedded media child of an item.
pub struct MediaDescriptor {
    /// `data-key` on the media element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// `alt` text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// `src` path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Item-level `data-*` declarations.
pub struct ItemData {
    /// `data-base-x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_x: Option<Value>,
    /// `data-base-y`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_y: Option<Value>,
    /// `data-base-scale`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_scale: Option<Value>,
    /// `data-z-index`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<Value>,
    /// `data-animate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animate: Option<String>,
}

impl Storyboard {
    /// Parse a storyboard from JSON text.
    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a storyboard JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read storyboard '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}
