use serde_json::Value;

use crate::foundation::value::{normalize_size, pick_number};
use crate::keys::derive::{ItemKeys, section_key};
use crate::overrides::entry::ANIMATE;
use crate::overrides::merge::EffectiveConfig;
use crate::overrides::resolve::{KeySpace, resolve_chain};
use crate::overrides::table::{OverrideTable, SectionMeta, SectionTable};
use crate::story::layer::LayerPlan;
use crate::story::model::{ItemDescriptor, SectionDescriptor, Storyboard};

/// Animation name that disables scroll animation for an item.
pub const NO_ANIMATION: &str = "none";

/// Presentation values for a whole storyboard.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StoryPlan {
    /// One plan per section, in document order.
    pub sections: Vec<SectionPlan>,
}

/// Presentation values for one section.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionPlan {
    /// Resolved section key.
    pub key: String,
    /// Container adjustments from `_meta`.
    pub layout: SectionLayout,
    /// One entry per `.layer` element.
    pub layers: Vec<LayerPlan>,
    /// One entry per `.parallax-item` element.
    pub items: Vec<ItemPlacement>,
}

/// Section container adjustments with CSS lengths normalized.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SectionLayout {
    /// Section `z-index`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::foundation::value::serialize_opt_number"
    )]
    pub z_index: Option<f64>,
    /// `--section-offset-x`; only set when it normalizes to a length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<String>,
    /// `--section-offset-y`; only set when it normalizes to a length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<String>,
    /// Spacing is `Some("")` when declared but empty: the property is cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,
    /// `margin-bottom`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,
    /// `padding-top`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<String>,
    /// `padding-bottom`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<String>,
    /// `padding-left`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<String>,
    /// `padding-right`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<String>,
}

impl SectionLayout {
    /// Normalize a section's `_meta` record. No record means no adjustments.
    pub fn from_meta(meta: Option<&SectionMeta>) -> Self {
        let Some(meta) = meta else {
            return Self::default();
        };
        let offset = |v: &Option<Value>| {
            v.as_ref()
                .map(normalize_size)
                .filter(|s| !s.is_empty())
        };
        let spacing = |v: &Option<Value>| v.as_ref().map(normalize_size);
        Self {
            z_index: pick_number([meta.z_index.as_ref()]),
            offset_x: offset(&meta.offset_x),
            offset_y: offset(&meta.offset_y),
            margin_top: spacing(&meta.margin_top),
            margin_bottom: spacing(&meta.margin_bottom),
            padding_top: spacing(&meta.padding_top),
            padding_bottom: spacing(&meta.padding_bottom),
            padding_left: spacing(&meta.padding_left),
            padding_right: spacing(&meta.padding_right),
        }
    }
}

/// Presentation values for one item.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ItemPlacement {
    /// Layered key, exposed to authors as `data-layout-key`.
    pub layout_key: String,
    /// Unqualified key.
    pub raw_key: String,
    /// Depth-layer label.
    pub layer: String,
    /// Key space the override was found under; `None` when no override applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<KeySpace>,
    /// Author note from the override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// `display: none`.
    pub hidden: bool,
    /// Absent for hidden items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ItemStyle>,
}

/// Style values for a displayed item.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ItemStyle {
    /// `--base-x`.
    #[serde(serialize_with = "crate::foundation::value::serialize_number")]
    pub base_x: f64,
    /// `--base-y`.
    #[serde(serialize_with = "crate::foundation::value::serialize_number")]
    pub base_y: f64,
    /// `--scale`.
    #[serde(serialize_with = "crate::foundation::value::serialize_number")]
    pub base_scale: f64,
    /// `z-index`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::foundation::value::serialize_opt_number"
    )]
    pub z_index: Option<f64>,
    /// `is-full-width` class.
    pub full_width: bool,
    /// Sizing of the embedded media; absent when the item has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaSize>,
    /// Scroll animation preset name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate: Option<String>,
}

/// Explicit media dimensions. `None` leaves the intrinsic size.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct MediaSize {
    /// CSS width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// CSS height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

/// Plan every section of `story` against `table`.
#[tracing::instrument(level = "debug", skip_all, fields(sections = story.sections.len()))]
pub fn plan_story(story: &Storyboard, table: &OverrideTable) -> StoryPlan {
    StoryPlan {
        sections: story
            .sections
            .iter()
            .map(|s| plan_section(s, table))
            .collect(),
    }
}

/// Plan one section: layout from `_meta`, layer speeds, item placements.
pub fn plan_section(section: &SectionDescriptor, table: &OverrideTable) -> SectionPlan {
    let key = section_key(section);
    let section_table = table.section(&key);
    if section_table.is_none() {
        tracing::debug!(section = %key, "no overrides for section");
    }

    SectionPlan {
        layout: SectionLayout::from_meta(section_table.and_then(SectionTable::meta)),
        layers: section.layers.iter().map(LayerPlan::from_descriptor).collect(),
        items: section
            .items
            .iter()
            .map(|item| place_item(&key, section_table, item))
            .collect(),
        key,
    }
}

/// Resolve the override for `item` and combine it with the item's own
/// `data-*` declarations.
pub fn place_item(
    section_key: &str,
    section: Option<&SectionTable>,
    item: &ItemDescriptor,
) -> ItemPlacement {
    let keys = ItemKeys::derive(section_key, item);
    let resolved = resolve_chain(section, &keys.layered, &keys.raw);
    let matched = resolved.as_ref().map(|r| r.matched);
    let config = resolved.map(|r| r.chain.merge());
    let config = config.as_ref();

    let note = config.and_then(EffectiveConfig::note).map(str::to_owned);
    let hidden = config.is_some_and(EffectiveConfig::is_hidden);
    let style = (!hidden).then(|| item_style(config, item));

    ItemPlacement {
        layout_key: keys.layered,
        raw_key: keys.raw,
        layer: keys.layer,
        matched,
        note,
        hidden,
        style,
    }
}

fn item_style(config: Option<&EffectiveConfig>, item: &ItemDescriptor) -> ItemStyle {
    let own = |v: Option<f64>| v.map(Value::from);
    let (ox, oy, os) = (
        own(config.and_then(|c| c.base_x)),
        own(config.and_then(|c| c.base_y)),
        own(config.and_then(|c| c.base_scale)),
    );
    let data = &item.data;
    let full_width = config.is_some_and(EffectiveConfig::full_width);

    ItemStyle {
        base_x: pick_number([ox.as_ref(), data.base_x.as_ref()]).unwrap_or(0.0),
        base_y: pick_number([oy.as_ref(), data.base_y.as_ref()]).unwrap_or(0.0),
        base_scale: pick_number([os.as_ref(), data.base_scale.as_ref()]).unwrap_or(1.0),
        z_index: pick_number([config.and_then(EffectiveConfig::z_index), data.z_index.as_ref()]),
        full_width,
        media: item.media.as_ref().map(|_| MediaSize {
            width: config.and_then(EffectiveConfig::width).map(normalize_size),
            height: config.and_then(EffectiveConfig::height).map(normalize_size),
        }),
        animate: animation_name(config, item),
    }
}

/// Override `animate` when present and not null, else `data-animate`;
/// empty names and [`NO_ANIMATION`] mean no animation.
fn animation_name(config: Option<&EffectiveConfig>, item: &ItemDescriptor) -> Option<String> {
    let declared = match config.and_then(|c| c.field(ANIMATE)) {
        Some(Value::Null) | None => item.data.animate.clone(),
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    };
    declared.filter(|name| !name.is_empty() && name != NO_ANIMATION)
}

#[cfg(test)]
#[path = "../../tests/unit/story/placement.rs"]
mod tests;
