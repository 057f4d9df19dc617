use crate::keys::slug::slugify;
use crate::story::model::{ItemDescriptor, MediaDescriptor, SectionDescriptor};

/// Raw key used when an item carries no usable identity at all.
pub const UNKNOWN_ITEM_KEY: &str = "unknown-item";
/// Section key used when a section has neither `data-section` nor an id.
pub const UNKNOWN_SECTION_KEY: &str = "unknown";
/// Layer label for items outside any marked depth layer.
pub const DEFAULT_LAYER_LABEL: &str = "front";

const LAYER_MARKER: &str = "layer";
const LAYER_CLASS_PREFIX: &str = "layer-";

/// Identity of one item inside its section.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ItemKeys {
    /// Unqualified identity.
    pub raw: String,
    /// Depth-layer label (`front`, `mid`, `bg`, ...).
    pub layer: String,
    /// `<section>-<layer>-<suffix>`.
    pub layered: String,
}

impl ItemKeys {
    /// Derive raw, layer and layered keys for `item` inside `section_key`.
    pub fn derive(section_key: &str, item: &ItemDescriptor) -> Self {
        let raw = raw_item_key(item);
        let layer = layer_label(&item.ancestor_classes);
        let layered = compose_layered_key(section_key, &layer, &raw);
        Self {
            raw,
            layer,
            layered,
        }
    }
}

/// `data-section`, then the element id, then [`UNKNOWN_SECTION_KEY`].
pub fn section_key(section: &SectionDescriptor) -> String {
    [section.section.as_deref(), section.id.as_deref()]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_SECTION_KEY)
        .to_owned()
}

/// Raw key lookup order: item `data-key`, media `data-key`, slug of the media
/// alt text, slug of the media file stem, then [`UNKNOWN_ITEM_KEY`].
///
/// A source whose slug comes out empty is skipped so the result is never empty.
pub fn raw_item_key(item: &ItemDescriptor) -> String {
    if let Some(key) = non_empty(item.key.as_deref()) {
        return key.to_owned();
    }
    item.media
        .as_ref()
        .and_then(media_key)
        .unwrap_or_else(|| UNKNOWN_ITEM_KEY.to_owned())
}

fn media_key(media: &MediaDescriptor) -> Option<String> {
    if let Some(key) = non_empty(media.key.as_deref()) {
        return Some(key.to_owned());
    }

    let from_alt = media
        .alt
        .as_deref()
        .filter(|alt| !alt.trim().is_empty())
        .map(slugify)
        .filter(|s| !s.is_empty());
    if from_alt.is_some() {
        return from_alt;
    }

    non_empty(media.src.as_deref())
        .map(|src| slugify(file_stem(src)))
        .filter(|s| !s.is_empty())
}

/// Last path segment of `src` (either separator) without its extension.
fn file_stem(src: &str) -> &str {
    let name = src
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(src);
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => &name[..dot],
        _ => name,
    }
}

/// Label of the nearest ancestor marked as a depth layer.
///
/// `ancestor_classes` is ordered nearest first. An ancestor counts when it has
/// the `layer` class and some `layer-*` class; the label is that class minus
/// its prefix.
pub fn layer_label(ancestor_classes: &[Vec<String>]) -> String {
    ancestor_classes
        .iter()
        .filter(|classes| classes.iter().any(|c| c == LAYER_MARKER))
        .find_map(|classes| {
            classes
                .iter()
                .find_map(|c| c.strip_prefix(LAYER_CLASS_PREFIX))
        })
        .unwrap_or(DEFAULT_LAYER_LABEL)
        .to_owned()
}

/// Namespace `raw_key` by section and layer without doubling prefixes.
///
/// `"<section>-"` and then `"<layer>-"` are each stripped once from the front
/// of the raw key; if nothing is left the raw key itself becomes the suffix.
pub fn compose_layered_key(section_key: &str, layer_label: &str, raw_key: &str) -> String {
    let mut suffix = raw_key;
    if let Some(rest) = strip_dashed_prefix(suffix, section_key) {
        suffix = rest;
    }
    if let Some(rest) = strip_dashed_prefix(suffix, layer_label) {
        suffix = rest;
    }
    if suffix.is_empty() {
        suffix = raw_key;
    }
    format!("{section_key}-{layer_label}-{suffix}")
}

fn strip_dashed_prefix<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.strip_prefix(prefix)?.strip_prefix('-')
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/keys/derive.rs"]
mod tests;
