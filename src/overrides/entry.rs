use serde_json::{Map, Value};

use crate::foundation::value::finite_number;

/// `zIndex` pass-through field.
pub const Z_INDEX: &str = "zIndex";
/// `width` pass-through field.
pub const WIDTH: &str = "width";
/// `height` pass-through field.
pub const HEIGHT: &str = "height";
/// `fullWidth` pass-through field.
pub const FULL_WIDTH: &str = "fullWidth";
/// `animate` pass-through field.
pub const ANIMATE: &str = "animate";
/// `note` pass-through field.
pub const NOTE: &str = "note";

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Sparse adjustment record for one key inside a section.
///
/// Positional and visibility fields are typed because the merger combines
/// them. Everything else (`zIndex`, `width`, `note`, unknown fields) is kept
/// verbatim in [`OverrideEntry::presentation`] and copied last-writer-wins.
///
/// Reading is lenient: positional fields accept numbers or numeric strings,
/// and a recognized field of the wrong type reads as absent instead of
/// failing the table.
pub struct OverrideEntry {
    /// Absolute horizontal offset.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::foundation::value::serialize_opt_number"
    )]
    pub base_x: Option<f64>,
    /// Absolute vertical offset.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::foundation::value::serialize_opt_number"
    )]
    pub base_y: Option<f64>,
    /// Absolute scale multiplier.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::foundation::value::serialize_opt_number"
    )]
    pub base_scale: Option<f64>,
    /// Horizontal delta on top of the inherited `baseX`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::foundation::value::serialize_opt_number"
    )]
    pub offset_x: Option<f64>,
    /// Vertical delta on top of the inherited `baseY`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::foundation::value::serialize_opt_number"
    )]
    pub offset_y: Option<f64>,
    /// Scale delta on top of the inherited `baseScale`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::foundation::value::serialize_opt_number"
    )]
    pub offset_scale: Option<f64>,
    /// Hard hide; no descendant can show the element again.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// Soft visibility; the last declaration in a chain wins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Key of the entry this one inherits from. Takes precedence over `parent`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Alternate spelling of `group`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Pass-through presentation fields.
    #[serde(flatten)]
    pub presentation: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Visibility as declared by a single entry.
pub enum VisibilityDecl {
    /// Declares nothing. `hidden: false` on its own lands here.
    Inherit,
    /// `visible: true`.
    Shown,
    /// `visible: false`.
    Hidden,
    /// `hidden: true`. Wins over every other declaration in the chain.
    ForceHidden,
}

impl OverrideEntry {
    /// Build an entry from its raw fields.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let mut entry = Self::default();
        for (name, value) in fields {
            match name.as_str() {
                "baseX" => entry.base_x = positional(&name, &value),
                "baseY" => entry.base_y = positional(&name, &value),
                "baseScale" => entry.base_scale = positional(&name, &value),
                "offsetX" => entry.offset_x = positional(&name, &value),
                "offsetY" => entry.offset_y = positional(&name, &value),
                "offsetScale" => entry.offset_scale = positional(&name, &value),
                "hidden" => entry.hidden = value.as_bool(),
                "visible" => entry.visible = value.as_bool(),
                "group" => entry.group = value.as_str().map(str::to_owned),
                "parent" => entry.parent = value.as_str().map(str::to_owned),
                _ => {
                    entry.presentation.insert(name, value);
                }
            }
        }
        entry
    }

    /// Key this entry inherits from, if any.
    ///
    /// A present `group` shadows `parent` even when it is empty, and an empty
    /// reference means "no ancestor".
    pub fn inherits_from(&self) -> Option<&str> {
        self.group
            .as_deref()
            .or(self.parent.as_deref())
            .filter(|k| !k.is_empty())
    }

    /// Collapse the two visibility signals into one declaration.
    pub fn visibility(&self) -> VisibilityDecl {
        if self.hidden == Some(true) {
            return VisibilityDecl::ForceHidden;
        }
        match self.visible {
            Some(true) => VisibilityDecl::Shown,
            Some(false) => VisibilityDecl::Hidden,
            None => VisibilityDecl::Inherit,
        }
    }

    /// Pass-through field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.presentation.get(name)
    }
}

fn positional(name: &str, value: &Value) -> Option<f64> {
    let read = finite_number(value);
    if read.is_none() && !value.is_null() {
        tracing::debug!(field = name, %value, "ignoring non-numeric positional field");
    }
    read
}

impl<'de> serde::Deserialize<'de> for OverrideEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Map<String, Value> as serde::Deserialize>::deserialize(deserializer).map(Self::from_fields)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overrides/entry.rs"]
mod tests;
