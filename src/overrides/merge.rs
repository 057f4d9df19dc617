use serde::ser::SerializeMap as _;
use serde_json::{Map, Value};

use crate::foundation::value::{is_truthy, non_empty_str};
use crate::overrides::chain::Chain;
use crate::overrides::entry::{
    ANIMATE, FULL_WIDTH, HEIGHT, NOTE, OverrideEntry, VisibilityDecl, WIDTH, Z_INDEX,
};

/// Merged override for one element.
///
/// Serializes to the same camelCase shape as an override entry, minus
/// `group`/`parent` and the `offset*` deltas, which are folded into `base*`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    /// Resolved horizontal offset, if any entry set or shifted it.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::foundation::value::serialize_opt_number"
    )]
    pub base_x: Option<f64>,
    /// Resolved vertical offset.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::foundation::value::serialize_opt_number"
    )]
    pub base_y: Option<f64>,
    /// Resolved scale.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::foundation::value::serialize_opt_number"
    )]
    pub base_scale: Option<f64>,
    /// Cascaded visibility.
    #[serde(flatten)]
    pub visibility: ResolvedVisibility,
    /// Pass-through fields, last writer wins.
    #[serde(flatten)]
    pub presentation: Map<String, Value>,
}

/// Outcome of the visibility cascade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolvedVisibility {
    /// Nothing in the chain spoke about visibility; keep the element's own.
    #[default]
    Unset,
    /// Last `visible` declaration in the chain.
    Declared {
        /// The declared value.
        visible: bool,
    },
    /// Some entry in the chain set `hidden: true`.
    ForceHidden,
}

impl ResolvedVisibility {
    /// Fold one more entry's declaration in (chain order).
    pub fn cascade(self, decl: VisibilityDecl) -> Self {
        match (self, decl) {
            (Self::ForceHidden, _) | (_, VisibilityDecl::ForceHidden) => Self::ForceHidden,
            (current, VisibilityDecl::Inherit) => current,
            (_, VisibilityDecl::Shown) => Self::Declared { visible: true },
            (_, VisibilityDecl::Hidden) => Self::Declared { visible: false },
        }
    }

    /// Resolved `hidden` flag; absent when unset.
    pub fn hidden(self) -> Option<bool> {
        match self {
            Self::Unset => None,
            Self::Declared { visible } => Some(!visible),
            Self::ForceHidden => Some(true),
        }
    }

    /// Carried-through `visible` flag; only present for a soft declaration.
    pub fn visible(self) -> Option<bool> {
        match self {
            Self::Declared { visible } => Some(visible),
            Self::Unset | Self::ForceHidden => None,
        }
    }
}

impl serde::Serialize for ResolvedVisibility {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let hidden = self.hidden();
        let visible = self.visible();
        let len = usize::from(hidden.is_some()) + usize::from(visible.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(h) = hidden {
            map.serialize_entry("hidden", &h)?;
        }
        if let Some(v) = visible {
            map.serialize_entry("visible", &v)?;
        }
        map.end()
    }
}

impl EffectiveConfig {
    /// `hidden` after the cascade.
    pub fn hidden(&self) -> Option<bool> {
        self.visibility.hidden()
    }

    /// `visible` after the cascade.
    pub fn visible(&self) -> Option<bool> {
        self.visibility.visible()
    }

    /// Whether the element should not be displayed at all.
    pub fn is_hidden(&self) -> bool {
        self.hidden() == Some(true) || self.visible() == Some(false)
    }

    /// Pass-through field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.presentation.get(name)
    }

    /// `zIndex`, as authored.
    pub fn z_index(&self) -> Option<&Value> {
        self.field(Z_INDEX)
    }

    /// `width`, as authored.
    pub fn width(&self) -> Option<&Value> {
        self.field(WIDTH)
    }

    /// `height`, as authored.
    pub fn height(&self) -> Option<&Value> {
        self.field(HEIGHT)
    }

    /// Truthiness of `fullWidth`.
    pub fn full_width(&self) -> bool {
        is_truthy(self.field(FULL_WIDTH))
    }

    /// `animate`, when it is a non-empty string.
    pub fn animate(&self) -> Option<&str> {
        non_empty_str(self.field(ANIMATE))
    }

    /// `note`, when it is a non-empty string.
    pub fn note(&self) -> Option<&str> {
        non_empty_str(self.field(NOTE))
    }
}

/// Running value of one positional channel.
#[derive(Clone, Copy, Debug)]
struct Channel {
    value: Option<f64>,
    identity: f64,
}

impl Channel {
    fn new(identity: f64) -> Self {
        Self {
            value: None,
            identity,
        }
    }

    fn apply(&mut self, base: Option<f64>, offset: Option<f64>) {
        if let Some(b) = base {
            self.value = Some(b);
        }
        if let Some(d) = offset {
            self.value = Some(self.value.unwrap_or(self.identity) + d);
        }
    }
}

/// Fold a chain, ancestors first, into one [`EffectiveConfig`].
///
/// `base*` replaces a channel, `offset*` adds onto it (an unset channel counts
/// as 0 for X/Y and 1 for scale). Pass-through fields are overwritten by later
/// entries. Visibility follows [`ResolvedVisibility::cascade`].
pub fn merge_chain(chain: &Chain<'_>) -> EffectiveConfig {
    merge_entries(chain.links().iter().map(|l| l.entry))
}

/// Same as [`merge_chain`] over any ancestor-first sequence of entries.
pub fn merge_entries<'a, I>(entries: I) -> EffectiveConfig
where
    I: IntoIterator<Item = &'a OverrideEntry>,
{
    let mut x = Channel::new(0.0);
    let mut y = Channel::new(0.0);
    let mut scale = Channel::new(1.0);
    let mut visibility = ResolvedVisibility::Unset;
    let mut presentation = Map::new();

    for entry in entries {
        visibility = visibility.cascade(entry.visibility());
        x.apply(entry.base_x, entry.offset_x);
        y.apply(entry.base_y, entry.offset_y);
        scale.apply(entry.base_scale, entry.offset_scale);
        for (prop, value) in &entry.presentation {
            presentation.insert(prop.clone(), value.clone());
        }
    }

    EffectiveConfig {
        base_x: x.value,
        base_y: y.value,
        base_scale: scale.value,
        visibility,
        presentation,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overrides/merge.rs"]
mod tests;
