use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context as _;
use regex::Regex;
use serde::ser::SerializeMap as _;
use serde_json::{Map, Value};

use crate::foundation::error::{LayoutError, LayoutResult};
use crate::overrides::entry::OverrideEntry;

/// Reserved section key holding [`SectionMeta`].
pub const META_KEY: &str = "_meta";

static ASSIGNMENT_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:export\s+default\s+|(?:(?:const|let|var)\s+)?[A-Za-z_$][A-Za-z0-9_$.]*\s*=\s*)",
    )
    .expect("assignment head pattern")
});

/// Static override data for a whole story: section key to [`SectionTable`].
///
/// Loaded once and only read afterwards. Nothing in the crate mutates a table
/// while resolving. Only the top level must be an object: sections and
/// entries that are not objects are skipped, and mistyped fields inside an
/// entry read as absent.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct OverrideTable {
    sections: BTreeMap<String, SectionTable>,
}

/// Override entries of one section plus its optional `_meta` record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionTable {
    meta: Option<SectionMeta>,
    entries: BTreeMap<String, OverrideEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Section container adjustments. Values are kept loose; see
/// [`crate::SectionLayout`] for the normalized form.
pub struct SectionMeta {
    /// Stacking order of the section element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<Value>,
    /// `--section-offset-x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<Value>,
    /// `--section-offset-y`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<Value>,
    /// Top margin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<Value>,
    /// Bottom margin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<Value>,
    /// Top padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<Value>,
    /// Bottom padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<Value>,
    /// Left padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<Value>,
    /// Right padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<Value>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OverrideTable {
    /// Build a table from already-parsed sections.
    pub fn new(sections: BTreeMap<String, SectionTable>) -> Self {
        Self { sections }
    }

    /// Parse a table from JSON text.
    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a table from JSON5 text (comments, single quotes, unquoted keys,
    /// trailing commas).
    pub fn from_json5_str(s: &str) -> LayoutResult<Self> {
        Ok(json5::from_str(s)?)
    }

    /// Parse a script that assigns the table, e.g.
    /// `window.STORY_LAYOUT = { ... };`.
    ///
    /// Everything before the first top-level assignment is ignored, as is a
    /// trailing `;`. Text without an assignment is read as plain JSON5.
    pub fn from_script_str(s: &str) -> LayoutResult<Self> {
        let body = match ASSIGNMENT_HEAD.find(s) {
            Some(m) => &s[m.end()..],
            None => s,
        };
        let body = body.trim_end().trim_end_matches(';').trim_end();
        if body.is_empty() {
            return Err(LayoutError::validation("layout script has no table literal"));
        }
        Self::from_json5_str(body)
    }

    /// Read a table from disk, choosing the parser by file extension
    /// (`.json`, `.json5`, `.js`/`.mjs`). Unknown extensions are read as JSON5.
    pub fn from_path(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read override table '{}'", path.display()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let table = match ext.as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("js") | Some("mjs") => Self::from_script_str(&text),
            _ => Self::from_json5_str(&text),
        };
        table.map_err(|e| match e {
            LayoutError::Serde(msg) => LayoutError::serde(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Section table by key.
    pub fn section(&self, key: &str) -> Option<&SectionTable> {
        self.sections.get(key)
    }

    /// All sections in key order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &SectionTable)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// `true` when the table has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Static checks over every section. Resolution tolerates all of these;
    /// they exist to catch authoring mistakes.
    pub fn diagnostics(&self) -> Vec<TableIssue> {
        self.sections
            .iter()
            .flat_map(|(name, section)| section.diagnostics(name))
            .collect()
    }
}

impl SectionTable {
    /// Build a section from its entries and optional meta record.
    pub fn new(entries: BTreeMap<String, OverrideEntry>, meta: Option<SectionMeta>) -> Self {
        Self { meta, entries }
    }

    /// Entry by key.
    pub fn get(&self, key: &str) -> Option<&OverrideEntry> {
        self.entries.get(key)
    }

    /// Entry by key, together with the key as stored in the table.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &OverrideEntry)> {
        self.entries.get_key_value(key).map(|(k, v)| (k.as_str(), v))
    }

    /// The section's `_meta` record.
    pub fn meta(&self) -> Option<&SectionMeta> {
        self.meta.as_ref()
    }

    /// Entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &OverrideEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries (excluding `_meta`).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn diagnostics(&self, section: &str) -> Vec<TableIssue> {
        let mut issues = Vec::new();
        let mut cycles = BTreeSet::<Vec<String>>::new();

        for (key, entry) in &self.entries {
            if let (Some(group), Some(parent)) = (&entry.group, &entry.parent) {
                issues.push(TableIssue::AmbiguousParent {
                    section: section.to_owned(),
                    key: key.clone(),
                    group: group.clone(),
                    parent: parent.clone(),
                });
            }

            let Some(target) = entry.inherits_from() else {
                continue;
            };
            if target == key.as_str() {
                issues.push(TableIssue::SelfReference {
                    section: section.to_owned(),
                    key: key.clone(),
                });
                continue;
            }
            if !self.entries.contains_key(target) {
                issues.push(TableIssue::DanglingReference {
                    section: section.to_owned(),
                    key: key.clone(),
                    target: target.to_owned(),
                });
                continue;
            }
            if let Some(cycle) = self.cycle_from(key) {
                cycles.insert(cycle);
            }
        }

        issues.extend(cycles.into_iter().map(|keys| TableIssue::Cycle {
            section: section.to_owned(),
            keys,
        }));
        issues
    }

    /// Reference cycle reachable from `start`, rotated so its smallest key is
    /// first. Self references are reported separately and skipped here.
    fn cycle_from(&self, start: &str) -> Option<Vec<String>> {
        let mut path: Vec<&str> = Vec::new();
        let mut current = Some(start);
        while let Some(key) = current {
            if let Some(pos) = path.iter().position(|k| *k == key) {
                let mut cycle: Vec<String> = path[pos..].iter().map(|k| (*k).to_owned()).collect();
                if cycle.len() < 2 {
                    return None;
                }
                let min = cycle
                    .iter()
                    .enumerate()
                    .min_by(|a, b| a.1.cmp(b.1))
                    .map_or(0, |(i, _)| i);
                cycle.rotate_left(min);
                return Some(cycle);
            }
            let entry = self.entries.get(key)?;
            path.push(key);
            current = entry.inherits_from();
        }
        None
    }
}

impl SectionTable {
    /// Build a section from its raw fields. `_meta` becomes [`SectionMeta`];
    /// entries that are not objects are skipped.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let mut meta = None;
        let mut entries = BTreeMap::new();
        for (key, value) in fields {
            let Value::Object(fields) = value else {
                tracing::debug!(key = %key, "skipping override entry that is not an object");
                continue;
            };
            if key == META_KEY {
                match serde_json::from_value::<SectionMeta>(Value::Object(fields)) {
                    Ok(m) => meta = Some(m),
                    Err(err) => tracing::debug!(%err, "skipping unreadable section meta"),
                }
            } else {
                entries.insert(key, OverrideEntry::from_fields(fields));
            }
        }
        Self { meta, entries }
    }
}

impl<'de> serde::Deserialize<'de> for SectionTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Map<String, Value> as serde::Deserialize>::deserialize(deserializer).map(Self::from_fields)
    }
}

impl<'de> serde::Deserialize<'de> for OverrideTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <Map<String, Value> as serde::Deserialize>::deserialize(deserializer)?;
        let mut sections = BTreeMap::new();
        for (name, value) in raw {
            let Value::Object(fields) = value else {
                tracing::debug!(section = %name, "skipping section that is not an object");
                continue;
            };
            sections.insert(name, SectionTable::from_fields(fields));
        }
        Ok(Self { sections })
    }
}

impl serde::Serialize for SectionTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let len = self.entries.len() + usize::from(self.meta.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(meta) = &self.meta {
            map.serialize_entry(META_KEY, meta)?;
        }
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// Authoring problem found by [`OverrideTable::diagnostics`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableIssue {
    /// `group`/`parent` names a key the section does not define.
    DanglingReference {
        /// Section key.
        section: String,
        /// Entry holding the reference.
        key: String,
        /// Missing key.
        target: String,
    },
    /// An entry inherits from itself.
    SelfReference {
        /// Section key.
        section: String,
        /// Offending entry.
        key: String,
    },
    /// Entries inheriting from each other in a loop.
    Cycle {
        /// Section key.
        section: String,
        /// Keys on the loop, smallest first, in reference order.
        keys: Vec<String>,
    },
    /// Both `group` and `parent` are set; `group` is used.
    AmbiguousParent {
        /// Section key.
        section: String,
        /// Offending entry.
        key: String,
        /// `group` value (used).
        group: String,
        /// `parent` value (ignored).
        parent: String,
    },
}

impl std::fmt::Display for TableIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingReference {
                section,
                key,
                target,
            } => write!(f, "{section}/{key}: references missing key '{target}'"),
            Self::SelfReference { section, key } => {
                write!(f, "{section}/{key}: references itself")
            }
            Self::Cycle { section, keys } => {
                write!(f, "{section}: reference cycle {}", keys.join(" -> "))
            }
            Self::AmbiguousParent {
                section,
                key,
                group,
                parent,
            } => write!(
                f,
                "{section}/{key}: both group '{group}' and parent '{parent}' set; using group"
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overrides/table.rs"]
mod tests;
