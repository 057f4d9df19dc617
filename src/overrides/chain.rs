use std::collections::HashSet;

use crate::overrides::entry::OverrideEntry;
use crate::overrides::merge::{EffectiveConfig, merge_chain};
use crate::overrides::table::SectionTable;

/// One step of a chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChainLink<'a> {
    /// Entry key inside the section.
    pub key: &'a str,
    /// The entry itself.
    pub entry: &'a OverrideEntry,
}

/// Ancestor-first sequence of entries ending with the requested one.
///
/// Borrowed from the [`SectionTable`]; no key appears twice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chain<'a> {
    links: Vec<ChainLink<'a>>,
}

impl<'a> Chain<'a> {
    /// Links, ancestors first.
    pub fn links(&self) -> &[ChainLink<'a>] {
        &self.links
    }

    /// Keys, ancestors first.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.links.iter().map(|l| l.key)
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// `true` when no entry was found for the starting key.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Fold the chain into one effective configuration.
    pub fn merge(&self) -> EffectiveConfig {
        merge_chain(self)
    }
}

/// Walk `group`/`parent` references upward from `key`.
///
/// Stops silently at an empty key, a key with no entry, or a key already on
/// the walk, so dangling references and cycles just shorten the chain.
pub fn collect_chain<'a>(section: &'a SectionTable, key: &str) -> Chain<'a> {
    let mut seen = HashSet::<&'a str>::new();
    let mut links = Vec::new();

    if key.is_empty() {
        return Chain::default();
    }
    let Some((first_key, first)) = section.get_key_value(key) else {
        tracing::trace!(key, "no override entry");
        return Chain::default();
    };
    let mut next = Some((first_key, first));

    while let Some((key, entry)) = next.take() {
        seen.insert(key);
        links.push(ChainLink { key, entry });

        let Some(target) = entry.inherits_from() else {
            break;
        };
        if seen.contains(target) {
            tracing::debug!(key, target, "override reference cycle cut");
            break;
        }
        match section.get_key_value(target) {
            Some(found) => next = Some(found),
            None => tracing::debug!(key, target, "override reference has no entry"),
        }
    }

    links.reverse();
    Chain { links }
}

#[cfg(test)]
#[path = "../../tests/unit/overrides/chain.rs"]
mod tests;
