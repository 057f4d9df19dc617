use crate::overrides::chain::{Chain, collect_chain};
use crate::overrides::merge::EffectiveConfig;
use crate::overrides::table::{OverrideTable, SectionTable};

/// Which key an override was found under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySpace {
    /// `<section>-<layer>-<suffix>`.
    Layered,
    /// The element's unqualified key.
    Raw,
}

/// Chain found for an element, with the key space it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedChain<'a> {
    /// Key space that produced a non-empty chain.
    pub matched: KeySpace,
    /// The chain itself.
    pub chain: Chain<'a>,
}

/// Chain lookup with fallback: layered key first, raw key second.
pub fn resolve_chain<'a>(
    section: Option<&'a SectionTable>,
    layered_key: &str,
    raw_key: &str,
) -> Option<ResolvedChain<'a>> {
    let section = section?;

    let chain = collect_chain(section, layered_key);
    if !chain.is_empty() {
        return Some(ResolvedChain {
            matched: KeySpace::Layered,
            chain,
        });
    }

    let chain = collect_chain(section, raw_key);
    if !chain.is_empty() {
        return Some(ResolvedChain {
            matched: KeySpace::Raw,
            chain,
        });
    }

    None
}

/// Effective override for an element, or `None` when neither key has an
/// entry (use the element's intrinsic presentation).
#[tracing::instrument(level = "debug", skip(section))]
pub fn resolve_overrides(
    section: Option<&SectionTable>,
    layered_key: &str,
    raw_key: &str,
) -> Option<EffectiveConfig> {
    let resolved = resolve_chain(section, layered_key, raw_key)?;
    tracing::trace!(
        matched = ?resolved.matched,
        depth = resolved.chain.len(),
        "override chain found"
    );
    Some(resolved.chain.merge())
}

impl OverrideTable {
    /// [`resolve_overrides`] against the named section.
    pub fn resolve(
        &self,
        section_key: &str,
        layered_key: &str,
        raw_key: &str,
    ) -> Option<EffectiveConfig> {
        resolve_overrides(self.section(section_key), layered_key, raw_key)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overrides/resolve.rs"]
mod tests;
