use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization as _;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("disallowed-chars pattern"));

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("separator-runs pattern"));

/// Turn free text (an `alt` attribute, a file stem) into a key fragment.
///
/// Lower-cases, decomposes accents away (NFD), keeps only ASCII word
/// characters, whitespace and hyphens, then collapses separator runs into a
/// single `-` with no leading or trailing hyphen. The output only contains
/// `[a-z0-9-]`, so `slugify(&slugify(s)) == slugify(s)`.
pub fn slugify(input: &str) -> String {
    let decomposed: String = input.to_lowercase().nfd().collect();
    let kept = DISALLOWED.replace_all(&decomposed, "");
    let collapsed = SEPARATOR_RUNS.replace_all(kept.trim(), "-");
    collapsed.trim_matches('-').to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/keys/slug.rs"]
mod tests;
