//! Loose coercions over JSON values.
//!
//! Override tables and `data-*` attributes are authored by hand, so numbers
//! arrive as JSON numbers, numeric strings, or strings with trailing units.
//! These helpers read them the way the browser side of a story does.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("numeric prefix pattern")
});

static PLAIN_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("plain decimal pattern"));

/// Parse the leading numeric part of `s`, ignoring leading whitespace and any
/// trailing text (`"12vh"` reads as `12`). Returns `None` when no number leads.
pub fn parse_number_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let m = NUMERIC_PREFIX.find(s)?;
    m.as_str().parse::<f64>().ok()
}

/// Read a single value as a number, if it is one or starts with one.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.is_empty() => parse_number_prefix(s),
        _ => None,
    }
}

/// First candidate that reads as a number. Absent, `null` and empty-string
/// candidates are skipped.
pub fn pick_number<'a, I>(candidates: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    candidates.into_iter().flatten().find_map(as_number)
}

/// Read an authored positional value. Numbers and numeric-prefix strings
/// count; anything else, or a non-finite result, reads as absent.
pub fn finite_number(value: &Value) -> Option<f64> {
    as_number(value).filter(|v| v.is_finite())
}

/// JSON form of a computed number: integral values are written as integers
/// so `140.0` round-trips as `140`.
pub fn compact_number(v: f64) -> Value {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    if v.fract() == 0.0 && v.abs() < EXACT {
        Value::from(v as i64)
    } else {
        Value::from(v)
    }
}

/// `serialize_with` adapter for [`compact_number`].
pub fn serialize_number<S>(v: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serde::Serialize::serialize(&compact_number(*v), serializer)
}

/// `serialize_with` adapter for optional numbers; pair it with
/// `skip_serializing_if = "Option::is_none"`.
pub fn serialize_opt_number<S>(v: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match v {
        Some(v) => serialize_number(v, serializer),
        None => serializer.serialize_none(),
    }
}

/// Normalize a size value into a CSS length string.
///
/// Numbers and bare decimal strings become pixel lengths; other strings are
/// trimmed and kept (`"60vw"`); anything else normalizes to `""`.
pub fn normalize_size(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(v) => format!("{v}px"),
            None => String::new(),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                String::new()
            } else if PLAIN_DECIMAL.is_match(trimmed) {
                format!("{trimmed}px")
            } else {
                trimmed.to_owned()
            }
        }
        _ => String::new(),
    }
}

/// Script-style truthiness for flag-like fields such as `fullWidth`.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Non-empty string content of a value, if it is a string.
pub fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
