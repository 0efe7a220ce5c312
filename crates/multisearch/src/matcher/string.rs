//! String matching, also the fallback for every non-primitive kind.

use std::borrow::Cow;

use crate::value::Value;

const QUOTE: &str = "\"";
const ESCAPED_QUOTE: &str = "\\\"";

/// Checks a value's text against a query.
///
/// The value is canonicalized with [`Value::canonical_text`] and, unless
/// `case_sensitive` is set, lowercased. The query is expected to be folded
/// by the caller already. Three modes, in order:
///
/// - `"text"` matches the whole value exactly.
/// - `\"text\"` matches values containing `"text"`, quotes included.
/// - anything else matches as a substring.
pub fn matches(value: &Value<'_>, query: &str, case_sensitive: bool) -> bool {
    let text = value.canonical_text();
    let text = if case_sensitive {
        text
    } else {
        Cow::Owned(text.to_lowercase())
    };

    if let Some(exact) = unwrap_marker(query, QUOTE) {
        return text == exact;
    }
    if let Some(inner) = unwrap_marker(query, ESCAPED_QUOTE) {
        return text.contains(&format!("\"{inner}\""));
    }
    text.contains(query)
}

fn unwrap_marker<'q>(query: &'q str, marker: &str) -> Option<&'q str> {
    if query.len() < marker.len() * 2 {
        return None;
    }
    query.strip_prefix(marker)?.strip_suffix(marker)
}
