//! Query dispatch by value kind.
//!
//! [`is_query_match`] folds the query once and hands it to the matcher for
//! the value's kind. Strings and every other kind share the string matcher.

use std::borrow::Cow;

use crate::matcher::{boolean, date, number, string};
use crate::options::MatchOptions;
use crate::value::Value;

/// Checks a value against raw query text.
///
/// # Example
///
/// ```
/// use multisearch::{is_query_match, MatchOptions, Number, Value};
///
/// let options = MatchOptions::default();
/// assert!(is_query_match(&Value::Bool(true), "Yes", &options));
/// assert!(is_query_match(&Value::Number(Number::I64(8)), "<=9", &options));
/// assert!(is_query_match(&Value::String("Light Blue"), "blue", &options));
/// ```
pub fn is_query_match(value: &Value<'_>, query: &str, options: &MatchOptions) -> bool {
    let query = fold_query(query, options);
    matches_folded(value, &query, options)
}

/// Applies the case-folding policy to query text.
pub fn fold_query<'q>(query: &'q str, options: &MatchOptions) -> Cow<'q, str> {
    if options.case_sensitive {
        Cow::Borrowed(query)
    } else {
        Cow::Owned(query.to_lowercase())
    }
}

/// Checks a value against query text that [`fold_query`] already folded.
pub fn matches_folded(value: &Value<'_>, query: &str, options: &MatchOptions) -> bool {
    match value {
        Value::Bool(b) => boolean::matches(*b, query, &options.boolean),
        Value::Number(n) => number::matches(*n, query),
        Value::Date(d) => date::matches(*d, query),
        other => string::matches(other, query, options.case_sensitive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;
    use chrono::NaiveDate;
    use serde_json::json;

    fn opts() -> MatchOptions {
        MatchOptions::default()
    }

    #[test]
    fn routes_each_kind() {
        assert!(is_query_match(&Value::Bool(true), "true", &opts()));
        assert!(is_query_match(&Value::Number(Number::I64(123)), "123", &opts()));
        let day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert!(is_query_match(&Value::Date(day), "2021-01-01", &opts()));
        assert!(is_query_match(&Value::String("hello"), "hello", &opts()));
    }

    #[test]
    fn falls_back_to_string() {
        assert!(is_query_match(&Value::Null, "null", &opts()));
        assert!(is_query_match(&Value::None, "undefined", &opts()));
        assert!(is_query_match(&Value::Json(&json!([1, 2, 3])), "[1,2,3]", &opts()));
        assert!(is_query_match(&Value::Json(&json!({"a": 1})), "{\"a\":1}", &opts()));
    }

    #[test]
    fn folds_query_before_typed_matchers() {
        assert!(is_query_match(&Value::Bool(true), "YES", &opts()));
        assert!(is_query_match(&Value::Bool(false), "No", &opts()));
        let day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert!(is_query_match(&Value::Date(day), "2021-01-01T10:00:00Z", &opts()));
    }

    #[test]
    fn case_sensitive_options() {
        let options = MatchOptions::default().case_sensitive(true);
        assert!(!is_query_match(&Value::String("Eve"), "eve", &options));
        assert!(is_query_match(&Value::String("Eve"), "Eve", &options));
        assert!(!is_query_match(&Value::Bool(true), "YES", &options));
    }

    #[test]
    fn malformed_queries_never_panic() {
        let value = Value::Number(Number::I64(1));
        for query in ["", "<", "<<<", "!=", "\"", "\\\"", ">=abc", "=="] {
            assert!(!is_query_match(&value, query, &opts()));
        }
    }
}
