//! Numeric matching: exact values and single-operator ranges.

use std::cmp::Ordering;

use super::relational::split_operator;
use crate::value::Number;

/// Parses a plain decimal number.
///
/// Accepts an optional sign, digits, a fraction and an exponent, with
/// surrounding whitespace. Words such as `inf` or `nan` are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty()
        || !text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Checks a number against a query.
///
/// A query that is itself a number matches by equality. Otherwise it must be
/// one operator (`>`, `>=`, `<`, `<=`, `!=`) and a numeric operand. Anything
/// else, including NaN values, does not match.
pub fn matches(value: Number, query: &str) -> bool {
    if let Some(target) = parse_number(query) {
        return value.compare(Number::F64(target)) == Some(Ordering::Equal);
    }

    let Some((op, operand)) = split_operator(query) else {
        return false;
    };
    let Some(target) = parse_number(operand) else {
        return false;
    };

    value
        .compare(Number::F64(target))
        .is_some_and(|ordering| op.eval(ordering))
}
