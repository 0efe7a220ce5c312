//! Relational operators shared by the number and date matchers.
//!
//! A relational query is one operator followed by an operand, e.g. `>=100`
//! or `< 2021-06-01`. The operator is found with a leftmost match, and the
//! operand may not contain a second operator token.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

static OPERATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([<>]=?|<=?|>=?|!=?)(.*)").expect("operator pattern compiles"));

const OPERATOR_CHARS: &[char] = &['<', '>', '!', '='];

/// Relational operator of a range query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Not equal.
    Ne,
}

impl RelOp {
    /// Parses an operator symbol. A bare `!` is not an operator.
    pub fn parse(symbol: &str) -> Option<RelOp> {
        match symbol {
            ">" => Some(RelOp::Gt),
            ">=" => Some(RelOp::Gte),
            "<" => Some(RelOp::Lt),
            "<=" => Some(RelOp::Lte),
            "!=" => Some(RelOp::Ne),
            _ => None,
        }
    }

    /// Evaluates the operator given `value.cmp(operand)`.
    pub fn eval(self, ordering: Ordering) -> bool {
        match self {
            RelOp::Gt => ordering == Ordering::Greater,
            RelOp::Gte => ordering != Ordering::Less,
            RelOp::Lt => ordering == Ordering::Less,
            RelOp::Lte => ordering != Ordering::Greater,
            RelOp::Ne => ordering != Ordering::Equal,
        }
    }

    /// Returns the operator symbol.
    pub fn as_str(self) -> &'static str {
        match self {
            RelOp::Gt => ">",
            RelOp::Gte => ">=",
            RelOp::Lt => "<",
            RelOp::Lte => "<=",
            RelOp::Ne => "!=",
        }
    }
}

impl std::fmt::Display for RelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits a query into its operator and trimmed operand.
///
/// Returns `None` when no operator is found, when the operand is empty, or
/// when the operand still holds operator characters (`><100`, `<=>5`).
pub fn split_operator(query: &str) -> Option<(RelOp, &str)> {
    let captures = OPERATOR.captures(query)?;
    let op = RelOp::parse(captures.get(1)?.as_str())?;
    let operand = captures.get(2).map_or("", |m| m.as_str()).trim();
    if operand.is_empty() || operand.contains(OPERATOR_CHARS) {
        return None;
    }
    Some((op, operand))
}

/// Returns `true` if the query contains any relational operator.
pub fn has_operator(query: &str) -> bool {
    query.contains('<') || query.contains('>') || query.contains("!=")
}
