//! Boolean matching against truthy and falsy token sets.

use serde::{Deserialize, Serialize};

const DEFAULT_TRUTHY: [&str; 7] = ["true", "1", "on", "yes", "y", "t", "✓"];
const DEFAULT_FALSY: [&str; 7] = ["false", "0", "off", "no", "n", "f", "x"];

/// The query tokens that select `true` and `false` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanTokens {
    /// Tokens that match a `true` value.
    pub truthy: Vec<String>,
    /// Tokens that match a `false` value.
    pub falsy: Vec<String>,
}

impl Default for BooleanTokens {
    fn default() -> Self {
        BooleanTokens {
            truthy: default_truthy(),
            falsy: default_falsy(),
        }
    }
}

impl BooleanTokens {
    /// Creates a token set from custom lists.
    pub fn new<I, J, S>(truthy: I, falsy: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BooleanTokens {
            truthy: truthy.into_iter().map(Into::into).collect(),
            falsy: falsy.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the token selects `true` values.
    pub fn is_truthy(&self, token: &str) -> bool {
        self.truthy.iter().any(|t| t == token)
    }

    /// Returns `true` if the token selects `false` values.
    pub fn is_falsy(&self, token: &str) -> bool {
        self.falsy.iter().any(|t| t == token)
    }
}

pub(crate) fn default_truthy() -> Vec<String> {
    DEFAULT_TRUTHY.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn default_falsy() -> Vec<String> {
    DEFAULT_FALSY.iter().map(|s| s.to_string()).collect()
}

/// Checks a boolean value against a query token.
///
/// Comparison is exact; unknown tokens never match.
pub fn matches(value: bool, query: &str, tokens: &BooleanTokens) -> bool {
    if value {
        tokens.is_truthy(query)
    } else {
        tokens.is_falsy(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_tokens_match_true() {
        let tokens = BooleanTokens::default();
        assert!(matches(true, "true", &tokens));
        assert!(matches(true, "yes", &tokens));
        assert!(matches(true, "✓", &tokens));
        assert!(!matches(false, "yes", &tokens));
    }

    #[test]
    fn falsy_tokens_match_false() {
        let tokens = BooleanTokens::default();
        assert!(matches(false, "false", &tokens));
        assert!(matches(false, "no", &tokens));
        assert!(matches(false, "x", &tokens));
        assert!(!matches(true, "no", &tokens));
    }

    #[test]
    fn unknown_tokens_never_match() {
        let tokens = BooleanTokens::default();
        assert!(!matches(true, "maybe", &tokens));
        assert!(!matches(false, "maybe", &tokens));
        assert!(!matches(true, "", &tokens));
    }

    #[test]
    fn custom_tokens() {
        let tokens = BooleanTokens::new(["yay"], ["nay"]);
        assert!(matches(true, "yay", &tokens));
        assert!(matches(false, "nay", &tokens));
        assert!(!matches(true, "true", &tokens));
    }
}
