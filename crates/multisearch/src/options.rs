//! Engine configuration.
//!
//! [`EngineOptions`] is the serde-facing configuration block. Field names are
//! snake_case; the camelCase spellings are accepted as aliases.
//!
//! ```
//! use multisearch::EngineOptions;
//!
//! let options = EngineOptions::from_json_str(r#"{
//!     "case_sensitive": true,
//!     "showEmptyCategories": true
//! }"#).unwrap();
//!
//! assert!(options.case_sensitive);
//! assert!(options.show_empty_categories);
//! assert_eq!(options.true_label, "Yes");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matcher::boolean::{default_falsy, default_truthy};
use crate::matcher::BooleanTokens;

/// Options consumed by the query dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchOptions {
    /// Compare strings without case folding.
    pub case_sensitive: bool,
    /// Tokens recognized for boolean fields.
    pub boolean: BooleanTokens,
}

impl MatchOptions {
    /// Creates case-insensitive options with the default boolean tokens.
    pub fn new() -> Self {
        MatchOptions::default()
    }

    /// Sets case sensitivity.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Replaces the boolean tokens.
    pub fn boolean_tokens(mut self, tokens: BooleanTokens) -> Self {
        self.boolean = tokens;
        self
    }
}

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Compare strings without case folding.
    #[serde(alias = "caseSensitive")]
    pub case_sensitive: bool,

    /// Tokens that match `true` boolean values.
    #[serde(alias = "truthyValues")]
    pub truthy_values: Vec<String>,

    /// Tokens that match `false` boolean values.
    #[serde(alias = "falsyValues")]
    pub falsy_values: Vec<String>,

    /// Suggestion label standing for `true`.
    #[serde(alias = "trueLabel")]
    pub true_label: String,

    /// Suggestion label standing for `false`.
    #[serde(alias = "falseLabel")]
    pub false_label: String,

    /// Keep categories that end up with no records.
    #[serde(alias = "showEmptyCategories")]
    pub show_empty_categories: bool,

    /// A new clause replaces existing clauses on the same field.
    #[serde(alias = "overrideExistingQueriesWithSameField")]
    pub override_existing_queries_with_same_field: bool,

    /// Field that global ("all fields") clauses are redirected to.
    #[serde(alias = "globalSearchReplacement")]
    pub global_search_replacement: Option<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            case_sensitive: false,
            truthy_values: default_truthy(),
            falsy_values: default_falsy(),
            true_label: "Yes".to_string(),
            false_label: "No".to_string(),
            show_empty_categories: false,
            override_existing_queries_with_same_field: false,
            global_search_replacement: None,
        }
    }
}

impl EngineOptions {
    /// Parses options from JSON. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Derives the dispatcher options.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            case_sensitive: self.case_sensitive,
            boolean: BooleanTokens {
                truthy: self.truthy_values.clone(),
                falsy: self.falsy_values.clone(),
            },
        }
    }

    /// Sets case sensitivity.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Keeps or drops empty categories.
    pub fn show_empty_categories(mut self, show: bool) -> Self {
        self.show_empty_categories = show;
        self
    }

    /// Enables replace-by-field semantics for new clauses.
    pub fn override_same_field(mut self, enabled: bool) -> Self {
        self.override_existing_queries_with_same_field = enabled;
        self
    }

    /// Redirects global clauses to a single field.
    pub fn global_search_replacement(mut self, field: impl Into<String>) -> Self {
        self.global_search_replacement = Some(field.into());
        self
    }

    /// Sets the labels used for boolean suggestions.
    pub fn boolean_labels(mut self, true_label: impl Into<String>, false_label: impl Into<String>) -> Self {
        self.true_label = true_label.into();
        self.false_label = false_label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    #[test]
    fn defaults() {
        let options = EngineOptions::default();
        assert!(!options.case_sensitive);
        assert_eq!(options.true_label, "Yes");
        assert_eq!(options.false_label, "No");
        assert!(options.truthy_values.contains(&"✓".to_string()));
        assert!(options.falsy_values.contains(&"x".to_string()));
    }

    #[test]
    fn empty_json_keeps_defaults() {
        let options = EngineOptions::from_json_str("{}").unwrap();
        assert_eq!(options, EngineOptions::default());
    }

    #[test]
    fn camel_case_aliases() {
        let options = EngineOptions::from_json_str(
            r#"{"truthyValues": ["yay"], "globalSearchReplacement": "name",
                "overrideExistingQueriesWithSameField": true}"#,
        )
        .unwrap();
        assert_eq!(options.truthy_values, vec!["yay".to_string()]);
        assert_eq!(options.global_search_replacement.as_deref(), Some("name"));
        assert!(options.override_existing_queries_with_same_field);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = EngineOptions::from_json_str("{\"case_sensitive\": 3}").unwrap_err();
        assert!(matches!(err, SearchError::InvalidOptions(_)));
    }

    #[test]
    fn match_options_follow_engine_options() {
        let options = EngineOptions::default().case_sensitive(true);
        let matching = options.match_options();
        assert!(matching.case_sensitive);
        assert!(matching.boolean.is_truthy("yes"));
    }
}
