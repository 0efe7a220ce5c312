//! Field descriptors and search targets.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Wire name of the "all fields" target.
pub const ALL_FIELDS: &str = "_default";

/// The field a clause searches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKey {
    /// Every declared field; a record matches if any of them matches.
    #[default]
    All,
    /// A single named field.
    Named(String),
}

impl FieldKey {
    /// Creates a key for a named field.
    pub fn named(name: impl Into<String>) -> Self {
        FieldKey::Named(name.into())
    }

    /// Returns `true` for the all-fields target.
    pub fn is_all(&self) -> bool {
        matches!(self, FieldKey::All)
    }

    /// Returns the field name, or `None` for the all-fields target.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            FieldKey::All => None,
            FieldKey::Named(name) => Some(name),
        }
    }

    /// Returns the wire name (`_default` for the all-fields target).
    pub fn as_str(&self) -> &str {
        match self {
            FieldKey::All => ALL_FIELDS,
            FieldKey::Named(name) => name,
        }
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        if name == ALL_FIELDS {
            FieldKey::All
        } else {
            FieldKey::Named(name.to_string())
        }
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        if name == ALL_FIELDS {
            FieldKey::All
        } else {
            FieldKey::Named(name)
        }
    }
}

impl From<FieldKey> for String {
    fn from(key: FieldKey) -> Self {
        match key {
            FieldKey::All => ALL_FIELDS.to_string(),
            FieldKey::Named(name) => name,
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares a searchable field.
///
/// # Example
///
/// ```
/// use multisearch::FieldDescriptor;
///
/// let color = FieldDescriptor::new("favoriteColor", "Favorite Color")
///     .with_suggestions()
///     .strict();
///
/// assert!(color.searchable_with_suggestions());
/// assert!(color.strict_suggestions());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    label: String,
    suggestions: bool,
    strict: bool,
    provided: Option<Vec<String>>,
}

impl FieldDescriptor {
    /// Creates a descriptor without suggestions.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        FieldDescriptor {
            name: name.into(),
            label: label.into(),
            suggestions: false,
            strict: false,
            provided: None,
        }
    }

    /// Enables suggestion lists for this field.
    pub fn with_suggestions(mut self) -> Self {
        self.suggestions = true;
        self
    }

    /// Wraps picked suggestions in exact-match quotes.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Supplies a fixed suggestion list, enabling suggestions.
    pub fn provided<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = true;
        self.provided = Some(suggestions.into_iter().map(Into::into).collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn searchable_with_suggestions(&self) -> bool {
        self.suggestions
    }

    /// Strictness only applies to fields that offer suggestions.
    pub fn strict_suggestions(&self) -> bool {
        self.suggestions && self.strict
    }

    /// Returns `true` if `strict` was requested on a field without suggestions.
    pub(crate) fn has_dangling_strict(&self) -> bool {
        self.strict && !self.suggestions
    }

    pub fn provided_suggestions(&self) -> Option<&[String]> {
        self.provided.as_deref()
    }
}

/// Ordered set of field descriptors with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    items: Vec<FieldDescriptor>,
}

impl Fields {
    /// Creates the collection, rejecting duplicate names.
    pub fn new(items: Vec<FieldDescriptor>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.name.as_str()) {
                return Err(SearchError::DuplicateField(item.name.clone()));
            }
        }
        Ok(Fields { items })
    }

    /// Looks a field up by name.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.items.iter().find(|f| f.name == name)
    }

    /// Looks a field up by label, ignoring case.
    pub fn by_label(&self, label: &str) -> Option<&FieldDescriptor> {
        let label = label.to_lowercase();
        self.items.iter().find(|f| f.label.to_lowercase() == label)
    }

    /// Looks a field up by label first, then by name.
    pub fn find(&self, label_or_name: &str) -> Option<&FieldDescriptor> {
        self.by_label(label_or_name)
            .or_else(|| self.get(label_or_name))
    }

    /// Returns the label of a declared field, or an empty string.
    pub fn label_of(&self, name: &str) -> String {
        self.get(name)
            .map(|f| f.label.clone())
            .unwrap_or_default()
    }

    /// Returns `true` if the key names a field that offers suggestions.
    pub fn offers_suggestions(&self, key: &FieldKey) -> bool {
        key.as_name()
            .and_then(|name| self.get(name))
            .is_some_and(FieldDescriptor::searchable_with_suggestions)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
