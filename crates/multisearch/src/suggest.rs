//! Per-field suggestion lists.
//!
//! Suggestions are computed the first time a field is selected and memoized
//! until the engine receives a new source collection.

use std::collections::{HashMap, HashSet};

use crate::field::FieldDescriptor;
use crate::record::Searchable;
use crate::value::Value;

/// Memo of suggestion lists keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct SuggestionCache {
    entries: HashMap<String, Vec<String>>,
}

impl SuggestionCache {
    pub fn new() -> Self {
        SuggestionCache::default()
    }

    /// Returns the cached list for a field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the list for a field, deriving and caching it on first use.
    ///
    /// Fields without suggestions return `None`. A provided list is used
    /// verbatim.
    pub fn get_or_derive<T: Searchable>(
        &mut self,
        field: &FieldDescriptor,
        records: &[T],
        true_label: &str,
        false_label: &str,
    ) -> Option<&[String]> {
        if !field.searchable_with_suggestions() {
            return None;
        }
        let entry = self
            .entries
            .entry(field.name().to_string())
            .or_insert_with(|| match field.provided_suggestions() {
                Some(provided) => provided.to_vec(),
                None => derive_suggestions(field.name(), records, true_label, false_label),
            });
        Some(entry.as_slice())
    }
}

/// Derives suggestions for a field from the records.
///
/// If any record holds a boolean in the field the result is
/// `[true_label, false_label]`. Otherwise it is the distinct non-empty string
/// values in order of first occurrence.
pub fn derive_suggestions<T: Searchable>(
    field: &str,
    records: &[T],
    true_label: &str,
    false_label: &str,
) -> Vec<String> {
    if records
        .iter()
        .any(|record| matches!(record.field_value(field), Value::Bool(_)))
    {
        return vec![true_label.to_string(), false_label.to_string()];
    }

    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    for record in records {
        if let Value::String(s) = record.field_value(field) {
            if !s.is_empty() && seen.insert(s) {
                distinct.push(s.to_string());
            }
        }
    }
    distinct
}

/// Wraps a suggestion in exact-match quotes.
pub fn quote_strict(value: &str) -> String {
    format!("\"{value}\"")
}
