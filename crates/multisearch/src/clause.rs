//! Search clauses and the ordered clause store.
//!
//! A [`SearchClause`] is one user-entered condition: a target field and raw
//! query text. Clauses combine with AND, so their order never changes which
//! records match. Order only matters to [`is_append_of`], which tells the
//! filter whether the previous result can be refined instead of rebuilt.

use serde::{Deserialize, Serialize};

use crate::field::FieldKey;

/// A single search condition.
///
/// # Example
///
/// ```
/// use multisearch::{FieldKey, SearchClause};
///
/// let clause = SearchClause::new(FieldKey::named("favoriteNumber"), "Favorite Number", "<=9");
/// assert_eq!(clause.query, "<=9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchClause {
    /// The field to search, or every field.
    pub field: FieldKey,
    /// Display label of the field.
    pub field_label: String,
    /// Raw query text, folded only at match time.
    pub query: String,
}

impl SearchClause {
    /// Creates a new clause.
    pub fn new(field: FieldKey, field_label: impl Into<String>, query: impl Into<String>) -> Self {
        SearchClause {
            field,
            field_label: field_label.into(),
            query: query.into(),
        }
    }

    /// Creates a clause searching every field.
    pub fn all(query: impl Into<String>) -> Self {
        SearchClause::new(FieldKey::All, "", query)
    }

    /// Returns `true` if both clauses select the same records.
    ///
    /// Labels are display-only and do not take part.
    pub fn same_condition(&self, other: &SearchClause) -> bool {
        self.field == other.field && self.query == other.query
    }
}

/// Returns `true` if `current` is `previous` with one or more clauses
/// appended, every earlier clause unchanged and in place.
///
/// Equal sequences are not an append. A deletion, edit or reorder anywhere
/// makes this `false`.
pub fn is_append_of(previous: &[SearchClause], current: &[SearchClause]) -> bool {
    previous.len() < current.len()
        && previous
            .iter()
            .zip(current)
            .all(|(before, now)| before.same_condition(now))
}

/// Ordered sequence of active clauses.
///
/// Every mutation that changes the contents bumps [`generation`](Self::generation).
#[derive(Debug, Clone, Default)]
pub struct ClauseStore {
    clauses: Vec<SearchClause>,
    generation: u64,
}

impl ClauseStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ClauseStore::default()
    }

    /// Appends a clause.
    pub fn push(&mut self, clause: SearchClause) {
        self.clauses.push(clause);
        self.bump();
    }

    /// Appends a clause after dropping every clause on the same named field.
    ///
    /// All-fields clauses are never replaced. Returns the number of clauses
    /// removed.
    pub fn push_replacing(&mut self, clause: SearchClause) -> usize {
        let before = self.clauses.len();
        if !clause.field.is_all() {
            self.clauses.retain(|existing| existing.field != clause.field);
        }
        let removed = before - self.clauses.len();
        self.clauses.push(clause);
        self.bump();
        removed
    }

    /// Removes the clause at `index`. Out-of-range indices leave the store
    /// untouched.
    pub fn remove(&mut self, index: usize) -> Option<SearchClause> {
        if index >= self.clauses.len() {
            return None;
        }
        let removed = self.clauses.remove(index);
        self.bump();
        Some(removed)
    }

    /// Removes every clause, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.clauses.len();
        if removed > 0 {
            self.clauses.clear();
            self.bump();
        }
        removed
    }

    pub fn as_slice(&self) -> &[SearchClause] {
        &self.clauses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchClause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Mutation counter; equal generations mean equal contents.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn bump(&mut self) {
        self.generation += 1;
    }
}
