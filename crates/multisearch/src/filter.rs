//! Filtering a source collection against a clause sequence.
//!
//! [`Conjunction`] evaluates one record against every clause. [`Recompute`]
//! builds a whole [`FilterResult`], refining the previous result when the
//! clause sequence only grew by appends.
//!
//! Refinement is sound because adding a clause can only remove records: a
//! record that failed the old clauses also fails the new sequence. Anything
//! other than a pure append goes back to the raw source.

use std::borrow::Cow;

use serde::Serialize;

use crate::categorize::Category;
use crate::clause::{is_append_of, SearchClause};
use crate::dispatch::{fold_query, matches_folded};
use crate::field::{FieldKey, Fields};
use crate::options::MatchOptions;
use crate::record::Searchable;

/// The published output of a recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterResult {
    /// Matching source indices, in source order.
    Flat(Vec<usize>),
    /// Matching indices per category.
    Categorized(Vec<Category>),
}

impl FilterResult {
    /// Total number of matching entries across all categories.
    pub fn len(&self) -> usize {
        match self {
            FilterResult::Flat(indices) => indices.len(),
            FilterResult::Categorized(categories) => {
                categories.iter().map(|c| c.members.len()).sum()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_flat(&self) -> Option<&[usize]> {
        match self {
            FilterResult::Flat(indices) => Some(indices),
            FilterResult::Categorized(_) => None,
        }
    }

    pub fn as_categories(&self) -> Option<&[Category]> {
        match self {
            FilterResult::Flat(_) => None,
            FilterResult::Categorized(categories) => Some(categories),
        }
    }
}

struct PreparedClause<'a> {
    field: &'a FieldKey,
    query: Cow<'a, str>,
}

/// All clauses of a sequence, folded once and ready to evaluate.
pub struct Conjunction<'a> {
    clauses: Vec<PreparedClause<'a>>,
    fields: &'a Fields,
    options: &'a MatchOptions,
}

impl<'a> Conjunction<'a> {
    pub fn new(clauses: &'a [SearchClause], fields: &'a Fields, options: &'a MatchOptions) -> Self {
        let clauses = clauses
            .iter()
            .map(|clause| PreparedClause {
                field: &clause.field,
                query: fold_query(&clause.query, options),
            })
            .collect();
        Conjunction {
            clauses,
            fields,
            options,
        }
    }

    /// Returns `true` if the record satisfies every clause.
    ///
    /// An all-fields clause matches when any declared field matches; fields
    /// the record lacks are read as absent values.
    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        self.clauses.iter().all(|clause| match clause.field {
            FieldKey::All => self.fields.iter().any(|field| {
                matches_folded(&record.field_value(field.name()), &clause.query, self.options)
            }),
            FieldKey::Named(name) => {
                matches_folded(&record.field_value(name), &clause.query, self.options)
            }
        })
    }

    /// Keeps the candidate indices whose records match, preserving order.
    /// Indices outside `source` are dropped.
    pub fn retain<T: Searchable>(&self, source: &[T], candidates: &[usize]) -> Vec<usize> {
        candidates
            .iter()
            .copied()
            .filter(|&index| source.get(index).is_some_and(|record| self.matches(record)))
            .collect()
    }

    /// Indices of every matching record in `source`.
    pub fn filter<T: Searchable>(&self, source: &[T]) -> Vec<usize> {
        source
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(*record))
            .map(|(index, _)| index)
            .collect()
    }
}

/// The clause sequence and result of an earlier recompute.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub clauses: Vec<SearchClause>,
    pub result: FilterResult,
}

/// Outcome of [`Recompute::run`].
#[derive(Debug, Clone)]
pub struct Outcome {
    pub result: FilterResult,
    /// Whether the previous result was refined instead of the raw source.
    pub reused: bool,
}

/// Inputs of one recompute.
pub struct Recompute<'a, T> {
    /// The raw source collection.
    pub source: &'a [T],
    /// Categories of the unfiltered source, when a categorizer is in use.
    pub categories: Option<&'a [Category]>,
    pub clauses: &'a [SearchClause],
    pub fields: &'a Fields,
    pub options: &'a MatchOptions,
    pub show_empty_categories: bool,
}

impl<'a, T: Searchable> Recompute<'a, T> {
    /// Computes the result.
    ///
    /// `previous` must come from the same source collection. It is refined
    /// only when the current clauses are a strict append of its clauses and
    /// its result has the same shape.
    pub fn run(&self, previous: Option<&Snapshot>) -> Outcome {
        let previous = previous.filter(|snapshot| is_append_of(&snapshot.clauses, self.clauses));

        if self.clauses.is_empty() {
            return Outcome {
                result: self.unfiltered(),
                reused: false,
            };
        }

        let conjunction = Conjunction::new(self.clauses, self.fields, self.options);
        match (self.categories, previous.map(|p| &p.result)) {
            (None, Some(FilterResult::Flat(prior))) => Outcome {
                result: FilterResult::Flat(conjunction.retain(self.source, prior)),
                reused: true,
            },
            (None, _) => Outcome {
                result: FilterResult::Flat(conjunction.filter(self.source)),
                reused: false,
            },
            (Some(_), Some(FilterResult::Categorized(prior))) => Outcome {
                result: self.filter_categories(&conjunction, prior),
                reused: true,
            },
            (Some(categories), _) => Outcome {
                result: self.filter_categories(&conjunction, categories),
                reused: false,
            },
        }
    }

    fn unfiltered(&self) -> FilterResult {
        match self.categories {
            None => FilterResult::Flat((0..self.source.len()).collect()),
            Some(categories) => FilterResult::Categorized(
                categories
                    .iter()
                    .filter(|category| self.show_empty_categories || !category.is_empty())
                    .cloned()
                    .collect(),
            ),
        }
    }

    fn filter_categories(&self, conjunction: &Conjunction<'_>, base: &[Category]) -> FilterResult {
        FilterResult::Categorized(
            base.iter()
                .map(|category| Category {
                    key: category.key.clone(),
                    members: conjunction.retain(self.source, &category.members),
                })
                .filter(|category| self.show_empty_categories || !category.is_empty())
                .collect(),
        )
    }
}
