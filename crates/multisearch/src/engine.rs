//! The incremental filter controller.
//!
//! An [`Engine`] owns the clause sequence, the suggestion cache and the last
//! published result for one source collection. Callers submit intents through
//! the control surface (`add_clause`, `delete_clause`, `select_suggestion`,
//! `set_source`, ...) and then call [`Engine::sync`], which recomputes only
//! when the inputs changed since the last published result.
//!
//! ```
//! use multisearch::{Engine, FieldDescriptor, FieldKey};
//! use serde_json::json;
//!
//! let mut engine = Engine::builder()
//!     .field(FieldDescriptor::new("name", "Name"))
//!     .field(FieldDescriptor::new("favoriteNumber", "Favorite Number"))
//!     .source(vec![
//!         json!({"name": "Bob", "favoriteNumber": 8}),
//!         json!({"name": "Eve", "favoriteNumber": 11}),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! engine.add_clause(FieldKey::named("favoriteNumber"), "<=9");
//! assert!(engine.sync());
//! assert_eq!(engine.records()[0]["name"], "Bob");
//!
//! // unchanged inputs never recompute
//! assert!(!engine.sync());
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::categorize::{Categorizer, Category};
use crate::clause::{ClauseStore, SearchClause};
use crate::error::{Result, SearchError};
use crate::field::{FieldDescriptor, FieldKey, Fields};
use crate::filter::{FilterResult, Recompute, Snapshot};
use crate::options::{EngineOptions, MatchOptions};
use crate::record::Searchable;
use crate::suggest::{quote_strict, SuggestionCache};

/// Fingerprint of the inputs a result was computed from.
///
/// Two equal stamps mean the same source collection and the same clause
/// sequence, so a recompute would publish an identical result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Stamp {
    /// Source generation; bumped whenever the source identity changes.
    pub source: u64,
    /// Clause store generation.
    pub clauses: u64,
}

#[derive(Debug, Clone)]
struct Published {
    stamp: Stamp,
    snapshot: Snapshot,
    reused: bool,
}

/// Builder for [`Engine`].
pub struct EngineBuilder<T> {
    fields: Vec<FieldDescriptor>,
    options: EngineOptions,
    categorizer: Option<Box<dyn Categorizer<T>>>,
    source: Option<Arc<[T]>>,
}

impl<T> Default for EngineBuilder<T> {
    fn default() -> Self {
        EngineBuilder {
            fields: Vec::new(),
            options: EngineOptions::default(),
            categorizer: None,
            source: None,
        }
    }
}

impl<T: Searchable> EngineBuilder<T> {
    pub fn new() -> Self {
        EngineBuilder::default()
    }

    /// Declares a searchable field. Declaration order is preserved.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Declares several fields at once.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Groups results into categories.
    pub fn categorizer(mut self, categorizer: impl Categorizer<T> + 'static) -> Self {
        self.categorizer = Some(Box::new(categorizer));
        self
    }

    /// Sets the initial source collection.
    ///
    /// Without one the engine starts uninitialized and publishes nothing
    /// until [`Engine::set_source`] is called.
    pub fn source(mut self, source: impl Into<Arc<[T]>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Validates the configuration and builds the engine.
    pub fn build(self) -> Result<Engine<T>> {
        let fields = Fields::new(self.fields)?;

        if let Some(target) = &self.options.global_search_replacement {
            if fields.get(target).is_none() {
                return Err(SearchError::UnknownField(target.clone()));
            }
        }
        for field in fields.iter().filter(|f| f.has_dangling_strict()) {
            warn!(
                field = field.name(),
                "strict suggestions requested on a field without suggestions; ignoring"
            );
        }

        let match_options = self.options.match_options();
        let mut engine = Engine {
            fields,
            options: self.options,
            match_options,
            source: None,
            source_generation: 0,
            categorizer: self.categorizer,
            source_categories: None,
            clauses: ClauseStore::new(),
            suggestions: SuggestionCache::new(),
            selected: FieldKey::All,
            published: None,
        };
        if let Some(source) = self.source {
            engine.set_source(source);
        }
        Ok(engine)
    }
}

/// Filters a source collection against an ordered clause sequence.
pub struct Engine<T> {
    fields: Fields,
    options: EngineOptions,
    match_options: MatchOptions,
    source: Option<Arc<[T]>>,
    source_generation: u64,
    categorizer: Option<Box<dyn Categorizer<T>>>,
    source_categories: Option<Vec<Category>>,
    clauses: ClauseStore,
    suggestions: SuggestionCache,
    selected: FieldKey,
    published: Option<Published>,
}

impl<T> fmt::Debug for Engine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("fields", &self.fields)
            .field("options", &self.options)
            .field("source_len", &self.source.as_ref().map(|s| s.len()))
            .field("source_generation", &self.source_generation)
            .field("categorized", &self.categorizer.is_some())
            .field("clauses", &self.clauses)
            .field("selected", &self.selected)
            .field("stamp", &self.published.as_ref().map(|p| p.stamp))
            .finish()
    }
}

impl<T: Searchable> Engine<T> {
    pub fn builder() -> EngineBuilder<T> {
        EngineBuilder::new()
    }

    /// Builds an engine with default options and no source.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        EngineBuilder::new().fields(fields).build()
    }

    // ------------------------------------------------------------------
    // Control surface
    // ------------------------------------------------------------------

    /// Adds a clause for `field`.
    ///
    /// The query is trimmed and an empty query is ignored. Returns `true` if a
    /// clause was added. The selected field resets to all fields.
    pub fn add_clause(&mut self, field: impl Into<FieldKey>, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            trace!("ignoring empty query");
            return false;
        }
        self.push_clause(field.into(), query.to_string());
        true
    }

    /// Removes the clause at `index`; out-of-range indices are ignored.
    pub fn delete_clause(&mut self, index: usize) -> Option<SearchClause> {
        let removed = self.clauses.remove(index);
        if removed.is_none() {
            trace!(index, len = self.clauses.len(), "delete index out of range");
        }
        removed
    }

    /// Removes every clause.
    pub fn delete_all_clauses(&mut self) -> usize {
        self.clauses.clear()
    }

    /// Makes `field` the active search target.
    ///
    /// Selecting a field that offers suggestions derives its list on first
    /// use. Derivation waits for a source when the field has no provided
    /// list.
    pub fn select_field(&mut self, field: impl Into<FieldKey>) {
        self.selected = field.into();
        if let Some(name) = self.selected.as_name() {
            if self.fields.get(name).is_none() {
                warn!(field = name, "selected field is not declared");
                return;
            }
        }
        self.derive_selected_suggestions();
    }

    /// Adds a clause for the selected field from a picked suggestion.
    ///
    /// Strict fields wrap the value in exact-match quotes as given, without
    /// trimming. Returns `true` if a clause was added.
    pub fn select_suggestion(&mut self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        let strict = self
            .selected
            .as_name()
            .and_then(|name| self.fields.get(name))
            .is_some_and(FieldDescriptor::strict_suggestions);
        let query = if strict {
            quote_strict(value)
        } else {
            value.to_string()
        };
        self.push_clause(self.selected.clone(), query);
        true
    }

    /// Replaces the source collection.
    ///
    /// Passing the collection already in use changes nothing. A new
    /// collection clears the suggestion cache and rederives it for the
    /// selected field. It also reruns the categorizer and discards the
    /// published result.
    pub fn set_source(&mut self, source: impl Into<Arc<[T]>>) {
        let source = source.into();
        if self
            .source
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &source))
        {
            trace!("source unchanged");
            return;
        }

        self.source_categories = self
            .categorizer
            .as_ref()
            .map(|categorizer| checked_categories(categorizer.categorize(&source), source.len()));
        self.source = Some(source);
        self.invalidate_source();
        debug!(
            generation = self.source_generation,
            records = self.source.as_ref().map_or(0, |s| s.len()),
            "source replaced"
        );
    }

    /// Drops the source collection, returning the engine to its uninitialized
    /// state. Clauses are kept.
    pub fn clear_source(&mut self) {
        if self.source.take().is_some() {
            self.source_categories = None;
            self.invalidate_source();
            debug!(generation = self.source_generation, "source cleared");
        }
    }

    /// Recomputes the published result if the inputs changed.
    ///
    /// Returns `true` if a recompute ran. Without a source there is nothing
    /// to compute.
    pub fn sync(&mut self) -> bool {
        let Some(source) = self.source.as_deref() else {
            trace!("no source, skipping recompute");
            return false;
        };
        let stamp = self.stamp();
        if self.published.as_ref().is_some_and(|p| p.stamp == stamp) {
            trace!(?stamp, "inputs unchanged, skipping recompute");
            return false;
        }

        let previous = self
            .published
            .as_ref()
            .filter(|p| p.stamp.source == stamp.source)
            .map(|p| &p.snapshot);
        let outcome = Recompute {
            source,
            categories: self.source_categories.as_deref(),
            clauses: self.clauses.as_slice(),
            fields: &self.fields,
            options: &self.match_options,
            show_empty_categories: self.options.show_empty_categories,
        }
        .run(previous);

        debug!(
            clauses = self.clauses.len(),
            matched = outcome.result.len(),
            reused = outcome.reused,
            "recomputed results"
        );
        self.published = Some(Published {
            stamp,
            snapshot: Snapshot {
                clauses: self.clauses.as_slice().to_vec(),
                result: outcome.result,
            },
            reused: outcome.reused,
        });
        true
    }

    // ------------------------------------------------------------------
    // Output surface
    // ------------------------------------------------------------------

    /// The last published result, as indices into the source.
    pub fn result(&self) -> Option<&FilterResult> {
        self.published.as_ref().map(|p| &p.snapshot.result)
    }

    /// The matching records, flattened in category order when categorized.
    pub fn records(&self) -> Vec<&T> {
        let (Some(source), Some(result)) = (self.source.as_deref(), self.result()) else {
            return Vec::new();
        };
        match result {
            FilterResult::Flat(indices) => indices.iter().filter_map(|&i| source.get(i)).collect(),
            FilterResult::Categorized(categories) => categories
                .iter()
                .flat_map(|category| &category.members)
                .filter_map(|&i| source.get(i))
                .collect(),
        }
    }

    /// The matching records per category. Empty when not categorized.
    pub fn categories(&self) -> Vec<(&str, Vec<&T>)> {
        let (Some(source), Some(FilterResult::Categorized(categories))) =
            (self.source.as_deref(), self.result())
        else {
            return Vec::new();
        };
        categories
            .iter()
            .map(|category| {
                let records = category
                    .members
                    .iter()
                    .filter_map(|&i| source.get(i))
                    .collect();
                (category.key.as_str(), records)
            })
            .collect()
    }

    pub fn clauses(&self) -> &[SearchClause] {
        self.clauses.as_slice()
    }

    /// Cached suggestions for a field, if derived.
    pub fn suggestions(&self, field: &str) -> Option<&[String]> {
        self.suggestions.get(field)
    }

    /// Cached suggestions for the selected field.
    pub fn selected_suggestions(&self) -> Option<&[String]> {
        self.selected
            .as_name()
            .and_then(|name| self.suggestions.get(name))
    }

    pub fn suggestion_cache(&self) -> &SuggestionCache {
        &self.suggestions
    }

    pub fn selected_field(&self) -> &FieldKey {
        &self.selected
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn source(&self) -> Option<&[T]> {
        self.source.as_deref()
    }

    /// The current input fingerprint.
    pub fn stamp(&self) -> Stamp {
        Stamp {
            source: self.source_generation,
            clauses: self.clauses.generation(),
        }
    }

    /// Returns `true` once a result has been published for the current
    /// source.
    pub fn is_initialized(&self) -> bool {
        self.published.is_some()
    }

    /// Returns `true` if the published result was filtered by at least one
    /// clause.
    pub fn is_filtered(&self) -> bool {
        self.published
            .as_ref()
            .is_some_and(|p| !p.snapshot.clauses.is_empty())
    }

    /// Whether the last recompute refined the previous result.
    pub fn last_reused(&self) -> bool {
        self.published.as_ref().is_some_and(|p| p.reused)
    }

    // ------------------------------------------------------------------

    fn push_clause(&mut self, field: FieldKey, query: String) {
        let field = match &self.options.global_search_replacement {
            Some(target) if field.is_all() => FieldKey::named(target.as_str()),
            _ => field,
        };
        let label = field
            .as_name()
            .map(|name| self.fields.label_of(name))
            .unwrap_or_default();
        let clause = SearchClause::new(field, label, query);

        if self.options.override_existing_queries_with_same_field {
            let replaced = self.clauses.push_replacing(clause);
            if replaced > 0 {
                debug!(replaced, "replaced clauses on the same field");
            }
        } else {
            self.clauses.push(clause);
        }
        self.selected = FieldKey::All;
    }

    fn invalidate_source(&mut self) {
        self.source_generation += 1;
        self.suggestions = SuggestionCache::new();
        self.published = None;
        self.derive_selected_suggestions();
    }

    /// Fills the cache for the selected field if it offers suggestions.
    fn derive_selected_suggestions(&mut self) {
        let Some(name) = self.selected.as_name() else {
            return;
        };
        let Some(descriptor) = self.fields.get(name) else {
            return;
        };
        if !descriptor.searchable_with_suggestions() || self.suggestions.contains(name) {
            return;
        }

        let records: &[T] = match (self.source.as_deref(), descriptor.provided_suggestions()) {
            (Some(source), _) => source,
            (None, Some(_)) => &[],
            (None, None) => {
                trace!(field = name, "no source yet, deferring suggestions");
                return;
            }
        };
        let derived = self
            .suggestions
            .get_or_derive(
                descriptor,
                records,
                &self.options.true_label,
                &self.options.false_label,
            )
            .map_or(0, <[String]>::len);
        debug!(field = name, suggestions = derived, "derived suggestions");
    }
}

fn checked_categories(mut categories: Vec<Category>, len: usize) -> Vec<Category> {
    for category in &mut categories {
        let before = category.members.len();
        category.members.retain(|&index| index < len);
        if category.members.len() < before {
            warn!(
                category = %category.key,
                dropped = before - category.members.len(),
                "categorizer returned indices outside the source"
            );
        }
    }
    categories
}
