//! Multisearch - incremental multi-clause filtering for record collections.
//!
//! Multisearch keeps an ordered list of user-entered search clauses and
//! publishes the records that satisfy all of them. It supports:
//!
//! - Typed query matching for strings, numbers, booleans and dates
//! - Relational operators (`>`, `>=`, `<`, `<=`, `!=`) on numbers and dates
//! - Exact (`"Blue"`) and literal-quote (`\"Blue\"`) string matching
//! - Global clauses that search every declared field
//! - Per-field suggestion lists, derived once per source collection
//! - Optional categorization of results into named buckets
//! - Incremental refinement when clauses are only appended
//!
//! # Quick Start
//!
//! ```rust
//! use multisearch::{Engine, FieldDescriptor, FieldKey, Number, Searchable, Value};
//!
//! struct Person {
//!     name: String,
//!     favorite_number: i64,
//!     employed: bool,
//! }
//!
//! impl Searchable for Person {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "name" => Value::String(&self.name),
//!             "favoriteNumber" => Value::Number(Number::I64(self.favorite_number)),
//!             "isEmployed" => Value::Bool(self.employed),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let people = vec![
//!     Person { name: "Bob".into(), favorite_number: 8, employed: false },
//!     Person { name: "Eve".into(), favorite_number: 11, employed: true },
//!     Person { name: "Ann".into(), favorite_number: 3, employed: true },
//! ];
//!
//! let mut engine = Engine::builder()
//!     .field(FieldDescriptor::new("name", "Name"))
//!     .field(FieldDescriptor::new("favoriteNumber", "Favorite Number"))
//!     .field(FieldDescriptor::new("isEmployed", "Is Employed").with_suggestions())
//!     .source(people)
//!     .build()
//!     .unwrap();
//!
//! engine.add_clause(FieldKey::named("favoriteNumber"), "<=9");
//! engine.add_clause(FieldKey::named("isEmployed"), "yes");
//! engine.sync();
//!
//! let names: Vec<&str> = engine.records().iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, ["Ann"]);
//!
//! engine.select_field(FieldKey::named("isEmployed"));
//! assert_eq!(engine.selected_suggestions().unwrap(), ["Yes", "No"]);
//! ```
//!
//! # Query Semantics
//!
//! Clauses combine with AND. The query text of each clause is interpreted by
//! the kind of the value it is checked against:
//!
//! | Kind | Accepted queries |
//! |------|------------------|
//! | Boolean | truthy/falsy tokens (`yes`, `1`, `on`, `no`, `x`, ...) |
//! | Number | exact value, or an operator followed by a number |
//! | Date | partial ISO text, or an operator followed by a date |
//! | Anything else | substring, `"exact"`, or `\"quoted\"` substring |
//!
//! Malformed queries never fail; they simply match nothing.

mod categorize;
mod clause;
mod dispatch;
mod engine;
mod error;
mod field;
mod filter;
pub mod matcher;
mod options;
mod record;
mod suggest;
mod value;

// Re-export public API
pub use categorize::{group_by, Categorizer, Category};
pub use clause::{is_append_of, ClauseStore, SearchClause};
pub use dispatch::{fold_query, is_query_match, matches_folded};
pub use engine::{Engine, EngineBuilder, Stamp};
pub use error::{Result, SearchError};
pub use field::{FieldDescriptor, FieldKey, Fields, ALL_FIELDS};
pub use filter::{Conjunction, FilterResult, Outcome, Recompute, Snapshot};
pub use options::{EngineOptions, MatchOptions};
pub use record::{records_from_json, OwnedValue, Searchable};
pub use suggest::{derive_suggestions, quote_strict, SuggestionCache};
pub use value::{Number, Value};
