//! Search-bar state for multisearch engines.
//!
//! `multisearch-input` models the text box and dropdown that sit in front of
//! a [`multisearch::Engine`]: typing, `Label:` field selection, pasting
//! `Label:value` shorthand, picking suggestions and the menu open/close
//! rules. It renders nothing. A host feeds it key presses and reads back
//! the text and menu state to draw.
//!
//! # Quick Start
//!
//! ```
//! use multisearch::{Engine, FieldDescriptor};
//! use multisearch_input::{Key, SearchBar};
//! use serde_json::json;
//!
//! let mut engine = Engine::builder()
//!     .field(FieldDescriptor::new("name", "Name"))
//!     .source(vec![json!({"name": "Bob"}), json!({"name": "Eve"})])
//!     .build()
//!     .unwrap();
//! let mut bar = SearchBar::new();
//!
//! for c in "name:eve".chars() {
//!     bar.key(&mut engine, Key::Char(c));
//! }
//! bar.key(&mut engine, Key::Enter);
//! engine.sync();
//!
//! assert_eq!(engine.records().len(), 1);
//! assert_eq!(engine.clauses()[0].field_label, "Name");
//! ```

mod bar;
mod error;
mod shorthand;

pub use bar::{Key, KeyOutcome, SearchBar, ShownMenu};
pub use error::InputError;
pub use shorthand::{parse_shorthand, parse_shorthand_strict};
