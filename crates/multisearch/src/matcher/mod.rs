//! Per-kind query matchers.
//!
//! Each matcher is a pure predicate over one value kind. None of them can
//! fail: text that does not form a valid query simply does not match.
//! Case folding of the query happens upstream in [`crate::dispatch`].

pub mod boolean;
pub mod date;
pub mod number;
pub mod relational;
pub mod string;

pub use boolean::BooleanTokens;
pub use relational::RelOp;
