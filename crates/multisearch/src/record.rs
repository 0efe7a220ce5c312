//! Record access.
//!
//! The engine never owns the shape of a record; it asks for one field at a
//! time through the [`Searchable`] trait.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use chrono::NaiveDate;
use serde_json::Map;

use crate::error::{Result, SearchError};
use crate::value::{Number, Value};

/// Trait for types that can be filtered by the engine.
///
/// # Manual Implementation
///
/// ```
/// use multisearch::{Number, Searchable, Value};
///
/// struct Person {
///     name: String,
///     employed: bool,
/// }
///
/// impl Searchable for Person {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "employed" => Value::Bool(self.employed),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Searchable {
    /// Returns the value of a field, or [`Value::None`] if the record has no
    /// such field.
    fn field_value(&self, field: &str) -> Value<'_>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}

impl<T: Searchable + ?Sized> Searchable for Box<T> {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}

impl Searchable for Map<String, serde_json::Value> {
    fn field_value(&self, field: &str) -> Value<'_> {
        self.get(field).map_or(Value::None, Value::from_json)
    }
}

impl Searchable for serde_json::Value {
    fn field_value(&self, field: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.field_value(field),
            _ => Value::None,
        }
    }
}

impl<S: BuildHasher> Searchable for HashMap<String, OwnedValue, S> {
    fn field_value(&self, field: &str) -> Value<'_> {
        self.get(field).map_or(Value::None, OwnedValue::as_value)
    }
}

impl Searchable for BTreeMap<String, OwnedValue> {
    fn field_value(&self, field: &str) -> Value<'_> {
        self.get(field).map_or(Value::None, OwnedValue::as_value)
    }
}

/// Owned counterpart of [`Value`], for records built as maps.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedValue {
    String(String),
    Number(Number),
    Bool(bool),
    Date(NaiveDate),
    Json(serde_json::Value),
    Null,
}

impl OwnedValue {
    /// Borrows this value as a [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            OwnedValue::String(s) => Value::String(s),
            OwnedValue::Number(n) => Value::Number(*n),
            OwnedValue::Bool(b) => Value::Bool(*b),
            OwnedValue::Date(d) => Value::Date(*d),
            OwnedValue::Json(v) => Value::from_json(v),
            OwnedValue::Null => Value::Null,
        }
    }
}

impl From<&str> for OwnedValue {
    fn from(s: &str) -> Self {
        OwnedValue::String(s.to_string())
    }
}

impl From<String> for OwnedValue {
    fn from(s: String) -> Self {
        OwnedValue::String(s)
    }
}

impl From<bool> for OwnedValue {
    fn from(b: bool) -> Self {
        OwnedValue::Bool(b)
    }
}

impl From<NaiveDate> for OwnedValue {
    fn from(d: NaiveDate) -> Self {
        OwnedValue::Date(d)
    }
}

impl From<serde_json::Value> for OwnedValue {
    fn from(v: serde_json::Value) -> Self {
        OwnedValue::Json(v)
    }
}

macro_rules! owned_number_from {
    ($($t:ty),+) => {
        $(
            impl From<$t> for OwnedValue {
                fn from(n: $t) -> Self {
                    OwnedValue::Number(Number::from(n))
                }
            }
        )+
    };
}

owned_number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Splits a JSON document into object records.
///
/// The document must be an array whose elements are all objects.
pub fn records_from_json(value: serde_json::Value) -> Result<Vec<Map<String, serde_json::Value>>> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                serde_json::Value::Object(map) => Ok(map),
                other => Err(SearchError::InvalidRecord {
                    index,
                    found: json_kind(&other),
                }),
            })
            .collect(),
        other => Err(SearchError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
