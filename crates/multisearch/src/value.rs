//! Runtime value kinds for field matching.
//!
//! The [`Value`] enum is the closed set of kinds a record field can hold at
//! match time. Every kind has exactly one matcher; anything that is not a
//! string, number, boolean or date falls back to the string matcher through
//! [`Value::canonical_text`].

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::NaiveDate;

/// Field value borrowed from a record.
///
/// # Example
///
/// ```
/// use multisearch::{Number, Value};
///
/// struct Person {
///     name: String,
///     age: u8,
/// }
///
/// fn accessor<'a>(person: &'a Person, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&person.name),
///         "age" => Value::Number(Number::from(person.age)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Calendar day. Time of day and timezone are never part of a date value.
    Date(NaiveDate),
    /// Structured value (array or object), matched through its JSON text.
    Json(&'a serde_json::Value),
    /// Explicit null.
    Null,
    /// Field not present on the record.
    None,
}

impl<'a> Value<'a> {
    /// Maps a JSON value onto the matching kind.
    ///
    /// Scalars map to their own kinds; arrays and objects become
    /// [`Value::Json`]. JSON has no date type, so date strings stay strings.
    pub fn from_json(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Number(n) => Value::Number(Number::from_json(n)),
            other => Value::Json(other),
        }
    }

    /// Returns the name of this value's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Date(_) => "date",
            Value::Json(_) => "json",
            Value::Null => "null",
            Value::None => "none",
        }
    }

    /// Returns `true` if the field was absent.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// JSON-like textual form used by the string fallback.
    ///
    /// Strings are returned unchanged, absent fields read as `undefined`,
    /// null as `null`, and structured values as compact JSON.
    pub fn canonical_text(&self) -> Cow<'a, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Owned(n.to_json_string()),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            Value::Json(v) => Cow::Owned(v.to_string()),
            Value::Null => Cow::Borrowed("null"),
            Value::None => Cow::Borrowed("undefined"),
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Integers keep their own variants so equality on large values stays exact;
/// comparisons across variants go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    fn from_json(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    /// Formats the number the way JSON would (`null` for non-finite floats).
    pub fn to_json_string(self) -> String {
        match self {
            Number::I64(n) => n.to_string(),
            Number::U64(n) => n.to_string(),
            Number::F64(n) if n.is_finite() => n.to_string(),
            Number::F64(_) => "null".to_string(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_maps_scalars() {
        assert_eq!(Value::from_json(&json!("hi")), Value::String("hi"));
        assert_eq!(Value::from_json(&json!(true)), Value::Bool(true));
        assert_eq!(Value::from_json(&json!(null)), Value::Null);
        assert_eq!(Value::from_json(&json!(7)), Value::Number(Number::I64(7)));
        assert_eq!(
            Value::from_json(&json!(u64::MAX)),
            Value::Number(Number::U64(u64::MAX))
        );
        assert_eq!(
            Value::from_json(&json!(1.5)),
            Value::Number(Number::F64(1.5))
        );
    }

    #[test]
    fn from_json_keeps_structures() {
        let array = json!([1, 2, 3]);
        assert_eq!(Value::from_json(&array).kind(), "json");
    }

    #[test]
    fn canonical_text_forms() {
        assert_eq!(Value::Null.canonical_text(), "null");
        assert_eq!(Value::None.canonical_text(), "undefined");
        assert_eq!(Value::Bool(false).canonical_text(), "false");
        assert_eq!(Value::Number(Number::F64(8.0)).canonical_text(), "8");
        assert_eq!(Value::Number(Number::F64(f64::NAN)).canonical_text(), "null");

        let object = json!({"a": 1});
        assert_eq!(Value::Json(&object).canonical_text(), r#"{"a":1}"#);

        let array = json!([1, 2, 3]);
        assert_eq!(Value::Json(&array).canonical_text(), "[1,2,3]");

        let day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(Value::Date(day).canonical_text(), "2021-01-01");
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u8), Number::U64(42));
        assert_eq!(Number::from(42.5f64), Number::F64(42.5));
    }
}
