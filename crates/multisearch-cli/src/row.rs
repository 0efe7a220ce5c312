//! Records loaded from a JSON file.

use std::collections::HashMap;

use chrono::NaiveDate;
use multisearch::matcher::date::parse_date;
use multisearch::{Searchable, Value};
use serde::Serialize;
use serde_json::Map;
use tracing::warn;

/// A JSON object with some string fields read as dates.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Row {
    fields: Map<String, serde_json::Value>,
    #[serde(skip)]
    dates: HashMap<String, NaiveDate>,
}

impl Row {
    /// Wraps an object, parsing each of `date_fields` that holds a date
    /// string. Values that do not parse stay strings.
    pub fn new(fields: Map<String, serde_json::Value>, date_fields: &[String]) -> Self {
        let mut dates = HashMap::new();
        for name in date_fields {
            let Some(serde_json::Value::String(text)) = fields.get(name) else {
                continue;
            };
            match parse_date(text) {
                Some(date) => {
                    dates.insert(name.clone(), date);
                }
                None => warn!(field = %name, value = %text, "not a date, matching as text"),
            }
        }
        Row { fields, dates }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl Searchable for Row {
    fn field_value(&self, field: &str) -> Value<'_> {
        match self.dates.get(field) {
            Some(date) => Value::Date(*date),
            None => self.fields.field_value(field),
        }
    }
}
