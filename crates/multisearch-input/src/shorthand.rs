//! The `Label:value` shorthand.
//!
//! Typing or pasting `Favorite Color:blue` targets the field labeled
//! "Favorite Color" with the query `blue`. Labels compare without case.

use multisearch::{FieldDescriptor, Fields};

use crate::error::InputError;

/// Splits `Label:value` text into the labeled field and the value.
///
/// The label is everything before the first `:`; the value is everything
/// after it, colons included. Returns `None` when there is no `:` or the
/// label names no field.
///
/// ```
/// use multisearch::{FieldDescriptor, Fields};
/// use multisearch_input::parse_shorthand;
///
/// let fields = Fields::new(vec![FieldDescriptor::new("birthDate", "Birth Date")]).unwrap();
/// let (field, value) = parse_shorthand(&fields, "birth date:>=1990-01-01T10:00").unwrap();
/// assert_eq!(field.name(), "birthDate");
/// assert_eq!(value, ">=1990-01-01T10:00");
/// ```
pub fn parse_shorthand<'f, 't>(
    fields: &'f Fields,
    text: &'t str,
) -> Option<(&'f FieldDescriptor, &'t str)> {
    let (label, value) = text.split_once(':')?;
    fields.by_label(label).map(|field| (field, value))
}

/// Like [`parse_shorthand`], reporting why the text was rejected.
pub fn parse_shorthand_strict<'f, 't>(
    fields: &'f Fields,
    text: &'t str,
) -> Result<(&'f FieldDescriptor, &'t str), InputError> {
    let (label, value) = text
        .split_once(':')
        .ok_or_else(|| InputError::MissingLabel(text.to_string()))?;
    fields
        .by_label(label)
        .map(|field| (field, value))
        .ok_or_else(|| InputError::unknown_label(label))
}
