//! Error types for search-bar actions.

/// Errors returned by explicit search-bar actions.
///
/// Key handling never fails; these cover calls where the host asked for
/// something specific that could not be done.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The query text was empty after trimming.
    #[error("Nothing to search for.")]
    EmptyQuery,

    /// No declared field has this label.
    #[error("No field labeled '{0}'.")]
    UnknownLabel(String),

    /// Shorthand text had no `label:` prefix.
    #[error("Expected 'Label:value', got '{0}'.")]
    MissingLabel(String),
}

impl InputError {
    /// Create an unknown-label error.
    pub fn unknown_label(label: impl Into<String>) -> Self {
        Self::UnknownLabel(label.into())
    }
}
