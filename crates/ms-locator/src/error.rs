//! Error types for the ms-locator crate.
//!
//! This module provides the [`LocateError`] type for errors that can occur
//! while setting up a locator or scanning a routes file.

/// Errors that can occur while locating route registrations.
///
/// # Examples
///
/// ```
/// use ms_locator::LocateError;
///
/// fn handle_error(err: LocateError) {
///     match err {
///         LocateError::LanguageInit => eprintln!("Failed to set TypeScript language"),
///         LocateError::QueryCompile { offset, .. } => {
///             eprintln!("Query compilation failed at offset {offset}");
///         }
///         LocateError::MissingCapture(name) => eprintln!("Query lacks capture {name}"),
///         LocateError::Pattern(e) => eprintln!("Invalid call-site pattern: {e}"),
///         LocateError::Parse => eprintln!("Failed to parse source code"),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// Failed to set the TypeScript language on the parser.
    #[error("failed to set TypeScript language")]
    LanguageInit,

    /// Failed to compile the route query.
    #[error("failed to compile query at offset {offset}: {kind:?}")]
    QueryCompile {
        /// The byte offset in the query string where the error occurred.
        offset: usize,
        /// The kind of query error.
        kind: tree_sitter::QueryError,
    },

    /// The compiled query does not define an expected capture.
    #[error("route query has no capture named '{0}'")]
    MissingCapture(&'static str),

    /// The heuristic call-site pattern could not be built.
    #[error("invalid call-site pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Failed to parse the source code.
    ///
    /// This typically indicates the parser ran out of memory or was cancelled.
    #[error("failed to parse source code")]
    Parse,
}
