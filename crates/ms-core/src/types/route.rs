//! Located route types.

use serde::{Deserialize, Serialize};

use super::{HttpMethod, SourceLocation};

/// One route registration found in a monolithic routes file.
///
/// Produced by the locator and never modified afterwards. A sequence of
/// records keeps the order in which the calls appear in the source, which is
/// also the order the generated aggregator registers them in.
///
/// # Examples
///
/// ```
/// use ms_core::{HttpMethod, RouteRecord, SourceLocation};
///
/// let code = "app.get('/api/v1/crm/contacts', handler);";
/// let route = RouteRecord::new(
///     HttpMethod::Get,
///     "/api/v1/crm/contacts",
///     code,
///     code,
///     SourceLocation::default(),
/// );
/// assert!(!route.has_leading_comments());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// The registration verb.
    pub method: HttpMethod,

    /// The literal path pattern, without its quotes.
    ///
    /// May contain `:param` placeholders and the base-URL template token.
    pub path: String,

    /// Verbatim source of the registration call and its handler body.
    pub code: String,

    /// The adjacent comment and blank lines above the call followed by
    /// `code`, with the call line's indentation restored. Equal to `code`
    /// when there is neither.
    pub annotated_code: String,

    /// Where the registration call starts.
    pub location: SourceLocation,
}

impl RouteRecord {
    /// Creates a new route record.
    #[must_use]
    pub fn new(
        method: HttpMethod,
        path: impl Into<String>,
        code: impl Into<String>,
        annotated_code: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            code: code.into(),
            annotated_code: annotated_code.into(),
            location,
        }
    }

    /// Returns `true` if a comment block was captured above the call.
    #[inline]
    #[must_use]
    pub fn has_leading_comments(&self) -> bool {
        self.annotated_code.trim_start() != self.code
    }
}
