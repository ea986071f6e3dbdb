//! Pre-compiled tree-sitter query for route registration calls.
//!
//! This module provides the [`ROUTE_QUERY`] constant and [`route_query`] for
//! lazily compiling and caching it together with its capture indices.

use std::sync::OnceLock;

use tree_sitter::{Language, Query};

use crate::error::LocateError;

/// Tree-sitter query matching `<router>.<verb>(<path literal>, ...)`.
///
/// Router and verb names are filtered in Rust, so the query matches any
/// member call whose first argument is a string or template literal.
///
/// # Capture Names
///
/// - `route.router` - The object the method is called on
/// - `route.verb` - The method name
/// - `route.path` - The first argument (string or template literal)
/// - `route.call` - The whole `call_expression`
pub const ROUTE_QUERY: &str = r"
(call_expression
  function: (member_expression
    object: (identifier) @route.router
    property: (property_identifier) @route.verb)
  arguments: (arguments
    .
    [
      (string)
      (template_string)
    ] @route.path)) @route.call
";

/// The compiled route query and the indices of its captures.
pub struct RouteQuery {
    /// The compiled query.
    pub query: Query,
    /// Index of `route.router`.
    pub router: u32,
    /// Index of `route.verb`.
    pub verb: u32,
    /// Index of `route.path`.
    pub path: u32,
    /// Index of `route.call`.
    pub call: u32,
}

impl std::fmt::Debug for RouteQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteQuery")
            .field("router", &self.router)
            .field("verb", &self.verb)
            .field("path", &self.path)
            .field("call", &self.call)
            .finish_non_exhaustive()
    }
}

/// Global cache for the compiled route query.
static COMPILED_ROUTE_QUERY: OnceLock<RouteQuery> = OnceLock::new();

/// Returns the compiled route query for TypeScript.
///
/// The query is compiled once and cached for all subsequent calls.
///
/// # Errors
///
/// Returns [`LocateError::QueryCompile`] if the query fails to compile, or
/// [`LocateError::MissingCapture`] if a capture is absent from it.
pub fn route_query() -> Result<&'static RouteQuery, LocateError> {
    if let Some(query) = COMPILED_ROUTE_QUERY.get() {
        return Ok(query);
    }

    let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
    let query = compile_query(&language)?;

    Ok(COMPILED_ROUTE_QUERY.get_or_init(|| query))
}

/// Compiles the route query and resolves its capture indices.
fn compile_query(language: &Language) -> Result<RouteQuery, LocateError> {
    let query = Query::new(language, ROUTE_QUERY).map_err(|e| LocateError::QueryCompile {
        offset: e.offset,
        kind: e,
    })?;

    let index = |name: &'static str| {
        query
            .capture_index_for_name(name)
            .ok_or(LocateError::MissingCapture(name))
    };
    let router = index("route.router")?;
    let verb = index("route.verb")?;
    let path = index("route.path")?;
    let call = index("route.call")?;

    Ok(RouteQuery {
        query,
        router,
        verb,
        path,
        call,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_compiles() {
        let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
        let result = compile_query(&language);
        assert!(result.is_ok(), "Query should compile: {result:?}");
    }

    #[test]
    fn test_capture_indices_are_distinct() {
        let compiled = route_query().expect("Query should compile");
        let mut indices = vec![compiled.router, compiled.verb, compiled.path, compiled.call];
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 4);
    }

    #[test]
    fn test_query_pattern_count() {
        let compiled = route_query().expect("Query should compile");
        assert_eq!(compiled.query.pattern_count(), 1);
    }
}
