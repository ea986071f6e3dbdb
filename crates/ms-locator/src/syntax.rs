//! Syntax-aware call-site discovery using tree-sitter.
//!
//! The span of a route is the parser's own `call_expression` node, extended to
//! the enclosing `expression_statement` so the terminating `;` is kept. Nested
//! `});` sequences inside the handler body therefore never end a route early.

use ms_core::HttpMethod;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, QueryCursor};

use crate::error::LocateError;
use crate::locator::CallSite;
use crate::queries::route_query;

/// Finds route registration calls by parsing the source as TypeScript.
pub struct SyntaxLocator {
    /// The underlying tree-sitter parser.
    parser: Parser,
    /// Router identifiers accepted as the call receiver.
    routers: Vec<String>,
}

impl SyntaxLocator {
    /// Creates a locator accepting calls on any of `routers`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::LanguageInit`] if the TypeScript language cannot
    /// be set on the parser.
    pub fn new(routers: &[String]) -> Result<Self, LocateError> {
        let mut parser = Parser::new();
        let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();

        parser
            .set_language(&language)
            .map_err(|_| LocateError::LanguageInit)?;

        Ok(Self {
            parser,
            routers: routers.to_vec(),
        })
    }

    /// Returns every top-level route registration in source order.
    ///
    /// Registrations nested inside an earlier route's span are skipped, as are
    /// calls with a single argument (`app.get('env')` reads a setting).
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::Parse`] if tree-sitter produces no tree, or a
    /// query error if the route query cannot be compiled.
    pub fn find_sites(&mut self, source: &str) -> Result<Vec<CallSite>, LocateError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(LocateError::Parse)?;
        let compiled = route_query()?;
        let source_bytes = source.as_bytes();

        let mut cursor = QueryCursor::new();
        cursor.set_max_start_depth(None);
        let mut matches = cursor.matches(&compiled.query, tree.root_node(), source_bytes);

        let mut sites = Vec::new();
        while let Some(match_) = matches.next() {
            let mut router = None;
            let mut verb = None;
            let mut path = None;
            let mut call = None;

            for capture in match_.captures {
                match capture.index {
                    idx if idx == compiled.router => router = Some(capture.node),
                    idx if idx == compiled.verb => verb = Some(capture.node),
                    idx if idx == compiled.path => path = Some(capture.node),
                    idx if idx == compiled.call => call = Some(capture.node),
                    _ => {}
                }
            }

            let (Some(router), Some(verb), Some(path), Some(call)) = (router, verb, path, call)
            else {
                continue;
            };

            if let Some(site) = self.build_site(router, verb, path, call, source_bytes) {
                sites.push(site);
            }
        }

        sites.sort_by_key(|site| site.start);

        let mut top_level: Vec<CallSite> = Vec::with_capacity(sites.len());
        for site in sites {
            if top_level.last().is_some_and(|prev| site.start < prev.end) {
                tracing::debug!(path = %site.path, "Skipping registration nested in another route");
                continue;
            }
            top_level.push(site);
        }

        Ok(top_level)
    }

    /// Validates one query match and converts it to a [`CallSite`].
    fn build_site(
        &self,
        router: Node<'_>,
        verb: Node<'_>,
        path: Node<'_>,
        call: Node<'_>,
        source: &[u8],
    ) -> Option<CallSite> {
        let router_name = node_text(router, source)?;
        if !self.routers.iter().any(|r| r == router_name) {
            return None;
        }

        let method: HttpMethod = node_text(verb, source)?.parse().ok()?;

        let argument_count = call
            .child_by_field_name("arguments")
            .map_or(0, |args| args.named_child_count());
        if argument_count < 2 {
            return None;
        }

        let literal = node_text(path, source)?;
        let path = strip_delimiters(literal)?;

        let end = call
            .parent()
            .filter(|parent| parent.kind() == "expression_statement")
            .map_or_else(|| call.end_byte(), |statement| statement.end_byte());

        Some(CallSite {
            method,
            path: path.to_owned(),
            start: call.start_byte(),
            end,
        })
    }
}

impl std::fmt::Debug for SyntaxLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxLocator")
            .field("routers", &self.routers)
            .finish_non_exhaustive()
    }
}

/// Extracts the text of a node from the source bytes.
fn node_text<'a>(node: Node<'_>, source: &'a [u8]) -> Option<&'a str> {
    std::str::from_utf8(source.get(node.start_byte()..node.end_byte())?).ok()
}

/// Removes the surrounding quote or backtick from a literal.
fn strip_delimiters(literal: &str) -> Option<&str> {
    let inner = literal.get(1..literal.len().checked_sub(1)?)?;
    (!inner.is_empty()).then_some(inner)
}
