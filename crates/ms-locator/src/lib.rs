//! Route registration locator for monolithic TypeScript routes files.
//!
//! This crate finds every `app.<verb>(<path>, ...)` registration in a routes
//! file and returns it as a [`RouteRecord`](ms_core::RouteRecord) carrying the
//! method, path literal, exact code span, and its leading comment block.
//!
//! # Strategies
//!
//! Two call-site engines are available, selected by
//! [`ExtractStrategy`](ms_core::ExtractStrategy):
//!
//! | Strategy | Engine | Route end |
//! |----------|--------|-----------|
//! | `Syntax` | tree-sitter TypeScript grammar | End of the call's statement |
//! | `Heuristic` | Regular expressions | First `}` `)` `;` after the call |
//!
//! The heuristic engine ends a route at the first closing sequence it sees,
//! so a handler containing a nested callback is cut short. The syntax engine
//! uses the parser's own span and is the default.
//!
//! ```
//! use ms_core::{ExtractStrategy, LocateConfig};
//! use ms_locator::RouteLocator;
//!
//! let source = "app.post('/items', (req, res) => {\n  list.forEach((i) => {\n  });\n  res.end();\n});\n";
//!
//! let mut syntax = RouteLocator::new(&LocateConfig::default())?;
//! assert!(syntax.locate(source)?[0].code.contains("res.end();"));
//!
//! let config = LocateConfig { strategy: ExtractStrategy::Heuristic, ..LocateConfig::default() };
//! let mut heuristic = RouteLocator::new(&config)?;
//! assert!(!heuristic.locate(source)?[0].code.contains("res.end();"));
//! # Ok::<(), ms_locator::LocateError>(())
//! ```
//!
//! # Thread Safety
//!
//! [`RouteLocator`] is `Send` but not `Sync`; create one per thread. The
//! compiled tree-sitter query is shared globally.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod comments;
pub mod error;
mod heuristic;
mod locator;
pub mod queries;
mod syntax;

pub use error::LocateError;
pub use heuristic::HeuristicLocator;
pub use locator::{CallSite, RouteLocator};
pub use syntax::SyntaxLocator;
