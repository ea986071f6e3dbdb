//! Domain types for the modsplit tool.
//!
//! This module contains the core domain types used throughout the application
//! for representing located routes, the module being migrated, and the files
//! generated for it.
//!
//! # Module Organization
//!
//! - [`method`] - HTTP verbs accepted in registration calls
//! - [`location`] - Source code locations
//! - [`route`] - Located routes
//! - [`module`] - The module being migrated and its paths
//! - [`generated`] - Generated file contents
//! - [`manifest`] - Frontend module metadata for scaffolding
//!
//! All public types are re-exported at this module level and at the crate root:
//!
//! ```
//! use ms_core::{HttpMethod, ModuleContext, RouteRecord};
//! ```

mod generated;
mod location;
mod manifest;
mod method;
mod module;
mod route;

pub use generated::GeneratedFile;
pub use location::SourceLocation;
pub use manifest::ModuleManifest;
pub use method::{HttpMethod, UnknownMethod};
pub use module::ModuleContext;
pub use route::RouteRecord;
