//! Core types, configuration, and route naming for the modsplit tool.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - Domain types ([`HttpMethod`], [`RouteRecord`], [`ModuleContext`], [`GeneratedFile`])
//! - Configuration structures loaded from JSON ([`Config`])
//! - The single route naming derivation ([`RouteName`]) used by both the
//!   per-route generator and the aggregator generator
//! - The [`ConfigError`] type

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod naming;
pub mod types;

pub use config::{
    CodegenConfig, CollisionPolicy, Config, ExtractStrategy, FixtureConfig, LayoutConfig,
    LocateConfig, NamingConfig, ScaffoldConfig,
};
pub use error::ConfigError;
pub use naming::{RouteName, module_base_url, module_setup_symbol, module_title, pascal_case};
pub use types::{
    GeneratedFile, HttpMethod, ModuleContext, ModuleManifest, RouteRecord, SourceLocation,
};
