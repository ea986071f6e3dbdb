//! Route file planning, rendering, and writing for modsplit.
//!
//! This crate turns the routes found by [`ms_locator`] into one TypeScript
//! file per route plus an aggregator (`routes/index.ts`) that registers them
//! all, then swaps the aggregator in for the original routes file. The
//! [`scaffold`] module generates new frontend modules from a
//! [`ms_core::ModuleManifest`].
//!
//! # Stages
//!
//! 1. [`Migrator::plan`] reads and locates, then builds a [`MigrationPlan`]
//!    entirely in memory and runs the pre-write checks
//! 2. [`apply`] writes the plan: route units, aggregator, then (last) the
//!    backup rename and the copy over the source, reporting each completed
//!    step as a [`MigrationUpdate`]
//!
//! Every refusal happens in stage 1, so a refused migration leaves the module
//! untouched.
//!
//! # Naming
//!
//! File names and symbols all come from [`ms_core::RouteName`]; the route
//! unit's export and the aggregator's import always agree.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
mod migrate;
pub mod plan;
mod report;
pub mod scaffold;
pub mod template;
mod update;
mod writer;

pub use error::{MigrateError, ScaffoldError};
pub use migrate::Migrator;
pub use plan::{FilenameCollision, MigrationPlan, PlannedRoute};
pub use report::MigrationReport;
pub use scaffold::ScaffoldPlan;
pub use update::MigrationUpdate;
pub use writer::apply;
