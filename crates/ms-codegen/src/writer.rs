//! Applying a plan to the filesystem.
//!
//! Write order is fixed: output directory, route units, aggregator, and only
//! then the backup rename and the copy over the source. A failure before the
//! last step leaves the original routes file in place.

use std::fs;

use camino::Utf8Path;
use tracing::{debug, info};

use crate::error::MigrateError;
use crate::plan::MigrationPlan;
use crate::report::MigrationReport;
use crate::update::MigrationUpdate;

/// Writes every file of `plan` and swaps the aggregator in for the source.
///
/// `on_update` is called after every completed step. Route units whose file
/// names collide overwrite each other in discovery order. Re-running is
/// idempotent for the output directory.
///
/// # Errors
///
/// Returns [`MigrateError::Io`] with the failing path if any filesystem
/// operation fails. Updates already sent describe what was written.
pub fn apply(
    plan: &MigrationPlan,
    mut on_update: impl FnMut(MigrationUpdate<'_>),
) -> Result<MigrationReport, MigrateError> {
    let context = &plan.context;

    fs::create_dir_all(&context.output_dir)
        .map_err(|e| MigrateError::io("create directory", &context.output_dir, e))?;
    debug!(dir = %context.output_dir, "Output directory ready");

    for (planned, path) in plan.routes.iter().zip(plan.route_paths()) {
        write_file(&path, &planned.file.content)?;
        info!(file = %planned.file.filename, "Created route file");
        on_update(MigrationUpdate::RouteWritten(&path));
    }

    let index_path = plan.index_path();
    write_file(&index_path, &plan.index.content)?;
    info!(file = %index_path, "Created aggregator");
    on_update(MigrationUpdate::IndexWritten(&index_path));

    fs::rename(&context.source_path, &context.backup_path)
        .map_err(|e| MigrateError::io("back up", &context.source_path, e))?;
    info!(backup = %context.backup_path, "Backed up original routes file");
    on_update(MigrationUpdate::BackedUp {
        source: &context.source_path,
        backup: &context.backup_path,
    });

    fs::copy(&index_path, &context.source_path)
        .map_err(|e| MigrateError::io("replace", &context.source_path, e))?;
    info!(file = %context.source_path, "Replaced routes file with aggregator");
    on_update(MigrationUpdate::SourceReplaced(&context.source_path));

    Ok(MigrationReport::from_plan(plan, false))
}

fn write_file(path: &Utf8Path, content: &str) -> Result<(), MigrateError> {
    fs::write(path, content).map_err(|e| MigrateError::io("write", path, e))
}
