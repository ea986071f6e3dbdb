//! The outcome of a migration.

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::plan::{FilenameCollision, MigrationPlan};

/// What a migration wrote, or for a dry run, would write.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    /// The migrated module.
    pub module: String,

    /// Number of routes found in the source.
    pub route_count: usize,

    /// `true` if nothing was written.
    pub dry_run: bool,

    /// Route unit destinations, one per route, in write order.
    pub route_files: Vec<Utf8PathBuf>,

    /// The aggregator inside the output directory.
    pub index_file: Utf8PathBuf,

    /// Where the original routes file was moved.
    pub backup_file: Utf8PathBuf,

    /// The routes file, now holding the aggregator.
    pub source_file: Utf8PathBuf,

    /// File names shared by several routes.
    pub collisions: Vec<FilenameCollision>,
}

impl MigrationReport {
    /// Describes `plan` without any filesystem effect.
    #[must_use]
    pub fn from_plan(plan: &MigrationPlan, dry_run: bool) -> Self {
        Self {
            module: plan.context.name.clone(),
            route_count: plan.routes.len(),
            dry_run,
            route_files: plan.route_paths().collect(),
            index_file: plan.index_path(),
            backup_file: plan.context.backup_path.clone(),
            source_file: plan.context.source_path.clone(),
            collisions: plan.collisions.clone(),
        }
    }

    /// Route files plus the aggregator plus the backup.
    #[inline]
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.route_count + 2
    }
}
