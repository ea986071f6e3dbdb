//! The module migrator.
//!
//! [`Migrator`] ties the stages together for one module at a time: read the
//! routes file, locate the routes, plan the output, run the pre-write checks,
//! and apply (or only report, for a dry run).

use std::fs;

use ms_core::{CodegenConfig, CollisionPolicy, Config, ModuleContext, NamingConfig};
use ms_locator::RouteLocator;
use tracing::{info, warn};

use crate::error::MigrateError;
use crate::plan::MigrationPlan;
use crate::report::MigrationReport;
use crate::update::MigrationUpdate;
use crate::writer;

/// Migrates monolithic routes files into one file per route.
///
/// # Examples
///
/// ```no_run
/// use ms_codegen::Migrator;
/// use ms_core::{Config, ModuleContext};
///
/// let config = Config::default();
/// let context = ModuleContext::resolve("crm", &config.layout)?;
/// let mut migrator = Migrator::new(&config)?;
///
/// let report = migrator.migrate(&context, false)?;
/// println!("{} routes migrated", report.route_count);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Migrator {
    locator: RouteLocator,
    naming: NamingConfig,
    codegen: CodegenConfig,
    index_file: String,
}

impl Migrator {
    /// Creates a migrator from the full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::Locate`] if the route locator cannot be set up.
    pub fn new(config: &Config) -> Result<Self, MigrateError> {
        Ok(Self {
            locator: RouteLocator::new(&config.locate)?,
            naming: config.naming.clone(),
            codegen: config.codegen,
            index_file: config.layout.index_file.clone(),
        })
    }

    /// Computes the migration plan for a module without writing anything.
    ///
    /// # Errors
    ///
    /// - [`MigrateError::SourceNotFound`] if the module has no routes file
    /// - [`MigrateError::Io`] if the routes file cannot be read
    /// - [`MigrateError::NoRoutes`] if no route registration is found
    /// - [`MigrateError::Collision`] if file names collide and the policy is
    ///   [`CollisionPolicy::Fail`]
    /// - [`MigrateError::BackupExists`] if a backup is already present
    pub fn plan(&mut self, context: &ModuleContext) -> Result<MigrationPlan, MigrateError> {
        if !context.source_path.is_file() {
            return Err(MigrateError::SourceNotFound(context.source_path.clone()));
        }

        let source = fs::read_to_string(&context.source_path)
            .map_err(|e| MigrateError::io("read", &context.source_path, e))?;

        let routes = self.locator.locate(&source)?;
        if routes.is_empty() {
            warn!(module = %context.name, "No routes found; module may already be migrated");
            return Err(MigrateError::NoRoutes(context.source_path.clone()));
        }
        info!(module = %context.name, count = routes.len(), "Found routes");

        let plan = MigrationPlan::build(context.clone(), routes, &self.naming, &self.index_file);

        for collision in &plan.collisions {
            warn!(
                file = %collision.filename,
                routes = ?collision.routes,
                "Routes derive the same file name; the last one wins"
            );
        }
        if plan.has_collisions() && self.codegen.collision_policy == CollisionPolicy::Fail {
            return Err(MigrateError::Collision(plan.collision_names()));
        }

        if context.backup_path.exists() {
            return Err(MigrateError::BackupExists(context.backup_path.clone()));
        }

        Ok(plan)
    }

    /// Migrates one module.
    ///
    /// With `dry_run` the plan is computed and reported but nothing is written.
    ///
    /// # Errors
    ///
    /// Any error of [`Migrator::plan`], plus [`MigrateError::Io`] from writing.
    pub fn migrate(
        &mut self,
        context: &ModuleContext,
        dry_run: bool,
    ) -> Result<MigrationReport, MigrateError> {
        self.migrate_with(context, dry_run, |_| {})
    }

    /// Like [`Migrator::migrate`], calling `on_update` as each step completes.
    ///
    /// # Errors
    ///
    /// Same as [`Migrator::migrate`].
    pub fn migrate_with(
        &mut self,
        context: &ModuleContext,
        dry_run: bool,
        mut on_update: impl FnMut(MigrationUpdate<'_>),
    ) -> Result<MigrationReport, MigrateError> {
        info!(module = %context.name, dry_run, "Migrating module");

        let plan = self.plan(context)?;
        on_update(MigrationUpdate::RoutesFound(plan.routes.len()));
        if dry_run {
            return Ok(MigrationReport::from_plan(&plan, true));
        }

        writer::apply(&plan, on_update)
    }
}
