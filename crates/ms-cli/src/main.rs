//! CLI entry point for the modsplit tool.
//!
//! This binary splits a module's monolithic `routes.ts` into one file per
//! route plus a generated aggregator, and reports on the modules' HTTP
//! fixture files.
//!
//! # Usage
//!
//! ```bash
//! modsplit [OPTIONS] <COMMAND>
//!
//! # Split src/modules/crm/routes.ts into src/modules/crm/routes/*.route.ts
//! modsplit migrate crm
//!
//! # Show what would be written without touching anything
//! modsplit migrate crm --dry-run
//!
//! # Modules that still have a monolithic routes file
//! modsplit list
//!
//! # Summarize every teste.http as markdown
//! modsplit fixtures --format markdown --output FIXTURES.md
//!
//! # Create a frontend module skeleton
//! modsplit scaffold crm --name CRM --permission crm.read
//! modsplit scaffold --manifest modules.json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, eyre};
use ms_codegen::{MigrateError, MigrationReport, MigrationUpdate, Migrator, ScaffoldPlan};
use ms_core::{CollisionPolicy, Config, ExtractStrategy, ModuleContext, ModuleManifest, module_title};
use ms_scanner::{ModuleEntry, Scanner};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Splits monolithic Express routes files into one file per route.
#[derive(Parser)]
#[command(name = "modsplit", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Directory holding one subdirectory per module.
    ///
    /// Defaults to `src/modules` (or the value from `--config`).
    #[arg(short, long, global = true, env = "MODSPLIT_MODULES_ROOT")]
    modules_root: Option<Utf8PathBuf>,

    /// JSON configuration file.
    #[arg(short, long, global = true, env = "MODSPLIT_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Split a module's routes file into one file per route.
    Migrate {
        /// Module to migrate (lists the available modules if omitted).
        module: Option<String>,

        /// Plan and report without writing anything.
        #[arg(long)]
        dry_run: bool,

        /// How route registrations are located.
        #[arg(long, value_enum, env = "MODSPLIT_STRATEGY")]
        strategy: Option<StrategyArg>,

        /// Refuse to migrate when two routes derive the same file name.
        #[arg(long)]
        strict: bool,
    },

    /// List modules that still have a monolithic routes file.
    List,

    /// Analyze every module's HTTP fixture file.
    Fixtures {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = FixtureFormat::Text)]
        format: FixtureFormat,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Create the skeleton of a frontend module.
    Scaffold(ScaffoldArgs),
}

/// Arguments of the `scaffold` command.
#[derive(clap::Args)]
struct ScaffoldArgs {
    /// Kebab-case module id.
    #[arg(required_unless_present = "manifest")]
    id: Option<String>,

    /// Display name (defaults to the title-cased id).
    #[arg(long, conflicts_with = "manifest")]
    name: Option<String>,

    /// One-line description.
    #[arg(long, default_value = "", conflicts_with = "manifest")]
    description: String,

    /// Menu category.
    #[arg(long, default_value = "core", conflicts_with = "manifest")]
    category: String,

    /// Required permission (repeatable).
    #[arg(long = "permission", conflicts_with = "manifest")]
    permissions: Vec<String>,

    /// JSON file with one module object or an array of them.
    #[arg(long, conflicts_with = "id")]
    manifest: Option<Utf8PathBuf>,

    /// Directory holding the frontend modules.
    #[arg(long, env = "MODSPLIT_FRONTEND_ROOT")]
    frontend_root: Option<Utf8PathBuf>,

    /// Overwrite existing files.
    #[arg(long)]
    force: bool,

    /// List the files without writing them.
    #[arg(long)]
    dry_run: bool,
}

impl ScaffoldArgs {
    /// The manifests to scaffold, from the manifest file or the arguments.
    fn manifests(&self) -> color_eyre::Result<Vec<ModuleManifest>> {
        if let Some(path) = &self.manifest {
            return ModuleManifest::from_json_file(path)
                .wrap_err_with(|| format!("Failed to load manifest {path}"));
        }

        let id = self.id.clone().ok_or_else(|| eyre!("a module id or --manifest is required"))?;
        Ok(vec![ModuleManifest {
            name: self.name.clone().unwrap_or_else(|| module_title(&id)),
            description: self.description.clone(),
            category: self.category.clone(),
            permissions: self.permissions.clone(),
            id,
        }])
    }
}

/// Route location strategy.
#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Parse the file and use the syntax tree (nested callbacks are safe).
    Syntax,
    /// Regular expressions; a route ends at the first `});`.
    Heuristic,
}

impl From<StrategyArg> for ExtractStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Syntax => Self::Syntax,
            StrategyArg::Heuristic => Self::Heuristic,
        }
    }
}

/// Fixture report format.
#[derive(Clone, Copy, ValueEnum)]
enum FixtureFormat {
    /// One line per module with totals.
    Text,
    /// Markdown report.
    Markdown,
    /// JSON format.
    Json,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` level by default so the
/// console report stays readable.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(format!("{level},ignore=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the optional config file and CLI overrides.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or the resulting
/// configuration is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)
            .wrap_err_with(|| format!("Failed to load configuration from {path}"))?,
        None => Config::default(),
    };

    if let Some(root) = &cli.modules_root {
        config.layout.modules_root.clone_from(root);
    }

    match &cli.command {
        Commands::Migrate {
            strategy, strict, ..
        } => {
            if let Some(strategy) = strategy {
                config.locate.strategy = (*strategy).into();
            }
            if *strict {
                config.codegen.collision_policy = CollisionPolicy::Fail;
            }
        }
        Commands::Scaffold(args) => {
            if let Some(root) = &args.frontend_root {
                config.scaffold.modules_root.clone_from(root);
            }
        }
        Commands::List | Commands::Fixtures { .. } => {}
    }

    config.validate()?;
    Ok(config)
}

fn create_scanner(config: &Config) -> color_eyre::Result<Scanner> {
    Scanner::new(&config.layout.modules_root)
        .map_err(|e| eyre!("Failed to scan modules: {e}"))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Migrates one module, or prints usage when no module is given.
///
/// # Errors
///
/// Returns an error for configuration problems, missing routes files,
/// refusals, and I/O failures. An empty routes file is reported as a
/// warning with a failing exit code instead.
fn run_migrate(
    config: &Config,
    module: Option<&str>,
    dry_run: bool,
) -> color_eyre::Result<ExitCode> {
    let Some(module) = module else {
        print_usage(config)?;
        return Ok(ExitCode::FAILURE);
    };

    let context = ModuleContext::resolve(module, &config.layout)?;
    info!(module, dry_run, strategy = config.locate.strategy.label(), "Starting migration");

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Migrating module: {}", module.to_uppercase())?;

    let mut migrator = Migrator::new(config)?;
    let result = migrator.migrate_with(&context, dry_run, |update| {
        // A failed console write must not abort a half-applied migration.
        let _ = print_update(&mut handle, update, &config.layout.routes_file);
    });

    match result {
        Ok(report) => {
            print_migration(&mut handle, &report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if err.is_warning() => {
            writeln!(handle, "Warning: no routes found in module {module}")?;
            if let Some(path) = err.path() {
                writeln!(handle, "  {path} may already be migrated")?;
            }
            Ok(ExitCode::FAILURE)
        }
        Err(err) if err.is_refusal() => {
            let hint = match &err {
                MigrateError::Collision(_) => "Rename the routes or re-run without --strict.",
                _ => "Move the old backup out of the way, then re-run.",
            };
            Err(eyre!("Migration refused: {err}. {hint}"))
        }
        Err(err) => Err(err.into()),
    }
}

/// Lists the modules that still have a routes file.
///
/// # Errors
///
/// Returns an error if the modules root cannot be scanned.
fn run_list(config: &Config) -> color_eyre::Result<ExitCode> {
    let modules = pending_modules(config)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if modules.is_empty() {
        writeln!(handle, "No modules with a {} file", config.layout.routes_file)?;
    }
    for module in &modules {
        writeln!(handle, "{}", module.name)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Analyzes every fixture file and writes the report.
///
/// # Errors
///
/// Returns an error if scanning, rendering, or writing fails.
fn run_fixtures(
    config: &Config,
    format: FixtureFormat,
    output: Option<&Utf8PathBuf>,
) -> color_eyre::Result<ExitCode> {
    let scanner = create_scanner(config)?;
    let report = scanner.scan_fixtures(&config.fixtures.fixture_file)?;

    let content = match format {
        FixtureFormat::Text => report.to_text(),
        FixtureFormat::Markdown => report.to_markdown(),
        FixtureFormat::Json => report.to_json()?,
    };

    if let Some(output_path) = output {
        std::fs::write(output_path, &content)
            .wrap_err_with(|| format!("Failed to write {output_path}"))?;
        info!(path = %output_path, "Report written");
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{content}")?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Scaffolds one frontend module per manifest.
///
/// # Errors
///
/// Returns an error for an invalid manifest, existing files without
/// `--force`, and I/O failures. Modules before the failing one stay written.
fn run_scaffold(config: &Config, args: &ScaffoldArgs) -> color_eyre::Result<ExitCode> {
    let manifests = args.manifests()?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    for manifest in &manifests {
        let plan = ScaffoldPlan::build(manifest, &config.scaffold.modules_root)?;
        writeln!(handle, "Scaffolding module: {} ({})", manifest.id, plan.module_dir)?;

        if args.dry_run {
            for path in plan.paths() {
                writeln!(handle, "  Would create {path}")?;
            }
            continue;
        }

        plan.write(args.force, |path| {
            let _ = writeln!(handle, "  Created {path}");
        })
        .wrap_err_with(|| format!("Failed to scaffold module {}", manifest.id))?;
    }

    writeln!(handle)?;
    let verb = if args.dry_run { "would be created" } else { "created" };
    writeln!(handle, "{} module(s) {verb}", manifests.len())?;
    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn pending_modules(config: &Config) -> color_eyre::Result<Vec<ModuleEntry>> {
    let scanner = create_scanner(config)?;
    Ok(scanner.modules_with(&config.layout.routes_file)?)
}

/// Prints usage and the modules that can be migrated.
fn print_usage(config: &Config) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "Usage: modsplit migrate <MODULE>")?;
    writeln!(handle)?;
    writeln!(handle, "Available modules:")?;
    if config.layout.modules_root.is_dir() {
        for module in pending_modules(config)? {
            writeln!(handle, "  - {}", module.name)?;
        }
    }
    Ok(())
}

/// Prints one confirmation line per completed migration step.
fn print_update(
    handle: &mut impl Write,
    update: MigrationUpdate<'_>,
    routes_file: &str,
) -> std::io::Result<()> {
    match update {
        MigrationUpdate::RoutesFound(count) => {
            writeln!(handle, "Found {count} routes")?;
            writeln!(handle)
        }
        MigrationUpdate::RouteWritten(path) => {
            writeln!(handle, "  Created {}", path.file_name().unwrap_or(path.as_str()))
        }
        MigrationUpdate::IndexWritten(path) => writeln!(handle, "  Created {path}"),
        MigrationUpdate::BackedUp { backup, .. } => {
            writeln!(handle)?;
            writeln!(handle, "Backup created: {backup}")
        }
        MigrationUpdate::SourceReplaced(_) => writeln!(handle, "  {routes_file} updated"),
    }
}

/// Prints collision warnings and the final summary.
fn print_migration(handle: &mut impl Write, report: &MigrationReport) -> std::io::Result<()> {
    if report.dry_run {
        for path in &report.route_files {
            writeln!(handle, "  Would create {}", path.file_name().unwrap_or(path.as_str()))?;
        }
        writeln!(handle, "  Would create {}", report.index_file)?;
    }

    for collision in &report.collisions {
        writeln!(
            handle,
            "  Warning: {} is shared by {}; the last one wins",
            collision.filename,
            collision.routes.join(", ")
        )?;
    }

    writeln!(handle)?;
    if report.dry_run {
        writeln!(handle, "Dry run: nothing was written")?;
        writeln!(handle, "  {} would be backed up to {}", report.source_file, report.backup_file)?;
    } else {
        writeln!(handle, "Module {} migrated", report.module.to_uppercase())?;
    }

    writeln!(handle)?;
    writeln!(handle, "Files:")?;
    writeln!(handle, "  - {} route files", report.route_count)?;
    writeln!(handle, "  - 1 index file")?;
    writeln!(handle, "  - 1 backup")?;
    writeln!(handle, "Total: {} files", report.total_files())?;
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<ExitCode> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Load configuration and apply overrides
    let config = build_config(&cli)?;

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Migrate {
            module, dry_run, ..
        } => run_migrate(&config, module.as_deref(), *dry_run),
        Commands::List => run_list(&config),
        Commands::Fixtures { format, output } => run_fixtures(&config, *format, output.as_ref()),
        Commands::Scaffold(args) => run_scaffold(&config, args),
    }
}
