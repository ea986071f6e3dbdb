//! Error types for the ms-codegen crate.
//!
//! This module provides the [`MigrateError`] type for errors that can occur
//! while planning or applying a route migration, and [`ScaffoldError`] for
//! frontend module scaffolding.

use camino::{Utf8Path, Utf8PathBuf};
use ms_core::ConfigError;
use ms_locator::LocateError;

/// Errors that can occur during a migration.
///
/// # Error Recovery Strategy
///
/// Every variant except [`MigrateError::Io`] is raised before anything is
/// written, so the module is left exactly as it was.
///
/// - **Nothing to do** ([`MigrateError::NoRoutes`]): a warning, typically a
///   module that was already migrated
/// - **Refusals** ([`MigrateError::BackupExists`], [`MigrateError::Collision`]):
///   the user must resolve them before re-running
/// - **I/O** ([`MigrateError::Io`]): fatal; the original routes file is only
///   moved after every generated file is written
///
/// # Examples
///
/// ```
/// use ms_codegen::MigrateError;
///
/// fn handle_error(err: MigrateError) {
///     match err {
///         MigrateError::SourceNotFound(path) => eprintln!("No routes file: {path}"),
///         MigrateError::NoRoutes(path) => eprintln!("Nothing to migrate in {path}"),
///         MigrateError::BackupExists(path) => eprintln!("Backup in the way: {path}"),
///         MigrateError::Collision(names) => eprintln!("Duplicate files: {names:?}"),
///         MigrateError::Io { path, .. } => eprintln!("I/O error: {path}"),
///         MigrateError::Locate(e) => eprintln!("Locator error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// The module has no routes file.
    #[error("routes file not found: {0}")]
    SourceNotFound(Utf8PathBuf),

    /// The routes file contains no route registrations.
    #[error("no routes found in {0}")]
    NoRoutes(Utf8PathBuf),

    /// A backup from an earlier run would be overwritten.
    #[error("backup already exists at {0}; refusing to overwrite the original routes file")]
    BackupExists(Utf8PathBuf),

    /// Two or more routes derive the same file name.
    #[error("routes derive duplicate file names: {}", .0.join(", "))]
    Collision(Vec<String>),

    /// A filesystem operation failed.
    #[error("failed to {action} {path}: {source}")]
    Io {
        /// What was being done (`read`, `write`, `rename`, ...).
        action: &'static str,
        /// The path the operation failed on.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The locator could not be set up or failed to parse the source.
    #[error(transparent)]
    Locate(#[from] LocateError),
}

impl MigrateError {
    /// Creates a new [`MigrateError::Io`] error.
    #[inline]
    pub fn io(action: &'static str, path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the error only means there was nothing to migrate.
    #[inline]
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::NoRoutes(_))
    }

    /// Returns `true` if the migration was refused before writing anything.
    #[inline]
    #[must_use]
    pub const fn is_refusal(&self) -> bool {
        matches!(self, Self::BackupExists(_) | Self::Collision(_))
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            Self::SourceNotFound(path)
            | Self::NoRoutes(path)
            | Self::BackupExists(path)
            | Self::Io { path, .. } => Some(path.as_path()),
            Self::Collision(_) | Self::Locate(_) => None,
        }
    }
}

/// Errors that can occur while scaffolding a frontend module.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// The module manifest is invalid.
    #[error(transparent)]
    Manifest(#[from] ConfigError),

    /// Files the scaffold would write already exist.
    #[error("refusing to overwrite existing files: {}", join_paths(.0))]
    FilesExist(Vec<Utf8PathBuf>),

    /// A filesystem operation failed.
    #[error("failed to {action} {path}: {source}")]
    Io {
        /// What was being done.
        action: &'static str,
        /// The path the operation failed on.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    /// Creates a new [`ScaffoldError::Io`] error.
    #[inline]
    pub fn io(action: &'static str, path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

fn join_paths(paths: &[Utf8PathBuf]) -> String {
    paths.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_no_routes_is_warning() {
        let err = MigrateError::NoRoutes("src/modules/crm/routes.ts".into());
        assert!(err.is_warning());
        assert!(!err.is_refusal());
        assert_eq!(err.to_string(), "no routes found in src/modules/crm/routes.ts");
    }

    #[test]
    fn test_refusals() {
        let backup = MigrateError::BackupExists("routes.ts.backup".into());
        assert!(backup.is_refusal());
        assert!(!backup.is_warning());
        assert_eq!(backup.path().map(Utf8Path::as_str), Some("routes.ts.backup"));

        let collision = MigrateError::Collision(vec!["a.route.ts".to_owned(), "b.route.ts".to_owned()]);
        assert!(collision.is_refusal());
        assert!(collision.path().is_none());
        assert_eq!(
            collision.to_string(),
            "routes derive duplicate file names: a.route.ts, b.route.ts"
        );
    }

    #[test]
    fn test_io_error() {
        let err = MigrateError::io(
            "write",
            "routes/index.ts",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_warning());
        assert!(!err.is_refusal());
        assert_eq!(err.path().map(Utf8Path::as_str), Some("routes/index.ts"));
        assert_eq!(err.to_string(), "failed to write routes/index.ts: denied");
    }

    #[test]
    fn test_locate_error_is_transparent() {
        let err = MigrateError::from(LocateError::Parse);
        assert_eq!(err.to_string(), "failed to parse source code");
        assert!(err.path().is_none());
    }

    #[test]
    fn test_scaffold_files_exist_lists_paths() {
        let err = ScaffoldError::FilesExist(vec![
            "crm/module.config.ts".into(),
            "crm/index.ts".into(),
        ]);
        assert_eq!(
            err.to_string(),
            "refusing to overwrite existing files: crm/module.config.ts, crm/index.ts"
        );
    }
}
