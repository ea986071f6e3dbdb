//! Error types for the ms-scanner crate.
//!
//! This module provides the [`ScanError`] type for errors that can occur
//! during module discovery and fixture analysis.

use camino::Utf8PathBuf;

/// Errors that can occur during scanning operations.
///
/// # Error Recovery Strategy
///
/// - **File read errors** ([`ScanError::Read`]): recorded against the module
///   in [`FixtureReport::errors`](crate::FixtureReport::errors); the scan continues
/// - **Everything else**: propagated to the caller
///
/// # Examples
///
/// ```
/// use ms_scanner::ScanError;
///
/// fn handle_error(err: ScanError) {
///     match err {
///         ScanError::Walk(e) => eprintln!("Walk error: {e}"),
///         ScanError::Read { path, .. } => eprintln!("Read error: {path}"),
///         ScanError::Config(msg) => eprintln!("Config error: {msg}"),
///         ScanError::NonUtf8Path(p) => eprintln!("Invalid path: {}", p.display()),
///         ScanError::Pattern(e) => eprintln!("Bad pattern: {e}"),
///         ScanError::Render(e) => eprintln!("Render error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Failed to walk a directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Failed to read a file.
    ///
    /// Scanning can continue by skipping this file.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid scanner configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// A fixture pattern failed to compile.
    #[error("invalid fixture pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A report could not be serialized.
    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

impl ScanError {
    /// Creates a new [`ScanError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ScanError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_scan_error_read() {
        let err = ScanError::read(
            "src/modules/crm/teste.http",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(matches!(err, ScanError::Read { ref path, .. } if path == "src/modules/crm/teste.http"));
        assert_eq!(
            err.to_string(),
            "failed to read file src/modules/crm/teste.http: not found"
        );
    }

    #[test]
    fn test_scan_error_config() {
        let err = ScanError::config("modules root does not exist");
        assert_eq!(
            err.to_string(),
            "invalid configuration: modules root does not exist"
        );
    }
}
