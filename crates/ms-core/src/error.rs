//! Error types for the ms-core crate.
//!
//! This module provides the [`ConfigError`] type for configuration-related errors
//! that can occur across the workspace: bad config files, missing module roots,
//! and unknown module names.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and module resolution.
///
/// # Examples
///
/// ```
/// use ms_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::MissingDirectory(Utf8PathBuf::from("/some/path"));
/// assert!(error.to_string().contains("/some/path"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The provided path is invalid or malformed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The invalid path.
        path: Utf8PathBuf,
        /// Explanation of why the path is invalid.
        reason: String,
    },

    /// A required directory does not exist.
    #[error("missing required directory: {0}")]
    MissingDirectory(Utf8PathBuf),

    /// The requested module has no directory under the modules root.
    #[error("module '{name}' not found in {modules_root}")]
    UnknownModule {
        /// The module name that was requested.
        name: String,
        /// The directory that was searched.
        modules_root: Utf8PathBuf,
    },

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration {path}: {source}")]
    Read {
        /// The configuration file that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let error = ConfigError::InvalidPath {
            path: Utf8PathBuf::from("/invalid/path"),
            reason: "not a directory".to_owned(),
        };
        let msg = error.to_string();
        assert!(msg.contains("/invalid/path"));
        assert!(msg.contains("not a directory"));
    }

    #[test]
    fn test_unknown_module_display() {
        let error = ConfigError::UnknownModule {
            name: "crm".to_owned(),
            modules_root: Utf8PathBuf::from("src/modules"),
        };
        assert_eq!(error.to_string(), "module 'crm' not found in src/modules");
    }

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("locate.routers", "must not be empty");
        let msg = error.to_string();
        assert!(msg.contains("locate.routers"));
        assert!(msg.contains("must not be empty"));
    }
}
