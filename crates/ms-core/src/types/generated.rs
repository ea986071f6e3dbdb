//! Generated file contents.

use serde::{Deserialize, Serialize};

/// One file produced by the code regenerator, not yet written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// File name relative to the output directory.
    pub filename: String,

    /// Full file contents.
    pub content: String,
}

impl GeneratedFile {
    /// Creates a new generated file.
    #[inline]
    #[must_use]
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}
