//! Source location types for tracking positions in source files.
//!
//! This module provides the [`SourceLocation`] type for recording where a
//! route registration call starts in the monolithic routes file.

use serde::{Deserialize, Serialize};

/// A position within a source file.
///
/// # Field Conventions
///
/// - `line` is 1-indexed (first line is line 1)
/// - `column` is 0-indexed (first character is column 0)
/// - `byte_offset` is the absolute byte position from the start of the file
///
/// # Examples
///
/// ```
/// use ms_core::SourceLocation;
///
/// let loc = SourceLocation::from_offset("const a = 1;\n  app.get", 15);
/// assert_eq!(loc, SourceLocation::new(2, 2, 15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: u32,

    /// Column number (0-indexed, UTF-8 byte offset within the line).
    pub column: u32,

    /// Absolute byte offset from the start of the file.
    pub byte_offset: u32,
}

impl SourceLocation {
    /// Creates a new source location.
    #[inline]
    #[must_use]
    pub const fn new(line: u32, column: u32, byte_offset: u32) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }

    /// Computes the location of a byte offset within `source`.
    ///
    /// Offsets past the end of `source` are clamped to its length.
    #[must_use]
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;

        Self::new(
            u32::try_from(line).unwrap_or(u32::MAX),
            u32::try_from(offset - line_start).unwrap_or(u32::MAX),
            u32::try_from(offset).unwrap_or(u32::MAX),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_new() {
        let loc = SourceLocation::new(10, 5, 245);
        assert_eq!(loc.line, 10);
        assert_eq!(loc.column, 5);
        assert_eq!(loc.byte_offset, 245);
    }

    #[test]
    fn test_from_offset_first_line() {
        let loc = SourceLocation::from_offset("app.get('/')", 0);
        assert_eq!(loc, SourceLocation::new(1, 0, 0));
    }

    #[test]
    fn test_from_offset_later_line() {
        let source = "// one\n// two\n    app.post('/x')";
        let loc = SourceLocation::from_offset(source, 18);
        assert_eq!(loc, SourceLocation::new(3, 4, 18));
    }

    #[test]
    fn test_from_offset_clamps() {
        let loc = SourceLocation::from_offset("ab", 99);
        assert_eq!(loc, SourceLocation::new(1, 2, 2));
    }
}
