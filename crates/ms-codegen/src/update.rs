//! Progress reported while a migration runs.

use camino::Utf8Path;

/// Update sent as a migration makes progress.
///
/// Updates arrive in the order the steps happen, each one right after the
/// step succeeded. When a write fails, the updates already received tell
/// exactly which files exist on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationUpdate<'a> {
    /// The source was read and the plan built (sent for dry runs too).
    RoutesFound(usize),

    /// A route unit was written.
    RouteWritten(&'a Utf8Path),

    /// The aggregator was written to the output directory.
    IndexWritten(&'a Utf8Path),

    /// The original routes file was moved to its backup location.
    BackedUp {
        /// Where the original was.
        source: &'a Utf8Path,
        /// Where it is now.
        backup: &'a Utf8Path,
    },

    /// The aggregator was copied over the original routes file.
    SourceReplaced(&'a Utf8Path),
}
