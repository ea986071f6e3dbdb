//! Module discovery and parallel HTTP fixture analysis for modsplit.
//!
//! This crate answers two questions about a modules root
//! (`src/modules/<module>/`):
//!
//! - Which modules still carry a monolithic routes file? ([`Scanner::modules_with`])
//! - What do the modules' HTTP fixture files (`teste.http`) test?
//!   ([`Scanner::scan_fixtures`])
//!
//! # Overview
//!
//! The main entry point is [`Scanner`], which combines:
//!
//! - [`ModuleWalker`]: Module directory discovery respecting `.gitignore` patterns
//! - [`FixtureAnalyzer`]: Parallel fixture parsing with rayon
//! - [`FixtureReport`]: Text, markdown, and JSON renderings of the results
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use ms_scanner::Scanner;
//!
//! let scanner = Scanner::new(Utf8Path::new("src/modules"))?;
//!
//! for module in scanner.modules_with("routes.ts")? {
//!     println!("Not yet migrated: {}", module.name);
//! }
//!
//! let report = scanner.scan_fixtures("teste.http")?;
//! print!("{}", report.to_text());
//! # Ok::<(), ms_scanner::ScanError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! Scanner (main entry point)
//!     │
//!     ├── ModuleWalker (collect module directories)
//!     │       │
//!     │       └── WalkBuilder (ignore crate, depth 1)
//!     │
//!     └── FixtureAnalyzer (parallel parsing)
//!             │
//!             └── FixtureParser (shared regexes)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod analyzer;
mod error;
mod fixture;
mod report;
mod walker;

pub use analyzer::FixtureAnalyzer;
pub use error::ScanError;
pub use fixture::{Endpoint, FixtureParser, FixtureSummary};
pub use report::{FixtureReport, ModuleFixture};
pub use walker::{ModuleEntry, ModuleWalker};

use camino::Utf8Path;
use tracing::info;

/// Scans a modules root.
#[derive(Debug)]
pub struct Scanner {
    walker: ModuleWalker,
    analyzer: FixtureAnalyzer,
}

impl Scanner {
    /// Creates a scanner for the given modules root.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the root is missing or not a
    /// directory, or [`ScanError::Pattern`] if the fixture patterns fail to
    /// compile.
    pub fn new(root: &Utf8Path) -> Result<Self, ScanError> {
        Ok(Self {
            walker: ModuleWalker::new(root)?,
            analyzer: FixtureAnalyzer::new()?,
        })
    }

    /// Returns the modules containing `file`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if directory traversal fails.
    pub fn modules_with(&self, file: &str) -> Result<Vec<ModuleEntry>, ScanError> {
        self.walker.collect_modules(file)
    }

    /// Analyzes the fixture file of every module that has one.
    ///
    /// Unreadable fixtures are listed in [`FixtureReport::errors`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if directory traversal fails.
    pub fn scan_fixtures(&self, fixture_file: &str) -> Result<FixtureReport, ScanError> {
        info!(root = %self.walker.root(), fixture_file, "Scanning fixtures");

        let modules = self.modules_with(fixture_file)?;
        let report = self.analyzer.analyze(&modules, fixture_file);

        info!(
            modules = report.modules.len(),
            tests = report.total_tests(),
            endpoints = report.total_endpoints(),
            errors = report.errors.len(),
            "Fixture scan complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;

    #[test]
    fn test_scanner_end_to_end() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 tempdir");
        fs::create_dir_all(root.join("crm")).expect("crm");
        fs::create_dir_all(root.join("auth")).expect("auth");
        fs::write(root.join("crm/routes.ts"), "app.get('/a', h);").expect("routes");
        fs::write(root.join("crm/teste.http"), "### A\nGET /a\n").expect("fixture");
        fs::write(root.join("auth/teste.http"), "### B\nPOST /b\n### C\nGET /c\n").expect("fixture");

        let scanner = Scanner::new(&root).expect("scanner");

        let pending: Vec<_> = scanner
            .modules_with("routes.ts")
            .expect("modules")
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(pending, vec!["crm"]);

        let report = scanner.scan_fixtures("teste.http").expect("scan");
        assert_eq!(report.modules.len(), 2);
        assert_eq!(report.total_tests(), 3);
        assert_eq!(report.modules[0].summary.endpoint_count(), 2);
    }

    #[test]
    fn test_scanner_missing_root() {
        let err = Scanner::new(Utf8Path::new("/definitely/not/here")).expect_err("missing root");
        assert!(matches!(err, ScanError::Config(_)));
    }
}
