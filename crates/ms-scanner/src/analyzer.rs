//! Parallel fixture analysis using rayon.
//!
//! # Architecture
//!
//! 1. `ModuleWalker` collects module directories (single-threaded, I/O bound)
//! 2. `FixtureAnalyzer` reads and parses each fixture with `rayon::par_iter()`
//! 3. Results are sorted by module name so output is deterministic
//!
//! A fixture that cannot be read is recorded as a per-module error; it never
//! aborts the run.

use std::fs;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::ScanError;
use crate::fixture::FixtureParser;
use crate::report::{FixtureReport, ModuleFixture};
use crate::walker::ModuleEntry;

/// Parallel fixture analyzer.
#[derive(Debug, Clone)]
pub struct FixtureAnalyzer {
    parser: FixtureParser,
}

impl FixtureAnalyzer {
    /// Creates an analyzer with freshly compiled fixture patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] if a pattern fails to compile.
    pub fn new() -> Result<Self, ScanError> {
        Ok(Self {
            parser: FixtureParser::new()?,
        })
    }

    /// Analyzes `fixture_file` in every module that has one.
    ///
    /// Modules without the file are skipped silently.
    pub fn analyze(&self, modules: &[ModuleEntry], fixture_file: &str) -> FixtureReport {
        let results: Vec<Result<ModuleFixture, (String, ScanError)>> = modules
            .par_iter()
            .filter(|module| module.file(fixture_file).is_file())
            .map(|module| self.analyze_module(module, fixture_file))
            .collect();

        let mut report = FixtureReport::default();
        for result in results {
            match result {
                Ok(fixture) => report.modules.push(fixture),
                Err((module, error)) => {
                    warn!(module = %module, error = %error, "Failed to analyze fixture");
                    report.errors.push((module, error.to_string()));
                }
            }
        }

        report.modules.sort_by(|a, b| a.module.cmp(&b.module));
        report.errors.sort();
        report
    }

    fn analyze_module(
        &self,
        module: &ModuleEntry,
        fixture_file: &str,
    ) -> Result<ModuleFixture, (String, ScanError)> {
        let path = module.file(fixture_file);
        let content = fs::read_to_string(&path)
            .map_err(|e| (module.name.clone(), ScanError::read(&path, e)))?;

        let summary = self.parser.parse(&content);
        debug!(
            module = %module.name,
            tests = summary.test_count(),
            endpoints = summary.endpoint_count(),
            "Analyzed fixture"
        );

        Ok(ModuleFixture {
            module: module.name.clone(),
            path,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn module(root: &Utf8PathBuf, name: &str, fixture: Option<&[u8]>) -> ModuleEntry {
        let dir = root.join(name);
        fs::create_dir_all(&dir).expect("module dir");
        if let Some(content) = fixture {
            fs::write(dir.join("teste.http"), content).expect("fixture");
        }
        ModuleEntry {
            name: name.to_owned(),
            dir,
        }
    }

    #[test]
    fn test_analyze_sorted_and_skips_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 tempdir");
        let modules = vec![
            module(&root, "crm", Some(b"### A\nGET /a\n### B\nPOST /b\n")),
            module(&root, "auth", Some(b"### Login\nPOST /login\n")),
            module(&root, "empty", None),
        ];

        let report = FixtureAnalyzer::new().expect("analyzer").analyze(&modules, "teste.http");

        let names: Vec<_> = report.modules.iter().map(|m| m.module.as_str()).collect();
        assert_eq!(names, vec!["auth", "crm"]);
        assert_eq!(report.total_tests(), 3);
        assert_eq!(report.total_endpoints(), 3);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_unreadable_fixture_is_recorded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 tempdir");
        let modules = vec![
            module(&root, "broken", Some(&[0xff, 0xfe, 0x00])),
            module(&root, "crm", Some(b"### A\nGET /a\n")),
        ];

        let report = FixtureAnalyzer::new().expect("analyzer").analyze(&modules, "teste.http");

        assert_eq!(report.modules.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].0, "broken");
    }
}
