//! Fixture analysis results and their renderings.

use std::fmt::Write;

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::error::ScanError;
use crate::fixture::FixtureSummary;

/// The analysis of one module's fixture file.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleFixture {
    /// The module name.
    pub module: String,
    /// The fixture file analyzed.
    pub path: Utf8PathBuf,
    /// What the fixture contains.
    pub summary: FixtureSummary,
}

/// The analysis of every module's fixture file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FixtureReport {
    /// Analyzed modules, sorted by name.
    pub modules: Vec<ModuleFixture>,
    /// Modules whose fixture could not be analyzed, with the reason.
    pub errors: Vec<(String, String)>,
}

impl FixtureReport {
    /// Total tests across all modules.
    #[must_use]
    pub fn total_tests(&self) -> usize {
        self.modules.iter().map(|m| m.summary.test_count()).sum()
    }

    /// Total request lines across all modules.
    #[must_use]
    pub fn total_endpoints(&self) -> usize {
        self.modules.iter().map(|m| m.summary.endpoint_count()).sum()
    }

    /// Renders a one-line-per-module table with totals.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for fixture in &self.modules {
            let _ = writeln!(
                out,
                "{:20} | {:2} tests | {:2} endpoints",
                fixture.module.to_uppercase(),
                fixture.summary.test_count(),
                fixture.summary.endpoint_count()
            );
        }
        for (module, error) in &self.errors {
            let _ = writeln!(out, "{:20} | error: {error}", module.to_uppercase());
        }

        let rule = "=".repeat(60);
        let _ = writeln!(out, "\n{rule}");
        let _ = writeln!(
            out,
            "TOTAL: {} modules | {} tests | {} endpoints",
            self.modules.len(),
            self.total_tests(),
            self.total_endpoints()
        );
        let _ = writeln!(out, "{rule}");
        out
    }

    /// Renders a markdown report with a section per module.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# Fixture Analysis\n\n");

        let _ = writeln!(out, "- **Modules**: {}", self.modules.len());
        let _ = writeln!(out, "- **Tests**: {}", self.total_tests());
        let _ = writeln!(out, "- **Endpoints**: {}", self.total_endpoints());
        out.push_str("\n## Modules\n");

        for fixture in &self.modules {
            let summary = &fixture.summary;
            let _ = writeln!(out, "\n### {}\n", fixture.module.to_uppercase());
            let _ = writeln!(out, "- Tests: {}", summary.test_count());
            let _ = writeln!(out, "- Endpoints: {}", summary.endpoint_count());

            let methods: Vec<String> = summary
                .methods
                .iter()
                .map(|(method, count)| format!("{method} ({count})"))
                .collect();
            if !methods.is_empty() {
                let _ = writeln!(out, "- Methods: {}", methods.join(", "));
            }
            if !summary.variables.is_empty() {
                let variables: Vec<&str> = summary.variables.iter().map(String::as_str).collect();
                let _ = writeln!(out, "- Variables: {}", variables.join(", "));
            }
            if !summary.headers.is_empty() {
                let headers: Vec<&str> = summary.headers.iter().map(String::as_str).collect();
                let _ = writeln!(out, "- Headers: {}", headers.join(", "));
            }
        }

        if !self.errors.is_empty() {
            out.push_str("\n## Errors\n\n");
            for (module, error) in &self.errors {
                let _ = writeln!(out, "- {module}: {error}");
            }
        }

        out
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Render`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ScanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
