//! HTTP fixture file parsing.
//!
//! A fixture file (`teste.http`) is a REST-client script: `### <name>`
//! headings separate requests, each request line is `<METHOD> <path>`, and
//! `{{name}}` placeholders refer to variables.

use std::collections::{BTreeMap, BTreeSet};

use ms_core::HttpMethod;
use regex::Regex;
use serde::Serialize;

use crate::error::ScanError;

/// A test heading: `### <name>`.
const TEST_HEADING_PATTERN: &str = r"### (.+)";

/// A request line: method followed by an absolute path.
const REQUEST_PATTERN: &str = r"(GET|POST|PUT|DELETE|PATCH)\s+(/[\w\-/{}]*)";

/// A variable placeholder: `{{name}}`.
const VARIABLE_PATTERN: &str = r"\{\{(\w+)\}\}";

/// Header names reported when the fixture text mentions the given needle.
const HEADER_MARKERS: &[(&str, &str)] = &[
    ("Content-Type", "Content-Type"),
    ("Authorization", "Authorization"),
    ("Bearer", "Bearer Token"),
];

/// One request line found in a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// The request method.
    pub method: HttpMethod,
    /// The request path (variables left as written).
    pub path: String,
}

/// What a fixture file contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixtureSummary {
    /// Test names in file order.
    pub tests: Vec<String>,
    /// Request lines in file order.
    pub endpoints: Vec<Endpoint>,
    /// Request count per method.
    pub methods: BTreeMap<HttpMethod, usize>,
    /// Distinct variable names.
    pub variables: BTreeSet<String>,
    /// Distinct headers the fixture uses.
    pub headers: BTreeSet<String>,
}

impl FixtureSummary {
    /// Number of tests.
    #[inline]
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    /// Number of request lines.
    #[inline]
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }
}

/// Parses fixture files.
///
/// The parser holds its compiled patterns and is `Sync`, so one instance can
/// be shared across rayon workers.
///
/// # Examples
///
/// ```
/// use ms_core::HttpMethod;
/// use ms_scanner::FixtureParser;
///
/// let parser = FixtureParser::new()?;
/// let summary = parser.parse("### List contacts\nGET /api/v1/crm/contacts\nAuthorization: Bearer {{token}}\n");
///
/// assert_eq!(summary.tests, vec!["List contacts"]);
/// assert_eq!(summary.methods[&HttpMethod::Get], 1);
/// assert!(summary.variables.contains("token"));
/// # Ok::<(), ms_scanner::ScanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FixtureParser {
    heading: Regex,
    request: Regex,
    variable: Regex,
}

impl FixtureParser {
    /// Compiles the fixture patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] if a pattern fails to compile.
    pub fn new() -> Result<Self, ScanError> {
        Ok(Self {
            heading: Regex::new(TEST_HEADING_PATTERN)?,
            request: Regex::new(REQUEST_PATTERN)?,
            variable: Regex::new(VARIABLE_PATTERN)?,
        })
    }

    /// Extracts tests, endpoints, variables, and headers from fixture text.
    #[must_use]
    pub fn parse(&self, content: &str) -> FixtureSummary {
        let tests = self
            .heading
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|name| name.as_str().trim_end().to_owned())
            .collect();

        let endpoints: Vec<Endpoint> = self
            .request
            .captures_iter(content)
            .filter_map(|caps| {
                let method = caps.get(1)?.as_str().parse().ok()?;
                let path = caps.get(2)?.as_str().to_owned();
                Some(Endpoint { method, path })
            })
            .collect();

        let mut methods = BTreeMap::new();
        for endpoint in &endpoints {
            *methods.entry(endpoint.method).or_insert(0) += 1;
        }

        let variables = self
            .variable
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|name| name.as_str().to_owned())
            .collect();

        let headers = HEADER_MARKERS
            .iter()
            .filter(|(needle, _)| content.contains(needle))
            .map(|(_, header)| (*header).to_owned())
            .collect();

        FixtureSummary {
            tests,
            endpoints,
            methods,
            variables,
            headers,
        }
    }
}
