//! Pattern-based call-site discovery.
//!
//! Matches `<router>.<verb>(<quoted path>` with a regular expression and ends
//! each route at the first `}` `)` `;` sequence after the call site. This is a
//! nearest-match search, not a bracket count: a handler body containing its
//! own `});` (a nested callback, a `forEach`) ends the route there.

use std::str::FromStr;

use ms_core::HttpMethod;
use regex::Regex;

use crate::error::LocateError;
use crate::locator::CallSite;

/// Terminator of a registration call: `}`, optional whitespace, `);`.
const CALL_END_PATTERN: &str = r"\}\s*\);";

/// Finds route registration calls with regular expressions.
#[derive(Debug, Clone)]
pub struct HeuristicLocator {
    /// Matches a call site; group 1 is the verb, group 2 the path.
    site: Regex,
    /// Matches the end of a call.
    end: Regex,
}

impl HeuristicLocator {
    /// Creates a locator accepting calls on any of `routers`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::Pattern`] if the call-site pattern cannot be
    /// compiled.
    pub fn new(routers: &[String]) -> Result<Self, LocateError> {
        let receivers = routers
            .iter()
            .map(|r| regex::escape(r))
            .collect::<Vec<_>>()
            .join("|");
        let site = Regex::new(&format!(
            r#"(?:{receivers})\.((?i:get|post|put|patch|delete))\s*\(\s*[`'"]([^`'"]+)[`'"]"#
        ))?;
        let end = Regex::new(CALL_END_PATTERN)?;

        Ok(Self { site, end })
    }

    /// Returns every matched call site in source order.
    ///
    /// A site with no closing sequence after it is dropped. A match preceded
    /// by an identifier character (`myapp.get`) is not a call on the router.
    pub fn find_sites(&self, source: &str) -> Vec<CallSite> {
        self.site
            .captures_iter(source)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let start = whole.start();
                if source[..start]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
                {
                    return None;
                }

                let method = HttpMethod::from_str(caps.get(1)?.as_str()).ok()?;
                let path = caps.get(2)?.as_str().to_owned();
                let end = start + self.end.find(&source[start..])?.end();

                Some(CallSite {
                    method,
                    path,
                    start,
                    end,
                })
            })
            .collect()
    }
}
