//! The route locator facade.
//!
//! [`RouteLocator`] turns a routes file into an ordered list of
//! [`RouteRecord`]s using the configured [`ExtractStrategy`].

use ms_core::{ExtractStrategy, HttpMethod, LocateConfig, RouteRecord, SourceLocation};
use tracing::{debug, info};

use crate::comments::annotate;
use crate::error::LocateError;
use crate::heuristic::HeuristicLocator;
use crate::syntax::SyntaxLocator;

/// A registration call found in the source, before comment capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// The registration verb.
    pub method: HttpMethod,
    /// The path literal without its delimiters.
    pub path: String,
    /// Byte offset where the call starts (at the router identifier).
    pub start: usize,
    /// Byte offset just past the end of the call, including its `;`.
    pub end: usize,
}

/// The call-site engine selected by the strategy.
#[derive(Debug)]
enum Engine {
    Syntax(SyntaxLocator),
    Heuristic(HeuristicLocator),
}

/// Locates route registrations in monolithic routes files.
///
/// Reuse one locator for several files to avoid re-initializing the parser.
///
/// # Examples
///
/// ```
/// use ms_core::{HttpMethod, LocateConfig};
/// use ms_locator::RouteLocator;
///
/// let mut locator = RouteLocator::new(&LocateConfig::default())?;
/// let source = r"
/// // List contacts
/// app.get('/api/v1/crm/contacts', async (req, res) => {
///   res.json([]);
/// });
/// ";
///
/// let routes = locator.locate(source)?;
/// assert_eq!(routes.len(), 1);
/// assert_eq!(routes[0].method, HttpMethod::Get);
/// assert_eq!(routes[0].path, "/api/v1/crm/contacts");
/// assert!(routes[0].annotated_code.contains("// List contacts\napp.get("));
/// # Ok::<(), ms_locator::LocateError>(())
/// ```
#[derive(Debug)]
pub struct RouteLocator {
    engine: Engine,
    comment_lookback: usize,
}

impl RouteLocator {
    /// Creates a locator from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::LanguageInit`] (syntax strategy) or
    /// [`LocateError::Pattern`] (heuristic strategy) if setup fails.
    pub fn new(config: &LocateConfig) -> Result<Self, LocateError> {
        let engine = match config.strategy {
            ExtractStrategy::Syntax => Engine::Syntax(SyntaxLocator::new(&config.routers)?),
            ExtractStrategy::Heuristic => {
                Engine::Heuristic(HeuristicLocator::new(&config.routers)?)
            }
        };

        Ok(Self {
            engine,
            comment_lookback: config.comment_lookback,
        })
    }

    /// Returns the strategy this locator was built with.
    #[must_use]
    pub const fn strategy(&self) -> ExtractStrategy {
        match self.engine {
            Engine::Syntax(_) => ExtractStrategy::Syntax,
            Engine::Heuristic(_) => ExtractStrategy::Heuristic,
        }
    }

    /// Finds every route registration in `source`, in source order.
    ///
    /// The source is never modified. An empty result is not an error; the
    /// caller decides what zero routes means.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::Parse`] if the syntax strategy cannot parse the
    /// source, or a query error if the route query fails to compile.
    pub fn locate(&mut self, source: &str) -> Result<Vec<RouteRecord>, LocateError> {
        let sites = match &mut self.engine {
            Engine::Syntax(locator) => locator.find_sites(source)?,
            Engine::Heuristic(locator) => locator.find_sites(source),
        };

        let routes: Vec<RouteRecord> = sites
            .into_iter()
            .map(|site| self.to_record(source, site))
            .collect();

        info!(
            count = routes.len(),
            strategy = self.strategy().label(),
            "Located routes"
        );

        Ok(routes)
    }

    fn to_record(&self, source: &str, site: CallSite) -> RouteRecord {
        let code = &source[site.start..site.end];
        let annotated_code = annotate(source, site.start, code, self.comment_lookback);
        let location = SourceLocation::from_offset(source, site.start);

        debug!(
            method = %site.method,
            path = %site.path,
            line = location.line,
            "Found route"
        );

        RouteRecord::new(site.method, site.path, code, annotated_code, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_core::{NamingConfig, RouteName};

    const MONOLITH: &str = r"import { Express } from 'express';

export function setupCrmRoutes(app: Express, prisma: PrismaClient) {
  const baseUrl = '/api/v1/crm';

  // List contacts
  app.get(`${baseUrl}/contacts`, authenticate, async (req, res) => {
    const contacts = await prisma.contact.findMany();
    contacts.forEach((c) => {
      normalize(c);
    });
    res.json(contacts);
  });

  /**
   * Create a contact
   */
  app.post(`${baseUrl}/contacts`, authenticate, async (req, res) => {
    res.status(201).json(await prisma.contact.create({ data: req.body }));
  });

  app.delete(`${baseUrl}/contacts/:id`, authenticate, async (req, res) => {
    res.status(204).send();
  });
}
";

    fn locate_with(strategy: ExtractStrategy, source: &str) -> Vec<RouteRecord> {
        let config = LocateConfig {
            strategy,
            ..LocateConfig::default()
        };
        let mut locator = RouteLocator::new(&config).expect("Locator creation failed");
        locator.locate(source).expect("Locate failed")
    }

    #[test]
    fn test_syntax_locates_all_routes_in_order() {
        let routes = locate_with(ExtractStrategy::Syntax, MONOLITH);
        let summary: Vec<_> = routes
            .iter()
            .map(|r| (r.method, r.path.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (HttpMethod::Get, "${baseUrl}/contacts"),
                (HttpMethod::Post, "${baseUrl}/contacts"),
                (HttpMethod::Delete, "${baseUrl}/contacts/:id"),
            ]
        );
    }

    #[test]
    fn test_syntax_keeps_full_body() {
        let routes = locate_with(ExtractStrategy::Syntax, MONOLITH);
        assert!(routes[0].code.contains("res.json(contacts);"));
        assert!(routes[0].code.ends_with("});"));
    }

    #[test]
    fn test_heuristic_truncates_nested_callbacks() {
        let routes = locate_with(ExtractStrategy::Heuristic, MONOLITH);
        assert_eq!(routes.len(), 3);
        assert!(!routes[0].code.contains("res.json(contacts);"));
        assert!(routes[0].code.ends_with("normalize(c);\n    });"));
    }

    #[test]
    fn test_annotated_code() {
        let routes = locate_with(ExtractStrategy::Syntax, MONOLITH);
        assert!(routes[0].has_leading_comments());
        assert!(
            routes[0]
                .annotated_code
                .starts_with("\n  // List contacts\n  app.get(")
        );
        assert!(
            routes[1]
                .annotated_code
                .starts_with("\n  /**\n   * Create a contact\n   */\n  app.post(")
        );
        assert!(!routes[2].has_leading_comments());
        assert_eq!(routes[2].annotated_code, format!("\n  {}", routes[2].code));
    }

    #[test]
    fn test_locations() {
        let routes = locate_with(ExtractStrategy::Syntax, MONOLITH);
        assert_eq!(routes[0].location.line, 7);
        assert_eq!(routes[0].location.column, 2);
    }

    #[test]
    fn test_well_formed_routes_counted_exactly() {
        let mut source = String::new();
        for i in 0..25 {
            source.push_str(&format!(
                "app.get('/r{i}', (req, res) => {{\n  res.send('{i}');\n}});\n\n"
            ));
        }
        for strategy in [ExtractStrategy::Syntax, ExtractStrategy::Heuristic] {
            let routes = locate_with(strategy, &source);
            assert_eq!(routes.len(), 25);
            assert!(routes.iter().enumerate().all(|(i, r)| r.path == format!("/r{i}")));
        }
    }

    #[test]
    fn test_generated_aggregator_yields_no_routes() {
        let aggregator = r"import { Express } from 'express';
import { setupContactsRoute } from './contacts.route';

export function setupCrmRoutes(app: Express, prisma: PrismaClient) {
  const baseUrl = '/api/v1/crm';

  setupContactsRoute(app, prisma, baseUrl);
}
";
        for strategy in [ExtractStrategy::Syntax, ExtractStrategy::Heuristic] {
            assert!(locate_with(strategy, aggregator).is_empty());
        }
    }

    #[test]
    fn test_router_receiver_located_and_named() {
        let source = "router.get('/api/v1/crm/contacts', (req, res) => {\n  handler(req, res);\n});\n";
        for strategy in [ExtractStrategy::Syntax, ExtractStrategy::Heuristic] {
            let routes = locate_with(strategy, source);
            assert_eq!(routes.len(), 1);
            assert_eq!(routes[0].method, HttpMethod::Get);
            assert_eq!(routes[0].path, "/api/v1/crm/contacts");

            let name = RouteName::for_route("crm", &routes[0], &NamingConfig::default());
            assert_eq!(name.stem, "contacts");
            assert_eq!(name.symbol, "setupContactsRoute");
            assert_eq!(name.filename, "contacts.route.ts");
        }
    }

    #[test]
    fn test_custom_router_name() {
        let config = LocateConfig {
            routers: vec!["router".to_owned()],
            ..LocateConfig::default()
        };
        let mut locator = RouteLocator::new(&config).expect("Locator creation failed");
        let routes = locator
            .locate("router.put('/x', (req, res) => {\n});\napp.put('/y', h);")
            .expect("Locate failed");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/x");
    }
}
