//! Rendering of route units and the module aggregator.

use std::fmt::Write;

use ms_core::{
    GeneratedFile, NamingConfig, RouteName, RouteRecord, module_base_url, module_setup_symbol,
    module_title, pascal_case,
};

use crate::plan::PlannedRoute;

/// Framework imports shared by every route unit.
const ROUTE_IMPORTS: &str = "import { Express, Request, Response, NextFunction } from 'express';\n\
                             import { PrismaClient } from '@prisma/client';";

/// Framework imports of the aggregator.
const INDEX_IMPORTS: &str = "import { Express } from 'express';\n\
                             import { PrismaClient } from '@prisma/client';";

/// Renders the file holding a single route.
///
/// The body is the route's annotated code, so its leading comments and
/// original indentation are preserved.
#[must_use]
pub fn render_route(module: &str, route: &RouteRecord, name: &RouteName) -> GeneratedFile {
    let content = format!(
        "/**\n * {title} - {route_title} Route\n * {method} {path}\n */\n\n\
         {ROUTE_IMPORTS}\n\n\
         export function {symbol}(app: Express, prisma: PrismaClient, baseUrl: string) {{\n\
         {body}\n}}\n",
        title = module_title(module),
        route_title = pascal_case(&name.stem),
        method = route.method,
        path = route.path,
        symbol = name.symbol,
        body = route.annotated_code,
    );

    GeneratedFile::new(name.filename.clone(), content)
}

/// Renders the aggregator that registers every route of the module.
///
/// Imports and setup calls follow discovery order. Duplicate symbols are
/// emitted as-is.
#[must_use]
pub fn render_index(
    module: &str,
    routes: &[PlannedRoute],
    naming: &NamingConfig,
    index_file: &str,
) -> GeneratedFile {
    let title = module_title(module);
    let mut out = String::new();

    let _ = write!(
        out,
        "/**\n * {title} Routes - Index\n * Centralized route registration for {title} module\n *\n \
         * This file imports and registers all individual routes.\n \
         * Each route is in its own file for maximum modularity.\n */\n\n\
         {INDEX_IMPORTS}\n\n// Import individual route setup functions\n"
    );
    for planned in routes {
        let _ = writeln!(
            out,
            "import {{ {} }} from '{}';",
            planned.name.symbol, planned.name.import_specifier
        );
    }

    let _ = write!(
        out,
        "\n/**\n * Setup all {module} routes\n * @param app - Express application\n \
         * @param prisma - Prisma client\n */\n\
         export function {setup}(app: Express, prisma: PrismaClient) {{\n  \
         const baseUrl = '{base_url}';\n\n  // Register all routes\n",
        setup = module_setup_symbol(module, naming),
        base_url = module_base_url(module, naming),
    );
    for planned in routes {
        let _ = writeln!(out, "  {}(app, prisma, baseUrl);", planned.name.symbol);
    }

    let _ = write!(
        out,
        "}}\n\n/**\n * Route Summary:\n *\n * ROUTES ({} total):\n",
        routes.len()
    );
    for planned in routes {
        let _ = writeln!(out, " * - {:6} {}", planned.route.method, planned.route.path);
    }
    out.push_str(" */\n");

    GeneratedFile::new(index_file, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_core::{HttpMethod, SourceLocation};

    fn record(method: HttpMethod, path: &str, annotated: &str) -> RouteRecord {
        RouteRecord::new(
            method,
            path,
            annotated.trim_start(),
            annotated,
            SourceLocation::default(),
        )
    }

    fn planned(module: &str, route: RouteRecord) -> PlannedRoute {
        let name = RouteName::for_route(module, &route, &NamingConfig::default());
        let file = render_route(module, &route, &name);
        PlannedRoute { route, name, file }
    }

    #[test]
    fn test_render_route() {
        let route = record(
            HttpMethod::Get,
            "${baseUrl}/contacts",
            "  // List contacts\n  app.get(`${baseUrl}/contacts`, async (req, res) => {\n    res.json([]);\n  });",
        );
        let name = RouteName::for_route("crm", &route, &NamingConfig::default());
        let file = render_route("crm", &route, &name);

        assert_eq!(file.filename, "contacts.route.ts");
        insta::assert_snapshot!(file.content, @r"
        /**
         * Crm - Contacts Route
         * GET ${baseUrl}/contacts
         */

        import { Express, Request, Response, NextFunction } from 'express';
        import { PrismaClient } from '@prisma/client';

        export function setupContactsRoute(app: Express, prisma: PrismaClient, baseUrl: string) {
          // List contacts
          app.get(`${baseUrl}/contacts`, async (req, res) => {
            res.json([]);
          });
        }
        ");
    }

    #[test]
    fn test_render_index() {
        let routes = vec![
            planned("crm", record(HttpMethod::Get, "${baseUrl}/contacts", "app.get(..);")),
            planned("crm", record(HttpMethod::Delete, "${baseUrl}/contacts/:id", "app.delete(..);")),
        ];
        let file = render_index("crm", &routes, &NamingConfig::default(), "index.ts");

        assert_eq!(file.filename, "index.ts");
        insta::assert_snapshot!(file.content, @r"
        /**
         * Crm Routes - Index
         * Centralized route registration for Crm module
         *
         * This file imports and registers all individual routes.
         * Each route is in its own file for maximum modularity.
         */

        import { Express } from 'express';
        import { PrismaClient } from '@prisma/client';

        // Import individual route setup functions
        import { setupContactsRoute } from './contacts.route';
        import { setupContactsIdRoute } from './contacts-id.route';

        /**
         * Setup all crm routes
         * @param app - Express application
         * @param prisma - Prisma client
         */
        export function setupCrmRoutes(app: Express, prisma: PrismaClient) {
          const baseUrl = '/api/v1/crm';

          // Register all routes
          setupContactsRoute(app, prisma, baseUrl);
          setupContactsIdRoute(app, prisma, baseUrl);
        }

        /**
         * Route Summary:
         *
         * ROUTES (2 total):
         * - GET    ${baseUrl}/contacts
         * - DELETE ${baseUrl}/contacts/:id
         */
        ");
    }

    #[test]
    fn test_index_symbols_match_route_exports() {
        let routes = vec![
            planned("people-growth", record(HttpMethod::Post, "/api/v1/people-growth/goals", "x")),
            planned("people-growth", record(HttpMethod::Get, "${baseUrl}", "y")),
        ];
        let index = render_index("people-growth", &routes, &NamingConfig::default(), "index.ts");

        assert!(index.content.contains("export function setupPeopleGrowthRoutes("));
        assert!(index.content.contains("const baseUrl = '/api/v1/people-growth';"));
        for route in &routes {
            let export = format!("export function {}(", route.name.symbol);
            assert!(route.file.content.contains(&export));
            let import = format!(
                "import {{ {} }} from '{}';",
                route.name.symbol, route.name.import_specifier
            );
            assert!(index.content.contains(&import));
        }
        assert_eq!(routes[1].file.filename, "get.route.ts");
    }

    #[test]
    fn test_empty_index_still_renders() {
        let index = render_index("crm", &[], &NamingConfig::default(), "index.ts");
        assert!(index.content.contains("ROUTES (0 total):"));
        assert!(index.content.ends_with(" */\n"));
    }
}
