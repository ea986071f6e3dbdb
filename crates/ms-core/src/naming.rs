//! Route naming: stems, filenames, and exported symbols.
//!
//! Every name the code regenerator emits comes from [`RouteName::derive`].
//! The per-route generator and the aggregator both call it, so the symbol a
//! route file exports and the symbol the aggregator imports cannot drift
//! apart.
//!
//! # Derivation
//!
//! | Step | `GET /api/v1/crm/contacts/:id` in module `crm` |
//! |------|------------------------------------------------|
//! | drop base-URL token, split on `/`, drop `:` | `api`, `v1`, `crm`, `contacts`, `id` |
//! | strip API version, then module name | `contacts`, `id` |
//! | join with `-`, sanitize, collapse, trim | `contacts-id` |
//! | symbol | `setupContactsIdRoute` |
//! | filename | `contacts-id.route.ts` |
//!
//! An empty stem (the module root) falls back to the lower-cased method.

use serde::{Deserialize, Serialize};

use crate::config::NamingConfig;
use crate::types::{HttpMethod, RouteRecord};

/// The names derived for one route.
///
/// # Examples
///
/// ```
/// use ms_core::{HttpMethod, NamingConfig, RouteName};
///
/// let name = RouteName::derive("crm", HttpMethod::Get, "/api/v1/crm/contacts", &NamingConfig::default());
/// assert_eq!(name.stem, "contacts");
/// assert_eq!(name.symbol, "setupContactsRoute");
/// assert_eq!(name.filename, "contacts.route.ts");
/// assert_eq!(name.import_specifier, "./contacts.route");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteName {
    /// Filesystem-safe base name shared by the filename and the symbol.
    pub stem: String,

    /// Name of the exported setup function.
    pub symbol: String,

    /// File name inside the output directory.
    pub filename: String,

    /// Relative module specifier the aggregator imports from.
    pub import_specifier: String,
}

impl RouteName {
    /// Derives all names for a route from its module, method, and path.
    #[must_use]
    pub fn derive(module: &str, method: HttpMethod, path: &str, naming: &NamingConfig) -> Self {
        let stem = route_stem(module, method, path, naming);
        let symbol = format!(
            "{}{}{}",
            naming.symbol_prefix,
            pascal_case(&stem),
            naming.symbol_suffix
        );
        let filename = format!("{stem}{}.{}", naming.file_suffix, naming.extension);
        let import_specifier = format!("./{stem}{}", naming.file_suffix);

        Self {
            stem,
            symbol,
            filename,
            import_specifier,
        }
    }

    /// Derives the names for a located route.
    #[inline]
    #[must_use]
    pub fn for_route(module: &str, route: &RouteRecord, naming: &NamingConfig) -> Self {
        Self::derive(module, route.method, &route.path, naming)
    }
}

/// Computes the normalized stem for a route path.
fn route_stem(module: &str, method: HttpMethod, path: &str, naming: &NamingConfig) -> String {
    let path = if naming.base_url_token.is_empty() {
        path.to_owned()
    } else {
        path.replace(&naming.base_url_token, "")
    };

    let segments: Vec<String> = path
        .split('/')
        .map(|segment| segment.replace(':', ""))
        .filter(|segment| !segment.is_empty())
        .collect();

    let api: Vec<&str> = naming
        .api_prefix
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let mut rest = segments.as_slice();
    if !api.is_empty()
        && rest.len() >= api.len()
        && rest
            .iter()
            .zip(&api)
            .all(|(segment, token)| segment.as_str() == *token)
    {
        rest = &rest[api.len()..];
    }
    if rest.first().is_some_and(|first| first.as_str() == module) {
        rest = &rest[1..];
    }

    let joined: String = rest
        .join("-")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();

    let stem = joined
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if stem.is_empty() {
        method.lowercase().to_owned()
    } else {
        stem
    }
}

/// Converts a `-` or `_` separated name to `PascalCase`.
///
/// Each word keeps its first character upper-cased and the rest lower-cased.
///
/// # Examples
///
/// ```
/// use ms_core::pascal_case;
///
/// assert_eq!(pascal_case("move-stage"), "MoveStage");
/// assert_eq!(pascal_case("people_growth"), "PeopleGrowth");
/// assert_eq!(pascal_case("getByID"), "Getbyid");
/// ```
#[must_use]
pub fn pascal_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

/// Title-cases a module name for headers, keeping its separators.
///
/// # Examples
///
/// ```
/// use ms_core::module_title;
///
/// assert_eq!(module_title("crm"), "Crm");
/// assert_eq!(module_title("people-growth"), "People-Growth");
/// ```
#[must_use]
pub fn module_title(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_boundary = true;
    for c in name.chars() {
        if c.is_alphabetic() {
            if at_boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(c);
            at_boundary = true;
        }
    }
    out
}

/// Returns the name of the aggregator's exported setup function.
///
/// # Examples
///
/// ```
/// use ms_core::{NamingConfig, module_setup_symbol};
///
/// let naming = NamingConfig::default();
/// assert_eq!(module_setup_symbol("crm", &naming), "setupCrmRoutes");
/// assert_eq!(module_setup_symbol("people-growth", &naming), "setupPeopleGrowthRoutes");
/// ```
#[must_use]
pub fn module_setup_symbol(module: &str, naming: &NamingConfig) -> String {
    format!(
        "{}{}{}s",
        naming.symbol_prefix,
        pascal_case(module),
        naming.symbol_suffix
    )
}

/// Returns the base URL the aggregator passes to every route.
#[must_use]
pub fn module_base_url(module: &str, naming: &NamingConfig) -> String {
    format!("{}/{module}", naming.api_prefix.trim_end_matches('/'))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(module: &str, method: HttpMethod, path: &str) -> RouteName {
        RouteName::derive(module, method, path, &NamingConfig::default())
    }

    #[test]
    fn test_strips_version_and_module() {
        let name = derive("crm", HttpMethod::Get, "/api/v1/crm/contacts");
        assert_eq!(name.stem, "contacts");
        assert_eq!(name.symbol, "setupContactsRoute");
        assert_eq!(name.filename, "contacts.route.ts");
    }

    #[test]
    fn test_path_parameters() {
        let name = derive("crm", HttpMethod::Patch, "/api/v1/crm/deals/:id/move-stage");
        assert_eq!(name.stem, "deals-id-move-stage");
        assert_eq!(name.symbol, "setupDealsIdMoveStageRoute");
    }

    #[test]
    fn test_base_url_token() {
        let name = derive("jobs", HttpMethod::Put, "${baseUrl}/:id");
        assert_eq!(name.stem, "id");
        assert_eq!(name.import_specifier, "./id.route");
    }

    #[test]
    fn test_root_path_falls_back_to_method() {
        assert_eq!(derive("jobs", HttpMethod::Get, "${baseUrl}").stem, "get");
        assert_eq!(derive("jobs", HttpMethod::Post, "/").stem, "post");
        assert_eq!(derive("jobs", HttpMethod::Delete, "/api/v1/jobs").stem, "delete");
        assert_eq!(
            derive("jobs", HttpMethod::Delete, "/api/v1/jobs").symbol,
            "setupDeleteRoute"
        );
    }

    #[test]
    fn test_module_name_only_stripped_as_prefix() {
        let name = derive("crm", HttpMethod::Get, "/api/v1/reports/crm");
        assert_eq!(name.stem, "reports-crm");
    }

    #[test]
    fn test_module_with_dash() {
        let name = derive(
            "people-growth",
            HttpMethod::Get,
            "/api/v1/people-growth/my-profile",
        );
        assert_eq!(name.stem, "my-profile");
        assert_eq!(name.symbol, "setupMyProfileRoute");
    }

    #[test]
    fn test_unsafe_characters_replaced() {
        let name = derive("files", HttpMethod::Get, "/api/v1/files/export.csv/*");
        assert_eq!(name.stem, "export-csv");
        assert_eq!(name.filename, "export-csv.route.ts");
    }

    #[test]
    fn test_repeated_separators_collapse() {
        let name = derive("crm", HttpMethod::Get, "//api//v1/crm/--a--b--/");
        assert_eq!(name.stem, "a-b");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let naming = NamingConfig::default();
        let a = RouteName::derive("crm", HttpMethod::Get, "/api/v1/crm/contacts/:id", &naming);
        let b = RouteName::derive("crm", HttpMethod::Get, "/api/v1/crm/contacts/:id", &naming);
        assert_eq!(a, b);
    }

    #[test]
    fn test_colliding_paths_share_a_name() {
        let a = derive("crm", HttpMethod::Get, "/api/v1/crm/items");
        let b = derive("crm", HttpMethod::Post, "/items");
        assert_eq!(a.filename, b.filename);
        assert_eq!(a.symbol, b.symbol);
    }

    #[test]
    fn test_custom_naming() {
        let naming = NamingConfig {
            api_prefix: "/v2".to_owned(),
            symbol_prefix: "register".to_owned(),
            symbol_suffix: "Handler".to_owned(),
            file_suffix: ".handler".to_owned(),
            extension: "js".to_owned(),
            ..NamingConfig::default()
        };
        let name = RouteName::derive("crm", HttpMethod::Get, "/v2/crm/contacts", &naming);
        assert_eq!(name.symbol, "registerContactsHandler");
        assert_eq!(name.filename, "contacts.handler.js");
        assert_eq!(module_setup_symbol("crm", &naming), "registerCrmHandlers");
        assert_eq!(module_base_url("crm", &naming), "/v2/crm");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("contacts"), "Contacts");
        assert_eq!(pascal_case("email-verify-send"), "EmailVerifySend");
        assert_eq!(pascal_case("2fa-verify"), "2faVerify");
        assert_eq!(pascal_case(""), "");
    }

    #[test]
    fn test_module_base_url() {
        assert_eq!(
            module_base_url("crm", &NamingConfig::default()),
            "/api/v1/crm"
        );
    }
}
