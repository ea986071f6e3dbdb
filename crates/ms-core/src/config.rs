//! Configuration structures for the modsplit tool.
//!
//! This module provides configuration types for all components of the application:
//!
//! - [`LayoutConfig`] - Where modules live and how their files are named on disk
//! - [`NamingConfig`] - Tokens used when deriving route stems and symbols
//! - [`LocateConfig`] - Router identifiers and the extraction strategy
//! - [`CodegenConfig`] - Generation policies (filename collisions)
//! - [`FixtureConfig`] - HTTP fixture analysis settings
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] with values matching the
//! `src/modules/<module>/routes.ts` backend layout, and every field may be
//! omitted from a JSON config file.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the route locator finds the end of a registration call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractStrategy {
    /// Parse the source with tree-sitter and take the whole call expression.
    #[default]
    Syntax,
    /// Take the span up to the nearest `});` after the call site.
    ///
    /// Captures too little when a route body contains a nested `});`.
    Heuristic,
}

impl ExtractStrategy {
    /// Returns a human-readable label for this strategy.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Heuristic => "heuristic",
        }
    }
}

/// What to do when two routes derive the same filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Log a warning and let the later route's unit replace the earlier one.
    #[default]
    Overwrite,
    /// Refuse to migrate before anything is written.
    Fail,
}

/// Filesystem layout of the backend modules.
///
/// # Examples
///
/// ```
/// use ms_core::LayoutConfig;
///
/// let layout = LayoutConfig::default();
/// assert_eq!(layout.routes_file, "routes.ts");
/// assert_eq!(layout.output_dir, "routes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Directory containing one subdirectory per module.
    pub modules_root: Utf8PathBuf,

    /// Name of the monolithic routes file inside a module.
    pub routes_file: String,

    /// Subdirectory receiving the generated per-route files.
    pub output_dir: String,

    /// Name of the aggregator file inside the output directory.
    pub index_file: String,

    /// Suffix appended to the original routes file when it is backed up.
    pub backup_suffix: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            modules_root: Utf8PathBuf::from("src/modules"),
            routes_file: "routes.ts".to_owned(),
            output_dir: "routes".to_owned(),
            index_file: "index.ts".to_owned(),
            backup_suffix: ".backup".to_owned(),
        }
    }
}

/// Tokens used to derive stems, filenames, and exported symbols.
///
/// # Examples
///
/// ```
/// use ms_core::NamingConfig;
///
/// let naming = NamingConfig::default();
/// assert_eq!(naming.api_prefix, "/api/v1");
/// assert_eq!(naming.symbol_prefix, "setup");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Template placeholder standing for the module base URL in route paths.
    pub base_url_token: String,

    /// API version prefix, stripped from stems and prepended to the module base URL.
    pub api_prefix: String,

    /// Prefix of every exported setup function.
    pub symbol_prefix: String,

    /// Suffix of every per-route setup function.
    pub symbol_suffix: String,

    /// Suffix appended to the stem to form the route file name.
    pub file_suffix: String,

    /// Source file extension, without the dot.
    pub extension: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            base_url_token: "${baseUrl}".to_owned(),
            api_prefix: "/api/v1".to_owned(),
            symbol_prefix: "setup".to_owned(),
            symbol_suffix: "Route".to_owned(),
            file_suffix: ".route".to_owned(),
            extension: "ts".to_owned(),
        }
    }
}

/// Settings for the route locator.
///
/// # Examples
///
/// ```
/// use ms_core::{ExtractStrategy, LocateConfig};
///
/// let config = LocateConfig::default();
/// assert_eq!(config.routers, vec!["app", "router"]);
/// assert_eq!(config.strategy, ExtractStrategy::Syntax);
/// assert_eq!(config.comment_lookback, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    /// Identifiers of the application/router objects routes are registered on.
    pub routers: Vec<String>,

    /// How the end of each registration call is found.
    pub strategy: ExtractStrategy,

    /// Maximum number of lines scanned upward for a leading comment block.
    pub comment_lookback: usize,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            routers: vec!["app".to_owned(), "router".to_owned()],
            strategy: ExtractStrategy::Syntax,
            comment_lookback: 10,
        }
    }
}

/// Settings for code generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Behavior when two routes map to the same file.
    pub collision_policy: CollisionPolicy,
}

/// Settings for HTTP fixture analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Name of the fixture file looked up in every module directory.
    pub fixture_file: String,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            fixture_file: "teste.http".to_owned(),
        }
    }
}

/// Settings for frontend module scaffolding.
///
/// # Examples
///
/// ```
/// use ms_core::ScaffoldConfig;
///
/// let config = ScaffoldConfig::default();
/// assert_eq!(config.modules_root, "frontend/src/modules");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Directory receiving one subdirectory per scaffolded frontend module.
    pub modules_root: Utf8PathBuf,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            modules_root: Utf8PathBuf::from("frontend/src/modules"),
        }
    }
}

/// Root configuration for the modsplit tool.
///
/// # Examples
///
/// ```
/// use ms_core::Config;
///
/// let config = Config::default();
/// assert!(config.validate().is_ok());
///
/// let json = serde_json::to_string_pretty(&config)?;
/// assert!(json.contains("routes.ts"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Module layout on disk.
    pub layout: LayoutConfig,

    /// Route naming tokens.
    pub naming: NamingConfig,

    /// Route locator settings.
    pub locate: LocateConfig,

    /// Code generation settings.
    pub codegen: CodegenConfig,

    /// Fixture analysis settings.
    pub fixtures: FixtureConfig,

    /// Frontend scaffolding settings.
    pub scaffold: ScaffoldConfig,
}

impl Config {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults. The result is validated
    /// before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON, and
    /// [`ConfigError::InvalidOption`] if validation fails.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can drive a migration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first offending option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locate.routers.is_empty() {
            return Err(ConfigError::invalid_option(
                "locate.routers",
                "at least one router identifier is required",
            ));
        }
        if let Some(bad) = self.locate.routers.iter().find(|r| !is_identifier(r)) {
            return Err(ConfigError::invalid_option(
                "locate.routers",
                format!("'{bad}' is not a valid identifier"),
            ));
        }
        if self.layout.routes_file.is_empty() {
            return Err(ConfigError::invalid_option(
                "layout.routes_file",
                "must not be empty",
            ));
        }
        if self.layout.output_dir.is_empty() || self.layout.output_dir.contains(['/', '\\']) {
            return Err(ConfigError::invalid_option(
                "layout.output_dir",
                "must be a single directory name",
            ));
        }
        if self.layout.backup_suffix.is_empty() {
            return Err(ConfigError::invalid_option(
                "layout.backup_suffix",
                "must not be empty",
            ));
        }
        if !is_identifier(&self.naming.symbol_prefix) {
            return Err(ConfigError::invalid_option(
                "naming.symbol_prefix",
                "must be a valid identifier",
            ));
        }
        Ok(())
    }
}

/// Returns `true` for a plain JavaScript identifier (`[A-Za-z_$][A-Za-z0-9_$]*`).
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_config_defaults() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.modules_root, "src/modules");
        assert_eq!(layout.routes_file, "routes.ts");
        assert_eq!(layout.index_file, "index.ts");
        assert_eq!(layout.backup_suffix, ".backup");
    }

    #[test]
    fn test_naming_config_defaults() {
        let naming = NamingConfig::default();
        assert_eq!(naming.base_url_token, "${baseUrl}");
        assert_eq!(naming.symbol_suffix, "Route");
        assert_eq!(naming.file_suffix, ".route");
        assert_eq!(naming.extension, "ts");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"locate": {"routers": ["router"], "strategy": "heuristic"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.locate.routers, vec!["router"]);
        assert_eq!(config.locate.strategy, ExtractStrategy::Heuristic);
        // Other fields should have defaults
        assert_eq!(config.locate.comment_lookback, 10);
        assert_eq!(config.layout.routes_file, "routes.ts");
        assert_eq!(config.codegen.collision_policy, CollisionPolicy::Overwrite);
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(
            serde_json::to_string(&ExtractStrategy::Syntax).unwrap(),
            r#""syntax""#
        );
        assert_eq!(
            serde_json::to_string(&CollisionPolicy::Fail).unwrap(),
            r#""fail""#
        );
    }

    #[test]
    fn test_validate_rejects_empty_routers() {
        let mut config = Config::default();
        config.locate.routers.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("locate.routers"));
    }

    #[test]
    fn test_validate_rejects_non_identifier_router() {
        let mut config = Config::default();
        config.locate.routers = vec!["this.app".to_owned()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nested_output_dir() {
        let mut config = Config::default();
        config.layout.output_dir = "gen/routes".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("modsplit.json")).unwrap();
        std::fs::write(&path, r#"{"layout": {"modules_root": "backend/src/modules"}}"#).unwrap();

        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.layout.modules_root, "backend/src/modules");
        assert_eq!(config.layout.output_dir, "routes");
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = Config::from_json_file(Utf8Path::new("/nonexistent/modsplit.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("app"));
        assert!(is_identifier("_router"));
        assert!(is_identifier("$app2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2app"));
        assert!(!is_identifier("this.app"));
    }
}
