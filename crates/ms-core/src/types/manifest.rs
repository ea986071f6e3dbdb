//! Frontend module metadata.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::naming::pascal_case;

/// Metadata describing one frontend module to scaffold.
///
/// # Examples
///
/// ```
/// use ms_core::ModuleManifest;
///
/// let manifest = ModuleManifest::new("people-growth", "People Growth");
/// assert!(manifest.validate().is_ok());
/// assert_eq!(manifest.identifier(), "peoplegrowth");
/// assert_eq!(manifest.pascal_name(), "PeopleGrowth");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Kebab-case module id, also the directory and URL segment.
    pub id: String,

    /// Human-readable module name.
    pub name: String,

    /// One-line description.
    #[serde(default)]
    pub description: String,

    /// Menu category.
    #[serde(default = "default_category")]
    pub category: String,

    /// Permissions required to open the module.
    #[serde(default)]
    pub permissions: Vec<String>,
}

fn default_category() -> String {
    "core".to_owned()
}

/// A manifest file holds one module or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestFile {
    One(ModuleManifest),
    Many(Vec<ModuleManifest>),
}

impl ModuleManifest {
    /// Creates a manifest with an empty description, the `core` category,
    /// and no permissions.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: default_category(),
            permissions: Vec::new(),
        }
    }

    /// Loads every manifest from a JSON file holding an object or an array.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] if the file
    /// cannot be loaded, and [`ConfigError::InvalidOption`] for the first
    /// invalid manifest.
    pub fn from_json_file(path: &Utf8Path) -> Result<Vec<Self>, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let manifests = match serde_json::from_str(&text)? {
            ManifestFile::One(manifest) => vec![manifest],
            ManifestFile::Many(manifests) => manifests,
        };
        for manifest in &manifests {
            manifest.validate()?;
        }
        Ok(manifests)
    }

    /// Checks that the manifest yields valid paths and identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_kebab_id(&self.id) {
            return Err(ConfigError::invalid_option(
                "id",
                format!("'{}' must be lower-case kebab-case starting with a letter", self.id),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid_option("name", "must not be empty"));
        }
        if let Some(bad) = self.permissions.iter().find(|p| p.is_empty() || p.contains(['\'', '"'])) {
            return Err(ConfigError::invalid_option(
                "permissions",
                format!("'{bad}' is not a valid permission"),
            ));
        }
        Ok(())
    }

    /// The id with its hyphens removed, used as a variable name prefix.
    #[must_use]
    pub fn identifier(&self) -> String {
        self.id.replace('-', "")
    }

    /// The id in `PascalCase`, used for type and component names.
    #[must_use]
    pub fn pascal_name(&self) -> String {
        pascal_case(&self.id)
    }
}

/// `[a-z][a-z0-9]*` segments joined by single hyphens.
fn is_kebab_id(id: &str) -> bool {
    id.starts_with(|c: char| c.is_ascii_lowercase())
        && id.split('-').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}
