//! The module being migrated.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::ConfigError;

/// Identity and paths of one application module.
///
/// Built by the caller from a module name and the [`LayoutConfig`]; the core
/// only reads it.
///
/// # Examples
///
/// ```
/// use ms_core::{LayoutConfig, ModuleContext};
///
/// let ctx = ModuleContext::from_layout("crm", &LayoutConfig::default());
/// assert_eq!(ctx.source_path, "src/modules/crm/routes.ts");
/// assert_eq!(ctx.output_dir, "src/modules/crm/routes");
/// assert_eq!(ctx.backup_path, "src/modules/crm/routes.ts.backup");
/// assert_eq!(ctx.index_path, "src/modules/crm/routes/index.ts");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContext {
    /// Module identifier, also its directory name.
    pub name: String,

    /// The monolithic routes file.
    pub source_path: Utf8PathBuf,

    /// Directory receiving the per-route files and the aggregator.
    pub output_dir: Utf8PathBuf,

    /// Where the original routes file is moved before being replaced.
    pub backup_path: Utf8PathBuf,

    /// The aggregator file inside `output_dir`.
    pub index_path: Utf8PathBuf,
}

impl ModuleContext {
    /// Derives a context from the layout without touching the filesystem.
    #[must_use]
    pub fn from_layout(name: &str, layout: &LayoutConfig) -> Self {
        let module_dir = layout.modules_root.join(name);
        let source_path = module_dir.join(&layout.routes_file);
        let output_dir = module_dir.join(&layout.output_dir);
        let backup_path = Utf8PathBuf::from(format!("{source_path}{}", layout.backup_suffix));
        let index_path = output_dir.join(&layout.index_file);

        Self {
            name: name.to_owned(),
            source_path,
            output_dir,
            backup_path,
            index_path,
        }
    }

    /// Resolves a module name against the modules root.
    ///
    /// Only checks that the module directory exists; whether it still has a
    /// routes file is for the migrator to report.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidPath`] if `name` is empty or contains a path separator
    /// - [`ConfigError::MissingDirectory`] if the modules root does not exist
    /// - [`ConfigError::UnknownModule`] if there is no directory for `name`
    pub fn resolve(name: &str, layout: &LayoutConfig) -> Result<Self, ConfigError> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ConfigError::InvalidPath {
                path: Utf8PathBuf::from(name),
                reason: "module name must be a single directory name".to_owned(),
            });
        }
        if !layout.modules_root.is_dir() {
            return Err(ConfigError::MissingDirectory(layout.modules_root.clone()));
        }
        if !layout.modules_root.join(name).is_dir() {
            return Err(ConfigError::UnknownModule {
                name: name.to_owned(),
                modules_root: layout.modules_root.clone(),
            });
        }

        Ok(Self::from_layout(name, layout))
    }

    /// Returns the module directory.
    #[must_use]
    pub fn module_dir(&self) -> &Utf8Path {
        self.source_path.parent().unwrap_or(Utf8Path::new("."))
    }
}
