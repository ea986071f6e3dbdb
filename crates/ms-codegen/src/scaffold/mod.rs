//! Frontend module scaffolding.
//!
//! [`ScaffoldPlan::build`] renders the six files of a new frontend module in
//! memory; [`ScaffoldPlan::write`] puts them on disk under
//! `<modules root>/<id>/`:
//!
//! ```text
//! <id>/
//! ├── module.config.ts
//! ├── types/index.ts
//! ├── services/<id>.service.ts
//! ├── pages/<Pascal>ListPage.tsx
//! ├── routes.tsx
//! └── index.ts
//! ```
//!
//! Existing files are never overwritten unless asked to.

pub mod templates;

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use ms_core::{GeneratedFile, ModuleManifest};
use tracing::{debug, info};

use crate::error::ScaffoldError;

/// The files of one frontend module, rendered but not yet written.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use ms_codegen::ScaffoldPlan;
/// use ms_core::ModuleManifest;
///
/// let manifest = ModuleManifest::new("crm", "CRM");
/// let plan = ScaffoldPlan::build(&manifest, Utf8Path::new("frontend/src/modules"))?;
/// assert_eq!(plan.module_dir, "frontend/src/modules/crm");
/// assert_eq!(plan.files.len(), 6);
/// # Ok::<(), ms_codegen::ScaffoldError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    /// The module being scaffolded.
    pub manifest: ModuleManifest,
    /// Directory receiving the files.
    pub module_dir: Utf8PathBuf,
    /// Files with paths relative to `module_dir`, in write order.
    pub files: Vec<GeneratedFile>,
}

impl ScaffoldPlan {
    /// Validates `manifest` and renders every file of the module.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Manifest`] if the manifest is invalid.
    pub fn build(manifest: &ModuleManifest, modules_root: &Utf8Path) -> Result<Self, ScaffoldError> {
        manifest.validate()?;

        let files = vec![
            GeneratedFile::new("module.config.ts", templates::module_config(manifest)),
            GeneratedFile::new("types/index.ts", templates::types(manifest)),
            GeneratedFile::new(
                format!("services/{}.service.ts", manifest.id),
                templates::service(manifest),
            ),
            GeneratedFile::new(
                format!("pages/{}ListPage.tsx", manifest.pascal_name()),
                templates::list_page(manifest),
            ),
            GeneratedFile::new("routes.tsx", templates::routes(manifest)),
            GeneratedFile::new("index.ts", templates::index(manifest)),
        ];

        Ok(Self {
            manifest: manifest.clone(),
            module_dir: modules_root.join(&manifest.id),
            files,
        })
    }

    /// Full destination paths, in write order.
    pub fn paths(&self) -> impl Iterator<Item = Utf8PathBuf> + '_ {
        self.files.iter().map(|file| self.module_dir.join(&file.filename))
    }

    /// Writes every file, calling `on_written` after each one.
    ///
    /// Without `overwrite`, nothing is written when any destination exists.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::FilesExist`] listing the existing files, or
    /// [`ScaffoldError::Io`] with the failing path.
    pub fn write(
        &self,
        overwrite: bool,
        mut on_written: impl FnMut(&Utf8Path),
    ) -> Result<Vec<Utf8PathBuf>, ScaffoldError> {
        if !overwrite {
            let existing: Vec<_> = self.paths().filter(|path| path.exists()).collect();
            if !existing.is_empty() {
                return Err(ScaffoldError::FilesExist(existing));
            }
        }

        let mut written = Vec::with_capacity(self.files.len());
        for (file, path) in self.files.iter().zip(self.paths()) {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| ScaffoldError::io("create directory", parent, e))?;
            }
            fs::write(&path, &file.content).map_err(|e| ScaffoldError::io("write", &path, e))?;
            debug!(file = %path, "Created scaffold file");
            on_written(&path);
            written.push(path);
        }

        info!(module = %self.manifest.id, files = written.len(), "Module scaffolded");
        Ok(written)
    }
}
