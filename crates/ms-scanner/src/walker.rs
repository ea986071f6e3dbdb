//! Module directory discovery.
//!
//! This module provides [`ModuleWalker`], which uses the `ignore` crate to
//! list the immediate subdirectories of the modules root.
//!
//! # Features
//!
//! - Respects `.gitignore` and `.ignore` patterns
//! - Skips hidden directories and well-known build directories
//! - Keeps only modules containing a marker file (`routes.ts`, `teste.http`)
//! - Converts paths to UTF-8 [`Utf8PathBuf`]

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use serde::Serialize;

use crate::error::ScanError;

/// Directories under the modules root that are never modules.
const SKIP_DIRECTORIES: &[&str] = &["node_modules", "dist", "build", "coverage", "__tests__"];

/// One module directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ModuleEntry {
    /// Directory name, which is also the module name.
    pub name: String,
    /// Full path of the module directory.
    pub dir: Utf8PathBuf,
}

impl ModuleEntry {
    /// Returns the path of `file` inside the module.
    #[inline]
    #[must_use]
    pub fn file(&self, file: &str) -> Utf8PathBuf {
        self.dir.join(file)
    }
}

/// Lists module directories under a modules root.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use ms_scanner::ModuleWalker;
///
/// let walker = ModuleWalker::new(Utf8Path::new("src/modules"))?;
/// for module in walker.collect_modules("routes.ts")? {
///     println!("{}", module.name);
/// }
/// # Ok::<(), ms_scanner::ScanError>(())
/// ```
#[derive(Debug)]
pub struct ModuleWalker {
    /// The modules root.
    root: Utf8PathBuf,
}

impl ModuleWalker {
    /// Creates a walker for the given modules root.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the root path doesn't exist or
    /// isn't a directory.
    pub fn new(root: &Utf8Path) -> Result<Self, ScanError> {
        if !root.exists() {
            return Err(ScanError::config(format!(
                "modules root does not exist: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(ScanError::config(format!(
                "modules root is not a directory: {root}"
            )));
        }

        Ok(Self {
            root: root.to_owned(),
        })
    }

    /// Collects the module directories containing `marker`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if directory traversal fails, or
    /// [`ScanError::NonUtf8Path`] for a non-UTF-8 directory name.
    pub fn collect_modules(&self, marker: &str) -> Result<Vec<ModuleEntry>, ScanError> {
        let mut modules = Vec::new();

        for result in self.build_walker() {
            let entry = result?;

            if entry.depth() != 1 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                continue;
            }

            let path = entry.path();
            let dir =
                Utf8Path::from_path(path).ok_or_else(|| ScanError::NonUtf8Path(path.to_owned()))?;
            let Some(name) = dir.file_name() else {
                continue;
            };

            if SKIP_DIRECTORIES.contains(&name) {
                continue;
            }
            if !dir.join(marker).is_file() {
                continue;
            }

            modules.push(ModuleEntry {
                name: name.to_owned(),
                dir: dir.to_owned(),
            });
        }

        modules.sort();
        Ok(modules)
    }

    /// Builds the ignore walker with configured settings.
    fn build_walker(&self) -> ignore::Walk {
        WalkBuilder::new(&self.root)
            .standard_filters(true)
            .max_depth(Some(1))
            .require_git(false)
            .build()
    }

    /// Returns the modules root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn modules_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 tempdir");
        for (module, file) in [
            ("crm", Some("routes.ts")),
            ("auth", Some("routes.ts")),
            ("people-growth", None),
            ("node_modules", Some("routes.ts")),
            (".cache", Some("routes.ts")),
        ] {
            fs::create_dir_all(root.join(module)).expect("module dir");
            if let Some(file) = file {
                fs::write(root.join(module).join(file), "").expect("marker");
            }
        }
        fs::write(root.join("README.md"), "").expect("stray file");
        (dir, root)
    }

    fn names(modules: &[ModuleEntry]) -> Vec<&str> {
        modules.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_collect_modules_with_marker() {
        let (_dir, root) = modules_root();
        let walker = ModuleWalker::new(&root).expect("walker");
        let modules = walker.collect_modules("routes.ts").expect("collect");
        assert_eq!(names(&modules), vec!["auth", "crm"]);
        assert_eq!(walker.root(), root);
        assert_eq!(modules[1].file("routes.ts"), root.join("crm").join("routes.ts"));
    }

    #[test]
    fn test_missing_root() {
        let err = ModuleWalker::new(Utf8Path::new("/definitely/not/here")).expect_err("missing");
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_root_is_file() {
        let (_dir, root) = modules_root();
        let err = ModuleWalker::new(&root.join("README.md")).expect_err("file root");
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_marker_must_be_a_file() {
        let (_dir, root) = modules_root();
        fs::create_dir_all(root.join("people-growth").join("routes.ts")).expect("dir marker");
        let walker = ModuleWalker::new(&root).expect("walker");
        let modules = walker.collect_modules("routes.ts").expect("collect");
        assert_eq!(names(&modules), vec!["auth", "crm"]);
    }
}
