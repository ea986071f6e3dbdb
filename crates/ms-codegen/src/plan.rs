//! Migration planning.
//!
//! A [`MigrationPlan`] holds every file a migration will produce. It is
//! computed entirely in memory, so it can be inspected (dry run, collision
//! checks) before the filesystem is touched.

use camino::Utf8PathBuf;
use ms_core::{GeneratedFile, ModuleContext, NamingConfig, RouteName, RouteRecord};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::template::{render_index, render_route};

/// A located route with its derived names and rendered file.
#[derive(Debug, Clone)]
pub struct PlannedRoute {
    /// The route as found in the source.
    pub route: RouteRecord,
    /// Names derived for the route.
    pub name: RouteName,
    /// The rendered route unit.
    pub file: GeneratedFile,
}

/// Several routes that derive the same file name.
///
/// Written in order, the last of them wins on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilenameCollision {
    /// The shared file name.
    pub filename: String,
    /// `METHOD path` of every colliding route, in discovery order.
    pub routes: Vec<String>,
}

/// Everything one module migration will write.
#[derive(Debug, Clone)]
pub struct MigrationPlan {
    /// The module being migrated.
    pub context: ModuleContext,
    /// Per-route files in discovery order.
    pub routes: Vec<PlannedRoute>,
    /// The aggregator, written to the output directory and copied over the source.
    pub index: GeneratedFile,
    /// File names derived by more than one route.
    pub collisions: Vec<FilenameCollision>,
}

impl MigrationPlan {
    /// Builds the plan for `routes` located in the module's routes file.
    #[must_use]
    pub fn build(
        context: ModuleContext,
        routes: Vec<RouteRecord>,
        naming: &NamingConfig,
        index_file: &str,
    ) -> Self {
        let routes: Vec<PlannedRoute> = routes
            .into_iter()
            .map(|route| {
                let name = RouteName::for_route(&context.name, &route, naming);
                let file = render_route(&context.name, &route, &name);
                PlannedRoute { route, name, file }
            })
            .collect();

        let index = render_index(&context.name, &routes, naming, index_file);
        let collisions = find_collisions(&routes);

        Self {
            context,
            routes,
            index,
            collisions,
        }
    }

    /// Returns `true` if any two routes share a file name.
    #[inline]
    #[must_use]
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }

    /// Returns the colliding file names.
    #[must_use]
    pub fn collision_names(&self) -> Vec<String> {
        self.collisions.iter().map(|c| c.filename.clone()).collect()
    }

    /// Returns the destination of every route unit, in write order.
    pub fn route_paths(&self) -> impl Iterator<Item = Utf8PathBuf> + '_ {
        self.routes
            .iter()
            .map(|planned| self.context.output_dir.join(&planned.file.filename))
    }

    /// Returns the destination of the aggregator.
    #[must_use]
    pub fn index_path(&self) -> Utf8PathBuf {
        self.context.output_dir.join(&self.index.filename)
    }
}

/// Groups routes by file name, keeping first-occurrence order.
fn find_collisions(routes: &[PlannedRoute]) -> Vec<FilenameCollision> {
    let mut groups: Vec<FilenameCollision> = Vec::new();
    let mut by_name: FxHashMap<&str, usize> = FxHashMap::default();

    for planned in routes {
        let label = format!("{} {}", planned.route.method, planned.route.path);
        match by_name.get(planned.file.filename.as_str()) {
            Some(&slot) => groups[slot].routes.push(label),
            None => {
                by_name.insert(&planned.file.filename, groups.len());
                groups.push(FilenameCollision {
                    filename: planned.file.filename.clone(),
                    routes: vec![label],
                });
            }
        }
    }

    groups.retain(|group| group.routes.len() > 1);
    groups
}
