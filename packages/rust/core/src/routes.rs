//! Route tree scanning.
//!
//! Finds the docs plugin's routes in the host route tree and pulls titled
//! documents out of each version-docs mapping.

use tracing::{debug, instrument};

use llmsgen_shared::{DocEntry, DocMetadata, RouteNode};

/// Substring identifying routes registered by the docs plugin.
pub const DOCS_PLUGIN_MARKER: &str = "docusaurus-plugin-content-docs";

/// Route path at which a docs version exposes its mapping.
pub const VERSION_ROOT_PATH: &str = "/";

/// Outcome of scanning one route tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteScan {
    /// Titled documents in discovery order (unsorted, not deduplicated).
    pub entries: Vec<DocEntry>,
    /// Docs plugin nodes found in the first pass.
    pub docs_plugin_routes: usize,
    /// Documents dropped because they had no title.
    pub untitled: usize,
}

/// Scan the route tree for documentation entries.
#[instrument(skip_all, fields(top_level_routes = routes.len()))]
pub fn scan_routes(routes: &[RouteNode]) -> RouteScan {
    let mut docs_routes = Vec::new();
    find_docs_routes(routes, &mut docs_routes);

    let mut scan = RouteScan {
        docs_plugin_routes: docs_routes.len(),
        ..RouteScan::default()
    };

    for docs_route in docs_routes {
        collect_version_docs(&docs_route.routes, &mut scan);
    }

    debug!(
        entries = scan.entries.len(),
        untitled = scan.untitled,
        "route scan complete"
    );
    scan
}

/// Depth-first search for docs plugin nodes. Children of a match are searched
/// too, so nested plugin nodes are visited again in the second pass.
fn find_docs_routes<'a>(routes: &'a [RouteNode], found: &mut Vec<&'a RouteNode>) {
    for route in routes {
        if let Some(name) = route
            .plugin_name()
            .filter(|name| name.contains(DOCS_PLUGIN_MARKER))
        {
            debug!(plugin = name, "found docs plugin route");
            found.push(route);
        }
        find_docs_routes(&route.routes, found);
    }
}

fn collect_version_docs(routes: &[RouteNode], scan: &mut RouteScan) {
    for route in routes {
        if route.path.as_deref() == Some(VERSION_ROOT_PATH) {
            if let Some(docs) = route.version_docs() {
                debug!(docs = docs.len(), "found version docs");

                for (path, value) in docs {
                    match DocMetadata::from_value(value).into_entry(path) {
                        Some(entry) => scan.entries.push(entry),
                        None => scan.untitled += 1,
                    }
                }
            }
        }

        collect_version_docs(&route.routes, scan);
    }
}
