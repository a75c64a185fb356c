//! Static route table consumed by the navigation runtime.
//!
//! The table is immutable once validated: duplicate paths, redirects to
//! unknown paths and redirect chains that never reach a view are
//! configuration errors, fatal at startup.

mod routes;

pub use routes::default_routes;

use crate::config::AppConfig;
use crate::error::RouterError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Symbolic references to the UI runtime's page components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Signin,
    Home,
}

/// What a path maps to. A redirect entry structurally carries no component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    View { name: &'static str, page: Page },
    Redirect(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub target: RouteTarget,
}

/// Successful resolution of a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: &'static str,
    pub page: Page,
    /// The originally requested path when resolution followed a redirect.
    pub redirected_from: Option<String>,
}

/// Immutable, startup-validated route table with exact-match semantics.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Validate and freeze the table.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouterError> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.path) {
                return Err(RouterError::DuplicatePath {
                    path: entry.path.to_string(),
                });
            }
        }

        let table = Self { entries };
        for entry in &table.entries {
            table.check_redirect_chain(entry)?;
        }
        Ok(table)
    }

    /// Resolve a request path. Exact match only; redirects resolve to their
    /// terminal view. Unknown paths are the navigation runtime's not-found
    /// concern.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let mut entry = self.lookup(path)?;
        let mut redirected = false;

        // Chains are guaranteed to terminate by construction.
        loop {
            match &entry.target {
                RouteTarget::View { name, page } => {
                    return Some(ResolvedRoute {
                        name,
                        page: *page,
                        redirected_from: redirected.then(|| path.to_string()),
                    });
                }
                RouteTarget::Redirect(target) => {
                    redirected = true;
                    entry = self.lookup(target)?;
                }
            }
        }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    fn lookup(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// Walk an entry's redirect chain and reject dangling targets and
    /// cycles. A chain longer than the table must have revisited an entry.
    fn check_redirect_chain(&self, entry: &RouteEntry) -> Result<(), RouterError> {
        let RouteTarget::Redirect(first) = &entry.target else {
            return Ok(());
        };

        let mut current = *first;
        for _ in 0..self.entries.len() {
            let Some(next) = self.lookup(current) else {
                return Err(RouterError::DanglingRedirect {
                    path: entry.path.to_string(),
                    target: current.to_string(),
                });
            };
            match &next.target {
                RouteTarget::View { .. } => return Ok(()),
                RouteTarget::Redirect(target) => current = target,
            }
        }

        Err(RouterError::RedirectCycle {
            path: entry.path.to_string(),
        })
    }
}

/// History mode handed to the navigation runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    #[default]
    Web,
    Hash,
    Memory,
}

/// The route table plus the navigation runtime's construction parameters.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    history: HistoryMode,
    base_path: String,
}

impl Router {
    pub fn new(table: RouteTable, cfg: &AppConfig) -> Self {
        Self {
            table,
            history: cfg.history,
            base_path: normalize_base(&cfg.base_path),
        }
    }

    pub fn history(&self) -> HistoryMode {
        self.history
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Strip the base path, then resolve against the table.
    pub fn resolve(&self, raw_path: &str) -> Option<ResolvedRoute> {
        if self.base_path == "/" {
            return self.table.resolve(raw_path);
        }

        let rest = raw_path.strip_prefix(&self.base_path)?;
        if rest.is_empty() {
            self.table.resolve("/")
        } else if rest.starts_with('/') {
            self.table.resolve(rest)
        } else {
            // `/appx` must not match base `/app`.
            None
        }
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
