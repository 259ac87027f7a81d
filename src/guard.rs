//! Maintenance-mode route guard
//!
//! Decides whether a route may be served given the maintenance flag it was
//! constructed with.

use crate::config::AppConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    maintenance_mode: bool,
    maintenance_path: String,
    allowlist: Vec<String>,
}

impl RouteGuard {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            maintenance_mode: config.maintenance_mode,
            maintenance_path: config.maintenance_path.clone(),
            allowlist: config.maintenance_allowlist.clone(),
        }
    }

    pub fn decide(&self, path: &str) -> RouteDecision {
        if !self.maintenance_mode || self.is_allowlisted(path) {
            return RouteDecision::Allow;
        }
        RouteDecision::Redirect(self.maintenance_path.clone())
    }

    /// Exact match or a sub-path of an allowlisted prefix
    fn is_allowlisted(&self, path: &str) -> bool {
        self.allowlist.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}
