//! Application configuration
//!
//! Read once at startup (TOML file and/or environment) and passed explicitly
//! to whatever needs it, such as the [`crate::guard::RouteGuard`].

use crate::error::CoachError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable that switches maintenance mode on
pub const MAINTENANCE_ENV_VAR: &str = "MINDCOACH_MAINTENANCE_MODE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Redirect everything outside the allowlist to the maintenance page
    #[serde(default)]
    pub maintenance_mode: bool,

    /// Where blocked routes are sent
    #[serde(default = "default_maintenance_path")]
    pub maintenance_path: String,

    /// Route prefixes that stay reachable during maintenance
    #[serde(default = "default_maintenance_allowlist")]
    pub maintenance_allowlist: Vec<String>,
}

fn default_maintenance_path() -> String {
    "/maintenance".to_string()
}

fn default_maintenance_allowlist() -> Vec<String> {
    vec!["/maintenance".to_string(), "/auth".to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            maintenance_mode: false,
            maintenance_path: default_maintenance_path(),
            maintenance_allowlist: default_maintenance_allowlist(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, CoachError> {
        toml::from_str(s).map_err(|e| CoachError::Config(e.to_string()))
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, CoachError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Default config with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_vars(std::env::vars())
    }

    /// Apply overrides from a set of environment variables.
    ///
    /// Takes the variables as an iterator so callers (and tests) decide where
    /// they come from.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            if key.as_ref() == MAINTENANCE_ENV_VAR {
                self.maintenance_mode = parse_flag(value.as_ref());
            }
        }
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
