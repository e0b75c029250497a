//! Application configuration
//!
//! Settings come from an optional YAML file and are then overridden by
//! environment variables:
//!
//! | Variable           | Field                |
//! |--------------------|----------------------|
//! | `FOLIO_API_URL`    | `api_url`            |
//! | `FOLIO_TIMEOUT_MS` | `request_timeout_ms` |
//! | `FOLIO_TOKEN_FILE` | `token_file`         |

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::resource::ResourceDef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Request deadline used when nothing else is configured
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Environment variable overriding `api_url`
pub const ENV_API_URL: &str = "FOLIO_API_URL";

/// Environment variable overriding `request_timeout_ms`
pub const ENV_TIMEOUT_MS: &str = "FOLIO_TIMEOUT_MS";

/// Environment variable overriding `token_file`
pub const ENV_TOKEN_FILE: &str = "FOLIO_TOKEN_FILE";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST API
    pub api_url: String,

    /// Deadline for every request, in milliseconds
    pub request_timeout_ms: u64,

    /// User agent sent with every request
    pub user_agent: Option<String>,

    /// Persisted token slot for authenticated resources
    pub token_file: Option<PathBuf>,

    /// Resource overrides and additions, keyed by name
    pub resources: BTreeMap<String, ResourceOverride>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: None,
            token_file: None,
            resources: BTreeMap::new(),
        }
    }
}

/// Partial resource definition from the config file
///
/// Fields left out fall back to the built-in resource of the same name.
/// A new name must give at least `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceOverride {
    pub label: Option<String>,
    pub path: Option<String>,
    pub response_key: Option<String>,
    pub requires_auth: Option<bool>,
    pub default_limit: Option<u32>,
}

impl AppConfig {
    /// Load from an optional YAML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_yaml_str(&contents)
    }

    /// Parse YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply overrides from a variable lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            self.request_timeout_ms = timeout
                .trim()
                .parse()
                .map_err(|e| Error::invalid_value(ENV_TIMEOUT_MS, format!("{e}")))?;
        }
        if let Some(path) = lookup(ENV_TOKEN_FILE) {
            self.token_file = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Reject settings no request could succeed with
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "api_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::invalid_value(
                "request_timeout_ms",
                "must be greater than zero",
            ));
        }
        for name in self.resources.keys() {
            self.resource(name)?;
        }
        Ok(())
    }

    /// Request deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.api_url.clone())
            .timeout(self.timeout());
        if let Some(ref agent) = self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Resolve a resource: built-in definition merged with overrides
    pub fn resource(&self, name: &str) -> Result<ResourceDef> {
        let builtin = ResourceDef::builtin(name);
        let Some(overrides) = self.resources.get(name) else {
            return builtin.ok_or_else(|| Error::unknown_resource(name));
        };

        let mut def = match builtin {
            Some(def) => def,
            None => {
                let path = overrides.path.clone().ok_or_else(|| {
                    Error::invalid_value(format!("resources.{name}.path"), "required")
                })?;
                ResourceDef::new(name, name, path, name)
            }
        };

        if let Some(ref label) = overrides.label {
            def.label.clone_from(label);
        }
        if let Some(ref path) = overrides.path {
            def.path.clone_from(path);
        }
        if let Some(ref key) = overrides.response_key {
            def.response_key.clone_from(key);
        }
        if let Some(auth) = overrides.requires_auth {
            def.requires_auth = auth;
        }
        if let Some(limit) = overrides.default_limit {
            def = def.with_default_limit(limit);
        }
        Ok(def)
    }

    /// Every resolvable resource, built-ins first
    pub fn resources(&self) -> Vec<ResourceDef> {
        let mut names: Vec<&str> = crate::resource::names::ALL.to_vec();
        for name in self.resources.keys() {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        names
            .into_iter()
            .filter_map(|name| self.resource(name).ok())
            .collect()
    }
}
