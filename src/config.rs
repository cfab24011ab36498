//! Plugin configuration store
//!
//! Flat dotted-key configuration for the agent and its providers. Provider
//! plugins are configured under their own namespace:
//!
//!   package.provider = yum
//!   package.yum.enablerepo = updates
//!
//! The store is read fresh on every dispatch, so a changed configuration
//! object takes effect on the next call without restarting the agent.

use crate::error::{AgentError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read-only key/value configuration handed to the agent at construction
#[derive(Debug, Clone, Default)]
pub struct PluginConfig {
    values: HashMap<String, String>,
}

impl PluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from key/value pairs (tests, embedders)
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load a `key = value` config file. Blank lines and `#` comments are
    /// skipped; whitespace around keys and values is trimmed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AgentError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| AgentError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut values = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a value, falling back to the supplied default
    pub fn fetch(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Extract every option scoped to one provider.
    ///
    /// Options are declared as `package.<provider>.<option> = value` and
    /// returned as `<option> -> value`. The match is anchored to the full
    /// `package.<provider>.` prefix so a provider whose name is a prefix of
    /// another namespace (`puppet` vs `puppetserver`) does not over-match.
    /// Values pass through uncoerced.
    pub fn provider_options(&self, provider: &str) -> HashMap<String, String> {
        let prefix = format!("package.{}.", provider);
        let mut options = HashMap::new();

        for (key, value) in &self.values {
            if key.starts_with(&prefix) {
                if let Some(option) = key.rsplit('.').next() {
                    options.insert(option.to_string(), value.clone());
                }
            }
        }

        options
    }
}
