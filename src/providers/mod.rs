//! Provider abstraction for package lifecycle operations
//!
//! A provider wraps one package-management backend (puppet, yum, apt) behind
//! a uniform trait. Providers are constructed per dispatch from the target
//! package and the options scoped to them in the plugin configuration, and
//! report results through the typed shapes below rather than raw process
//! output.

pub mod apt;
pub mod puppet;
pub mod registry;
pub mod yum;

use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;

pub use registry::{ProviderFactory, ProviderRegistry, create_provider};

/// Options scoped to one provider, extracted from `package.<provider>.*`
pub type ProviderOptions = HashMap<String, String>;

/// Result of an install/update/uninstall/purge action.
///
/// `properties` are merged into the reply before the error check, so fields
/// written by a failing action remain visible to the caller. A present
/// `error` marks the action failed even when properties were reported;
/// `output` is only surfaced on success.
#[derive(Debug, Default, Clone)]
pub struct ActionResult {
    pub properties: HashMap<String, Value>,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl ActionResult {
    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn failed(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

/// Result of the `status` action: a flat property map merged directly into
/// the reply, with no wrapper key.
#[derive(Debug, Default, Clone)]
pub struct StatusResult(pub HashMap<String, Value>);

impl StatusResult {
    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }
}

/// Capability contract every package provider implements.
///
/// Implementations shell out to their backend synchronously; the dispatcher
/// treats each call as fully blocking for the duration of one action.
pub trait PackageProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn install(&self) -> Result<ActionResult>;
    fn update(&self) -> Result<ActionResult>;
    fn uninstall(&self) -> Result<ActionResult>;
    fn purge(&self) -> Result<ActionResult>;
    fn status(&self) -> Result<StatusResult>;
}

/// Seconds a provider waits on its backend before giving up, overridable
/// per provider via the `timeout` option.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 300;

pub(crate) fn timeout_from_options(options: &ProviderOptions) -> std::time::Duration {
    let secs = options
        .get("timeout")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    std::time::Duration::from_secs(secs)
}
