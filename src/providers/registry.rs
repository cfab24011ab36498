//! Provider registry
//!
//! Maps a configured provider name to the factory that builds its
//! implementation. Registration is explicit and happens at startup; the
//! dispatcher resolves the name again on every call, so a registry swapped
//! in by an embedder (or a changed `package.provider` setting) takes effect
//! on the next dispatch without restarting the agent.
//!
//! # Adding a New Provider
//!
//! To add a new provider (e.g. zypper):
//! 1. Create `src/providers/zypper.rs` with a struct implementing
//!    `PackageProvider`
//! 2. Register it in `ProviderRegistry::register_defaults()`:
//!
//! ```no_run
//! # use pkgagent::providers::registry::ProviderRegistry;
//! # use pkgagent::providers::yum::YumProvider;
//! # let mut registry = ProviderRegistry::new();
//! registry.register("zypper", |package, options| {
//!     Ok(Box::new(YumProvider::new(package, options)))
//! });
//! ```

use crate::error::{AgentError, Result};
use crate::providers::{PackageProvider, ProviderOptions};
use std::collections::HashMap;

/// Factory function for creating provider instances
pub type ProviderFactory =
    Box<dyn Fn(&str, ProviderOptions) -> Result<Box<dyn PackageProvider>> + Send + Sync>;

/// Display form of a provider name: capitalized with the `Package` suffix
/// (`puppet` -> `PuppetPackage`). Used in registry identity and load errors.
pub fn canonical_class_name(provider: &str) -> String {
    let mut chars = provider.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("{}Package", capitalized)
}

pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a provider under its configuration name
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&str, ProviderOptions) -> Result<Box<dyn PackageProvider>> + Send + Sync + 'static,
    {
        self.factories
            .insert(name.to_lowercase(), Box::new(factory));
    }

    /// Resolve a provider name to its registered factory.
    ///
    /// Lookup is case-folded. The only error path is an unregistered name,
    /// reported with the canonical class-name form.
    pub fn resolve(&self, name: &str) -> Result<&ProviderFactory> {
        self.factories
            .get(&name.to_lowercase())
            .ok_or_else(|| AgentError::ProviderLoad {
                provider: canonical_class_name(name),
                reason: "provider is not registered".to_string(),
            })
    }

    /// Resolve and instantiate a provider for one dispatch
    pub fn create(
        &self,
        name: &str,
        package: &str,
        options: ProviderOptions,
    ) -> Result<Box<dyn PackageProvider>> {
        let factory = self.resolve(name)?;
        factory(package, options)
    }

    /// Get all registered provider names
    pub fn registered_providers(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// Check if a provider is registered
    pub fn has_provider(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_lowercase())
    }

    /// Register all built-in providers. New providers should be added here
    /// following the existing pattern.
    pub fn register_defaults(&mut self) {
        self.register("puppet", |package, options| {
            Ok(Box::new(crate::providers::puppet::PuppetProvider::new(
                package, options,
            )))
        });

        self.register("yum", |package, options| {
            Ok(Box::new(crate::providers::yum::YumProvider::new(
                package, options,
            )))
        });

        self.register("apt", |package, options| {
            Ok(Box::new(crate::providers::apt::AptProvider::new(
                package, options,
            )))
        });
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }
}

/// Create a provider using a default registry (one-shot embedders)
pub fn create_provider(
    name: &str,
    package: &str,
    options: ProviderOptions,
) -> Result<Box<dyn PackageProvider>> {
    ProviderRegistry::default().create(name, package, options)
}
