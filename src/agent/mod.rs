//! Action dispatcher
//!
//! `PackageAgent` is the boundary between the host runtime and the provider
//! plugins. Every dispatch resolves the configured provider and its scoped
//! options fresh from the plugin configuration, runs the action, and
//! normalizes the provider's result into the reply. Errors anywhere along
//! that chain are converted to reply failures here; nothing propagates past
//! the dispatcher.

pub mod action;
pub mod reply;

use crate::config::PluginConfig;
use crate::error::{AgentError, Result};
use crate::helpers::{HelperOutcome, PackageHelpers, ShellHelpers};
use crate::providers::ProviderRegistry;
use crate::providers::registry::canonical_class_name;
use crate::ui;

pub use action::Action;
pub use reply::{Reply, Request};

pub const DEFAULT_PROVIDER: &str = "puppet";

pub struct PackageAgent {
    config: PluginConfig,
    registry: ProviderRegistry,
    helpers: Box<dyn PackageHelpers>,
}

impl PackageAgent {
    /// Agent with the built-in providers and shell helpers
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            registry: ProviderRegistry::default(),
            helpers: Box::new(ShellHelpers::new()),
        }
    }

    /// Replace the provider registry (embedders, tests)
    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the helper implementation (embedders, tests)
    pub fn with_helpers(mut self, helpers: Box<dyn PackageHelpers>) -> Self {
        self.helpers = helpers;
        self
    }

    /// Dispatch one action. This is the error boundary: the returned reply
    /// is either ok or failed, with any fields written before a failure
    /// still present.
    pub fn handle(&self, action: Action, request: &Request) -> Reply {
        let mut reply = Reply::new();

        if action.is_lifecycle() {
            let outcome = request
                .package
                .as_deref()
                .ok_or(AgentError::MissingArgument("package"))
                .and_then(|package| self.do_pkg_action(package, action, &mut reply));

            if let Err(e) = outcome {
                reply.fail(format!("{}{}", action.fail_prefix(), e));
            }
            return reply;
        }

        let outcome = match action {
            Action::YumClean => {
                let mode = request
                    .mode
                    .clone()
                    .unwrap_or_else(|| self.config.fetch("package.yum_clean_mode", "all"));
                self.helpers
                    .yum_clean(&mode)
                    .map(|result| copy_helper_outcome(&result, &mut reply, false))
            }
            Action::AptUpdate => self
                .helpers
                .apt_update()
                .map(|result| copy_helper_outcome(&result, &mut reply, false)),
            Action::Checkupdates => self
                .helpers
                .checkupdates()
                .map(|result| copy_helper_outcome(&result, &mut reply, true)),
            Action::YumCheckupdates => self
                .helpers
                .yum_checkupdates()
                .map(|result| copy_helper_outcome(&result, &mut reply, true)),
            Action::AptCheckupdates => self
                .helpers
                .apt_checkupdates()
                .map(|result| copy_helper_outcome(&result, &mut reply, true)),
            _ => unreachable!("lifecycle actions handled above"),
        };

        // Helper failures carry the raw message, no action prefix
        if let Err(e) = outcome {
            reply.fail(e.to_string());
        }
        reply
    }

    /// Resolve the configured provider and run one lifecycle action.
    ///
    /// Provider name and options are re-read on every call so configuration
    /// changes apply to the next dispatch.
    fn do_pkg_action(&self, package: &str, action: Action, reply: &mut Reply) -> Result<()> {
        let provider_name = self.config.fetch("package.provider", DEFAULT_PROVIDER);
        ui::debug(&format!(
            "Loading {} package provider",
            canonical_class_name(&provider_name)
        ));

        let options = self.config.provider_options(&provider_name);
        let provider = self.registry.create(&provider_name, package, options)?;

        if action == Action::Status {
            let result = provider.status()?;
            for (key, value) in result.0 {
                reply.set(key, value);
            }
            return Ok(());
        }

        let result = match action {
            Action::Install => provider.install()?,
            Action::Update => provider.update()?,
            Action::Uninstall => provider.uninstall()?,
            Action::Purge => provider.purge()?,
            _ => unreachable!("status handled above, helpers never reach here"),
        };

        // Properties land in the reply before the error check so they
        // survive into a failed reply.
        for (key, value) in result.properties {
            reply.set(key, value);
        }

        if let Some(message) = result.error {
            return Err(AgentError::ProviderExecution(message));
        }

        if let Some(output) = result.output {
            reply.set("output", output);
        }

        Ok(())
    }
}

/// Copy a helper outcome into the reply field-for-field
fn copy_helper_outcome(result: &HelperOutcome, reply: &mut Reply, checkupdates: bool) {
    reply.set("exitcode", result.exitcode);
    reply.set("output", result.output.clone());

    if checkupdates {
        let outdated = result.outdated_packages.clone().unwrap_or_default();
        reply.set(
            "outdated_packages",
            serde_json::to_value(outdated).unwrap_or_default(),
        );
        reply.set(
            "package_manager",
            result.package_manager.clone().unwrap_or_default(),
        );
    }
}
