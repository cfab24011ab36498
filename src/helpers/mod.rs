//! Stateless maintenance helpers
//!
//! Non-lifecycle operations (cache cleaning, update checks) do not go
//! through a provider; they talk to the system package manager directly and
//! report raw exit codes and output. The trait seam exists so the agent can
//! be tested without a package manager on the host.

pub mod parse;
pub mod shell;

use crate::error::Result;
use serde::Serialize;

pub use shell::ShellHelpers;

/// One package with a pending update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutdatedPackage {
    pub package: String,
    pub version: String,
    pub repo: String,
}

/// Raw result of a helper invocation, copied verbatim into the reply
#[derive(Debug, Clone, Default, Serialize)]
pub struct HelperOutcome {
    pub exitcode: i32,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdated_packages: Option<Vec<OutdatedPackage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,
}

pub trait PackageHelpers: Send + Sync {
    /// Clean the yum cache. `mode` must be one of yum's clean targets.
    fn yum_clean(&self, mode: &str) -> Result<HelperOutcome>;

    /// Refresh the apt package index
    fn apt_update(&self) -> Result<HelperOutcome>;

    /// Check for updates with whichever package system the host has
    fn checkupdates(&self) -> Result<HelperOutcome>;

    fn yum_checkupdates(&self) -> Result<HelperOutcome>;

    fn apt_checkupdates(&self) -> Result<HelperOutcome>;
}
