//! Shell-backed helper implementation

use crate::error::{AgentError, Result};
use crate::helpers::parse::{parse_apt_checkupdates, parse_yum_checkupdates};
use crate::helpers::{HelperOutcome, PackageHelpers};
use crate::utils::exec::run_command;
use std::process::Command;
use std::time::Duration;

const HELPER_TIMEOUT: Duration = Duration::from_secs(300);

const YUM_CLEAN_MODES: &[&str] = &[
    "all",
    "headers",
    "packages",
    "metadata",
    "dbcache",
    "plugins",
    "expire-cache",
];

/// Helpers that shell out to the host package manager
#[derive(Debug, Default)]
pub struct ShellHelpers;

impl ShellHelpers {
    pub fn new() -> Self {
        Self
    }

    fn require_binary(&self, name: &str) -> Result<()> {
        which::which(name)
            .map(|_| ())
            .map_err(|_| AgentError::Helper(format!("Cannot find {} on this system", name)))
    }
}

impl PackageHelpers for ShellHelpers {
    fn yum_clean(&self, mode: &str) -> Result<HelperOutcome> {
        self.require_binary("yum")?;

        if !YUM_CLEAN_MODES.contains(&mode) {
            return Err(AgentError::Helper(format!(
                "Unsupported yum clean mode: {}",
                mode
            )));
        }

        let mut cmd = Command::new("yum");
        cmd.arg("clean").arg(mode);
        let output = run_command(&mut cmd, HELPER_TIMEOUT)?;

        if !output.success() {
            return Err(AgentError::Helper(format!(
                "Yum clean failed, exit code was {}",
                output.exitcode
            )));
        }

        Ok(HelperOutcome {
            exitcode: output.exitcode,
            output: output.combined(),
            ..Default::default()
        })
    }

    fn apt_update(&self) -> Result<HelperOutcome> {
        self.require_binary("apt-get")?;

        let mut cmd = Command::new("apt-get");
        cmd.env("DEBIAN_FRONTEND", "noninteractive").arg("update");
        let output = run_command(&mut cmd, HELPER_TIMEOUT)?;

        if !output.success() {
            return Err(AgentError::Helper(format!(
                "Apt update failed, exit code was {}",
                output.exitcode
            )));
        }

        Ok(HelperOutcome {
            exitcode: output.exitcode,
            output: output.combined(),
            ..Default::default()
        })
    }

    fn checkupdates(&self) -> Result<HelperOutcome> {
        if which::which("yum").is_ok() {
            self.yum_checkupdates()
        } else if which::which("apt-get").is_ok() {
            self.apt_checkupdates()
        } else {
            Err(AgentError::Helper(
                "Cannot find a compatible package system to check for updates".to_string(),
            ))
        }
    }

    fn yum_checkupdates(&self) -> Result<HelperOutcome> {
        self.require_binary("yum")?;

        let mut cmd = Command::new("yum");
        cmd.arg("-q").arg("check-update");
        let output = run_command(&mut cmd, HELPER_TIMEOUT)?;

        // yum exits 100 when updates are pending, 0 when none
        if output.exitcode != 0 && output.exitcode != 100 {
            return Err(AgentError::Helper(format!(
                "Yum check-update failed, exit code was {}",
                output.exitcode
            )));
        }

        let combined = output.combined();
        Ok(HelperOutcome {
            exitcode: output.exitcode,
            outdated_packages: Some(parse_yum_checkupdates(&combined)),
            package_manager: Some("yum".to_string()),
            output: combined,
        })
    }

    fn apt_checkupdates(&self) -> Result<HelperOutcome> {
        self.require_binary("apt-get")?;

        let mut cmd = Command::new("apt-get");
        cmd.env("DEBIAN_FRONTEND", "noninteractive")
            .arg("--simulate")
            .arg("upgrade");
        let output = run_command(&mut cmd, HELPER_TIMEOUT)?;

        if !output.success() {
            return Err(AgentError::Helper(format!(
                "Apt check-update failed, exit code was {}",
                output.exitcode
            )));
        }

        let combined = output.combined();
        Ok(HelperOutcome {
            exitcode: output.exitcode,
            outdated_packages: Some(parse_apt_checkupdates(&combined)),
            package_manager: Some("apt".to_string()),
            output: combined,
        })
    }
}
