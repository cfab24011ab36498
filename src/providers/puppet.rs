//! Puppet package provider
//!
//! Default provider. Drives `puppet resource package` so the action is
//! applied by whatever backend puppet itself selects for the host, and
//! parses the reported resource properties back into the result.
//!
//! Provider options other than `timeout` are passed through as extra
//! resource parameters, e.g. `package.puppet.install_options = --no-install-recommends`
//! becomes `install_options=--no-install-recommends` on the command line.

use crate::error::Result;
use crate::providers::{
    ActionResult, PackageProvider, ProviderOptions, StatusResult, timeout_from_options,
};
use crate::utils::exec::{CommandOutput, run_command};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::process::Command;
use std::sync::OnceLock;
use std::time::Duration;

pub struct PuppetProvider {
    package: String,
    options: ProviderOptions,
    timeout: Duration,
}

impl PuppetProvider {
    pub fn new(package: &str, options: ProviderOptions) -> Self {
        let timeout = timeout_from_options(&options);
        Self {
            package: package.to_string(),
            options,
            timeout,
        }
    }

    fn run_resource(&self, ensure: Option<&str>) -> Result<CommandOutput> {
        let mut cmd = Command::new("puppet");
        cmd.arg("resource").arg("package").arg(&self.package);

        if let Some(state) = ensure {
            cmd.arg(format!("ensure={}", state));
        }

        // Deterministic argument order keeps logs and tests stable
        let mut extra: Vec<_> = self
            .options
            .iter()
            .filter(|(k, _)| k.as_str() != "timeout")
            .collect();
        extra.sort();
        for (key, value) in extra {
            cmd.arg(format!("{}={}", key, value));
        }

        run_command(&mut cmd, self.timeout)
    }

    fn apply(&self, ensure: &str) -> Result<ActionResult> {
        let output = self.run_resource(Some(ensure))?;
        let properties = parse_resource_properties(&output.stdout);

        let mut result = ActionResult {
            properties,
            output: None,
            error: None,
        };
        result
            .properties
            .entry("name".to_string())
            .or_insert_with(|| Value::from(self.package.clone()));

        if !output.success() || output.stderr.contains("Error:") {
            Ok(result.failed(output.last_diagnostic()))
        } else {
            Ok(result.with_output(output.stdout))
        }
    }
}

impl PackageProvider for PuppetProvider {
    fn name(&self) -> &'static str {
        "puppet"
    }

    fn install(&self) -> Result<ActionResult> {
        self.apply("present")
    }

    fn update(&self) -> Result<ActionResult> {
        self.apply("latest")
    }

    fn uninstall(&self) -> Result<ActionResult> {
        self.apply("absent")
    }

    fn purge(&self) -> Result<ActionResult> {
        self.apply("purged")
    }

    fn status(&self) -> Result<StatusResult> {
        let output = self.run_resource(None)?;
        let mut properties = parse_resource_properties(&output.stdout);
        properties
            .entry("name".to_string())
            .or_insert_with(|| Value::from(self.package.clone()));

        Ok(StatusResult(properties))
    }
}

/// Parse `property => 'value'` lines out of a `puppet resource` block
fn parse_resource_properties(output: &str) -> HashMap<String, Value> {
    static PROPERTY_RE: OnceLock<Regex> = OnceLock::new();
    let re = PROPERTY_RE
        .get_or_init(|| Regex::new(r"(?m)^\s*(\w+)\s*=>\s*'([^']*)',?\s*$").unwrap());

    re.captures_iter(output)
        .map(|cap| (cap[1].to_string(), Value::from(cap[2].to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resource_block() {
        let output = "package { 'nginx':\n  ensure => '1.18.0-6ubuntu14',\n  provider => 'apt',\n}\n";

        let properties = parse_resource_properties(output);
        assert_eq!(properties.get("ensure"), Some(&Value::from("1.18.0-6ubuntu14")));
        assert_eq!(properties.get("provider"), Some(&Value::from("apt")));
    }

    #[test]
    fn parses_absent_package() {
        let output = "package { 'nosuch':\n  ensure => 'purged',\n}\n";

        let properties = parse_resource_properties(output);
        assert_eq!(properties.get("ensure"), Some(&Value::from("purged")));
    }

    #[test]
    fn ignores_notice_lines() {
        let output = "Notice: /Package[nginx]/ensure: created\npackage { 'nginx':\n  ensure => 'present',\n}\n";

        let properties = parse_resource_properties(output);
        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get("ensure"), Some(&Value::from("present")));
    }
}
