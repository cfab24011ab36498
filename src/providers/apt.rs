//! Apt package provider
//!
//! Lifecycle actions go through `apt-get -y` with a noninteractive
//! frontend; status queries go through `dpkg-query`. Update maps to
//! `install --only-upgrade` so an action on one package never upgrades
//! the whole system.
//!
//! Recognized provider options: `timeout` (seconds), `install_options`
//! (extra apt-get arguments, whitespace separated).

use crate::error::Result;
use crate::providers::{
    ActionResult, PackageProvider, ProviderOptions, StatusResult, timeout_from_options,
};
use crate::utils::exec::run_command;
use serde_json::Value;
use std::collections::HashMap;
use std::process::Command;
use std::time::Duration;

pub struct AptProvider {
    package: String,
    options: ProviderOptions,
    timeout: Duration,
}

impl AptProvider {
    pub fn new(package: &str, options: ProviderOptions) -> Self {
        let timeout = timeout_from_options(&options);
        Self {
            package: package.to_string(),
            options,
            timeout,
        }
    }

    fn dpkg_properties(&self) -> Result<HashMap<String, Value>> {
        let mut cmd = Command::new("dpkg-query");
        cmd.arg("-W")
            .arg("-f=${Package}|${Version}|${Architecture}|${db:Status-Status}")
            .arg(&self.package);

        let output = run_command(&mut cmd, self.timeout)?;

        let mut properties = HashMap::new();
        properties.insert("name".to_string(), Value::from(self.package.clone()));

        if output.success() {
            let fields: Vec<&str> = output.stdout.trim().split('|').collect();
            if fields.len() == 4 && fields[3] == "installed" {
                properties.insert("name".to_string(), Value::from(fields[0]));
                properties.insert("version".to_string(), Value::from(fields[1]));
                properties.insert("arch".to_string(), Value::from(fields[2]));
                properties.insert("ensure".to_string(), Value::from(fields[1]));
                return Ok(properties);
            }
        }

        properties.insert("ensure".to_string(), Value::from("absent"));
        Ok(properties)
    }

    fn run_apt(&self, args: &[&str]) -> Result<ActionResult> {
        let mut cmd = Command::new("apt-get");
        cmd.env("DEBIAN_FRONTEND", "noninteractive");
        cmd.arg("-y");
        if let Some(extra) = self.options.get("install_options") {
            cmd.args(extra.split_whitespace());
        }
        cmd.args(args).arg(&self.package);

        let output = run_command(&mut cmd, self.timeout)?;

        let result = ActionResult {
            properties: self.dpkg_properties()?,
            output: None,
            error: None,
        };

        if output.success() {
            Ok(result.with_output(output.combined()))
        } else {
            Ok(result.failed(output.last_diagnostic()))
        }
    }
}

impl PackageProvider for AptProvider {
    fn name(&self) -> &'static str {
        "apt"
    }

    fn install(&self) -> Result<ActionResult> {
        self.run_apt(&["install"])
    }

    fn update(&self) -> Result<ActionResult> {
        self.run_apt(&["install", "--only-upgrade"])
    }

    fn uninstall(&self) -> Result<ActionResult> {
        self.run_apt(&["remove"])
    }

    fn purge(&self) -> Result<ActionResult> {
        self.run_apt(&["purge"])
    }

    fn status(&self) -> Result<StatusResult> {
        Ok(StatusResult(self.dpkg_properties()?))
    }
}
