//! Yum package provider
//!
//! Lifecycle actions go through `yum -y`; status queries go straight to the
//! rpm database. Purge is an alias for remove, yum has no purge concept.
//!
//! Recognized provider options: `timeout` (seconds), `enablerepo`,
//! `disablerepo`.

use crate::error::Result;
use crate::providers::{
    ActionResult, PackageProvider, ProviderOptions, StatusResult, timeout_from_options,
};
use crate::utils::exec::run_command;
use serde_json::Value;
use std::collections::HashMap;
use std::process::Command;
use std::time::Duration;

pub struct YumProvider {
    package: String,
    options: ProviderOptions,
    timeout: Duration,
}

impl YumProvider {
    pub fn new(package: &str, options: ProviderOptions) -> Self {
        let timeout = timeout_from_options(&options);
        Self {
            package: package.to_string(),
            options,
            timeout,
        }
    }

    fn rpm_properties(&self) -> Result<HashMap<String, Value>> {
        let mut cmd = Command::new("rpm");
        cmd.arg("-q")
            .arg("--queryformat")
            .arg("%{NAME}|%{VERSION}|%{RELEASE}|%{ARCH}")
            .arg(&self.package);

        let output = run_command(&mut cmd, self.timeout)?;

        let mut properties = HashMap::new();
        properties.insert("name".to_string(), Value::from(self.package.clone()));

        if output.success() {
            let fields: Vec<&str> = output.stdout.trim().split('|').collect();
            if fields.len() == 4 {
                properties.insert("name".to_string(), Value::from(fields[0]));
                properties.insert("version".to_string(), Value::from(fields[1]));
                properties.insert("release".to_string(), Value::from(fields[2]));
                properties.insert("arch".to_string(), Value::from(fields[3]));
                properties.insert(
                    "ensure".to_string(),
                    Value::from(format!("{}-{}", fields[1], fields[2])),
                );
                return Ok(properties);
            }
        }

        properties.insert("ensure".to_string(), Value::from("absent"));
        Ok(properties)
    }

    fn run_yum(&self, args: &[&str]) -> Result<ActionResult> {
        let mut cmd = Command::new("yum");
        cmd.arg("-y");
        if let Some(repo) = self.options.get("enablerepo") {
            cmd.arg(format!("--enablerepo={}", repo));
        }
        if let Some(repo) = self.options.get("disablerepo") {
            cmd.arg(format!("--disablerepo={}", repo));
        }
        cmd.args(args).arg(&self.package);

        let output = run_command(&mut cmd, self.timeout)?;

        let result = ActionResult {
            properties: self.rpm_properties()?,
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

impl PackageProvider for YumProvider {
    fn name(&self) -> &'static str {
        "yum"
    }

    fn install(&self) -> Result<ActionResult> {
        self.run_yum(&["install"])
    }

    fn update(&self) -> Result<ActionResult> {
        self.run_yum(&["update"])
    }

    fn uninstall(&self) -> Result<ActionResult> {
        self.run_yum(&["remove"])
    }

    fn purge(&self) -> Result<ActionResult> {
        self.run_yum(&["remove"])
    }

    fn status(&self) -> Result<StatusResult> {
        Ok(StatusResult(self.rpm_properties()?))
    }
}
