//! Dispatch semantics exercised through mock providers and helpers

use pkgagent::agent::{Action, PackageAgent, Request};
use pkgagent::config::PluginConfig;
use pkgagent::error::{AgentError, Result};
use pkgagent::helpers::{HelperOutcome, OutdatedPackage, PackageHelpers};
use pkgagent::providers::{
    ActionResult, PackageProvider, ProviderOptions, ProviderRegistry, StatusResult,
};
use std::sync::{Arc, Mutex};

struct MockProvider {
    result: ActionResult,
}

impl PackageProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn install(&self) -> Result<ActionResult> {
        Ok(self.result.clone())
    }

    fn update(&self) -> Result<ActionResult> {
        Ok(self.result.clone())
    }

    fn uninstall(&self) -> Result<ActionResult> {
        Ok(self.result.clone())
    }

    fn purge(&self) -> Result<ActionResult> {
        Ok(self.result.clone())
    }

    fn status(&self) -> Result<StatusResult> {
        Ok(StatusResult::default()
            .with_property("name", "pkg1")
            .with_property("ensure", "present"))
    }
}

fn mock_agent(result: ActionResult) -> PackageAgent {
    let mut registry = ProviderRegistry::new();
    registry.register("mock", move |_, _| {
        Ok(Box::new(MockProvider {
            result: result.clone(),
        }))
    });

    let config = PluginConfig::from_pairs([("package.provider", "mock")]);
    PackageAgent::new(config).with_registry(registry)
}

#[test]
fn lifecycle_actions_merge_status_properties() {
    for action in [
        Action::Install,
        Action::Update,
        Action::Uninstall,
        Action::Purge,
    ] {
        let agent = mock_agent(ActionResult::default().with_property("pkg1", "present"));
        let reply = agent.handle(action, &Request::for_package("pkg1"));

        assert!(!reply.is_failed(), "{} should succeed", action);
        assert_eq!(reply.get("pkg1"), Some(&"present".into()));
    }
}

#[test]
fn result_error_fails_reply_but_partial_writes_survive() {
    let agent = mock_agent(
        ActionResult::default()
            .with_property("ensure", "absent")
            .with_property("name", "nginx")
            .failed("no space left on device"),
    );

    let reply = agent.handle(Action::Install, &Request::for_package("nginx"));

    assert!(reply.is_failed());
    assert_eq!(
        reply.statusmsg,
        "Could not install package: no space left on device"
    );
    assert_eq!(reply.get("ensure"), Some(&"absent".into()));
    assert_eq!(reply.get("name"), Some(&"nginx".into()));
}

#[test]
fn status_result_merges_without_wrapper() {
    let agent = mock_agent(ActionResult::default());
    let reply = agent.handle(Action::Status, &Request::for_package("pkg1"));

    assert!(!reply.is_failed());
    assert_eq!(reply.get("name"), Some(&"pkg1".into()));
    assert_eq!(reply.get("ensure"), Some(&"present".into()));
    assert!(reply.get("status").is_none());
}

#[test]
fn provider_receives_scoped_options() {
    let seen: Arc<Mutex<Option<ProviderOptions>>> = Arc::new(Mutex::new(None));
    let seen_in_factory = Arc::clone(&seen);

    let mut registry = ProviderRegistry::new();
    registry.register("mock", move |_, options| {
        *seen_in_factory.lock().unwrap() = Some(options);
        Ok(Box::new(MockProvider {
            result: ActionResult::default(),
        }))
    });

    let config = PluginConfig::from_pairs([
        ("package.provider", "mock"),
        ("package.mock.timeout", "30"),
        ("package.other.x", "1"),
    ]);
    let agent = PackageAgent::new(config).with_registry(registry);

    agent.handle(Action::Install, &Request::for_package("nginx"));

    let options = seen.lock().unwrap().clone().expect("factory was called");
    assert_eq!(options.len(), 1);
    assert_eq!(options.get("timeout").map(String::as_str), Some("30"));
}

#[derive(Default)]
struct MockHelpers {
    last_yum_clean_mode: Mutex<Option<String>>,
    fail_with: Option<String>,
}

impl PackageHelpers for MockHelpers {
    fn yum_clean(&self, mode: &str) -> Result<HelperOutcome> {
        if let Some(msg) = &self.fail_with {
            return Err(AgentError::Helper(msg.clone()));
        }
        *self.last_yum_clean_mode.lock().unwrap() = Some(mode.to_string());
        Ok(HelperOutcome {
            exitcode: 0,
            output: format!("cleaned {}", mode),
            ..Default::default()
        })
    }

    fn apt_update(&self) -> Result<HelperOutcome> {
        Ok(HelperOutcome {
            exitcode: 0,
            output: "Reading package lists...".to_string(),
            ..Default::default()
        })
    }

    fn checkupdates(&self) -> Result<HelperOutcome> {
        Ok(HelperOutcome {
            exitcode: 100,
            output: "2 updates pending".to_string(),
            outdated_packages: Some(vec![
                OutdatedPackage {
                    package: "a".to_string(),
                    version: "1.1".to_string(),
                    repo: "main".to_string(),
                },
                OutdatedPackage {
                    package: "b".to_string(),
                    version: "2.0".to_string(),
                    repo: "updates".to_string(),
                },
            ]),
            package_manager: Some("apt".to_string()),
        })
    }

    fn yum_checkupdates(&self) -> Result<HelperOutcome> {
        self.checkupdates()
    }

    fn apt_checkupdates(&self) -> Result<HelperOutcome> {
        self.checkupdates()
    }
}

#[test]
fn yum_clean_mode_defaults_to_all() {
    let agent = PackageAgent::new(PluginConfig::new()).with_helpers(Box::new(MockHelpers::default()));

    let reply = agent.handle(Action::YumClean, &Request::default());
    assert!(!reply.is_failed());
    assert_eq!(reply.get("output"), Some(&"cleaned all".into()));
}

#[test]
fn yum_clean_mode_falls_back_to_configuration() {
    let config = PluginConfig::from_pairs([("package.yum_clean_mode", "expire-cache")]);
    let agent = PackageAgent::new(config).with_helpers(Box::new(MockHelpers::default()));

    let reply = agent.handle(Action::YumClean, &Request::default());
    assert_eq!(reply.get("output"), Some(&"cleaned expire-cache".into()));
}

#[test]
fn yum_clean_request_mode_wins_over_configuration() {
    let config = PluginConfig::from_pairs([("package.yum_clean_mode", "expire-cache")]);
    let agent = PackageAgent::new(config).with_helpers(Box::new(MockHelpers::default()));

    let request = Request {
        package: None,
        mode: Some("metadata".to_string()),
    };
    let reply = agent.handle(Action::YumClean, &request);
    assert_eq!(reply.get("output"), Some(&"cleaned metadata".into()));
}

#[test]
fn checkupdates_copies_helper_fields_verbatim() {
    let agent = PackageAgent::new(PluginConfig::new()).with_helpers(Box::new(MockHelpers::default()));

    let reply = agent.handle(Action::Checkupdates, &Request::default());

    assert!(!reply.is_failed());
    assert_eq!(reply.get("exitcode"), Some(&100.into()));
    assert_eq!(reply.get("output"), Some(&"2 updates pending".into()));
    assert_eq!(reply.get("package_manager"), Some(&"apt".into()));

    let outdated = reply
        .get("outdated_packages")
        .and_then(|v| v.as_array())
        .expect("outdated_packages array");
    assert_eq!(outdated.len(), 2);
    assert_eq!(outdated[0]["package"], "a");
    assert_eq!(outdated[1]["repo"], "updates");
}

#[test]
fn helper_failure_uses_raw_message_without_prefix() {
    let helpers = MockHelpers {
        fail_with: Some("Cannot find yum on this system".to_string()),
        ..Default::default()
    };
    let agent = PackageAgent::new(PluginConfig::new()).with_helpers(Box::new(helpers));

    let reply = agent.handle(Action::YumClean, &Request::default());
    assert!(reply.is_failed());
    assert_eq!(reply.statusmsg, "Cannot find yum on this system");
}

#[test]
fn provider_selection_follows_each_agents_config() {
    // The provider comes from the config object handed to each agent, not
    // from any process-wide state.
    let registry_a = {
        let mut r = ProviderRegistry::new();
        r.register("mock", |_, _| {
            Ok(Box::new(MockProvider {
                result: ActionResult::default().with_property("via", "mock"),
            }))
        });
        r
    };

    let ok = PackageAgent::new(PluginConfig::from_pairs([("package.provider", "mock")]))
        .with_registry(registry_a);
    let missing = PackageAgent::new(PluginConfig::from_pairs([("package.provider", "nope")]));

    assert!(!ok.handle(Action::Install, &Request::for_package("x")).is_failed());
    assert!(missing.handle(Action::Install, &Request::for_package("x")).is_failed());
}
