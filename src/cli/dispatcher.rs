//! Command dispatcher
//!
//! Routes CLI commands to the agent and renders the reply.

use crate::agent::{Action, PackageAgent, Reply, Request};
use crate::cli::args::{Cli, Command};
use crate::config::PluginConfig;
use crate::error::{AgentError, Result};
use crate::ui;

/// Dispatch the parsed CLI command to the agent
pub fn dispatch(args: &Cli) -> Result<()> {
    let config = match &args.global.config {
        Some(path) => PluginConfig::load(path)?,
        None => PluginConfig::new(),
    };

    let agent = PackageAgent::new(config);
    let (action, request) = to_action(&args.command);

    let reply = agent.handle(action, &request);
    render(&reply, action, args.global.json)?;

    if reply.is_failed() {
        return Err(AgentError::ActionFailed(reply.statusmsg.clone()));
    }
    Ok(())
}

fn to_action(command: &Command) -> (Action, Request) {
    match command {
        Command::Install { package } => (Action::Install, Request::for_package(package)),
        Command::Update { package } => (Action::Update, Request::for_package(package)),
        Command::Uninstall { package } => (Action::Uninstall, Request::for_package(package)),
        Command::Purge { package } => (Action::Purge, Request::for_package(package)),
        Command::Status { package } => (Action::Status, Request::for_package(package)),
        Command::YumClean { mode } => (
            Action::YumClean,
            Request {
                package: None,
                mode: mode.clone(),
            },
        ),
        Command::AptUpdate => (Action::AptUpdate, Request::default()),
        Command::Checkupdates => (Action::Checkupdates, Request::default()),
        Command::YumCheckupdates => (Action::YumCheckupdates, Request::default()),
        Command::AptCheckupdates => (Action::AptCheckupdates, Request::default()),
    }
}

fn render(reply: &Reply, action: Action, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&reply.to_json())?);
        return Ok(());
    }

    ui::header(action.as_str());

    let mut keys: Vec<_> = reply.data.keys().cloned().collect();
    keys.sort();
    for key in keys {
        let value = &reply.data[&key];
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        ui::keyval(&key, &rendered);
    }

    if !reply.is_failed() {
        ui::success("done");
    }
    Ok(())
}
