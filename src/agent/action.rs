use std::fmt;
use std::str::FromStr;

/// The fixed set of actions the agent exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Install,
    Update,
    Uninstall,
    Purge,
    Status,
    YumClean,
    AptUpdate,
    Checkupdates,
    YumCheckupdates,
    AptCheckupdates,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Install => "install",
            Action::Update => "update",
            Action::Uninstall => "uninstall",
            Action::Purge => "purge",
            Action::Status => "status",
            Action::YumClean => "yum_clean",
            Action::AptUpdate => "apt_update",
            Action::Checkupdates => "checkupdates",
            Action::YumCheckupdates => "yum_checkupdates",
            Action::AptCheckupdates => "apt_checkupdates",
        }
    }

    /// Actions that go through a provider and require a target package
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Action::Install
                | Action::Update
                | Action::Uninstall
                | Action::Purge
                | Action::Status
        )
    }

    /// Human-readable prefix prepended to lifecycle failure messages
    pub fn fail_prefix(&self) -> &'static str {
        match self {
            Action::Install => "Could not install package: ",
            Action::Update => "Could not update package: ",
            Action::Uninstall => "Could not uninstall package: ",
            Action::Purge => "Could not purge package: ",
            Action::Status => "Could not determine package status: ",
            _ => "",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "install" => Ok(Action::Install),
            "update" => Ok(Action::Update),
            "uninstall" => Ok(Action::Uninstall),
            "purge" => Ok(Action::Purge),
            "status" => Ok(Action::Status),
            "yum_clean" => Ok(Action::YumClean),
            "apt_update" => Ok(Action::AptUpdate),
            "checkupdates" => Ok(Action::Checkupdates),
            "yum_checkupdates" => Ok(Action::YumCheckupdates),
            "apt_checkupdates" => Ok(Action::AptCheckupdates),
            other => Err(format!("Unknown action: {}", other)),
        }
    }
}
