use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pkgagent",
    about = "Package lifecycle agent with pluggable provider backends",
    long_about = "Dispatches package install/update/uninstall/purge/status actions to the \
                  configured provider (puppet, yum, apt) and runs package-system maintenance \
                  helpers (cache cleaning, update checks)",
    version,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Plugin configuration file (key = value lines)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the reply as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install a package through the configured provider
    Install { package: String },

    /// Update a package to the latest available version
    Update { package: String },

    /// Uninstall a package
    Uninstall { package: String },

    /// Uninstall a package including its configuration
    Purge { package: String },

    /// Report the current state of a package
    Status { package: String },

    /// Clean the yum cache
    #[command(name = "yum_clean")]
    YumClean {
        /// Clean mode (all, headers, packages, metadata, dbcache, plugins,
        /// expire-cache); defaults to the configured package.yum_clean_mode
        #[arg(long)]
        mode: Option<String>,
    },

    /// Refresh the apt package index
    #[command(name = "apt_update")]
    AptUpdate,

    /// Check for pending updates with the host's package system
    Checkupdates,

    /// Check for pending updates with yum
    #[command(name = "yum_checkupdates")]
    YumCheckupdates,

    /// Check for pending updates with apt
    #[command(name = "apt_checkupdates")]
    AptCheckupdates,
}
