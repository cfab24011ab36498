pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod helpers;
pub mod providers;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::process::exit;

/// Run pkgagent CLI entrypoint.
pub fn run_cli() {
    // Color settings must be initialized before any output
    ui::init_colors();

    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    if let Err(e) = cli::dispatcher::dispatch(&args) {
        ui::error(&format!("{}", e));
        exit(1);
    }
}
