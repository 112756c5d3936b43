//! relay CLI
//!
//! Syncs skills, commands and agents from source trees into the
//! directories AI coding tools read them from.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, ConfigAction};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialise logging: {}", "warning".yellow(), e);
    }

    let cwd = std::env::current_dir()?;
    let ctx = Context::new(cwd, cli.config, cli.global_config);

    match cli.command {
        Some(cmd) => execute_command(&ctx, cmd),
        None => {
            // No command provided - show help hint
            println!("{} artifact sync", "relay".green().bold());
            println!();
            println!("Run {} for available commands.", "relay --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync(args) => commands::run_sync(ctx, &args),
        Commands::Check { targets, json } => commands::run_check(ctx, &targets, json),
        Commands::Init { targets } => commands::run_init(ctx, &targets),
        Commands::Manifest => commands::run_manifest(ctx),
        Commands::Config { action } => match action {
            ConfigAction::List => commands::run_config_list(ctx),
        },
    }
}
