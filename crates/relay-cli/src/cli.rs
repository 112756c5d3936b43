//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// relay - Sync skills, commands and agents into AI tool directories
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project configuration file [default: ./relay.toml]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Global configuration file [default: <config dir>/relay/config.toml]
    #[arg(long, global = true, env = "RELAY_GLOBAL_CONFIG", value_name = "PATH")]
    pub global_config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Sync artifacts from source trees into destinations
    ///
    /// Examples:
    ///   relay sync                      # Current directory to default harnesses
    ///   relay sync -t opencode          # Only the opencode harness
    ///   relay sync -s ../shared -s .    # Several sources, in priority order
    Sync(SyncArgs),

    /// Report managed files that were edited or removed
    Check {
        /// Harnesses to check (defaults to the configured defaults)
        #[arg(short, long = "target", value_name = "HARNESS")]
        targets: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write a relay.toml listing the artifacts in this directory
    Init {
        /// Default harnesses to record (defaults to the built-in defaults)
        #[arg(short, long = "target", value_name = "HARNESS")]
        targets: Vec<String>,
    },

    /// Write .relay/manifest.yaml for this source tree
    Manifest,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncArgs {
    /// Source directories (defaults to the current directory)
    #[arg(short, long = "source", value_name = "PATH")]
    pub sources: Vec<PathBuf>,

    /// Harnesses to sync (defaults to the configured defaults)
    #[arg(short, long = "target", value_name = "HARNESS")]
    pub targets: Vec<String>,

    /// Preview changes without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite files relay does not manage
    #[arg(short, long)]
    pub force: bool,

    /// Ask how to resolve each conflict
    #[arg(short, long)]
    pub interactive: bool,
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show global, project and merged configuration
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_sync_flags() {
        let cli = Cli::parse_from([
            "relay", "sync", "-s", "a", "--source", "b", "-t", "claude", "--dry-run", "-f",
        ]);
        let Some(Commands::Sync(args)) = cli.command else {
            panic!("expected sync");
        };
        assert_eq!(args.sources, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(args.targets, vec!["claude"]);
        assert!(args.dry_run);
        assert!(args.force);
        assert!(!args.interactive);
    }

    #[test]
    fn parse_global_config_flag_after_subcommand() {
        let cli = Cli::parse_from(["relay", "check", "--config", "x.toml", "-v"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_list() {
        let cli = Cli::parse_from(["relay", "config", "list"]);
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::List
            })
        );
    }
}
