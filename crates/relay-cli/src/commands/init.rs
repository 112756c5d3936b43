//! Init command implementation
//!
//! Writes a `relay.toml` seeded from the built-in defaults and the
//! artifacts found in the current directory.

use colored::Colorize;
use relay_content::SourceManifest;
use relay_meta::{Config, ManifestConfig, write_file};

use crate::context::Context;
use crate::error::{CliError, Result};

/// Run the init command
pub fn run_init(ctx: &Context, targets: &[String]) -> Result<()> {
    let path = ctx.project_config_path();
    if path.exists() {
        return Err(CliError::user(format!(
            "{} already exists. Edit it directly.",
            path.display()
        )));
    }

    let mut config = Config::defaults()?;
    if !targets.is_empty() {
        for target in targets {
            if config.harness(target).is_none() {
                println!(
                    "   {} harness '{}' is not defined yet; add a [harness.{}] table",
                    "!".yellow(),
                    target,
                    target
                );
            }
        }
        config.default_harnesses = targets.to_vec();
    }

    let found = SourceManifest::generate(ctx.cwd(), &config.artifact_dirs())?;
    config.manifest = ManifestConfig {
        skills: found.skills,
        commands: found.commands,
        agents: found.agents,
    };

    write_file(&path, &config)?;

    println!("{} Wrote {}", "OK".green().bold(), path.display());
    println!(
        "   Harnesses: {}",
        config.default_harnesses.join(", ").cyan()
    );
    println!(
        "   Found {} skill(s), {} command(s), {} agent(s)",
        config.manifest.skills.len(),
        config.manifest.commands.len(),
        config.manifest.agents.len()
    );
    Ok(())
}
