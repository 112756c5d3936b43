//! Sync command implementation
//!
//! Runs detection, settles conflicts according to the flags and the
//! configured policy, then applies.

use std::io::IsTerminal;

use colored::Colorize;
use relay_core::{
    ApplyOptions, DetectOptions, Detection, Resolution, ResolutionMap, apply, conflict_key, detect,
};
use relay_meta::{Config, FileExistsPolicy, add_exclusion};

use crate::cli::SyncArgs;
use crate::context::Context;
use crate::error::{CliError, Result};
use crate::interactive::{self, Decision};

/// Run the sync command
pub fn run_sync(ctx: &Context, args: &SyncArgs) -> Result<()> {
    let config = ctx.load_config()?;

    let source_paths = if args.sources.is_empty() {
        vec![ctx.cwd().to_path_buf()]
    } else {
        args.sources.iter().map(|s| ctx.resolve(s)).collect()
    };

    let targets = if args.targets.is_empty() {
        config.default_harnesses.clone()
    } else {
        args.targets.clone()
    };
    if targets.is_empty() {
        return Err(CliError::user(
            "No harnesses to sync. Pass --target or set default_harnesses in relay.toml.",
        ));
    }

    println!(
        "{} Syncing to {}{}",
        "=>".blue().bold(),
        targets.join(", ").cyan(),
        if args.dry_run { " (dry run)".dimmed().to_string() } else { String::new() }
    );

    let detection = detect(
        &config,
        &DetectOptions {
            source_paths,
            destinations: targets,
        },
    )?;

    for error in &detection.errors {
        println!("   {} {}: {}", "!".red(), error.destination.bold(), error.error);
    }

    let resolutions = resolve_conflicts(ctx, &config, &detection, args)?;
    let detection_errors = detection.errors.len();

    let result = apply(
        detection.results,
        &ApplyOptions {
            resolutions,
            dry_run: args.dry_run,
            force: args.force,
        },
    );

    let verb = if args.dry_run { "Would sync" } else { "Synced" };
    println!(
        "{} {} {} artifact(s)",
        "OK".green().bold(),
        verb,
        result.synced
    );
    if result.generated > 0 {
        println!("   {} generated command(s)", result.generated);
    }
    if result.skipped > 0 {
        println!("   {} skipped", result.skipped.to_string().yellow());
    }
    for error in &result.errors {
        println!("   {} {}", "!".red(), error);
    }

    let failures = detection_errors + result.errors.len();
    if failures > 0 {
        return Err(CliError::user(format!("Sync finished with {failures} error(s)")));
    }
    Ok(())
}

fn resolve_conflicts(
    ctx: &Context,
    config: &Config,
    detection: &Detection,
    args: &SyncArgs,
) -> Result<ResolutionMap> {
    if args.force || !detection.has_conflicts() {
        return Ok(ResolutionMap::new());
    }

    if args.dry_run {
        list_conflicts(detection);
        return Ok(ResolutionMap::new());
    }

    let policy = if args.interactive {
        FileExistsPolicy::Prompt
    } else {
        config.conflict.file_exists()
    };

    match policy {
        FileExistsPolicy::Overwrite => Ok(uniform(detection, Resolution::Overwrite)),
        FileExistsPolicy::Skip => Ok(uniform(detection, Resolution::Skip)),
        FileExistsPolicy::Prompt if args.interactive || std::io::stdin().is_terminal() => {
            let decisions = interactive::prompt_conflicts(&detection.results)?;
            persist_skips(ctx, &decisions);
            Ok(decisions
                .into_iter()
                .map(|d| (conflict_key(&d.destination, &d.artifact), d.resolution))
                .collect())
        }
        FileExistsPolicy::Prompt | FileExistsPolicy::Error => {
            list_conflicts(detection);
            Err(CliError::user(format!(
                "{} file(s) exist that relay does not manage. \
                 Rerun with --interactive to choose, or --force to overwrite.",
                detection.conflicts().count()
            )))
        }
    }
}

fn uniform(detection: &Detection, resolution: Resolution) -> ResolutionMap {
    detection
        .conflicts()
        .map(|c| (c.key(), resolution))
        .collect()
}

fn list_conflicts(detection: &Detection) {
    println!("{} Unmanaged files in the way:", "CONFLICT".yellow().bold());
    for conflict in detection.conflicts() {
        println!(
            "   {} {} ({})",
            "-".yellow(),
            conflict.existing_path.display().to_string().cyan(),
            conflict.key().dimmed()
        );
    }
}

/// Remember skipped artifacts as exclusions so later syncs stay quiet
fn persist_skips(ctx: &Context, decisions: &[Decision]) {
    let path = ctx.project_config_path();
    for decision in decisions.iter().filter(|d| d.resolution == Resolution::Skip) {
        match add_exclusion(&path, &decision.destination, &decision.artifact) {
            Ok(true) => println!(
                "   {} excluded {} from {} in {}",
                "+".green(),
                decision.artifact.cyan(),
                decision.destination,
                path.display()
            ),
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "Could not record exclusion"),
        }
    }
}
