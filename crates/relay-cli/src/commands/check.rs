//! Check command implementation

use colored::Colorize;
use relay_core::{CheckReport, CheckStatus, DriftItem, check};

use crate::context::Context;
use crate::error::Result;

/// Run the check command
///
/// Reports, per harness, managed files that changed or disappeared since
/// relay wrote them.
pub fn run_check(ctx: &Context, targets: &[String], json: bool) -> Result<()> {
    let config = ctx.load_config()?;
    let reports = check(&config, targets);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("{} Checking managed files...", "=>".blue().bold());
    if reports.is_empty() {
        println!("   No harnesses configured.");
    }
    for report in &reports {
        print_report(report);
    }

    Ok(())
}

fn print_report(report: &CheckReport) {
    let name = report.destination.bold();
    match report.status {
        CheckStatus::Healthy => {
            println!("{} {}: no drift detected", "OK".green().bold(), name);
        }
        CheckStatus::Missing => {
            println!("{} {}: some files are missing", "MISSING".yellow().bold(), name);
            print_items("-", &report.missing);
        }
        CheckStatus::Drifted => {
            println!("{} {}: files were edited", "DRIFTED".red().bold(), name);
            print_items("!", &report.drifted);
            if !report.missing.is_empty() {
                println!("   {} Also missing:", "MISSING".yellow().bold());
                print_items("-", &report.missing);
            }
        }
        CheckStatus::Broken => {
            println!("{} {}", "BROKEN".red().bold(), name);
            for msg in &report.messages {
                println!("   {} {}", "!".red(), msg);
            }
        }
    }
}

fn print_items(marker: &str, items: &[DriftItem]) {
    for item in items {
        println!(
            "   {} {} ({}): {}",
            marker.yellow(),
            item.file.cyan(),
            item.artifact.dimmed(),
            item.description
        );
    }
}
