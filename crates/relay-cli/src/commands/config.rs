//! Configuration display

use std::path::Path;

use colored::Colorize;
use relay_meta::Config;

use crate::context::Context;
use crate::error::Result;

/// Show the global, project and merged configuration
pub fn run_config_list(ctx: &Context) -> Result<()> {
    let loader = ctx.loader();

    let global = loader.load_global()?;
    print_layer("Global", loader.global_path(), global.as_ref())?;

    let project_path = ctx.project_config_path();
    let project = relay_meta::load_file(&project_path).ok();
    print_layer("Project", Some(project_path.as_path()), project.as_ref())?;

    let merged = ctx.load_config()?;
    println!("{}", "Merged".bold());
    print_harnesses(&merged);
    Ok(())
}

fn print_layer(title: &str, path: Option<&Path>, config: Option<&Config>) -> Result<()> {
    let location = path.map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
    println!("{} {}", title.bold(), location.dimmed());
    match config {
        Some(config) => {
            for line in toml::to_string_pretty(config)?.lines() {
                println!("  {line}");
            }
        }
        None => println!("  {}", "(not present)".dimmed()),
    }
    println!();
    Ok(())
}

fn print_harnesses(config: &Config) {
    let defaults = if config.default_harnesses.is_empty() {
        "(none)".to_string()
    } else {
        config.default_harnesses.join(", ")
    };
    println!("  {:<12} {}", "Defaults:".dimmed(), defaults);
    println!("  {:<12} {}", "Artifacts:".dimmed(), config.artifact_dirs().join(", "));

    if config.harness.is_empty() {
        println!("  {:<12} {}", "Harnesses:".dimmed(), "(none)".dimmed());
        return;
    }
    println!("  {}:", "Harnesses".dimmed());
    for (name, harness) in &config.harness {
        println!(
            "    {} {} {} ({})",
            "+".green(),
            name.cyan(),
            harness.path,
            harness.layout()
        );
    }
}
