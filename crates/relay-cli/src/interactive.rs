//! Interactive conflict resolution
//!
//! Uses dialoguer for terminal-based selection.

use std::fs;

use colored::Colorize;
use dialoguer::Select;
use relay_core::{Conflict, DetectionResult, Resolution, transform};
use similar::{ChangeTag, TextDiff};

use crate::error::{CliError, Result};

const CHOICES: &[&str] = &[
    "Skip",
    "Overwrite",
    "Show diff",
    "Skip all remaining",
    "Overwrite all remaining",
    "Quit",
];

/// A resolution chosen for one conflict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub destination: String,
    pub artifact: String,
    pub resolution: Resolution,
}

/// Ask how to resolve every conflict in `results`
///
/// # Errors
///
/// Returns a user error when the user quits.
pub fn prompt_conflicts(results: &[DetectionResult]) -> Result<Vec<Decision>> {
    let mut decisions = Vec::new();
    let mut bulk: Option<Resolution> = None;

    for result in results {
        for conflict in &result.conflicts {
            let resolution = match bulk {
                Some(resolution) => resolution,
                None => match ask(result, conflict)? {
                    Answer::One(resolution) => resolution,
                    Answer::All(resolution) => {
                        bulk = Some(resolution);
                        resolution
                    }
                },
            };
            decisions.push(Decision {
                destination: conflict.destination.clone(),
                artifact: conflict.artifact.name.clone(),
                resolution,
            });
        }
    }

    Ok(decisions)
}

enum Answer {
    One(Resolution),
    All(Resolution),
}

fn ask(result: &DetectionResult, conflict: &Conflict) -> Result<Answer> {
    println!();
    println!(
        "{} {} already exists in {} and is not managed by relay",
        "CONFLICT".yellow().bold(),
        conflict.existing_path.display().to_string().cyan(),
        conflict.destination.bold()
    );

    loop {
        let choice = Select::new()
            .with_prompt(format!("{} ({})", conflict.artifact.name, conflict.artifact.kind))
            .items(CHOICES)
            .default(0)
            .interact()?;

        match choice {
            0 => return Ok(Answer::One(Resolution::Skip)),
            1 => return Ok(Answer::One(Resolution::Overwrite)),
            2 => print_diff(result, conflict),
            3 => return Ok(Answer::All(Resolution::Skip)),
            4 => return Ok(Answer::All(Resolution::Overwrite)),
            _ => return Err(CliError::user("Sync cancelled by user.")),
        }
    }
}

fn print_diff(result: &DetectionResult, conflict: &Conflict) {
    let existing = fs::read_to_string(&conflict.existing_path).unwrap_or_default();
    let proposed = transform(
        &conflict.artifact,
        &result.harness.variables,
        &result.harness.mappings,
    )
    .map_err(CliError::from)
    .and_then(|artifact| artifact.render().map_err(CliError::from));

    match proposed {
        Ok(proposed) => print!("{}", render_diff(&existing, &proposed)),
        Err(e) => println!("   {} cannot render artifact: {}", "!".red(), e),
    }
}

/// Colored unified diff from the existing file to relay's version
pub fn render_diff(existing: &str, proposed: &str) -> String {
    let diff = TextDiff::from_lines(existing, proposed);
    let mut out = String::new();

    for group in diff.grouped_ops(3) {
        out.push_str(&format!("{}\n", "@@".cyan()));
        for op in group {
            for change in diff.iter_changes(&op) {
                let line = change.to_string();
                let line = line.trim_end_matches('\n');
                let rendered = match change.tag() {
                    ChangeTag::Delete => format!("-{line}").red().to_string(),
                    ChangeTag::Insert => format!("+{line}").green().to_string(),
                    ChangeTag::Equal => format!(" {line}"),
                };
                out.push_str(&rendered);
                out.push('\n');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_marks_changes() {
        colored::control::set_override(false);
        let out = render_diff("a\nb\n", "a\nc\n");
        assert!(out.contains("-b"));
        assert!(out.contains("+c"));
        assert!(out.contains(" a"));
    }

    #[test]
    fn diff_of_identical_text_is_empty() {
        assert!(render_diff("same\n", "same\n").is_empty());
    }
}
