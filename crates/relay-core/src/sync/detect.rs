//! Detect phase: everything short of writing

use std::collections::HashMap;
use std::path::Path;

use relay_content::{Artifact, ArtifactKind, discover};
use relay_fs::relative_slash_path;
use relay_meta::{Config, DuplicatePolicy, Harness};

use super::derive::derive_commands;
use super::types::{Conflict, DetectOptions, Detection, DetectionError, DetectionResult};
use crate::layout::layout_for;
use crate::ledger::Ledger;
use crate::{Error, Result};

/// Analyse every requested destination without writing anything
///
/// # Errors
///
/// Discovery failures and duplicate artifacts (under
/// [`DuplicatePolicy::Error`]) fail the whole call. Per-destination
/// failures, such as an unreadable ledger, are collected in
/// [`Detection::errors`] instead.
pub fn detect(config: &Config, options: &DetectOptions) -> Result<Detection> {
    let kinds = config.artifact_dirs();

    let mut discovered = Vec::new();
    for source in &options.source_paths {
        discovered.extend(discover(source, &kinds)?);
    }
    let pool = dedupe(discovered, config.conflict.duplicate_artifact())?;

    let destinations = if options.destinations.is_empty() {
        &config.default_harnesses
    } else {
        &options.destinations
    };

    let mut detection = Detection::default();
    for name in destinations {
        let outcome = match config.harness(name) {
            Some(harness) => detect_destination(name, harness, &pool),
            None => Err(Error::UnknownDestination { name: name.clone() }),
        };
        match outcome {
            Ok(result) => detection.results.push(result),
            Err(error) => {
                tracing::warn!(destination = %name, error = %error, "Skipping destination");
                detection.errors.push(DetectionError {
                    destination: name.clone(),
                    error,
                });
            }
        }
    }

    Ok(detection)
}

fn detect_destination(name: &str, harness: &Harness, pool: &[Artifact]) -> Result<DetectionResult> {
    let base = harness.base_path();
    let ledger = Ledger::load(&base)?;

    let mut artifacts: Vec<Artifact> = pool
        .iter()
        .filter(|a| harness.allows(&a.name))
        .cloned()
        .collect();

    let generated = if harness.generate_commands_from_skills {
        let commands: Vec<Artifact> = derive_commands(&artifacts)
            .into_iter()
            .filter(|stub| {
                let taken = artifacts
                    .iter()
                    .any(|a| a.kind == ArtifactKind::Command && a.name == stub.name);
                if taken {
                    tracing::warn!(
                        destination = %name,
                        command = %stub.name,
                        "Command already provided by a source, not generating one"
                    );
                }
                !taken
            })
            .collect();
        let count = commands.len();
        artifacts.extend(commands);
        count
    } else {
        0
    };

    let conflicts = find_conflicts(name, harness, &base, &artifacts, &ledger)?;

    tracing::info!(
        destination = %name,
        artifacts = artifacts.len(),
        generated,
        conflicts = conflicts.len(),
        "Detection complete"
    );

    Ok(DetectionResult {
        destination: name.to_string(),
        harness: harness.clone(),
        artifacts,
        conflicts,
        generated,
        ledger,
    })
}

/// Artifacts whose main file exists but is not in the ledger
fn find_conflicts(
    destination: &str,
    harness: &Harness,
    base: &Path,
    artifacts: &[Artifact],
    ledger: &Ledger,
) -> Result<Vec<Conflict>> {
    let layout = layout_for(harness.layout(), base);
    let mut conflicts = Vec::new();

    for artifact in artifacts {
        let (exists, path) = layout.exists(artifact)?;
        if exists && !ledger.is_managed(&relative_slash_path(base, &path)) {
            tracing::debug!(artifact = %artifact.name, path = %path.display(), "Unmanaged file at target");
            conflicts.push(Conflict {
                artifact: artifact.clone(),
                destination: destination.to_string(),
                existing_path: path,
            });
        }
    }

    Ok(conflicts)
}

/// Collapse artifacts sharing a name and kind according to `policy`
///
/// The surviving artifact keeps the position of the first occurrence.
fn dedupe(artifacts: Vec<Artifact>, policy: DuplicatePolicy) -> Result<Vec<Artifact>> {
    let mut pool: Vec<Artifact> = Vec::with_capacity(artifacts.len());
    let mut seen: HashMap<(ArtifactKind, String), usize> = HashMap::new();

    for artifact in artifacts {
        let key = (artifact.kind, artifact.name.clone());
        let Some(&index) = seen.get(&key) else {
            seen.insert(key, pool.len());
            pool.push(artifact);
            continue;
        };

        let existing = &pool[index];
        match policy {
            DuplicatePolicy::Error => {
                return Err(Error::DuplicateArtifact {
                    name: artifact.name,
                    kind: artifact.kind,
                    first: existing.source_path.clone(),
                    second: artifact.source_path,
                });
            }
            DuplicatePolicy::First => {
                tracing::warn!(
                    artifact = %artifact.name,
                    kept = %existing.source_path.display(),
                    dropped = %artifact.source_path.display(),
                    "Duplicate artifact, keeping first"
                );
            }
            DuplicatePolicy::Last => {
                tracing::warn!(
                    artifact = %artifact.name,
                    kept = %artifact.source_path.display(),
                    dropped = %existing.source_path.display(),
                    "Duplicate artifact, keeping last"
                );
                pool[index] = artifact;
            }
        }
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn skill(name: &str, source: &str) -> Artifact {
        let mut artifact = Artifact::new(name, ArtifactKind::Skill);
        artifact.source_path = PathBuf::from(source);
        artifact
    }

    #[test]
    fn dedupe_error_policy() {
        let err = dedupe(vec![skill("a", "/one"), skill("a", "/two")], DuplicatePolicy::Error)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateArtifact { .. }));
    }

    #[test]
    fn dedupe_first_and_last() {
        let input = || vec![skill("a", "/one"), skill("b", "/one"), skill("a", "/two")];

        let first = dedupe(input(), DuplicatePolicy::First).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].source_path, PathBuf::from("/one"));

        let last = dedupe(input(), DuplicatePolicy::Last).unwrap();
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].name, "a");
        assert_eq!(last[0].source_path, PathBuf::from("/two"));
    }

    #[test]
    fn same_name_different_kind_is_not_duplicate() {
        let command = Artifact::new("a", ArtifactKind::Command);
        let pool = dedupe(vec![skill("a", "/one"), command], DuplicatePolicy::Error).unwrap();
        assert_eq!(pool.len(), 2);
    }
}
