//! Apply phase: transform, write and record

use std::path::Path;

use relay_content::Artifact;
use relay_fs::{compute_file_checksum, relative_slash_path};
use relay_meta::Config;

use super::detect::detect;
use super::types::{
    ApplyOptions, DetectionResult, Resolution, ResolutionMap, SyncError, SyncOptions, SyncResult,
    conflict_key,
};
use crate::layout::{DestinationLayout, layout_for};
use crate::ledger::{Ledger, LedgerEntry};
use crate::transform::transform;
use crate::{Error, Result};

/// Write the detected artifacts of every destination
///
/// Failures for one artifact are recorded in [`SyncResult::errors`] and do
/// not stop the run. Each destination's ledger is saved once at the end
/// unless `dry_run` is set.
pub fn apply(results: Vec<DetectionResult>, options: &ApplyOptions) -> SyncResult {
    let mut result = SyncResult::default();

    for mut detection in results {
        let base = detection.harness.base_path();
        let layout = layout_for(detection.harness.layout(), &base);
        result.generated += detection.generated;

        for artifact in &detection.artifacts {
            let soft_error = |error: Error| SyncError {
                destination: detection.destination.clone(),
                artifact: Some(artifact.name.clone()),
                error,
            };

            match should_write(&detection, layout.as_ref(), artifact, options) {
                Ok(true) => {}
                Ok(false) => {
                    result.skipped += 1;
                    continue;
                }
                Err(e) => {
                    result.errors.push(soft_error(e));
                    continue;
                }
            }

            let transformed = match transform(
                artifact,
                &detection.harness.variables,
                &detection.harness.mappings,
            ) {
                Ok(transformed) => transformed,
                Err(e) => {
                    result.errors.push(soft_error(e));
                    continue;
                }
            };

            if !options.dry_run
                && let Err(e) = write(layout.as_ref(), &transformed, &base, &mut detection.ledger)
            {
                result.errors.push(soft_error(e));
                continue;
            }

            tracing::debug!(
                destination = %detection.destination,
                artifact = %artifact.name,
                dry_run = options.dry_run,
                "Synced artifact"
            );
            result.synced += 1;
        }

        if !options.dry_run
            && let Err(e) = detection.ledger.save(&base)
        {
            result.errors.push(SyncError {
                destination: detection.destination.clone(),
                artifact: None,
                error: e,
            });
        }
    }

    tracing::info!(
        synced = result.synced,
        skipped = result.skipped,
        generated = result.generated,
        errors = result.errors.len(),
        dry_run = options.dry_run,
        "Apply complete"
    );
    result
}

/// Detect, then apply with no resolutions so every conflict is skipped
///
/// Destinations that failed detection are reported in the result's errors.
pub fn sync(config: &Config, options: &SyncOptions) -> Result<SyncResult> {
    let detection = detect(config, &options.detect_options())?;

    let mut result = apply(
        detection.results,
        &ApplyOptions {
            resolutions: ResolutionMap::new(),
            dry_run: options.dry_run,
            force: options.force,
        },
    );

    result
        .errors
        .extend(detection.errors.into_iter().map(|e| SyncError {
            destination: e.destination,
            artifact: None,
            error: e.error,
        }));
    Ok(result)
}

fn should_write(
    detection: &DetectionResult,
    layout: &dyn DestinationLayout,
    artifact: &Artifact,
    options: &ApplyOptions,
) -> Result<bool> {
    if options.force {
        return Ok(true);
    }

    if detection.conflicts.iter().any(|c| c.matches(artifact)) {
        let key = conflict_key(&detection.destination, &artifact.name);
        let resolution = options.resolutions.get(&key).copied();
        tracing::debug!(conflict = %key, ?resolution, "Resolving conflict");
        return Ok(resolution == Some(Resolution::Overwrite));
    }

    // The file may have appeared since detection
    let (exists, path) = layout.exists(artifact)?;
    Ok(!exists || detection.ledger.is_managed(&relative_slash_path(layout.base(), &path)))
}

/// Write through the layout and record every produced file
fn write(
    layout: &dyn DestinationLayout,
    artifact: &Artifact,
    base: &Path,
    ledger: &mut Ledger,
) -> Result<()> {
    for file in layout.write(artifact)? {
        let checksum = compute_file_checksum(&file.path)?;
        let path = relative_slash_path(base, &file.path);
        let entry = if file.resource {
            LedgerEntry::resource(path, checksum, &artifact.name, artifact.kind)
        } else {
            LedgerEntry::main(path, checksum, &artifact.name, artifact.kind)
        };
        ledger.add(entry);
    }
    Ok(())
}
