//! Per-destination artifact transformation
//!
//! String metadata values and the body are expanded as templates, then
//! metadata keys are renamed according to the destination's mappings.

use std::collections::BTreeMap;

use relay_content::{Artifact, Metadata, template};
use serde_yaml::Value;

use crate::{Error, Result};

/// Produce the destination form of `artifact`. The input is untouched.
///
/// # Errors
///
/// Returns `Transform` naming the failing field (`metadata.<key>` or
/// `body`) when a template does not parse or references an undefined
/// variable.
pub fn transform(
    artifact: &Artifact,
    variables: &BTreeMap<String, String>,
    mappings: &BTreeMap<String, String>,
) -> Result<Artifact> {
    let mut expanded = Metadata::new();
    for (key, value) in &artifact.metadata {
        let value = match value {
            Value::String(s) => Value::String(expand(s, variables, &format!("metadata.{key}"))?),
            other => other.clone(),
        };
        expanded.insert(key.clone(), value);
    }

    let body = expand(&artifact.body, variables, "body")?;

    Ok(Artifact {
        metadata: rename_keys(expanded, mappings),
        body,
        ..artifact.clone()
    })
}

fn expand(source: &str, variables: &BTreeMap<String, String>, field: &str) -> Result<String> {
    template::render(source, variables).map_err(|source| Error::Transform {
        field: field.to_string(),
        source,
    })
}

/// Renamed keys are inserted after the untouched ones so a renamed value
/// replaces an existing key of the same name.
fn rename_keys(metadata: Metadata, mappings: &BTreeMap<String, String>) -> Metadata {
    if mappings.is_empty() {
        return metadata;
    }

    let (renamed, kept): (Vec<_>, Vec<_>) = metadata
        .into_iter()
        .partition(|(key, _)| mappings.contains_key(key));

    let mut result: Metadata = kept.into_iter().collect();
    for (key, value) in renamed {
        let new_key = mappings.get(&key).cloned().unwrap_or(key);
        result.insert(new_key, value);
    }
    result
}
