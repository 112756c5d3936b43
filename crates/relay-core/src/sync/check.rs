//! Drift check between ledgers and destination files
//!
//! Read-only. Each managed file is compared against the checksum recorded
//! when relay wrote it.

use relay_fs::compute_file_checksum;
use relay_meta::Config;
use serde::{Deserialize, Serialize};

use crate::ledger::Ledger;

/// Status of one destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    /// Every managed file matches its checksum
    Healthy,
    /// Some managed files are gone
    Missing,
    /// Some managed files were edited
    Drifted,
    /// The ledger is unreadable or the destination is not configured
    Broken,
}

/// A managed file that is missing or changed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftItem {
    pub artifact: String,
    /// Destination-relative path
    pub file: String,
    pub description: String,
}

/// Check result for one destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub destination: String,
    pub status: CheckStatus,
    pub drifted: Vec<DriftItem>,
    pub missing: Vec<DriftItem>,
    pub messages: Vec<String>,
}

impl CheckReport {
    pub fn healthy(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            status: CheckStatus::Healthy,
            drifted: Vec::new(),
            missing: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn broken(destination: impl Into<String>, message: String) -> Self {
        Self {
            status: CheckStatus::Broken,
            messages: vec![message],
            ..Self::healthy(destination)
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }
}

/// Check the requested destinations, or the configured defaults when none
/// are given
pub fn check(config: &Config, destinations: &[String]) -> Vec<CheckReport> {
    let destinations = if destinations.is_empty() {
        config.default_harnesses.as_slice()
    } else {
        destinations
    };

    destinations
        .iter()
        .map(|name| check_destination(config, name))
        .collect()
}

fn check_destination(config: &Config, name: &str) -> CheckReport {
    let Some(harness) = config.harness(name) else {
        return CheckReport::broken(name, format!("Destination '{name}' is not configured"));
    };

    let base = harness.base_path();
    let ledger = match Ledger::load(&base) {
        Ok(l) => l,
        Err(e) => return CheckReport::broken(name, format!("Failed to load ledger: {e}")),
    };

    let mut drifted = Vec::new();
    let mut missing = Vec::new();

    for entry in ledger.entries() {
        let file_path = base.join(&entry.path);
        let item = |description: String| DriftItem {
            artifact: entry.artifact.clone(),
            file: entry.path.clone(),
            description,
        };

        if !file_path.exists() {
            missing.push(item("File not found".to_string()));
            continue;
        }

        match compute_file_checksum(&file_path) {
            Ok(actual) if actual != entry.checksum => drifted.push(item(format!(
                "Checksum mismatch: expected {}, got {}",
                entry.checksum, actual
            ))),
            Ok(_) => {}
            Err(e) => missing.push(item(format!("Failed to read file: {e}"))),
        }
    }

    let status = if !drifted.is_empty() {
        CheckStatus::Drifted
    } else if !missing.is_empty() {
        CheckStatus::Missing
    } else {
        CheckStatus::Healthy
    };

    tracing::debug!(
        destination = %name,
        ?status,
        files = ledger.len(),
        "Checked destination"
    );

    CheckReport {
        destination: name.to_string(),
        status,
        drifted,
        missing,
        messages: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_destination_is_broken() {
        let reports = check(&Config::default(), &["nowhere".to_string()]);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status, CheckStatus::Broken);
        assert!(reports[0].messages[0].contains("nowhere"));
    }

    #[test]
    fn broken_report_keeps_message() {
        let report = CheckReport::broken("claude", "bad".to_string());
        assert!(!report.is_healthy());
        assert_eq!(report.messages, vec!["bad"]);
    }
}
