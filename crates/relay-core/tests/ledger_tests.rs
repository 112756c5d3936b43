//! Ledger persistence tests

use pretty_assertions::assert_eq;
use relay_content::ArtifactKind;
use relay_core::{Error, Ledger, LedgerEntry};
use tempfile::tempdir;

#[test]
fn test_load_missing_is_empty() {
    let dir = tempdir().unwrap();
    let ledger = Ledger::load(dir.path()).unwrap();
    assert!(ledger.is_empty());
}

#[test]
fn test_load_invalid_is_parse_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(".relay.lock"), "files = 12\n[[[").unwrap();

    let err = Ledger::load(dir.path()).unwrap_err();
    assert!(matches!(err, Error::LedgerParse { .. }));
}

#[test]
fn test_save_and_reload() {
    let dir = tempdir().unwrap();
    let mut ledger = Ledger::new();
    ledger.add(LedgerEntry::main(
        "skills/code-test/SKILL.md",
        "sha256:abc",
        "code-test",
        ArtifactKind::Skill,
    ));
    ledger.add(LedgerEntry::resource(
        "skills/code-test/scripts/run.sh",
        "sha256:def",
        "code-test",
        ArtifactKind::Skill,
    ));

    assert!(ledger.save(dir.path()).unwrap());

    let raw = std::fs::read_to_string(dir.path().join(".relay.lock")).unwrap();
    assert!(raw.contains("[[files]]"));

    let loaded = Ledger::load(dir.path()).unwrap();
    assert_eq!(loaded, ledger);
    assert!(loaded.is_managed("skills/code-test/scripts/run.sh"));
    assert_eq!(loaded.get_by_artifact("code-test").len(), 2);
    assert!(loaded.get("skills/code-test/SKILL.md").is_some_and(|e| !e.resource));
}

#[test]
fn test_save_skips_identical_content() {
    let dir = tempdir().unwrap();
    let mut ledger = Ledger::new();
    ledger.add(LedgerEntry::main("commands/x.md", "sha256:1", "x", ArtifactKind::Command));

    assert!(ledger.save(dir.path()).unwrap());
    assert!(!ledger.save(dir.path()).unwrap());

    ledger.add(LedgerEntry::main("commands/x.md", "sha256:2", "x", ArtifactKind::Command));
    assert!(ledger.save(dir.path()).unwrap());
}

#[test]
fn test_empty_ledger_not_written() {
    let dir = tempdir().unwrap();
    assert!(!Ledger::new().save(dir.path()).unwrap());
    assert!(!dir.path().join(".relay.lock").exists());
}
