//! CLI end-to-end tests that invoke the compiled `relay` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use relay_test_utils::{SourceTree, TargetDir};

const REVIEW: &str = "---\ndescription: Review\n---\n\nLook.\n";

/// Source tree with a project config pointing the `local` harness at `dest`.
fn project(dest: &TargetDir, extra: &str) -> SourceTree {
    SourceTree::new()
        .skill_dir(
            "code-test",
            "---\nname: code-test\nmodel: \"{{.model}}\"\n---\n\nRun with {{.model}}.\n",
        )
        .resource("skills/code-test/scripts/run.sh", "#!/bin/sh\n")
        .command("review", REVIEW)
        .file(
            "relay.toml",
            &format!(
                "default_harnesses = [\"local\"]\n{extra}\n[harness.local]\npath = \"{}\"\n\n[harness.local.variables]\nmodel = \"opus\"\n",
                dest.path_str()
            ),
        )
}

/// `relay` isolated from the user's global configuration.
fn relay(tree: &SourceTree) -> Command {
    let mut cmd = Command::cargo_bin("relay").unwrap();
    cmd.current_dir(tree.root())
        .env("RELAY_GLOBAL_CONFIG", tree.root().join("no-global.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_exits_zero() {
    Command::cargo_bin("relay")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_sync_writes_artifacts() {
    let dest = TargetDir::new();
    let tree = project(&dest, "");

    relay(&tree)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced 2 artifact(s)"));

    dest.assert_contains("skills/code-test/SKILL.md", "model: opus");
    dest.assert_contains("skills/code-test/SKILL.md", "Run with opus.");
    dest.assert_exists("skills/code-test/scripts/run.sh");
    dest.assert_exists("commands/review/COMMAND.md");
    dest.assert_exists(".relay.lock");
}

#[test]
fn test_sync_dry_run_writes_nothing() {
    let dest = TargetDir::new();
    let tree = project(&dest, "");

    relay(&tree)
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would sync 2 artifact(s)"));

    assert_eq!(dest.file_count(), 0);
}

#[test]
fn test_conflict_without_terminal_fails() {
    let dest = TargetDir::new();
    dest.seed("commands/review/COMMAND.md", "mine\n");
    let tree = project(&dest, "");

    relay(&tree)
        .arg("sync")
        .assert()
        .failure()
        .stdout(predicate::str::contains("local:review"))
        .stderr(predicate::str::contains("--force"));

    assert_eq!(dest.read("commands/review/COMMAND.md"), "mine\n");
}

#[test]
fn test_conflict_force_overwrites() {
    let dest = TargetDir::new();
    dest.seed("commands/review/COMMAND.md", "mine\n");
    let tree = project(&dest, "");

    relay(&tree).args(["sync", "--force"]).assert().success();
    assert_eq!(dest.read("commands/review/COMMAND.md"), REVIEW);
}

#[test]
fn test_conflict_policy_skip() {
    let dest = TargetDir::new();
    dest.seed("commands/review/COMMAND.md", "mine\n");
    let tree = project(&dest, "\n[conflict]\nfile_exists = \"skip\"\n");

    relay(&tree)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced 1 artifact(s)"))
        .stdout(predicate::str::contains("1 skipped"));

    assert_eq!(dest.read("commands/review/COMMAND.md"), "mine\n");
}

#[test]
fn test_unknown_target_fails() {
    let dest = TargetDir::new();
    let tree = project(&dest, "");

    relay(&tree)
        .args(["sync", "-t", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 error(s)"));
}

#[test]
fn test_check_reports_drift() {
    let dest = TargetDir::new();
    let tree = project(&dest, "");
    relay(&tree).arg("sync").assert().success();

    relay(&tree)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK local"));

    dest.seed("commands/review/COMMAND.md", "edited\n");
    relay(&tree)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("DRIFTED"))
        .stdout(predicate::str::contains("commands/review/COMMAND.md"));

    relay(&tree)
        .args(["check", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"Drifted\""));
}

#[test]
fn test_init_and_manifest() {
    let tree = SourceTree::new()
        .skill("lint", "x\n")
        .agent("planner", "y\n");

    relay(&tree)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 skill(s), 0 command(s), 1 agent(s)"));
    assert!(tree.root().join("relay.toml").exists());

    relay(&tree)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    relay(&tree).arg("manifest").assert().success();
    let manifest = std::fs::read_to_string(tree.root().join(".relay/manifest.yaml")).unwrap();
    assert!(manifest.contains("lint"));
    assert!(manifest.contains("planner"));
}

#[test]
fn test_config_list_shows_harness() {
    let dest = TargetDir::new();
    let tree = project(&dest, "");

    relay(&tree)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged"))
        .stdout(predicate::str::contains("local"));
}

#[test]
fn test_explicit_missing_config_fails() {
    let tree = SourceTree::new();
    relay(&tree)
        .args(["--config", "missing.toml", "check"])
        .assert()
        .failure();
}
