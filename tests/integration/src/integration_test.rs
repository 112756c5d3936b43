//! End-to-end integration test for the whole pipeline
//!
//! Layered config loading -> discovery -> detect/apply into two harnesses
//! with different layouts -> drift check.

use pretty_assertions::assert_eq;
use relay_core::{CheckStatus, Ledger, SyncOptions, check, sync};
use relay_meta::{ConfigLoader, LayoutKind};
use relay_test_utils::{SourceTree, TargetDir};
use std::fs;

const SKILL: &str = "---
name: code-test
description: Run the test suite
user-invocable: true
allowed-tools:
- Bash
model: \"{{.model}}\"
---

Run the tests with {{.model}}.
";

/// A project with a global config defining `claude` and a project config
/// adding `opencode` with a flat layout.
struct Setup {
    tree: SourceTree,
    claude: TargetDir,
    opencode: TargetDir,
    global: tempfile::TempDir,
}

impl Setup {
    fn new() -> Self {
        let claude = TargetDir::new();
        let opencode = TargetDir::new();
        let global = tempfile::TempDir::new().unwrap();

        fs::write(
            global.path().join("config.toml"),
            format!(
                r#"
default_harnesses = ["claude"]

[harness.claude]
path = "{}"

[harness.claude.variables]
model = "opus"
"#,
                claude.path_str()
            ),
        )
        .unwrap();

        let tree = SourceTree::new()
            .skill_dir("code-test", SKILL)
            .resource("skills/code-test/scripts/run.sh", "#!/bin/sh\necho ok\n")
            .command("review", "---\ndescription: Review\n---\n\nLook.\n")
            .file(
                "relay.toml",
                &format!(
                    r#"
default_harnesses = ["claude", "opencode"]

[harness.opencode]
path = "{}"
layout = "flat"
generate_commands_from_skills = true

[harness.opencode.variables]
model = "sonnet"

[harness.opencode.mappings]
allowed-tools = "tools"
"#,
                    opencode.path_str()
                ),
            );

        Self {
            tree,
            claude,
            opencode,
            global,
        }
    }

    fn loader(&self) -> ConfigLoader {
        ConfigLoader::with_global_path(self.tree.path(), self.global.path().join("config.toml"))
    }

    fn options(&self) -> SyncOptions {
        SyncOptions {
            source_paths: vec![self.tree.path()],
            ..SyncOptions::default()
        }
    }
}

#[test]
fn test_layered_config_resolves_both_harnesses() {
    let setup = Setup::new();
    let config = setup.loader().load().unwrap();

    assert_eq!(config.default_harnesses, vec!["claude", "opencode"]);
    assert_eq!(config.harness("claude").unwrap().layout(), LayoutKind::Nested);
    assert_eq!(config.harness("opencode").unwrap().layout(), LayoutKind::Flat);
}

#[test]
fn test_sync_into_nested_and_flat_harnesses() {
    let setup = Setup::new();
    let config = setup.loader().load().unwrap();

    let result = sync(&config, &setup.options()).unwrap();
    assert!(result.is_success(), "{:?}", result.errors);
    // claude: skill + command, opencode: skill + command + generated command
    assert_eq!(result.synced, 5);
    assert_eq!(result.generated, 1);

    setup.claude.assert_contains("skills/code-test/SKILL.md", "model: opus");
    setup.claude.assert_contains("skills/code-test/SKILL.md", "allowed-tools:");
    setup.claude.assert_contains("skills/code-test/SKILL.md", "Run the tests with opus.");
    setup.claude.assert_exists("skills/code-test/scripts/run.sh");
    setup.claude.assert_exists("commands/review/COMMAND.md");
    setup.claude.assert_not_exists("commands/code-test/COMMAND.md");

    let skill = setup.opencode.read("skills/code-test.md");
    assert!(skill.contains("model: sonnet"));
    assert!(skill.contains("tools:"));
    assert!(!skill.contains("allowed-tools"));
    setup.opencode.assert_exists("skills/code-test/scripts/run.sh");
    setup.opencode.assert_contains("commands/code-test.md", "Invoke skill: code-test");
    setup.opencode.assert_exists("commands/review.md");

    let ledger = Ledger::load(setup.claude.root()).unwrap();
    assert_eq!(ledger.len(), 3);
    assert!(ledger.is_managed("skills/code-test/scripts/run.sh"));
}

#[test]
fn test_second_sync_is_idempotent() {
    let setup = Setup::new();
    let config = setup.loader().load().unwrap();

    sync(&config, &setup.options()).unwrap();
    let before = setup.opencode.read("skills/code-test.md");
    let ledger_before = setup.claude.read(".relay.lock");

    let again = sync(&config, &setup.options()).unwrap();
    assert!(again.is_success());
    assert_eq!(again.synced, 5);
    assert_eq!(again.skipped, 0);
    assert_eq!(setup.opencode.read("skills/code-test.md"), before);
    assert_eq!(setup.claude.read(".relay.lock"), ledger_before);
}

#[test]
fn test_check_follows_the_destination_lifecycle() {
    let setup = Setup::new();
    let config = setup.loader().load().unwrap();
    sync(&config, &setup.options()).unwrap();

    let reports = check(&config, &[]);
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.status == CheckStatus::Healthy));

    setup.opencode.seed("commands/review.md", "edited by hand\n");
    fs::remove_file(setup.claude.root().join("skills/code-test/scripts/run.sh")).unwrap();

    let reports = check(&config, &[]);
    let claude = reports.iter().find(|r| r.destination == "claude").unwrap();
    let opencode = reports.iter().find(|r| r.destination == "opencode").unwrap();

    assert_eq!(claude.status, CheckStatus::Missing);
    assert_eq!(claude.missing[0].file, "skills/code-test/scripts/run.sh");
    assert_eq!(opencode.status, CheckStatus::Drifted);
    assert_eq!(opencode.drifted[0].file, "commands/review.md");

    // A sync restores both, the edited file being managed.
    sync(&config, &setup.options()).unwrap();
    assert!(check(&config, &[]).iter().all(|r| r.is_healthy()));
}
