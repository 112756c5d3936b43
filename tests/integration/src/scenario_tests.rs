//! Scenario tests spanning configuration edits, multiple sources and the
//! source manifest.

use relay_content::{ArtifactKind, SourceManifest};
use relay_core::{Error, SyncOptions, sync};
use relay_meta::{ConfigLoader, add_exclusion, load_file, remove_exclusion};
use relay_test_utils::{SourceTree, TargetDir};

fn project_config(dest: &TargetDir, extra: &str) -> String {
    format!(
        "default_harnesses = [\"local\"]\n{extra}\n[harness.local]\npath = \"{}\"\n",
        dest.path_str()
    )
}

fn options(trees: &[&SourceTree]) -> SyncOptions {
    SyncOptions {
        source_paths: trees.iter().map(|t| t.path()).collect(),
        ..SyncOptions::default()
    }
}

fn loader(tree: &SourceTree) -> ConfigLoader {
    ConfigLoader::with_global_path(tree.path(), tree.root().join("no-global.toml"))
}

mod exclusions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn excluded_artifact_is_not_synced() {
        let dest = TargetDir::new();
        let tree = SourceTree::new()
            .command("review", "Review.\n")
            .command("deploy", "Deploy.\n");
        let tree = tree.file("relay.toml", &project_config(&dest, ""));
        let path = tree.root().join("relay.toml");

        assert!(add_exclusion(&path, "local", "deploy").unwrap());
        assert!(!add_exclusion(&path, "local", "deploy").unwrap());

        let config = loader(&tree).load().unwrap();
        assert_eq!(config.harness("local").unwrap().exclude, vec!["deploy"]);

        let result = sync(&config, &options(&[&tree])).unwrap();
        assert_eq!(result.synced, 1);
        dest.assert_exists("commands/review/COMMAND.md");
        dest.assert_not_exists("commands/deploy/COMMAND.md");
    }

    #[test]
    fn removing_the_exclusion_syncs_again() {
        let dest = TargetDir::new();
        let tree = SourceTree::new().command("deploy", "Deploy.\n");
        let tree = tree.file("relay.toml", &project_config(&dest, ""));
        let path = tree.root().join("relay.toml");

        add_exclusion(&path, "local", "deploy").unwrap();
        assert!(remove_exclusion(&path, "local", "deploy").unwrap());
        assert!(load_file(&path).unwrap().harness("local").unwrap().exclude.is_empty());

        let config = loader(&tree).load().unwrap();
        sync(&config, &options(&[&tree])).unwrap();
        dest.assert_exists("commands/deploy/COMMAND.md");
    }
}

mod multiple_sources {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_sources() -> (SourceTree, SourceTree) {
        (
            SourceTree::new().command("review", "from the first source\n"),
            SourceTree::new()
                .command("review", "from the second source\n")
                .agent("planner", "Plan.\n"),
        )
    }

    #[test]
    fn duplicates_fail_by_default() {
        let dest = TargetDir::new();
        let (first, second) = two_sources();
        let project = SourceTree::new().file("relay.toml", &project_config(&dest, ""));
        let config = loader(&project).load().unwrap();

        let err = sync(&config, &options(&[&first, &second])).unwrap_err();
        assert!(matches!(err, Error::DuplicateArtifact { ref name, .. } if name == "review"));
        assert_eq!(dest.file_count(), 0);
    }

    #[test]
    fn last_source_wins_when_configured() {
        let dest = TargetDir::new();
        let (first, second) = two_sources();
        let project = SourceTree::new().file(
            "relay.toml",
            &project_config(&dest, "\n[conflict]\nduplicate_artifact = \"last\"\n"),
        );
        let config = loader(&project).load().unwrap();

        let result = sync(&config, &options(&[&first, &second])).unwrap();
        assert_eq!(result.synced, 2);
        assert_eq!(
            dest.read("commands/review/COMMAND.md"),
            "from the second source\n"
        );
        dest.assert_exists("agents/planner/AGENT.md");
    }

    #[test]
    fn first_source_wins_when_configured() {
        let dest = TargetDir::new();
        let (first, second) = two_sources();
        let project = SourceTree::new().file(
            "relay.toml",
            &project_config(&dest, "\n[conflict]\nduplicate_artifact = \"first\"\n"),
        );
        let config = loader(&project).load().unwrap();

        sync(&config, &options(&[&first, &second])).unwrap();
        assert_eq!(
            dest.read("commands/review/COMMAND.md"),
            "from the first source\n"
        );
    }
}

mod manifest {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn manifest_lists_discovered_artifacts() {
        let tree = SourceTree::new()
            .skill_dir("code-test", "Run.\n")
            .skill("lint", "Lint.\n")
            .command("review", "Review.\n")
            .agent("planner", "Plan.\n");
        let config = loader(&tree).load().unwrap();

        let manifest = SourceManifest::generate(tree.root(), &config.artifact_dirs()).unwrap();
        assert_eq!(manifest.skills, vec!["code-test", "lint"]);
        assert_eq!(manifest.names(ArtifactKind::Command), ["review"]);
        assert_eq!(manifest.len(), 4);

        let path = manifest.write(tree.root()).unwrap();
        assert!(path.ends_with(".relay/manifest.yaml"));
        assert_eq!(SourceManifest::load(tree.root()).unwrap(), Some(manifest));
    }

    #[test]
    fn kinds_outside_the_config_are_ignored() {
        let tree = SourceTree::new()
            .skill("lint", "Lint.\n")
            .agent("planner", "Plan.\n")
            .file("relay.toml", "default_artifacts = [\"agents\"]\n");
        let config = loader(&tree).load().unwrap();

        let manifest = SourceManifest::generate(tree.root(), &config.artifact_dirs()).unwrap();
        assert!(manifest.skills.is_empty());
        assert_eq!(manifest.agents, vec!["planner"]);
    }
}
