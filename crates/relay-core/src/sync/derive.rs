//! Command stubs generated from user-invocable skills

use relay_content::{Artifact, ArtifactKind};
use serde_yaml::Value;

/// One command per skill whose header sets `user-invocable: true`
///
/// The command carries the skill's name and description and a body that
/// invokes the skill.
pub fn derive_commands(artifacts: &[Artifact]) -> Vec<Artifact> {
    artifacts
        .iter()
        .filter(|a| a.kind == ArtifactKind::Skill && a.is_user_invocable())
        .map(|skill| {
            let description = skill.metadata_str("description").unwrap_or_default();
            Artifact::new(&skill.name, ArtifactKind::Command)
                .with_metadata("name", Value::from(skill.name.as_str()))
                .with_metadata("description", description)
                .with_body(format!("Invoke skill: {}\n", skill.name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_user_invocable_skills() {
        let artifacts = vec![
            Artifact::new("review", ArtifactKind::Skill)
                .with_metadata("user-invocable", true)
                .with_metadata("description", "Review code"),
            Artifact::new("internal", ArtifactKind::Skill),
            Artifact::new("cmd", ArtifactKind::Command).with_metadata("user-invocable", true),
        ];

        let derived = derive_commands(&artifacts);
        assert_eq!(derived.len(), 1);
        let command = &derived[0];
        assert_eq!(command.kind, ArtifactKind::Command);
        assert_eq!(command.name, "review");
        assert_eq!(command.metadata_str("description"), Some("Review code"));
        assert_eq!(command.body, "Invoke skill: review\n");
        assert!(!command.is_container);
    }

    #[test]
    fn missing_description_is_empty() {
        let artifacts = vec![
            Artifact::new("x", ArtifactKind::Skill)
                .with_metadata("user-invocable", true)
                .with_metadata("description", 42),
        ];
        let derived = derive_commands(&artifacts);
        assert_eq!(derived[0].metadata_str("description"), Some(""));
        assert_eq!(derived[0].metadata_str("name"), Some("x"));
    }
}
