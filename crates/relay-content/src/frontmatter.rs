//! YAML header ("frontmatter") parsing and rendering
//!
//! A header is present when the document starts with `---\n`. It ends at
//! the first `\n---\n`; one newline right after the closing delimiter
//! belongs to the delimiter, not the body.

use crate::artifact::Metadata;
use crate::{Error, Result};

const OPEN: &str = "---\n";
const CLOSE: &str = "\n---\n";

/// Split `content` into header metadata and body.
///
/// Never fails. Missing or unterminated delimiters, YAML that does not
/// parse, and YAML that is not a mapping all yield empty metadata with the
/// whole input as body.
pub fn parse(content: &str) -> (Metadata, String) {
    let Some((header, body)) = split(content) else {
        return (Metadata::new(), content.to_string());
    };

    if header.trim().is_empty() {
        return (Metadata::new(), body.to_string());
    }

    match serde_yaml::from_str::<Metadata>(header) {
        Ok(metadata) => (metadata, body.to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "Unparseable header, treating document as plain body");
            (Metadata::new(), content.to_string())
        }
    }
}

fn split(content: &str) -> Option<(&str, &str)> {
    if !content.starts_with(OPEN) {
        return None;
    }
    // Search from the opening newline so an empty header (`---\n---\n`) closes.
    let close = content[OPEN.len() - 1..].find(CLOSE)? + OPEN.len() - 1;
    let header = content.get(OPEN.len()..close).unwrap_or("");
    let rest = &content[close + CLOSE.len()..];
    let body = rest.strip_prefix('\n').unwrap_or(rest);
    Some((header, body))
}

/// Render metadata and body back into a document.
///
/// Empty metadata renders the body verbatim. Keys are emitted in sorted
/// order.
pub fn render(metadata: &Metadata, body: &str) -> Result<String> {
    if metadata.is_empty() {
        return Ok(body.to_string());
    }

    let yaml = serde_yaml::to_string(metadata).map_err(|e| Error::Serialize {
        format: "YAML".to_string(),
        message: e.to_string(),
    })?;

    Ok(format!("{OPEN}{yaml}---\n\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_yaml::Value;

    #[test]
    fn test_parse_without_header() {
        let (metadata, body) = parse("Just text\n");
        assert!(metadata.is_empty());
        assert_eq!(body, "Just text\n");
    }

    #[test]
    fn test_parse_header_and_body() {
        let (metadata, body) = parse("---\nname: x\ntags:\n  - a\n  - b\n---\n\nBody\n");
        assert_eq!(metadata["name"], Value::from("x"));
        assert!(metadata["tags"].is_sequence());
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_parse_strips_only_one_newline() {
        let (_, body) = parse("---\na: 1\n---\n\n\nBody");
        assert_eq!(body, "\nBody");
    }

    #[test]
    fn test_parse_empty_header() {
        let (metadata, body) = parse("---\n---\nBody");
        assert!(metadata.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_unterminated_header_falls_back() {
        let input = "---\nname: x\nno closing delimiter\n";
        let (metadata, body) = parse(input);
        assert!(metadata.is_empty());
        assert_eq!(body, input);
    }

    #[test]
    fn test_parse_invalid_yaml_falls_back() {
        let input = "---\nname: [unclosed\n---\nBody\n";
        let (metadata, body) = parse(input);
        assert!(metadata.is_empty());
        assert_eq!(body, input);
    }

    #[test]
    fn test_parse_non_mapping_header_falls_back() {
        let input = "---\n- a\n- b\n---\nBody\n";
        let (metadata, body) = parse(input);
        assert!(metadata.is_empty());
        assert_eq!(body, input);
    }

    #[test]
    fn test_render_without_metadata_is_body() {
        assert_eq!(render(&Metadata::new(), "Body\n").unwrap(), "Body\n");
    }

    #[test]
    fn test_render_sorts_keys() {
        let mut metadata = Metadata::new();
        metadata.insert("name".into(), Value::from("x"));
        metadata.insert("description".into(), Value::from("d"));

        let out = render(&metadata, "Body\n").unwrap();
        assert_eq!(out, "---\ndescription: d\nname: x\n---\n\nBody\n");

        let (reparsed, body) = parse(&out);
        assert_eq!(reparsed, metadata);
        assert_eq!(body, "Body\n");
    }
}
