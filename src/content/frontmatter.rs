//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;

/// Render a YAML scalar as a string; anything else is treated as absent
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}

/// Deserialize a scalar field without ever failing the whole block
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

/// Accept either a single label or a list of labels.
/// Non-scalar list items are skipped, order is preserved.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let tags = match value {
        Value::Sequence(items) => Some(items.iter().filter_map(scalar_to_string).collect()),
        Value::Null => None,
        other => scalar_to_string(&other).map(|tag| vec![tag]),
    };
    Ok(tags)
}

/// Front-matter data from a post.
///
/// Nothing here is validated: every field may be absent and the
/// rendering side has to cope with that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "lenient_tags")]
    pub tag: Option<Vec<String>>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        match split_block(content) {
            Some((yaml, body)) => (Self::from_yaml(yaml), body),
            None => (FrontMatter::default(), content),
        }
    }

    fn from_yaml(yaml: &str) -> Self {
        if yaml.trim().is_empty() {
            return FrontMatter::default();
        }

        match serde_yaml::from_str::<FrontMatter>(yaml) {
            Ok(fm) => fm,
            Err(e) => {
                tracing::warn!("Failed to parse YAML front-matter, ignoring it: {}", e);
                FrontMatter::default()
            }
        }
    }
}

/// Split `---` delimited YAML from the markdown body.
/// The opening delimiter must be the first line.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            let yaml = &content[start..offset];
            let body = content[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((yaml, body));
        }
        offset += line.len();
    }

    // No closing ---, treat as no front-matter
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
excerpt: A first post
tag:
  - rust
  - web
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(fm.excerpt.as_deref(), Some("A first post"));
        assert_eq!(fm.tag, Some(vec!["rust".to_string(), "web".to_string()]));
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_single_string_tag() {
        let content = "---\ntitle: One\ntag: Notes\n---\nBody\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.tag, Some(vec!["Notes".to_string()]));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let content = "---\ntitle: Only a title\n---\nBody\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Only a title"));
        assert_eq!(fm.date, None);
        assert_eq!(fm.excerpt, None);
        assert_eq!(fm.tag, None);
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_mistyped_fields_pass_through_as_absent() {
        let content = r#"---
title:
  nested: map
date: 2024
tag:
  - ok
  - { not: scalar }
  - 42
---
Body
"#;
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(fm.date.as_deref(), Some("2024"));
        assert_eq!(fm.tag, Some(vec!["ok".to_string(), "42".to_string()]));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_block_is_body() {
        let content = "---\ntitle: Dangling\n\nStill body.";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_malformed_yaml_is_absorbed() {
        let content = "---\ntitle: [unclosed\n---\nThe body survives.\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "The body survives.\n");
    }

    #[test]
    fn test_empty_block_and_bom() {
        let content = "\u{feff}---\n---\nBody\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_horizontal_rule_in_body_is_not_a_delimiter() {
        let content = "Intro\n---\n\nMore text\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_unknown_keys_kept_in_extra() {
        let content = "---\ntitle: T\ncover: /img/a.png\n---\n";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.extra.contains_key("cover"));
        assert_eq!(body, "");
    }
}
