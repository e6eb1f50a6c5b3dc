//! YAML frontmatter of catalog documents
//!
//! ```markdown
//! ---
//! name: react-testing
//! category: testing
//! tags: [react, typescript]
//! recommendations:
//!   requiredDependencies: ["@testing-library/react"]
//!   filePatterns: ["**/*.test.tsx"]
//! ---
//!
//! # React testing
//! ```
//!
//! Recommendation fields may sit at the top level or under `recommendations:`;
//! top-level values win.

use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RecommendationFields {
    tags: Option<BTreeSet<String>>,
    #[serde(alias = "required_dependencies")]
    required_dependencies: Option<BTreeSet<String>>,
    #[serde(alias = "file_patterns")]
    file_patterns: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct RawFrontmatter {
    name: Option<String>,
    category: Option<String>,
    #[serde(flatten)]
    fields: RecommendationFields,
    recommendations: Option<RecommendationFields>,
}

/// Parsed frontmatter with nested recommendation fields merged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFrontmatter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    pub required_dependencies: Option<BTreeSet<String>>,
    pub file_patterns: Option<BTreeSet<String>>,
}

impl DocumentFrontmatter {
    /// Parse a YAML block (without the `---` fences)
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawFrontmatter = serde_yaml::from_str(yaml)?;
        let nested = raw.recommendations.unwrap_or_default();
        Ok(Self {
            name: raw.name,
            category: raw.category,
            tags: raw.fields.tags.or(nested.tags),
            required_dependencies: raw
                .fields
                .required_dependencies
                .or(nested.required_dependencies),
            file_patterns: raw.fields.file_patterns.or(nested.file_patterns),
        })
    }
}

/// Split `content` into its frontmatter block and body.
///
/// Returns `None` for the frontmatter when the file does not start with `---`
/// or the block is never closed.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let Some(after_prefix) = content.strip_prefix("---") else {
        return (None, content);
    };
    match after_prefix.find("\n---") {
        Some(end) => {
            let rest = &after_prefix[end + 4..];
            let body = rest.split_once('\n').map_or("", |(_, body)| body);
            (Some(&after_prefix[..end]), body)
        }
        None => (None, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let (yaml, body) = split_frontmatter("---\ntags: [a]\n---\n# Title\n");
        assert_eq!(yaml, Some("\ntags: [a]"));
        assert_eq!(body, "# Title\n");

        let (yaml, body) = split_frontmatter("# No frontmatter");
        assert!(yaml.is_none());
        assert_eq!(body, "# No frontmatter");

        let (yaml, _) = split_frontmatter("---\nunterminated: true\n");
        assert!(yaml.is_none());
    }

    #[test]
    fn test_top_level_fields() {
        let parsed = DocumentFrontmatter::parse(
            "name: vue-guide\ncategory: web\ntags: [vue, typescript]\nrequiredDependencies: [vue]",
        )
        .unwrap();

        assert_eq!(parsed.name.as_deref(), Some("vue-guide"));
        assert_eq!(parsed.tags.unwrap().len(), 2);
        assert_eq!(
            parsed.required_dependencies.unwrap().into_iter().collect::<Vec<_>>(),
            vec!["vue"]
        );
        assert!(parsed.file_patterns.is_none());
    }

    #[test]
    fn test_nested_recommendations() {
        let parsed = DocumentFrontmatter::parse(
            "tags: [react]\nrecommendations:\n  tags: [ignored]\n  file_patterns:\n    - \"**/*.test.tsx\"\n",
        )
        .unwrap();

        assert_eq!(
            parsed.tags.unwrap().into_iter().collect::<Vec<_>>(),
            vec!["react"]
        );
        assert_eq!(parsed.file_patterns.unwrap().len(), 1);
    }

    #[test]
    fn test_empty_and_invalid() {
        assert_eq!(
            DocumentFrontmatter::parse("\n").unwrap(),
            DocumentFrontmatter::default()
        );
        assert!(DocumentFrontmatter::parse("tags: {unclosed").is_err());
    }
}
