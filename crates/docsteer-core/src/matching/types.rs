//! Matching types and data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Catalog entry describing one steering document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub name: String,
    pub path: String,
    pub category: String,
    /// Free-form tags; compared against frameworks and languages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_dependencies: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_patterns: Option<BTreeSet<String>>,
}

fn to_set<I, S>(items: I) -> Option<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Some(items.into_iter().map(Into::into).collect())
}

impl DocumentMetadata {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            category: category.into(),
            tags: None,
            required_dependencies: None,
            file_patterns: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = to_set(tags);
        self
    }

    pub fn with_required_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_dependencies = to_set(dependencies);
        self
    }

    pub fn with_file_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_patterns = to_set(patterns);
        self
    }
}

/// Scoring factor a reason belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchReasonType {
    Framework,
    Dependency,
    FilePattern,
    Language,
}

impl MatchReasonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Framework => "framework",
            Self::Dependency => "dependency",
            Self::FilePattern => "file-pattern",
            Self::Language => "language",
        }
    }
}

impl fmt::Display for MatchReasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a document earned points for one factor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReason {
    #[serde(rename = "type")]
    pub reason_type: MatchReasonType,
    pub description: String,
    /// Points contributed by this factor
    pub weight: u32,
    /// Matched items; never empty
    pub details: Vec<String>,
}

/// A catalog document scored against a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDocument {
    pub document: DocumentMetadata,
    pub score: u32,
    pub reasons: Vec<MatchReason>,
    pub is_installed: bool,
}

impl ScoredDocument {
    /// One-line explanation, e.g. `react-guide (60): framework, dependency, language`
    pub fn summary(&self) -> String {
        let factors: Vec<_> = self.reasons.iter().map(|r| r.reason_type.as_str()).collect();
        let mut line = format!("{} ({})", self.document.name, self.score);
        if !factors.is_empty() {
            line.push_str(": ");
            line.push_str(&factors.join(", "));
        }
        if self.is_installed {
            line.push_str(" [installed]");
        }
        line
    }
}
