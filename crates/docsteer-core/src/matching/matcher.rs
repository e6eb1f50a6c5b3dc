//! Document scoring and ranking
//!
//! Every factor awards its full weight once per distinct match, so a score only
//! grows as more independent signals line up. Comparisons are case-insensitive
//! and empty entries never match.

use std::collections::BTreeSet;
use tracing::debug;

use super::types::{DocumentMetadata, MatchReason, MatchReasonType, ScoredDocument};
use crate::workspace::WorkspaceContext;

pub const FRAMEWORK_WEIGHT: u32 = 30;
pub const DEPENDENCY_WEIGHT: u32 = 20;
pub const FILE_PATTERN_WEIGHT: u32 = 15;
pub const LANGUAGE_WEIGHT: u32 = 10;

impl MatchReasonType {
    /// Points awarded per distinct match
    pub fn weight(&self) -> u32 {
        match self {
            Self::Framework => FRAMEWORK_WEIGHT,
            Self::Dependency => DEPENDENCY_WEIGHT,
            Self::FilePattern => FILE_PATTERN_WEIGHT,
            Self::Language => LANGUAGE_WEIGHT,
        }
    }
}

/// Lowercased, non-empty, distinct entries of an optional document field
fn normalized(values: Option<&BTreeSet<String>>) -> Vec<(&str, String)> {
    let mut seen = BTreeSet::new();
    values
        .into_iter()
        .flatten()
        .map(|v| (v.as_str(), v.trim().to_lowercase()))
        .filter(|(_, lower)| !lower.is_empty() && seen.insert(lower.clone()))
        .collect()
}

fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn describe(reason_type: MatchReasonType, details: &[String]) -> String {
    let list = details.join(", ");
    match reason_type {
        MatchReasonType::Framework if details.len() > 1 => format!("Uses frameworks {}", list),
        MatchReasonType::Framework => format!("Uses the {} framework", list),
        MatchReasonType::Dependency => format!("Depends on {}", list),
        MatchReasonType::FilePattern => format!("Project structure matches {}", list),
        MatchReasonType::Language => format!("Written in {}", list),
    }
}

fn reason(reason_type: MatchReasonType, details: Vec<String>) -> Option<MatchReason> {
    if details.is_empty() {
        return None;
    }
    Some(MatchReason {
        reason_type,
        description: describe(reason_type, &details),
        weight: reason_type.weight() * details.len() as u32,
        details,
    })
}

/// Scores catalog documents against a [`WorkspaceContext`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentMatcher;

impl DocumentMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Score a single document
    pub fn score_document(
        &self,
        document: &DocumentMetadata,
        context: &WorkspaceContext,
    ) -> ScoredDocument {
        let tags = normalized(document.tags.as_ref());

        let reasons: Vec<MatchReason> = [
            reason(MatchReasonType::Framework, framework_matches(&tags, context)),
            reason(
                MatchReasonType::Dependency,
                dependency_matches(document, context),
            ),
            reason(
                MatchReasonType::FilePattern,
                file_pattern_matches(document, context),
            ),
            reason(MatchReasonType::Language, language_matches(&tags, context)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let score = reasons.iter().map(|r| r.weight).sum();
        let is_installed = context.installed_docs.iter().any(|n| *n == document.name);

        ScoredDocument {
            document: document.clone(),
            score,
            reasons,
            is_installed,
        }
    }

    /// Score every document, drop those with no reason, and sort by score
    /// descending then name ascending
    pub fn rank_documents(
        &self,
        documents: &[DocumentMetadata],
        context: &WorkspaceContext,
    ) -> Vec<ScoredDocument> {
        let mut ranked: Vec<ScoredDocument> = documents
            .iter()
            .map(|document| self.score_document(document, context))
            .filter(|scored| !scored.reasons.is_empty())
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.document.name.cmp(&b.document.name))
        });

        debug!(
            "Ranked {} of {} documents",
            ranked.len(),
            documents.len()
        );
        ranked
    }
}

/// Detected frameworks that some tag equals or is a substring of
fn framework_matches(tags: &[(&str, String)], context: &WorkspaceContext) -> Vec<String> {
    context
        .frameworks
        .iter()
        .filter(|framework| {
            let name = framework.name.to_lowercase();
            tags.iter().any(|(_, tag)| name.contains(tag.as_str()))
        })
        .map(|framework| framework.name.clone())
        .collect()
}

/// Required dependencies overlapping some workspace dependency name
fn dependency_matches(document: &DocumentMetadata, context: &WorkspaceContext) -> Vec<String> {
    let installed: Vec<String> = context
        .dependencies
        .iter()
        .map(|d| d.name.to_lowercase())
        .collect();

    normalized(document.required_dependencies.as_ref())
        .into_iter()
        .filter(|(_, required)| installed.iter().any(|name| overlaps(name, required)))
        .map(|(original, _)| original.to_string())
        .collect()
}

/// Document patterns overlapping some detected workspace pattern
fn file_pattern_matches(document: &DocumentMetadata, context: &WorkspaceContext) -> Vec<String> {
    let detected: Vec<String> = context
        .file_patterns
        .iter()
        .map(|p| p.pattern.to_lowercase())
        .collect();

    normalized(document.file_patterns.as_ref())
        .into_iter()
        .filter(|(_, pattern)| detected.iter().any(|d| overlaps(d, pattern)))
        .map(|(original, _)| original.to_string())
        .collect()
}

/// Tags exactly equal to a detected language
fn language_matches(tags: &[(&str, String)], context: &WorkspaceContext) -> Vec<String> {
    tags.iter()
        .filter(|(_, tag)| context.languages.iter().any(|l| l.to_lowercase() == *tag))
        .map(|(original, _)| original.to_string())
        .collect()
}
