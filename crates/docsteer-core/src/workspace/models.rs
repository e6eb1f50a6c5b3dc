//! Data models for workspace analysis

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Coarse classification of what a project is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectType {
    WebApp,
    Library,
    CliTool,
    VsCodeExtension,
    ApiServer,
    #[default]
    Unknown,
}

impl ProjectType {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::WebApp => "Web application",
            Self::Library => "Library",
            Self::CliTool => "CLI tool",
            Self::VsCodeExtension => "VS Code extension",
            Self::ApiServer => "API server",
            Self::Unknown => "Unknown",
        }
    }
}

/// Framework detected from the dependency manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkInfo {
    /// Lowercase framework name (e.g. "react")
    pub name: String,
    /// Version string exactly as written in the manifest
    pub version: String,
    /// How specific the matching pattern was (0.0 - 1.0)
    pub confidence: f64,
}

/// Keyword-based classification of a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyCategory {
    Framework,
    Testing,
    Build,
    Utility,
}

/// A single manifest dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyInfo {
    pub name: String,
    pub version: String,
    /// Declared under devDependencies
    pub is_dev: bool,
    pub category: DependencyCategory,
}

/// Structural evidence found in the workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilePattern {
    /// Glob-like pattern, e.g. `components/**/*`
    pub pattern: String,
    /// Files matched
    pub count: usize,
    /// `min(count / normalizer, 1.0)`
    pub significance: f64,
}

impl FilePattern {
    pub fn new(pattern: impl Into<String>, count: usize, normalizer: usize) -> Self {
        let significance = (count as f64 / normalizer.max(1) as f64).min(1.0);
        Self {
            pattern: pattern.into(),
            count,
            significance,
        }
    }
}

/// Technology fingerprint of a workspace
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceContext {
    pub languages: BTreeSet<String>,
    pub frameworks: Vec<FrameworkInfo>,
    pub dependencies: Vec<DependencyInfo>,
    pub file_patterns: Vec<FilePattern>,
    pub has_tests: bool,
    pub project_type: ProjectType,
    /// Names of installed documents; supplied by the caller, never computed
    pub installed_docs: Vec<String>,
}

impl WorkspaceContext {
    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Project type: {}", self.project_type.name()));

        if !self.languages.is_empty() {
            let languages: Vec<_> = self.languages.iter().map(String::as_str).collect();
            lines.push(format!("Languages: {}", languages.join(", ")));
        }

        if !self.frameworks.is_empty() {
            let frameworks: Vec<_> = self
                .frameworks
                .iter()
                .map(|f| format!("{} {} ({:.0}%)", f.name, f.version, f.confidence * 100.0))
                .collect();
            lines.push(format!("Frameworks: {}", frameworks.join(", ")));
        }

        let dev = self.dependencies.iter().filter(|d| d.is_dev).count();
        lines.push(format!(
            "Dependencies: {} direct, {} dev",
            self.dependencies.len() - dev,
            dev
        ));

        for pattern in &self.file_patterns {
            lines.push(format!(
                "Pattern: {} ({} files, significance {:.2})",
                pattern.pattern, pattern.count, pattern.significance
            ));
        }

        lines.push(format!("Has tests: {}", if self.has_tests { "yes" } else { "no" }));

        if !self.installed_docs.is_empty() {
            lines.push(format!("Installed documents: {}", self.installed_docs.len()));
        }

        lines.join("\n")
    }
}
