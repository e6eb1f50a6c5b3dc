//! Language and project-type classification

use std::collections::BTreeSet;

use super::models::{DependencyInfo, FilePattern, ProjectType};

/// Always present: every manifest-based project is at least JavaScript
pub const BASE_LANGUAGE: &str = "javascript";
pub const TYPED_LANGUAGE: &str = "typescript";

const EXTENSION_MARKERS: &[&str] = &["vscode", "@types/vscode"];
const CLI_MARKERS: &[&str] = &["commander", "yargs", "@oclif/core", "meow", "cac"];
const API_MARKERS: &[&str] = &["express", "fastify", "koa", "@nestjs/core", "@hapi/hapi"];
const WEB_MARKERS: &[&str] = &[
    "react",
    "vue",
    "@angular/core",
    "svelte",
    "next",
    "nuxt",
    "preact",
    "solid-js",
    "gatsby",
    "astro",
];

fn has_any(dependencies: &[DependencyInfo], markers: &[&str]) -> bool {
    dependencies
        .iter()
        .any(|d| markers.contains(&d.name.to_lowercase().as_str()))
}

/// Detect languages from the typing config file and typing-related dependencies
pub fn detect_languages(dependencies: &[DependencyInfo], has_typescript_config: bool) -> BTreeSet<String> {
    let mut languages = BTreeSet::from([BASE_LANGUAGE.to_string()]);

    let typed = has_typescript_config
        || dependencies
            .iter()
            .any(|d| d.name == TYPED_LANGUAGE || d.name.starts_with("@types/"));
    if typed {
        languages.insert(TYPED_LANGUAGE.to_string());
    }

    languages
}

/// Classify the project by fixed priority.
///
/// Extension markers win over CLI markers, which win over API frameworks,
/// which win over web evidence. Any remaining dependencies make a library.
pub fn classify(dependencies: &[DependencyInfo], patterns: &[FilePattern]) -> ProjectType {
    let has_components = patterns.iter().any(|p| p.pattern.contains("components"));

    if has_any(dependencies, EXTENSION_MARKERS) {
        ProjectType::VsCodeExtension
    } else if has_any(dependencies, CLI_MARKERS) {
        ProjectType::CliTool
    } else if has_any(dependencies, API_MARKERS) {
        ProjectType::ApiServer
    } else if has_any(dependencies, WEB_MARKERS) || has_components {
        ProjectType::WebApp
    } else if !dependencies.is_empty() {
        ProjectType::Library
    } else {
        ProjectType::Unknown
    }
}
