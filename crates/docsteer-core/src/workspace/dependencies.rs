//! package.json dependency extraction and classification

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

use super::MANIFEST_FILE;
use super::models::{DependencyCategory, DependencyInfo};
use crate::fs::FileSystem;

const TESTING_KEYWORDS: &[&str] = &[
    "jest",
    "mocha",
    "chai",
    "vitest",
    "cypress",
    "playwright",
    "jasmine",
    "karma",
    "sinon",
    "supertest",
    "ava",
    "enzyme",
    "nyc",
    "c8",
    "testing-library",
    "test-utils",
];

const BUILD_KEYWORDS: &[&str] = &[
    "webpack",
    "vite",
    "rollup",
    "esbuild",
    "babel",
    "typescript",
    "eslint",
    "prettier",
    "parcel",
    "tsup",
    "swc",
    "turbo",
    "gulp",
    "grunt",
    "nodemon",
    "lerna",
    "nx",
    "ts-node",
];

const FRAMEWORK_KEYWORDS: &[&str] = &[
    "react",
    "vue",
    "angular",
    "svelte",
    "next",
    "nuxt",
    "express",
    "fastify",
    "nestjs",
    "koa",
    "electron",
    "preact",
    "remix",
    "astro",
    "gatsby",
    "ember",
    "hapi",
    "solid-js",
];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    #[serde(default)]
    dependencies: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    dev_dependencies: Option<BTreeMap<String, Value>>,
}

/// Split a package name into its word segments (`@vue/test-utils` → vue, test, utils)
pub(crate) fn name_segments(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| matches!(c, '@' | '/' | '-' | '.' | '_'))
        .filter(|s| !s.is_empty())
}

/// Whether a package name matches a curated keyword.
///
/// Hyphenated keywords match anywhere in the name; plain keywords must equal a
/// whole name segment so that `preact` is not mistaken for `react`.
fn matches_keyword(name: &str, keyword: &str) -> bool {
    if keyword.contains('-') {
        name.contains(keyword)
    } else {
        name_segments(name).any(|segment| segment == keyword)
    }
}

/// Classify a dependency by name; unmatched names are utilities
pub fn categorize(name: &str) -> DependencyCategory {
    let name = name.to_lowercase();
    let any = |keywords: &[&str]| keywords.iter().any(|k| matches_keyword(&name, k));

    if any(TESTING_KEYWORDS) {
        DependencyCategory::Testing
    } else if any(BUILD_KEYWORDS) {
        DependencyCategory::Build
    } else if any(FRAMEWORK_KEYWORDS) {
        DependencyCategory::Framework
    } else {
        DependencyCategory::Utility
    }
}

fn version_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse `dependencies` and `devDependencies` into one flat list.
///
/// Runtime dependencies come first, each group sorted by name.
pub fn parse_manifest(content: &str) -> Result<Vec<DependencyInfo>, serde_json::Error> {
    let manifest: PackageManifest = serde_json::from_str(content)?;

    let runtime = manifest
        .dependencies
        .unwrap_or_default()
        .into_iter()
        .map(|entry| (entry, false));
    let dev = manifest
        .dev_dependencies
        .unwrap_or_default()
        .into_iter()
        .map(|entry| (entry, true));

    Ok(runtime
        .chain(dev)
        .map(|((name, version), is_dev)| DependencyInfo {
            category: categorize(&name),
            version: version_string(&version),
            name,
            is_dev,
        })
        .collect())
}

/// Read the workspace manifest, degrading to no dependencies on any failure
pub(crate) async fn read_dependencies(fs: &dyn FileSystem, root: &Path) -> Vec<DependencyInfo> {
    let manifest_path = root.join(MANIFEST_FILE);

    let content = match fs.read_file(&manifest_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No {} in {:?}", MANIFEST_FILE, root);
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to read {:?}: {}", manifest_path, e);
            return Vec::new();
        }
    };

    match parse_manifest(&content) {
        Ok(dependencies) => dependencies,
        Err(e) => {
            warn!("Failed to parse {:?}, continuing without dependencies: {}", manifest_path, e);
            Vec::new()
        }
    }
}
