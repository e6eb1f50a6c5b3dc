//! Framework detection logic
//!
//! Detects frameworks by testing every manifest dependency against a curated
//! signature table. Confidence reflects how specific the match was.

use std::collections::BTreeMap;

use super::dependencies::name_segments;
use super::models::{DependencyInfo, FrameworkInfo};

/// Exact package name, e.g. `@angular/core`
pub const EXACT_CONFIDENCE: f64 = 0.9;
/// Scoped package under the framework's namespace, e.g. `@vue/runtime-dom`
pub const SCOPE_CONFIDENCE: f64 = 0.8;
/// Framework name appears as a word of the package name, e.g. `react-dom`
pub const SEGMENT_CONFIDENCE: f64 = 0.6;

struct FrameworkSignature {
    name: &'static str,
    packages: &'static [&'static str],
    scopes: &'static [&'static str],
    segments: &'static [&'static str],
}

impl FrameworkSignature {
    fn confidence_for(&self, dependency: &str) -> Option<f64> {
        if self.packages.contains(&dependency) {
            Some(EXACT_CONFIDENCE)
        } else if self.scopes.iter().any(|scope| dependency.starts_with(scope)) {
            Some(SCOPE_CONFIDENCE)
        } else if name_segments(dependency).any(|s| self.segments.contains(&s)) {
            Some(SEGMENT_CONFIDENCE)
        } else {
            None
        }
    }
}

const SIGNATURES: &[FrameworkSignature] = &[
    FrameworkSignature {
        name: "angular",
        packages: &["@angular/core"],
        scopes: &["@angular/"],
        segments: &["angular"],
    },
    FrameworkSignature {
        name: "electron",
        packages: &["electron"],
        scopes: &["@electron/"],
        segments: &["electron"],
    },
    FrameworkSignature {
        name: "express",
        packages: &["express"],
        scopes: &[],
        segments: &["express"],
    },
    FrameworkSignature {
        name: "fastify",
        packages: &["fastify"],
        scopes: &["@fastify/"],
        segments: &["fastify"],
    },
    FrameworkSignature {
        name: "koa",
        packages: &["koa"],
        scopes: &["@koa/"],
        segments: &["koa"],
    },
    FrameworkSignature {
        name: "nestjs",
        packages: &["@nestjs/core"],
        scopes: &["@nestjs/"],
        segments: &["nestjs"],
    },
    FrameworkSignature {
        name: "next",
        packages: &["next"],
        scopes: &["@next/"],
        segments: &["next"],
    },
    FrameworkSignature {
        name: "nuxt",
        packages: &["nuxt"],
        scopes: &["@nuxt/"],
        segments: &["nuxt"],
    },
    FrameworkSignature {
        name: "react",
        packages: &["react"],
        scopes: &[],
        segments: &["react"],
    },
    FrameworkSignature {
        name: "react-native",
        packages: &["react-native"],
        scopes: &["@react-native/"],
        segments: &[],
    },
    FrameworkSignature {
        name: "svelte",
        packages: &["svelte"],
        scopes: &["@sveltejs/"],
        segments: &["svelte"],
    },
    FrameworkSignature {
        name: "vue",
        packages: &["vue"],
        scopes: &["@vue/"],
        segments: &["vue"],
    },
];

/// Detect frameworks from the dependency list.
///
/// Only the highest-confidence match per framework is kept; the result is
/// sorted by framework name.
pub fn detect_frameworks(dependencies: &[DependencyInfo]) -> Vec<FrameworkInfo> {
    let mut best: BTreeMap<&'static str, FrameworkInfo> = BTreeMap::new();

    for dependency in dependencies {
        let name = dependency.name.to_lowercase();
        for signature in SIGNATURES {
            let Some(confidence) = signature.confidence_for(&name) else {
                continue;
            };

            let replace = best
                .get(signature.name)
                .is_none_or(|current| confidence > current.confidence);
            if replace {
                best.insert(
                    signature.name,
                    FrameworkInfo {
                        name: signature.name.to_string(),
                        version: dependency.version.clone(),
                        confidence,
                    },
                );
            }
        }
    }

    best.into_values().collect()
}
