//! Project structure analysis
//!
//! Counts files under well-known directories and looks for test files. Every
//! walk is depth-capped and never descends into `node_modules`.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::models::FilePattern;
use crate::config::AnalyzerConfig;
use crate::fs::{FileKind, FileSystem};

/// Normalizer for structural directory patterns
pub const STRUCTURE_NORMALIZER: usize = 10;
/// Normalizer for the synthetic tests pattern
pub const TEST_NORMALIZER: usize = 20;
/// Pattern reported when test files are found
pub const TEST_PATTERN: &str = "**/*.{test,spec}.*";

/// Hard ceiling on walk depth; a larger configured value is clamped to it
pub const MAX_DEPTH: usize = 5;

const ALWAYS_EXCLUDED: &str = "node_modules";

/// Directories whose presence says something about the project shape
const CANDIDATE_DIRS: &[&str] = &[
    "components",
    "src/components",
    "pages",
    "src/pages",
    "pages/api",
    "src/pages/api",
    "app",
    "src/app",
    "routes",
    "src/routes",
    "api",
    "src/api",
    "views",
    "src/views",
    "hooks",
    "src/hooks",
    "store",
    "src/store",
    "services",
    "src/services",
    "middleware",
    "src/middleware",
    "controllers",
    "src/controllers",
];

/// Result of the structure pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureAnalysis {
    pub patterns: Vec<FilePattern>,
    pub has_tests: bool,
}

enum ExcludeRule {
    Name(String),
    Glob(glob::Pattern),
}

impl ExcludeRule {
    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Name(n) => n == name,
            Self::Glob(pattern) => pattern.matches(name),
        }
    }
}

/// Depth-capped directory walker
pub(crate) struct Walker<'a> {
    fs: &'a dyn FileSystem,
    max_depth: usize,
    excludes: Vec<ExcludeRule>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(fs: &'a dyn FileSystem, config: &AnalyzerConfig) -> Self {
        let mut excludes = vec![ExcludeRule::Name(ALWAYS_EXCLUDED.to_string())];
        for pattern in &config.exclude_patterns {
            if pattern.contains(['*', '?', '[']) {
                match glob::Pattern::new(pattern) {
                    Ok(glob) => excludes.push(ExcludeRule::Glob(glob)),
                    Err(e) => warn!("Ignoring invalid exclude pattern {:?}: {}", pattern, e),
                }
            } else {
                excludes.push(ExcludeRule::Name(pattern.clone()));
            }
        }

        Self {
            fs,
            max_depth: config.max_depth.min(MAX_DEPTH),
            excludes,
        }
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excludes.iter().any(|rule| rule.matches(name))
    }

    /// Count files accepted by `filter` below `dir`.
    ///
    /// `dir` itself is level 1; directories deeper than `max_depth` are not read.
    pub(crate) async fn count_files<F>(&self, dir: &Path, filter: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        if self.max_depth == 0 {
            return 0;
        }

        let mut count = 0;
        let mut stack: Vec<(PathBuf, usize)> = vec![(dir.to_path_buf(), 1)];

        while let Some((current, level)) = stack.pop() {
            let entries = match self.fs.read_directory(&current).await {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Skipping unreadable directory {:?}: {}", current, e);
                    continue;
                }
            };

            for entry in entries {
                if self.is_excluded(&entry.name) {
                    continue;
                }
                match entry.kind {
                    FileKind::Directory if level < self.max_depth => {
                        stack.push((current.join(&entry.name), level + 1));
                    }
                    FileKind::File if filter(&entry.name) => count += 1,
                    _ => {}
                }
            }
        }

        count
    }
}

/// Test files are recognized by a `.test.` or `.spec.` infix
pub fn is_test_file(name: &str) -> bool {
    name.contains(".test.") || name.contains(".spec.")
}

/// Analyze project structure
pub(crate) async fn analyze_structure(walker: &Walker<'_>, root: &Path) -> StructureAnalysis {
    let mut analysis = StructureAnalysis::default();

    for candidate in CANDIDATE_DIRS {
        let dir = root.join(candidate);
        match walker.fs.stat(&dir).await {
            Ok(stat) if stat.is_dir() => {}
            _ => continue,
        }

        let count = walker.count_files(&dir, |_| true).await;
        if count > 0 {
            debug!("Found {} files under {}", count, candidate);
            analysis.patterns.push(FilePattern::new(
                format!("{}/**/*", candidate),
                count,
                STRUCTURE_NORMALIZER,
            ));
        }
    }

    let test_files = walker.count_files(root, is_test_file).await;
    if test_files > 0 {
        analysis.has_tests = true;
        analysis
            .patterns
            .push(FilePattern::new(TEST_PATTERN, test_files, TEST_NORMALIZER));
    }

    analysis
}
