//! Workspace analyzer
//!
//! Builds a [`WorkspaceContext`] from the manifest, the directory layout and
//! the typing configuration of a workspace root. Only an unusable root is an
//! error; every other step degrades to partial data.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::dependencies::read_dependencies;
use super::frameworks::detect_frameworks;
use super::models::WorkspaceContext;
use super::project_type::{classify, detect_languages};
use super::structure::{Walker, analyze_structure};
use super::TYPESCRIPT_CONFIG;
use crate::config::AnalyzerConfig;
use crate::error::{SteerError, SteerResult};
use crate::fs::FileSystem;

/// Workspace analyzer
pub struct WorkspaceAnalyzer {
    fs: Arc<dyn FileSystem>,
    config: AnalyzerConfig,
}

impl WorkspaceAnalyzer {
    /// Create a new analyzer
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            config: AnalyzerConfig::default(),
        }
    }

    /// Set configuration
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Perform full analysis
    pub async fn analyze(&self, root: &Path) -> SteerResult<WorkspaceContext> {
        let start = Instant::now();
        self.validate_root(root).await?;

        let dependencies = read_dependencies(self.fs.as_ref(), root).await;
        let frameworks = detect_frameworks(&dependencies);

        let walker = Walker::new(self.fs.as_ref(), &self.config);
        let structure = analyze_structure(&walker, root).await;

        let has_typescript_config = self.fs.exists(&root.join(TYPESCRIPT_CONFIG)).await;
        let languages = detect_languages(&dependencies, has_typescript_config);
        let project_type = classify(&dependencies, &structure.patterns);

        let context = WorkspaceContext {
            languages,
            frameworks,
            dependencies,
            file_patterns: structure.patterns,
            has_tests: structure.has_tests,
            project_type,
            installed_docs: Vec::new(),
        };

        info!(
            "Analyzed workspace {:?} in {}ms: {:?}, {} dependencies, {} frameworks",
            root,
            start.elapsed().as_millis(),
            context.project_type,
            context.dependencies.len(),
            context.frameworks.len()
        );

        Ok(context)
    }

    async fn validate_root(&self, root: &Path) -> SteerResult<()> {
        if root.as_os_str().is_empty() {
            return Err(SteerError::NoWorkspace);
        }

        match self.fs.stat(root).await {
            Ok(stat) if stat.is_dir() => Ok(()),
            Ok(_) => {
                debug!("Workspace root {:?} is not a directory", root);
                Err(SteerError::NoWorkspace)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SteerError::NoWorkspace),
            Err(e) => Err(SteerError::analysis(format!(
                "Cannot access workspace root {}: {}",
                root.display(),
                e
            ))),
        }
    }
}
