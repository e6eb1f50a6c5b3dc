//! Recommendation service
//!
//! Orchestrates one request: analyze the workspace (cached), merge installed
//! document names, fetch the catalog, rank, then filter and truncate.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::options::RecommendationOptions;
use crate::catalog::{CatalogSource, InstalledDocuments};
use crate::error::{SteerError, SteerResult};
use crate::matching::{DocumentMatcher, ScoredDocument};
use crate::workspace::{WorkspaceAnalysisCache, WorkspaceContext};

/// Entry point used by the command layer
pub struct RecommendationService {
    workspace_root: Option<PathBuf>,
    cache: Arc<WorkspaceAnalysisCache>,
    catalog: Arc<dyn CatalogSource>,
    installed: Option<Arc<dyn InstalledDocuments>>,
    matcher: DocumentMatcher,
}

impl RecommendationService {
    /// Create a service; `workspace_root` is `None` when no workspace is open
    pub fn new(
        workspace_root: Option<PathBuf>,
        cache: Arc<WorkspaceAnalysisCache>,
        catalog: Arc<dyn CatalogSource>,
    ) -> Self {
        Self {
            workspace_root,
            cache,
            catalog,
            installed: None,
            matcher: DocumentMatcher::new(),
        }
    }

    /// Set the installed-document source
    pub fn with_installed(mut self, installed: Arc<dyn InstalledDocuments>) -> Self {
        self.installed = Some(installed);
        self
    }

    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    pub fn cache(&self) -> &Arc<WorkspaceAnalysisCache> {
        &self.cache
    }

    fn resolve_root(&self) -> SteerResult<&Path> {
        self.workspace_root
            .as_deref()
            .filter(|root| !root.as_os_str().is_empty())
            .ok_or(SteerError::NoWorkspace)
    }

    async fn installed_names(&self) -> Vec<String> {
        let Some(installed) = &self.installed else {
            return Vec::new();
        };
        match installed.installed_document_names().await {
            Ok(names) => names,
            Err(e) => {
                warn!("Treating all documents as not installed: {}", e);
                Vec::new()
            }
        }
    }

    /// Analyze the workspace and merge in the installed document names
    pub async fn analyze_workspace(&self) -> SteerResult<WorkspaceContext> {
        let root = self.resolve_root()?;
        let analyzed = self.cache.analyze(root).await?;

        let mut context = WorkspaceContext::clone(&analyzed);
        for name in self.installed_names().await {
            if !context.installed_docs.contains(&name) {
                context.installed_docs.push(name);
            }
        }
        Ok(context)
    }

    /// Ranked recommendations for the current workspace
    pub async fn get_recommendations(
        &self,
        options: &RecommendationOptions,
    ) -> SteerResult<Vec<ScoredDocument>> {
        let context = self.analyze_workspace().await?;
        let documents = self.catalog.fetch_catalog().await.map_err(|e| match e {
            SteerError::FetchFailed { .. } => e,
            other => SteerError::fetch(other.to_string()),
        })?;

        let ranked = self.matcher.rank_documents(&documents, &context);
        let matched = ranked.len();

        let recommendations: Vec<ScoredDocument> = ranked
            .into_iter()
            .filter(|scored| scored.score >= options.min_score)
            .filter(|scored| options.include_installed || !scored.is_installed)
            .take(options.max_results)
            .collect();

        debug!(
            "{} of {} catalog documents matched, {} kept with {:?}",
            matched,
            documents.len(),
            recommendations.len(),
            options
        );
        info!("Produced {} recommendations", recommendations.len());

        Ok(recommendations)
    }

    /// Release cache watchers and entries
    pub fn dispose(&self) {
        self.cache.dispose();
    }
}
