//! Command routing logic for CLI

use anyhow::{Context, Result};
use async_trait::async_trait;
use docsteer_core::config::DEFAULT_CONFIG_FILE;
use docsteer_core::{
    CatalogSource, DocsteerConfig, DocumentMetadata, FileSystem, InstalledDirectory,
    LocalFileSystem, RecommendationService, SteerError, SteerResult, WorkspaceAnalysisCache,
    WorkspaceAnalyzer, open_catalog,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;
use crate::logging;

/// Everything a command needs, resolved once from flags and configuration
pub struct Session {
    pub config: DocsteerConfig,
    pub workspace_root: Option<PathBuf>,
    pub fs: Arc<dyn FileSystem>,
    pub console: CliConsole,
}

/// Stand-in for commands that never fetch the catalog
struct UnconfiguredCatalog;

#[async_trait]
impl CatalogSource for UnconfiguredCatalog {
    async fn fetch_catalog(&self) -> SteerResult<Vec<DocumentMetadata>> {
        Err(SteerError::config(NO_CATALOG))
    }
}

const NO_CATALOG: &str = "No catalog configured; pass --catalog or set DOCSTEER_CATALOG";

impl Session {
    /// Catalog from the flag, falling back to configuration
    pub fn catalog_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.config.catalog.path.clone())
    }

    /// Catalog path, or a configuration error when none is set
    pub fn require_catalog(&self, flag: Option<&Path>) -> SteerResult<PathBuf> {
        self.catalog_path(flag)
            .ok_or_else(|| SteerError::config(NO_CATALOG))
    }

    /// Build the recommendation service for the resolved workspace
    pub async fn service(&self, catalog_path: Option<PathBuf>) -> RecommendationService {
        let analyzer =
            WorkspaceAnalyzer::new(Arc::clone(&self.fs)).with_config(self.config.analyzer.clone());
        let cache = Arc::new(WorkspaceAnalysisCache::new(analyzer).with_config(&self.config.cache));

        let catalog: Arc<dyn CatalogSource> = match catalog_path {
            Some(path) => {
                self.console.info(&format!("Using catalog {}", path.display()));
                open_catalog(Arc::clone(&self.fs), &path).await
            }
            None => Arc::new(UnconfiguredCatalog),
        };

        let mut service = RecommendationService::new(self.workspace_root.clone(), cache, catalog);
        if let Some(root) = &self.workspace_root {
            let installed_dir = root.join(&self.config.installed_dir);
            service = service.with_installed(Arc::new(InstalledDirectory::new(
                Arc::clone(&self.fs),
                installed_dir,
            )));
        }
        service
    }
}

fn resolve_workspace(cli: &Cli) -> Option<PathBuf> {
    match &cli.workspace {
        Some(dir) => Some(dir.clone()),
        None => std::env::current_dir().ok(),
    }
}

fn resolve_config_path(cli: &Cli, workspace_root: Option<&Path>) -> PathBuf {
    match (&cli.config, workspace_root) {
        (Some(path), _) => path.clone(),
        (None, Some(root)) => root.join(DEFAULT_CONFIG_FILE),
        (None, None) => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> Result<()> {
    let workspace_root = resolve_workspace(&cli);
    let config_path = resolve_config_path(&cli, workspace_root.as_deref());
    let config = DocsteerConfig::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    logging::init(&config.logging, cli.verbose);
    tracing::debug!("Loaded configuration from {:?}", config_path);

    let session = Session {
        config,
        workspace_root,
        fs: Arc::new(LocalFileSystem::new()),
        console: CliConsole::new(cli.verbose),
    };

    match &cli.command {
        Commands::Recommend(args) => commands::recommend::execute(&session, args).await,
        Commands::Analyze { json } => commands::analyze::execute(&session, *json).await,
    }
}
