//! Configuration for docsteer
//!
//! Configuration is read from `docsteer.json` (or `.toml` / `.yaml`) and then
//! overridden by `DOCSTEER_*` environment variables. Every section has
//! defaults, so a missing file is not an error.

mod env_loader;
mod file_loader;
mod logging_config;

pub use env_loader::{apply_env_overrides, apply_overrides_from};
pub use file_loader::load_from_file;
pub use logging_config::{LogFormat, LoggingConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::SteerResult;
use crate::recommendation::RecommendationOptions;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "docsteer.json";

/// Default directory, relative to the workspace root, holding installed documents
pub const DEFAULT_INSTALLED_DIR: &str = ".steering";

/// Workspace analyzer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Maximum directory depth counted below a scanned directory, at most 5
    pub max_depth: usize,
    /// Extra names or glob patterns to skip; `node_modules` is always skipped
    pub exclude_patterns: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            exclude_patterns: vec![".git".to_string()],
        }
    }
}

/// Workspace analysis cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long an analysis stays valid without file changes
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
        }
    }
}

/// Where the local document catalog lives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// A `.json` file selects the JSON catalog, a directory the markdown catalog
    pub path: Option<PathBuf>,
}

/// Complete docsteer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsteerConfig {
    pub analyzer: AnalyzerConfig,
    pub cache: CacheConfig,
    pub recommendations: RecommendationOptions,
    pub catalog: CatalogConfig,
    /// Installed documents directory, relative to the workspace root
    pub installed_dir: PathBuf,
    pub logging: LoggingConfig,
}

impl Default for DocsteerConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            cache: CacheConfig::default(),
            recommendations: RecommendationOptions::default(),
            catalog: CatalogConfig::default(),
            installed_dir: PathBuf::from(DEFAULT_INSTALLED_DIR),
            logging: LoggingConfig::default(),
        }
    }
}

impl DocsteerConfig {
    /// Load from a file (defaults if it does not exist) and apply environment overrides
    pub fn load(path: &Path) -> SteerResult<Self> {
        let mut config = load_from_file(path)?;
        apply_env_overrides(&mut config)?;
        Ok(config)
    }
}
