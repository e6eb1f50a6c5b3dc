//! Docsteer Core Library
//!
//! This crate recommends steering documents for a workspace. It fingerprints
//! the workspace (dependencies, frameworks, layout, languages), caches that
//! fingerprint per root, scores catalog documents against it and returns a
//! ranked, explained list.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod fs;
pub mod matching;
pub mod recommendation;
pub mod workspace;

// Re-export commonly used types
pub use catalog::{
    CatalogSource, DirectoryCatalog, InstalledDirectory, InstalledDocuments, JsonCatalog,
    open_catalog,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DocsteerConfig, LogFormat, LoggingConfig};
pub use error::{ErrorCode, SteerError, SteerResult};
pub use fs::{FileSystem, LocalFileSystem, MemoryFileSystem};
pub use matching::{DocumentMatcher, DocumentMetadata, MatchReason, MatchReasonType, ScoredDocument};
pub use recommendation::{RecommendationOptions, RecommendationService};
pub use workspace::{
    DependencyCategory, DependencyInfo, FilePattern, FrameworkInfo, ProjectType,
    WorkspaceAnalysisCache, WorkspaceAnalyzer, WorkspaceContext,
};
