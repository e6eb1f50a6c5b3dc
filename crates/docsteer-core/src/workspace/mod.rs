//! Workspace analysis
//!
//! Fingerprints a JavaScript/TypeScript workspace: manifest dependencies,
//! detected frameworks, structural file patterns, languages and project type.

pub mod analyzer;
pub mod cache;
pub mod dependencies;
pub mod frameworks;
pub mod models;
pub mod project_type;
pub mod structure;

pub use analyzer::WorkspaceAnalyzer;
pub use cache::{WorkspaceAnalysisCache, normalize_root};
pub use dependencies::{categorize, parse_manifest};
pub use frameworks::detect_frameworks;
pub use models::{
    DependencyCategory, DependencyInfo, FilePattern, FrameworkInfo, ProjectType,
    WorkspaceContext,
};
pub use project_type::{classify, detect_languages};
pub use structure::{StructureAnalysis, is_test_file};

/// Dependency manifest read from the workspace root
pub const MANIFEST_FILE: &str = "package.json";

/// Static-typing configuration file
pub const TYPESCRIPT_CONFIG: &str = "tsconfig.json";
