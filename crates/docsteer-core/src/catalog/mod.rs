//! Document catalog and installed-document state
//!
//! The recommendation service only depends on the two traits here. The
//! adapters read a local catalog through [`FileSystem`](crate::fs::FileSystem):
//!
//! - [`JsonCatalog`]: a JSON array of [`DocumentMetadata`]
//! - [`DirectoryCatalog`]: markdown files with YAML frontmatter
//! - [`InstalledDirectory`]: stems of the markdown files already installed

mod directory;
mod frontmatter;
mod installed;
mod json;

pub use directory::DirectoryCatalog;
pub use frontmatter::{DocumentFrontmatter, split_frontmatter};
pub use installed::InstalledDirectory;
pub use json::JsonCatalog;

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::error::SteerResult;
use crate::fs::FileSystem;
use crate::matching::DocumentMetadata;

/// Source of recommendable documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full catalog; failures are reported as `FetchFailed`
    async fn fetch_catalog(&self) -> SteerResult<Vec<DocumentMetadata>>;
}

/// Names of documents already installed in the workspace
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstalledDocuments: Send + Sync {
    async fn installed_document_names(&self) -> SteerResult<Vec<String>>;
}

/// Pick a catalog adapter for `path`: directories use [`DirectoryCatalog`],
/// anything else is read as a [`JsonCatalog`]
pub async fn open_catalog(fs: Arc<dyn FileSystem>, path: &Path) -> Arc<dyn CatalogSource> {
    let is_dir = fs.stat(path).await.map(|s| s.is_dir()).unwrap_or(false);
    if is_dir {
        Arc::new(DirectoryCatalog::new(fs, path))
    } else {
        Arc::new(JsonCatalog::new(fs, path))
    }
}
