//! JSON file catalog

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::CatalogSource;
use crate::error::{SteerError, SteerResult};
use crate::fs::FileSystem;
use crate::matching::DocumentMetadata;

/// Catalog stored as a JSON array of document metadata
pub struct JsonCatalog {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for JsonCatalog {
    async fn fetch_catalog(&self) -> SteerResult<Vec<DocumentMetadata>> {
        let content = self.fs.read_file(&self.path).await.map_err(|e| {
            SteerError::fetch(format!("Cannot read {}: {}", self.path.display(), e))
        })?;

        let documents: Vec<DocumentMetadata> = serde_json::from_str(&content).map_err(|e| {
            SteerError::fetch(format!("Invalid catalog {}: {}", self.path.display(), e))
        })?;

        debug!("Loaded {} documents from {:?}", documents.len(), self.path);
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::fs::MemoryFileSystem;

    fn catalog(fs: &MemoryFileSystem) -> JsonCatalog {
        JsonCatalog::new(Arc::new(fs.clone()), "/catalog.json")
    }

    #[tokio::test]
    async fn test_fetch() {
        let fs = MemoryFileSystem::new();
        fs.add_file(
            "/catalog.json",
            r#"[
                {
                    "name": "react-guide",
                    "path": "web/react-guide.md",
                    "category": "web",
                    "tags": ["react", "typescript"],
                    "requiredDependencies": ["react"]
                },
                { "name": "git-flow", "path": "git-flow.md", "category": "process" }
            ]"#,
        );

        let documents = catalog(&fs).fetch_catalog().await.unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].tags.as_ref().unwrap().len(), 2);
        assert!(documents[1].required_dependencies.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_failed() {
        let fs = MemoryFileSystem::new();
        let err = catalog(&fs).fetch_catalog().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::FetchFailed);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_invalid_json_is_fetch_failed() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/catalog.json", r#"{ "name": "not an array" }"#);
        let err = catalog(&fs).fetch_catalog().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::FetchFailed);
        assert!(err.to_string().contains("/catalog.json"));
    }
}
