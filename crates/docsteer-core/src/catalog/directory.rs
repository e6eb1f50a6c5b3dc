//! Markdown directory catalog
//!
//! Every `*.md` file below the catalog root is one document. Subdirectories
//! name categories, so `web/react-guide.md` defaults to category `web`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use super::CatalogSource;
use super::frontmatter::{DocumentFrontmatter, split_frontmatter};
use crate::error::{SteerError, SteerResult};
use crate::fs::{FileKind, FileSystem};
use crate::matching::DocumentMetadata;

const DOCUMENT_EXTENSION: &str = "md";
const ROOT_CATEGORY: &str = "general";

/// Catalog read from a tree of markdown files
pub struct DirectoryCatalog {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl AsRef<Path>) -> Self {
        Self {
            fs,
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Relative paths of all markdown files, sorted
    async fn document_paths(&self) -> SteerResult<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut stack = vec![PathBuf::new()];

        while let Some(relative) = stack.pop() {
            let dir = self.root.join(&relative);
            let entries = match self.fs.read_directory(&dir).await {
                Ok(entries) => entries,
                Err(e) if relative.as_os_str().is_empty() => {
                    return Err(SteerError::fetch(format!(
                        "Cannot read catalog directory {}: {}",
                        self.root.display(),
                        e
                    )));
                }
                Err(e) => {
                    warn!("Skipping unreadable catalog directory {:?}: {}", dir, e);
                    continue;
                }
            };

            for entry in entries {
                let path = relative.join(&entry.name);
                match entry.kind {
                    FileKind::Directory if !entry.name.starts_with('.') => stack.push(path),
                    FileKind::File
                        if path.extension().and_then(|e| e.to_str()) == Some(DOCUMENT_EXTENSION) =>
                    {
                        found.push(path)
                    }
                    _ => {}
                }
            }
        }

        found.sort();
        Ok(found)
    }

    async fn load_document(&self, relative: &Path) -> Option<DocumentMetadata> {
        let content = match self.fs.read_file(&self.root.join(relative)).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping unreadable document {:?}: {}", relative, e);
                return None;
            }
        };

        let frontmatter = match split_frontmatter(&content).0 {
            Some(yaml) => match DocumentFrontmatter::parse(yaml) {
                Ok(frontmatter) => frontmatter,
                Err(e) => {
                    warn!("Skipping {:?}: invalid frontmatter: {}", relative, e);
                    return None;
                }
            },
            None => DocumentFrontmatter::default(),
        };

        let stem = relative.file_stem()?.to_string_lossy().into_owned();
        let parent_category = relative
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned());

        Some(DocumentMetadata {
            name: frontmatter.name.unwrap_or(stem),
            path: relative.to_string_lossy().replace('\\', "/"),
            category: frontmatter
                .category
                .or(parent_category)
                .unwrap_or_else(|| ROOT_CATEGORY.to_string()),
            tags: frontmatter.tags,
            required_dependencies: frontmatter.required_dependencies,
            file_patterns: frontmatter.file_patterns,
        })
    }
}

#[async_trait]
impl CatalogSource for DirectoryCatalog {
    async fn fetch_catalog(&self) -> SteerResult<Vec<DocumentMetadata>> {
        let paths = self.document_paths().await?;

        let mut documents = Vec::with_capacity(paths.len());
        for relative in &paths {
            if let Some(document) = self.load_document(relative).await {
                documents.push(document);
            }
        }

        debug!(
            "Loaded {} of {} documents from {:?}",
            documents.len(),
            paths.len(),
            self.root
        );
        Ok(documents)
    }
}
