//! Installed documents read from the workspace steering directory

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::InstalledDocuments;
use crate::error::{SteerError, SteerResult};
use crate::fs::{FileKind, FileSystem};

/// Installed document names are the stems of the `*.md` files in one directory
pub struct InstalledDirectory {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl InstalledDirectory {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl AsRef<Path>) -> Self {
        Self {
            fs,
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl InstalledDocuments for InstalledDirectory {
    async fn installed_document_names(&self) -> SteerResult<Vec<String>> {
        let entries = match self.fs.read_directory(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No installed documents directory at {:?}", self.dir);
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(SteerError::fetch(format!(
                    "Cannot read installed documents in {}: {}",
                    self.dir.display(),
                    e
                )));
            }
        };

        let mut names: Vec<String> = entries
            .into_iter()
            .filter(|entry| entry.kind == FileKind::File)
            .filter_map(|entry| entry.name.strip_suffix(".md").map(str::to_string))
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        Ok(names)
    }
}
