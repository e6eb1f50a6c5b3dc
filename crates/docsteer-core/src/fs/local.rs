//! Host file system backed by tokio::fs and notify

use async_trait::async_trait;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info};

use super::{
    DirEntry, FileEvent, FileEventKind, FileKind, FileStat, FileSystem, WatchCallback, WatchHandle,
};

/// [`FileSystem`] over the real disk
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

fn kind_of(file_type: std::fs::FileType) -> FileKind {
    if file_type.is_dir() {
        FileKind::Directory
    } else if file_type.is_file() {
        FileKind::File
    } else {
        FileKind::Other
    }
}

fn event_kind(kind: &EventKind) -> Option<FileEventKind> {
    match kind {
        EventKind::Create(_) => Some(FileEventKind::Created),
        EventKind::Modify(_) => Some(FileEventKind::Changed),
        EventKind::Remove(_) => Some(FileEventKind::Deleted),
        _ => None,
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = fs::metadata(path).await?;
        Ok(FileStat {
            kind: kind_of(metadata.file_type()),
        })
    }

    async fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path).await
    }

    async fn read_directory(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(path).await?;

        while let Some(entry) = dir.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                debug!("Skipping non UTF-8 entry in {:?}", path);
                continue;
            };
            let kind = match entry.file_type().await {
                Ok(file_type) => kind_of(file_type),
                Err(e) => {
                    debug!("Could not read file type of {}: {}", name, e);
                    continue;
                }
            };
            entries.push(DirEntry { name, kind });
        }

        Ok(entries)
    }

    fn watch(&self, paths: &[PathBuf], on_event: WatchCallback) -> io::Result<WatchHandle> {
        // notify may report canonicalized paths, so match on file name only.
        let names: BTreeSet<OsString> = paths
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_os_string()))
            .collect();

        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            match result {
                Ok(event) => {
                    let Some(kind) = event_kind(&event.kind) else {
                        return;
                    };
                    for path in event.paths {
                        if path.file_name().is_some_and(|n| names.contains(n)) {
                            on_event(&FileEvent { path, kind });
                        }
                    }
                }
                Err(e) => {
                    error!("File watcher error: {}", e);
                }
            }
        })
        .map_err(io::Error::other)?;

        // Watch parent directories so files that do not exist yet are seen on creation.
        let parents: BTreeSet<&Path> = paths.iter().filter_map(|p| p.parent()).collect();
        for dir in parents {
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .map_err(io::Error::other)?;
            info!("Watching {:?} for manifest changes", dir);
        }

        Ok(WatchHandle::new(Mutex::new(watcher)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_stat_and_read() {
        let temp = TempDir::new().unwrap();
        std_fs::write(temp.path().join("package.json"), "{}").unwrap();
        std_fs::create_dir(temp.path().join("src")).unwrap();

        let fs = LocalFileSystem::new();
        assert!(fs.stat(temp.path()).await.unwrap().is_dir());
        assert!(fs.stat(&temp.path().join("package.json")).await.unwrap().is_file());
        assert_eq!(fs.read_file(&temp.path().join("package.json")).await.unwrap(), "{}");
        assert!(!fs.exists(&temp.path().join("missing")).await);
    }

    #[tokio::test]
    async fn test_read_directory() {
        let temp = TempDir::new().unwrap();
        std_fs::write(temp.path().join("a.ts"), "").unwrap();
        std_fs::create_dir(temp.path().join("nested")).unwrap();

        let fs = LocalFileSystem::new();
        let mut entries = fs.read_directory(temp.path()).await.unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.ts");
        assert_eq!(entries[0].kind, FileKind::File);
        assert_eq!(entries[1].kind, FileKind::Directory);
    }

    #[test]
    fn test_watch_registration() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFileSystem::new();
        let handle = fs.watch(
            &[temp.path().join("package.json")],
            std::sync::Arc::new(|_event: &FileEvent| {}),
        );
        assert!(handle.is_ok());
    }
}
