//! In-memory file system for tests and embedding

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use super::{
    DirEntry, FileEvent, FileEventKind, FileKind, FileStat, FileSystem, WatchCallback, WatchHandle,
};

#[derive(Default)]
struct Inner {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    watchers: BTreeMap<u64, Registration>,
    next_watch_id: u64,
}

struct Registration {
    paths: Vec<PathBuf>,
    on_event: WatchCallback,
}

/// Unregisters a watch from the owning [`MemoryFileSystem`] on drop
struct MemoryWatchGuard {
    inner: Weak<Mutex<Inner>>,
    id: u64,
}

impl Drop for MemoryWatchGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().watchers.remove(&self.id);
        }
    }
}

/// [`FileSystem`] held entirely in memory.
///
/// Writes and removals fire watch callbacks the same way a host watcher would.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory and all of its ancestors
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.lock();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            inner.dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Write a file, creating parent directories, and notify watchers
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }

        let existed = self
            .inner
            .lock()
            .files
            .insert(path.clone(), content.into())
            .is_some();

        let kind = if existed {
            FileEventKind::Changed
        } else {
            FileEventKind::Created
        };
        self.notify(FileEvent { path, kind });
    }

    /// Remove a file and notify watchers; returns whether it existed
    pub fn remove_file(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref().to_path_buf();
        let removed = self.inner.lock().files.remove(&path).is_some();
        if removed {
            self.notify(FileEvent {
                path,
                kind: FileEventKind::Deleted,
            });
        }
        removed
    }

    /// Number of live watch registrations
    pub fn active_watchers(&self) -> usize {
        self.inner.lock().watchers.len()
    }

    fn notify(&self, event: FileEvent) {
        // Callbacks run outside the lock so they may call back into the file system.
        let callbacks: Vec<WatchCallback> = self
            .inner
            .lock()
            .watchers
            .values()
            .filter(|r| r.paths.iter().any(|p| *p == event.path))
            .map(|r| Arc::clone(&r.on_event))
            .collect();

        for callback in callbacks {
            callback(&event);
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let inner = self.inner.lock();
        if inner.files.contains_key(path) {
            Ok(FileStat {
                kind: FileKind::File,
            })
        } else if inner.dirs.contains(path) {
            Ok(FileStat {
                kind: FileKind::Directory,
            })
        } else {
            Err(not_found(path))
        }
    }

    async fn read_file(&self, path: &Path) -> io::Result<String> {
        self.inner
            .lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    async fn read_directory(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let inner = self.inner.lock();
        if !inner.dirs.contains(path) {
            return Err(not_found(path));
        }

        let child_name = |child: &PathBuf| -> Option<String> {
            if child.parent() == Some(path) {
                child.file_name().and_then(|n| n.to_str()).map(str::to_string)
            } else {
                None
            }
        };

        let dirs = inner.dirs.iter().filter_map(|d| {
            child_name(d).map(|name| DirEntry {
                name,
                kind: FileKind::Directory,
            })
        });
        let files = inner.files.keys().filter_map(|f| {
            child_name(f).map(|name| DirEntry {
                name,
                kind: FileKind::File,
            })
        });

        Ok(dirs.chain(files).collect())
    }

    fn watch(&self, paths: &[PathBuf], on_event: WatchCallback) -> io::Result<WatchHandle> {
        let mut inner = self.inner.lock();
        let id = inner.next_watch_id;
        inner.next_watch_id += 1;
        inner.watchers.insert(
            id,
            Registration {
                paths: paths.to_vec(),
                on_event,
            },
        );

        Ok(WatchHandle::new(MemoryWatchGuard {
            inner: Arc::downgrade(&self.inner),
            id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_add_file_creates_parents() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/work/src/components/Button.tsx", "export {}");

        assert!(fs.stat(Path::new("/work/src")).await.unwrap().is_dir());
        assert!(
            fs.stat(Path::new("/work/src/components/Button.tsx"))
                .await
                .unwrap()
                .is_file()
        );

        let entries = fs.read_directory(Path::new("/work/src")).await.unwrap();
        assert_eq!(
            entries,
            vec![DirEntry {
                name: "components".to_string(),
                kind: FileKind::Directory
            }]
        );
    }

    #[tokio::test]
    async fn test_missing_paths() {
        let fs = MemoryFileSystem::new();
        let err = fs.read_file(Path::new("/nope")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(fs.read_directory(Path::new("/nope")).await.is_err());
    }

    #[test]
    fn test_watch_fires_and_unregisters() {
        let fs = MemoryFileSystem::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let handle = fs
            .watch(
                &[PathBuf::from("/work/package.json")],
                Arc::new(move |_event: &FileEvent| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();
        assert_eq!(fs.active_watchers(), 1);

        fs.add_file("/work/package.json", "{}");
        fs.add_file("/work/package.json", "{\"name\":\"x\"}");
        fs.add_file("/work/README.md", "ignored");
        assert!(fs.remove_file("/work/package.json"));
        assert_eq!(hits.load(Ordering::SeqCst), 3);

        drop(handle);
        assert_eq!(fs.active_watchers(), 0);
        fs.add_file("/work/package.json", "{}");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
