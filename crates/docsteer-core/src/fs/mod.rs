//! File system abstraction
//!
//! Everything the analyzer and cache touch on disk goes through [`FileSystem`],
//! so the core runs the same against the host file system ([`LocalFileSystem`])
//! and an in-memory fake ([`MemoryFileSystem`]).

mod local;
mod memory;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;

use async_trait::async_trait;
use std::any::Any;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Kind of a file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
    Other,
}

/// Result of a stat call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub kind: FileKind,
}

impl FileStat {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name (no leading path)
    pub name: String,
    pub kind: FileKind,
}

/// What happened to a watched path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    Created,
    Changed,
    Deleted,
}

/// Change notification delivered to a watch callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub path: PathBuf,
    pub kind: FileEventKind,
}

/// Callback invoked for every create/change/delete of a watched path.
///
/// May run on a backend thread, so it must be cheap and non-blocking.
pub type WatchCallback = Arc<dyn Fn(&FileEvent) + Send + Sync>;

/// Keeps a watch registration alive; dropping it stops the watch
pub struct WatchHandle {
    _guard: Box<dyn Any + Send + Sync>,
}

impl WatchHandle {
    /// Wrap a backend-specific guard whose `Drop` releases the watch
    pub fn new<G: Any + Send + Sync>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle").finish_non_exhaustive()
    }
}

/// Minimal file system interface consumed by the core
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Stat a path; `NotFound` if it does not exist
    async fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Read a whole file as UTF-8
    async fn read_file(&self, path: &Path) -> io::Result<String>;

    /// List the direct children of a directory
    async fn read_directory(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Watch the given file paths for create/change/delete.
    ///
    /// The paths need not exist yet.
    fn watch(&self, paths: &[PathBuf], on_event: WatchCallback) -> io::Result<WatchHandle>;

    /// Convenience wrapper around [`FileSystem::stat`]
    async fn exists(&self, path: &Path) -> bool {
        self.stat(path).await.is_ok()
    }
}
