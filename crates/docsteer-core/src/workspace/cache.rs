//! Time-boxed cache of workspace analyses
//!
//! One record per workspace root holds the cached context, its creation time,
//! a stale flag and the watch handle that flips the flag when the manifest or
//! typing config changes. The watcher is registered once per root and survives
//! re-analysis; dropping the record releases it.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::analyzer::WorkspaceAnalyzer;
use super::models::WorkspaceContext;
use super::{MANIFEST_FILE, TYPESCRIPT_CONFIG};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::SteerResult;
use crate::fs::{FileEvent, WatchCallback, WatchHandle};

struct CachedContext {
    context: Arc<WorkspaceContext>,
    created_at: DateTime<Utc>,
}

struct WatchedRoot {
    cached: Option<CachedContext>,
    stale: Arc<AtomicBool>,
    watch: Option<WatchHandle>,
}

impl WatchedRoot {
    fn new() -> Self {
        Self {
            cached: None,
            stale: Arc::new(AtomicBool::new(false)),
            watch: None,
        }
    }
}

/// Make a root absolute and resolve `.` / `..` without touching the file system
pub fn normalize_root(root: &Path) -> PathBuf {
    let absolute = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Caching wrapper around [`WorkspaceAnalyzer`]
pub struct WorkspaceAnalysisCache {
    analyzer: WorkspaceAnalyzer,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    roots: Mutex<HashMap<PathBuf, WatchedRoot>>,
}

impl WorkspaceAnalysisCache {
    pub fn new(analyzer: WorkspaceAnalyzer) -> Self {
        Self {
            analyzer,
            clock: Arc::new(SystemClock),
            ttl: CacheConfig::default().ttl,
            roots: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_config(self, config: &CacheConfig) -> Self {
        self.with_ttl(config.ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Analyze a workspace, reusing a cached context while it is still valid
    pub async fn analyze(&self, root: &Path) -> SteerResult<Arc<WorkspaceContext>> {
        let key = normalize_root(root);

        if let Some(context) = self.lookup(&key) {
            debug!("Workspace analysis cache hit for {:?}", key);
            return Ok(context);
        }

        debug!("Workspace analysis cache miss for {:?}", key);
        self.begin_refresh(&key);

        match self.analyzer.analyze(&key).await {
            Ok(context) => {
                let context = Arc::new(context);
                self.store(key, Arc::clone(&context));
                Ok(context)
            }
            Err(e) => {
                self.discard(&key);
                Err(e)
            }
        }
    }

    /// Force the next [`analyze`](Self::analyze) for `root` to re-run the analyzer
    pub fn invalidate(&self, root: &Path) {
        let key = normalize_root(root);
        if let Some(entry) = self.roots.lock().get(&key) {
            entry.stale.store(true, Ordering::SeqCst);
        }
    }

    /// Whether a valid cached context exists for `root`
    pub fn is_cached(&self, root: &Path) -> bool {
        self.lookup(&normalize_root(root)).is_some()
    }

    /// Number of roots with a live file watcher
    pub fn watched_roots(&self) -> usize {
        self.roots
            .lock()
            .values()
            .filter(|entry| entry.watch.is_some())
            .count()
    }

    /// Release every watcher and drop every cached context
    pub fn dispose(&self) {
        let roots = std::mem::take(&mut *self.roots.lock());
        if !roots.is_empty() {
            info!("Disposing workspace analysis cache ({} roots)", roots.len());
        }
        drop(roots);
    }

    fn is_expired(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match (now - created_at).to_std() {
            Ok(age) => age >= self.ttl,
            // Clock moved backwards; treat as fresh.
            Err(_) => false,
        }
    }

    fn lookup(&self, key: &Path) -> Option<Arc<WorkspaceContext>> {
        let now = self.clock.now();
        let roots = self.roots.lock();
        let entry = roots.get(key)?;

        if entry.stale.load(Ordering::SeqCst) {
            return None;
        }
        let cached = entry.cached.as_ref()?;
        if self.is_expired(cached.created_at, now) {
            return None;
        }
        Some(Arc::clone(&cached.context))
    }

    /// Drop the old context, make sure the root is watched and clear the
    /// stale flag. All of this happens before the analyzer reads anything, so
    /// an event arriving mid-analysis leaves the stored context stale.
    fn begin_refresh(&self, key: &Path) {
        let mut roots = self.roots.lock();
        let entry = roots
            .entry(key.to_path_buf())
            .or_insert_with(WatchedRoot::new);

        entry.cached = None;
        if entry.watch.is_none() {
            entry.watch = self.register_watch(key, Arc::clone(&entry.stale));
        }
        entry.stale.store(false, Ordering::SeqCst);
    }

    /// Keeps the stale flag as is; a set flag makes the next lookup miss.
    /// A root disposed of mid-analysis is not brought back.
    fn store(&self, key: PathBuf, context: Arc<WorkspaceContext>) {
        let created_at = self.clock.now();
        if let Some(entry) = self.roots.lock().get_mut(&key) {
            entry.cached = Some(CachedContext {
                context,
                created_at,
            });
        }
    }

    /// Forget a root whose analysis failed, releasing its watcher
    fn discard(&self, key: &Path) {
        let mut roots = self.roots.lock();
        if roots.get(key).is_some_and(|entry| entry.cached.is_none()) {
            roots.remove(key);
        }
    }

    fn register_watch(&self, root: &Path, stale: Arc<AtomicBool>) -> Option<WatchHandle> {
        let paths = [root.join(MANIFEST_FILE), root.join(TYPESCRIPT_CONFIG)];
        let on_event: WatchCallback = Arc::new(move |event: &FileEvent| {
            debug!("{:?} {:?}, invalidating workspace analysis", event.path, event.kind);
            stale.store(true, Ordering::SeqCst);
        });

        match self.analyzer.file_system().watch(&paths, on_event) {
            Ok(handle) => {
                info!("Watching {:?} for workspace changes", root);
                Some(handle)
            }
            Err(e) => {
                warn!("Could not watch {:?}, relying on TTL only: {}", root, e);
                None
            }
        }
    }
}

impl Drop for WorkspaceAnalysisCache {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::ErrorCode;
    use crate::fs::MemoryFileSystem;

    const ROOT: &str = "/work/app";

    fn setup() -> (MemoryFileSystem, Arc<ManualClock>, WorkspaceAnalysisCache) {
        let fs = MemoryFileSystem::new();
        fs.add_file(
            "/work/app/package.json",
            r#"{ "dependencies": { "react": "18.0.0" } }"#,
        );
        let clock = Arc::new(ManualClock::default());
        let cache = WorkspaceAnalysisCache::new(WorkspaceAnalyzer::new(Arc::new(fs.clone())))
            .with_clock(clock.clone());
        (fs, clock, cache)
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(
            normalize_root(Path::new("/work/app/./src/..")),
            PathBuf::from("/work/app")
        );
        assert!(normalize_root(Path::new("relative")).is_absolute());
    }

    #[tokio::test]
    async fn test_ttl_with_manual_clock() {
        let (_fs, clock, cache) = setup();
        let root = Path::new(ROOT);

        let first = cache.analyze(root).await.unwrap();
        clock.advance(Duration::from_secs(4 * 60 + 59));
        let second = cache.analyze(root).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        clock.advance(Duration::from_secs(2));
        let third = cache.analyze(root).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(*first, *third);

        let fourth = cache.analyze(root).await.unwrap();
        assert!(Arc::ptr_eq(&third, &fourth));
    }

    #[tokio::test]
    async fn test_equivalent_paths_share_entry() {
        let (_fs, _clock, cache) = setup();
        let first = cache.analyze(Path::new(ROOT)).await.unwrap();
        let second = cache.analyze(Path::new("/work/app/src/..")).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_manifest_change_invalidates() {
        let (fs, _clock, cache) = setup();
        let root = Path::new(ROOT);

        let first = cache.analyze(root).await.unwrap();
        assert_eq!(first.frameworks.len(), 1);

        fs.add_file(
            "/work/app/package.json",
            r#"{ "dependencies": { "vue": "3.4.0", "express": "4.18.0" } }"#,
        );
        assert!(!cache.is_cached(root));

        let second = cache.analyze(root).await.unwrap();
        let names: Vec<_> = second.frameworks.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["express", "vue"]);
    }

    #[tokio::test]
    async fn test_tsconfig_creation_and_deletion_invalidate() {
        let (fs, _clock, cache) = setup();
        let root = Path::new(ROOT);

        assert!(!cache.analyze(root).await.unwrap().languages.contains("typescript"));

        fs.add_file("/work/app/tsconfig.json", "{}");
        assert!(cache.analyze(root).await.unwrap().languages.contains("typescript"));

        fs.remove_file("/work/app/tsconfig.json");
        assert!(!cache.analyze(root).await.unwrap().languages.contains("typescript"));
    }

    #[tokio::test]
    async fn test_unrelated_file_keeps_cache() {
        let (fs, _clock, cache) = setup();
        let root = Path::new(ROOT);

        let first = cache.analyze(root).await.unwrap();
        fs.add_file("/work/app/README.md", "# app");
        let second = cache.analyze(root).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_watcher_registered_once_per_root() {
        let (fs, clock, cache) = setup();
        let root = Path::new(ROOT);

        cache.analyze(root).await.unwrap();
        cache.analyze(root).await.unwrap();
        fs.add_file("/work/app/package.json", "{}");
        cache.analyze(root).await.unwrap();
        clock.advance(Duration::from_secs(600));
        cache.analyze(root).await.unwrap();

        assert_eq!(fs.active_watchers(), 1);
        assert_eq!(cache.watched_roots(), 1);
    }

    #[tokio::test]
    async fn test_invalidate() {
        let (_fs, _clock, cache) = setup();
        let root = Path::new(ROOT);

        let first = cache.analyze(root).await.unwrap();
        cache.invalidate(root);
        let second = cache.analyze(root).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_dispose_releases_watchers() {
        let (fs, _clock, cache) = setup();
        fs.add_file("/work/other/package.json", "{}");

        cache.analyze(Path::new(ROOT)).await.unwrap();
        cache.analyze(Path::new("/work/other")).await.unwrap();
        assert_eq!(fs.active_watchers(), 2);

        cache.dispose();
        assert_eq!(fs.active_watchers(), 0);
        assert!(!cache.is_cached(Path::new(ROOT)));

        cache.dispose();
        assert_eq!(cache.watched_roots(), 0);
    }

    /// Rewrites the manifest the first time the analyzer stats `tsconfig.json`
    struct EditDuringAnalysis {
        inner: MemoryFileSystem,
        edited: AtomicBool,
    }

    #[async_trait::async_trait]
    impl crate::fs::FileSystem for EditDuringAnalysis {
        async fn stat(&self, path: &Path) -> std::io::Result<crate::fs::FileStat> {
            if path.ends_with(TYPESCRIPT_CONFIG) && !self.edited.swap(true, Ordering::SeqCst) {
                self.inner.add_file(
                    "/work/app/package.json",
                    r#"{ "dependencies": { "vue": "3.4.0" } }"#,
                );
            }
            self.inner.stat(path).await
        }

        async fn read_file(&self, path: &Path) -> std::io::Result<String> {
            self.inner.read_file(path).await
        }

        async fn read_directory(&self, path: &Path) -> std::io::Result<Vec<crate::fs::DirEntry>> {
            self.inner.read_directory(path).await
        }

        fn watch(&self, paths: &[PathBuf], on_event: WatchCallback) -> std::io::Result<WatchHandle> {
            self.inner.watch(paths, on_event)
        }
    }

    #[tokio::test]
    async fn test_manifest_change_during_first_analysis() {
        let (fs, _clock, _) = setup();
        let editing = EditDuringAnalysis {
            inner: fs.clone(),
            edited: AtomicBool::new(false),
        };
        let cache = WorkspaceAnalysisCache::new(WorkspaceAnalyzer::new(Arc::new(editing)));
        let root = Path::new(ROOT);

        let first = cache.analyze(root).await.unwrap();
        let names: Vec<_> = first.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["react"]);
        assert!(!cache.is_cached(root));

        let second = cache.analyze(root).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        let names: Vec<_> = second.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["vue"]);
        assert!(cache.is_cached(root));
        assert_eq!(fs.active_watchers(), 1);
    }

    #[tokio::test]
    async fn test_dispose_during_analysis_drops_result() {
        let (_fs, _clock, cache) = setup();
        let root = Path::new(ROOT);

        cache.begin_refresh(&normalize_root(root));
        cache.dispose();
        let context = Arc::new(WorkspaceContext::default());
        cache.store(normalize_root(root), context);
        assert!(!cache.is_cached(root));
    }

    #[tokio::test]
    async fn test_failed_analysis_is_not_cached() {
        let (fs, _clock, cache) = setup();

        let err = cache.analyze(Path::new("/work/missing")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoWorkspace);
        assert_eq!(fs.active_watchers(), 0);
    }
}
