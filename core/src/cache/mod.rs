//! Per-provider task cache with full and point invalidation.

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::error::DiscoveryError;
use crate::task::{ConfigFile, TaskDescriptor};

/// Tasks materialized from one configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub source_file: ConfigFile,
    pub tasks: Vec<TaskDescriptor>,
    /// Resolved path; aliases of the same file share it.
    pub identity: PathBuf,
    folder_index: usize,
}

impl CacheEntry {
    pub fn new(
        source_file: ConfigFile,
        tasks: Vec<TaskDescriptor>,
        folder_index: usize,
        identity: PathBuf,
    ) -> Self {
        Self {
            source_file,
            tasks,
            identity,
            folder_index,
        }
    }

    pub fn path(&self) -> &Path {
        &self.source_file.path
    }

    fn rank(&self) -> (usize, &Path) {
        (self.folder_index, &self.source_file.path)
    }
}

/// What a point invalidation did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    /// Cache was not populated; the next read runs full discovery.
    Deferred,
    /// The file's entry was dropped and not replaced.
    Removed,
    /// The file's entry was recomputed.
    Refreshed,
    /// The cache became empty and was reset to unpopulated.
    Reset,
}

/// Entries for one provider. `None` means unpopulated.
///
/// The lock is held for the whole of a discovery pass or point refresh, so
/// concurrent readers share one pass and invalidations observe a settled
/// cache.
#[derive(Debug, Default)]
pub struct TaskCache {
    state: Mutex<Option<Vec<CacheEntry>>>,
}

impl TaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_initialized(&self) -> bool {
        self.state.lock().await.is_some()
    }

    /// All cached tasks, running `populate` first when unpopulated.
    ///
    /// A failed populate leaves the cache unpopulated.
    pub async fn get_or_populate<F, Fut>(&self, populate: F) -> Result<Vec<TaskDescriptor>, DiscoveryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<CacheEntry>, DiscoveryError>>,
    {
        let mut state = self.state.lock().await;
        if state.is_none() {
            *state = Some(populate().await?);
        }

        Ok(state
            .iter()
            .flatten()
            .flat_map(|e| e.tasks.iter().cloned())
            .collect())
    }

    /// Replaces the entry for the file at `path` (resolved to `identity`)
    /// with whatever `refresh` yields.
    ///
    /// When another path already holds an entry for `identity`, that path is
    /// the one refreshed, so an alias never adds a second entry for one file.
    /// `refresh` runs before anything is removed, so an error leaves the
    /// cache as it was.
    pub async fn refresh<F, Fut>(
        &self,
        path: &Path,
        identity: &Path,
        refresh: F,
    ) -> Result<Invalidation, DiscoveryError>
    where
        F: FnOnce(PathBuf) -> Fut,
        Fut: Future<Output = Result<Option<CacheEntry>, DiscoveryError>>,
    {
        let mut state = self.state.lock().await;
        let Some(entries) = state.as_mut() else {
            return Ok(Invalidation::Deferred);
        };

        let target = entries
            .iter()
            .find(|e| e.identity == identity)
            .map(|e| e.path().to_path_buf())
            .unwrap_or_else(|| path.to_path_buf());

        let fresh = refresh(target.clone()).await?;
        entries.retain(|e| e.path() != path && e.path() != target && e.identity != identity);

        let outcome = match fresh {
            Some(entry) => {
                let at = entries.partition_point(|e| e.rank() < entry.rank());
                entries.insert(at, entry);
                Invalidation::Refreshed
            }
            None => Invalidation::Removed,
        };

        if entries.is_empty() {
            *state = None;
            return Ok(Invalidation::Reset);
        }
        Ok(outcome)
    }

    /// Drops everything; the next read runs full discovery.
    pub async fn clear(&self) {
        *self.state.lock().await = None;
    }

    pub async fn source_files(&self) -> Vec<PathBuf> {
        self.state
            .lock()
            .await
            .iter()
            .flatten()
            .map(|e| e.path().to_path_buf())
            .collect()
    }
}
