use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use glob::Pattern;
use tokio::sync::Semaphore;

use crate::cache::CacheEntry;
use crate::dialect::{Dialect, FILE_MATCH};
use crate::error::DiscoveryError;
use crate::task::{ConfigFile, Materializer, WorkspaceFolder};

use super::filter::PathFilter;
use super::host::WorkspaceHost;

/// Per-provider discovery knobs resolved from configuration.
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    /// Extra globs searched besides the dialect's own.
    pub include: Vec<String>,
    /// Skip candidate files that sit directly in a folder root.
    pub skip_root: bool,
    pub max_concurrent_reads: usize,
}

/// Enumerates, filters, reads and materializes one dialect's files.
pub struct DiscoveryEngine {
    dialect: Arc<dyn Dialect>,
    materializer: Materializer,
    filter: Arc<PathFilter>,
    settings: DiscoverySettings,
    host: Arc<dyn WorkspaceHost>,
}

impl DiscoveryEngine {
    pub fn new(
        dialect: Arc<dyn Dialect>,
        materializer: Materializer,
        filter: Arc<PathFilter>,
        settings: DiscoverySettings,
        host: Arc<dyn WorkspaceHost>,
    ) -> Self {
        Self {
            dialect,
            materializer,
            filter,
            settings,
            host,
        }
    }

    pub fn dialect(&self) -> &Arc<dyn Dialect> {
        &self.dialect
    }

    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    fn globs(&self) -> Vec<String> {
        self.dialect
            .file_globs()
            .iter()
            .map(|g| g.to_string())
            .chain(self.settings.include.iter().cloned())
            .collect()
    }

    /// Folder owning `path`; the deepest root wins for nested folders.
    pub fn owning_folder(&self, path: &Path) -> Option<(usize, WorkspaceFolder)> {
        self.host
            .folders()
            .into_iter()
            .enumerate()
            .filter(|(_, f)| f.contains(path))
            .max_by_key(|(_, f)| f.root.components().count())
    }

    /// Whether `path` is matched by this dialect's globs relative to `folder`.
    fn is_candidate(&self, folder: &WorkspaceFolder, path: &Path) -> bool {
        let Ok(rel) = path.strip_prefix(&folder.root) else {
            return false;
        };
        let rel = rel.to_string_lossy().replace('\\', "/");
        self.globs()
            .iter()
            .filter_map(|g| Pattern::new(g).ok())
            .any(|p| p.matches_with(&rel, FILE_MATCH))
    }

    /// Whether a changed path could be one of this dialect's files.
    pub fn matches(&self, path: &Path) -> bool {
        self.owning_folder(path)
            .is_some_and(|(_, folder)| self.is_candidate(&folder, path))
    }

    /// Exclusion and root-coverage rules for one candidate.
    pub fn accepts(&self, file: &ConfigFile) -> bool {
        if self.filter.is_excluded(&file.path) {
            return false;
        }
        !(self.settings.skip_root && file.is_at_root())
    }

    /// Resolved identity of `path`; aliases of one file share it.
    pub async fn identity(&self, path: &Path) -> PathBuf {
        self.host.resolve(path).await
    }

    /// Owner and acceptance checks shared by full discovery and point refresh.
    fn admit(&self, path: &Path) -> Option<(usize, ConfigFile)> {
        let (index, folder) = self.owning_folder(path)?;
        if !self.is_candidate(&folder, path) {
            return None;
        }
        let file = ConfigFile::new(path, folder);
        if !self.accepts(&file) {
            tracing::trace!(dialect = self.dialect.id(), path = %file.path.display(), "candidate filtered");
            return None;
        }
        Some((index, file))
    }

    async fn candidates(
        &self,
        folder: &WorkspaceFolder,
        seen: &mut HashSet<PathBuf>,
    ) -> Result<Vec<(usize, ConfigFile, PathBuf)>, DiscoveryError> {
        let mut paths = self.host.find_files(folder, &self.globs()).await?;
        paths.sort();

        let mut files = Vec::new();
        for path in paths {
            let identity = self.identity(&path).await;
            if !seen.insert(identity.clone()) {
                continue;
            }

            if let Some((index, file)) = self.admit(&path) {
                files.push((index, file, identity));
            }
        }

        Ok(files)
    }

    /// Reads, extracts and materializes one file. `Ok(None)` when the file
    /// yields no targets.
    pub async fn load_file(
        &self,
        file: &ConfigFile,
        folder_index: usize,
        identity: PathBuf,
    ) -> Result<Option<CacheEntry>, DiscoveryError> {
        let text = self.host.read_file(&file.path).await?;
        let targets = self.dialect.extract(&text, file);

        tracing::debug!(
            dialect = self.dialect.id(),
            path = %file.path.display(),
            targets = targets.len(),
            "extracted targets"
        );

        if targets.is_empty() {
            return Ok(None);
        }

        let tasks = targets
            .iter()
            .map(|t| self.materializer.materialize(t, file))
            .collect();

        Ok(Some(CacheEntry::new(file.clone(), tasks, folder_index, identity)))
    }

    /// Fresh entry for a single changed file, or `None` when the file is gone,
    /// filtered out, or has no targets.
    ///
    /// Ownership and filtering follow [`discover`](Self::discover), so a
    /// refresh of an unchanged file reproduces its discovered entry.
    pub async fn refresh_file(&self, path: &Path) -> Result<Option<CacheEntry>, DiscoveryError> {
        let Some((index, file)) = self.admit(path) else {
            return Ok(None);
        };
        if !self.host.exists(path).await {
            return Ok(None);
        }
        let identity = self.identity(path).await;
        self.load_file(&file, index, identity).await
    }

    /// Full discovery pass over every workspace folder.
    ///
    /// Each file belongs to the deepest folder containing it, and output is
    /// ordered by `(folder index, path)`. Any enumeration or read failure
    /// aborts the pass.
    pub async fn discover(&self) -> Result<Vec<CacheEntry>, DiscoveryError> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for folder in self.host.folders().iter() {
            files.extend(self.candidates(folder, &mut seen).await?);
        }
        files.sort_by(|a, b| (a.0, &a.1.path).cmp(&(b.0, &b.1.path)));

        let sem = Arc::new(Semaphore::new(self.settings.max_concurrent_reads.max(1)));
        let mut futs = FuturesUnordered::new();

        for (position, (index, file, identity)) in files.iter().enumerate() {
            let sem = sem.clone();
            futs.push(async move {
                let _permit = sem
                    .acquire_owned()
                    .await
                    .map_err(|_| DiscoveryError::Join("semaphore closed unexpectedly".into()))?;
                let entry = self.load_file(file, *index, identity.clone()).await?;
                Ok::<_, DiscoveryError>((position, entry))
            });
        }

        let mut loaded = Vec::with_capacity(files.len());
        while let Some(res) = futs.next().await {
            loaded.push(res?);
        }
        loaded.sort_by_key(|(position, _)| *position);

        let entries: Vec<CacheEntry> = loaded.into_iter().filter_map(|(_, e)| e).collect();
        tracing::debug!(
            dialect = self.dialect.id(),
            files = files.len(),
            entries = entries.len(),
            "discovery pass complete"
        );
        Ok(entries)
    }
}

impl std::fmt::Debug for DiscoveryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryEngine")
            .field("dialect", &self.dialect.id())
            .field("settings", &self.settings)
            .finish()
    }
}
