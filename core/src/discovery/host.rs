use std::path::{Path, PathBuf};

use async_trait::async_trait;
use glob::{MatchOptions, Pattern};

use crate::error::DiscoveryError;
use crate::task::WorkspaceFolder;

/// Workspace services supplied by the host environment.
#[async_trait]
pub trait WorkspaceHost: Send + Sync {
    fn folders(&self) -> Vec<WorkspaceFolder>;

    /// Files under `folder` matching any of `globs` (relative to the folder
    /// root, case-insensitive).
    async fn find_files(
        &self,
        folder: &WorkspaceFolder,
        globs: &[String],
    ) -> Result<Vec<PathBuf>, DiscoveryError>;

    async fn read_file(&self, path: &Path) -> Result<String, DiscoveryError>;

    async fn exists(&self, path: &Path) -> bool;

    /// Identity used to deduplicate files reached through several globs.
    async fn resolve(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

/// [`WorkspaceHost`] over the local file system.
#[derive(Debug, Clone, Default)]
pub struct LocalHost {
    folders: Vec<WorkspaceFolder>,
}

impl LocalHost {
    pub fn new(folders: Vec<WorkspaceFolder>) -> Self {
        Self { folders }
    }

    pub fn from_roots<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(roots.into_iter().map(WorkspaceFolder::from_root).collect())
    }
}

const FIND_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

fn glob_folder(root: &Path, globs: &[String]) -> Result<Vec<PathBuf>, DiscoveryError> {
    let base = Pattern::escape(&root.to_string_lossy());
    let mut found = Vec::new();

    for g in globs {
        let pattern = format!("{}/{}", base.trim_end_matches('/'), g.trim_start_matches('/'));
        let paths = glob::glob_with(&pattern, FIND_MATCH)
            .map_err(|e| DiscoveryError::pattern(g.as_str(), e))?;
        for entry in paths {
            let path = entry?;
            if path.is_file() {
                found.push(path);
            }
        }
    }

    Ok(found)
}

#[async_trait]
impl WorkspaceHost for LocalHost {
    fn folders(&self) -> Vec<WorkspaceFolder> {
        self.folders.clone()
    }

    async fn find_files(
        &self,
        folder: &WorkspaceFolder,
        globs: &[String],
    ) -> Result<Vec<PathBuf>, DiscoveryError> {
        let root = folder.root.clone();
        let globs = globs.to_vec();
        tokio::task::spawn_blocking(move || glob_folder(&root, &globs))
            .await
            .map_err(|e| DiscoveryError::Join(e.to_string()))?
    }

    async fn read_file(&self, path: &Path) -> Result<String, DiscoveryError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DiscoveryError::read(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .is_ok_and(|m| m.is_file())
    }

    async fn resolve(&self, path: &Path) -> PathBuf {
        tokio::fs::canonicalize(path)
            .await
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
