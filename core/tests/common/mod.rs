#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use glob::{MatchOptions, Pattern};
use tokio::sync::Semaphore;

use taskdeck_core::api::{
    extract_scripts, AppConfig, ConfigFile, Dialect, DiscoveryError, PathFilter, RunnerSpec,
    TaskProvider, Targets, WorkspaceFolder, WorkspaceHost,
};

const MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// In-memory workspace that counts reads per path.
#[derive(Default)]
pub struct MemoryHost {
    folders: Vec<WorkspaceFolder>,
    files: Mutex<BTreeMap<PathBuf, String>>,
    reads: Mutex<HashMap<PathBuf, usize>>,
    failing: Mutex<HashSet<PathBuf>>,
    aliases: Mutex<HashMap<PathBuf, PathBuf>>,
    gate: Mutex<Option<Arc<Semaphore>>>,
}

impl MemoryHost {
    pub fn new(roots: &[&str]) -> Self {
        Self {
            folders: roots.iter().map(|r| WorkspaceFolder::from_root(*r)).collect(),
            ..Default::default()
        }
    }

    pub fn write(&self, path: &str, text: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), text.to_string());
    }

    pub fn remove(&self, path: &str) {
        self.files.lock().unwrap().remove(Path::new(path));
    }

    pub fn fail_reads(&self, path: &str) {
        self.failing.lock().unwrap().insert(PathBuf::from(path));
    }

    /// Makes `path` resolve to the same identity as `target`.
    pub fn alias(&self, path: &str, target: &str) {
        self.aliases
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), PathBuf::from(target));
    }

    /// Holds every later read after its content was taken, until the
    /// returned semaphore gets permits.
    pub fn hold_reads(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn reads(&self, path: &str) -> usize {
        self.reads
            .lock()
            .unwrap()
            .get(Path::new(path))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_reads(&self) -> usize {
        self.reads.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl WorkspaceHost for MemoryHost {
    fn folders(&self) -> Vec<WorkspaceFolder> {
        self.folders.clone()
    }

    async fn find_files(
        &self,
        folder: &WorkspaceFolder,
        globs: &[String],
    ) -> Result<Vec<PathBuf>, DiscoveryError> {
        let patterns = globs
            .iter()
            .map(|g| Pattern::new(g).map_err(|e| DiscoveryError::pattern(g, e)))
            .collect::<Result<Vec<_>, _>>()?;

        let files = self.files.lock().unwrap();
        Ok(files
            .keys()
            .filter_map(|p| {
                let rel = p.strip_prefix(&folder.root).ok()?;
                let rel = rel.to_string_lossy().replace('\\', "/");
                patterns
                    .iter()
                    .any(|pat| pat.matches_with(&rel, MATCH))
                    .then(|| p.clone())
            })
            .collect())
    }

    async fn read_file(&self, path: &Path) -> Result<String, DiscoveryError> {
        *self
            .reads
            .lock()
            .unwrap()
            .entry(path.to_path_buf())
            .or_default() += 1;

        if self.failing.lock().unwrap().contains(path) {
            return Err(DiscoveryError::read(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ));
        }

        let text = self
            .files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                DiscoveryError::read(path, std::io::Error::from(std::io::ErrorKind::NotFound))
            });

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            let _permit = gate.acquire().await.unwrap();
        }
        text
    }

    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    async fn resolve(&self, path: &Path) -> PathBuf {
        self.aliases
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| path.to_path_buf())
    }
}

/// `package.json` scripts, run through `npm run`.
pub struct Scripts {
    pub shadowed: bool,
}

impl Dialect for Scripts {
    fn id(&self) -> &str {
        "npm"
    }

    fn file_globs(&self) -> &[&'static str] {
        &["**/package.json"]
    }

    fn shadowed_at_root(&self) -> bool {
        self.shadowed
    }

    fn default_runner(&self) -> RunnerSpec {
        RunnerSpec::new("npm").with_args(["run"])
    }

    fn extract(&self, text: &str, _file: &ConfigFile) -> Targets {
        extract_scripts(text)
    }
}

pub fn provider(host: Arc<MemoryHost>, cfg: &AppConfig, shadowed: bool) -> TaskProvider {
    let filter = Arc::new(PathFilter::new(&cfg.discovery.exclude).unwrap());
    TaskProvider::configure(Arc::new(Scripts { shadowed }), cfg, filter, host).unwrap()
}

pub fn package(scripts: &[(&str, &str)]) -> String {
    let body = scripts
        .iter()
        .map(|(k, v)| format!("    \"{k}\": \"{v}\""))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n  \"name\": \"pkg\",\n  \"scripts\": {{\n{body}\n  }}\n}}\n")
}
