use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Root folder of a workspace, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WorkspaceFolder {
    pub name: String,
    pub root: PathBuf,
}

impl WorkspaceFolder {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Folder named after the last component of `root`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());
        Self { name, root }
    }

    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }

    /// `dir` relative to the root, `/`-separated. Empty at (or outside) the root.
    pub fn relative(&self, dir: &Path) -> String {
        let Ok(rel) = dir.strip_prefix(&self.root) else {
            return String::new();
        };
        rel.components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// A candidate configuration file and the folder that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConfigFile {
    pub path: PathBuf,
    #[serde(skip)]
    pub folder: WorkspaceFolder,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>, folder: WorkspaceFolder) -> Self {
        Self {
            path: path.into(),
            folder,
        }
    }

    /// Directory holding the file; tasks run from here.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.folder.root)
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Directory of the file relative to the folder root, `/`-separated.
    /// Empty when the file sits at the root.
    pub fn relative_dir(&self) -> String {
        self.folder.relative(self.dir())
    }

    pub fn is_at_root(&self) -> bool {
        self.dir() == self.folder.root
    }
}

/// Group a task is filed under by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskGroup {
    Build,
    Clean,
    Rebuild,
    #[default]
    None,
}

impl TaskGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskGroup::Build => "build",
            TaskGroup::Clean => "clean",
            TaskGroup::Rebuild => "rebuild",
            TaskGroup::None => "none",
        }
    }
}

impl std::fmt::Display for TaskGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Program (plus fixed leading arguments) used to run a dialect's targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl RunnerSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// `[program, args.., trailing..]`.
    pub fn command<I, S>(&self, trailing: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cmd = Vec::with_capacity(1 + self.args.len() + 1);
        if !self.program.is_empty() {
            cmd.push(self.program.clone());
        }
        cmd.extend(self.args.iter().cloned());
        cmd.extend(trailing.into_iter().map(Into::into));
        cmd
    }
}

/// A fully specified runnable task handed to host collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDescriptor {
    /// Provider (dialect) id.
    #[serde(rename = "type")]
    pub task_type: String,
    pub name: String,
    pub group: TaskGroup,
    pub working_directory: PathBuf,
    pub command_line: Vec<String>,
    pub source_file: ConfigFile,
    pub source_folder: WorkspaceFolder,
    pub relative_path: String,
    pub source_offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
