use std::path::PathBuf;

/// Kind of filesystem change reported by a watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

/// A change to a file that may be a task source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl SourceChange {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}
