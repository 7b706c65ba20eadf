//! The seam between the shared discovery/cache engine and one task ecosystem.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::extract::{Target, Targets};
use crate::task::{ConfigFile, GroupRules, RunnerSpec};

/// One task-source ecosystem: which files it reads, how targets are pulled
/// out of them and how a target becomes a command line.
pub trait Dialect: Send + Sync {
    /// Provider id, also the `type` of every task it produces.
    fn id(&self) -> &str;

    /// Globs relative to a workspace folder root, e.g. `**/package.json`.
    /// Matched case-insensitively.
    fn file_globs(&self) -> &[&'static str];

    /// True when a built-in host provider already registers this dialect's
    /// root-level files, so discovery skips files at a folder root by default.
    fn shadowed_at_root(&self) -> bool {
        false
    }

    fn default_runner(&self) -> RunnerSpec;

    fn default_group_rules(&self) -> GroupRules {
        GroupRules::standard()
    }

    /// Targets of one file. Must not fail: malformed content yields whatever
    /// could be recovered.
    fn extract(&self, text: &str, file: &ConfigFile) -> Targets;

    /// Whether `path`'s file name matches the last segment of one of the
    /// dialect's globs.
    fn claims_file_name(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };
        self.file_globs().iter().any(|g| {
            let last = g.rsplit('/').next().unwrap_or_default();
            Pattern::new(last).is_ok_and(|p| p.matches_with(&name, FILE_MATCH))
        })
    }

    /// Directory tasks from `file` run in.
    fn working_directory(&self, file: &ConfigFile) -> PathBuf {
        file.dir().to_path_buf()
    }

    /// Command line for one target. The runner comes from configuration,
    /// never from file content.
    fn command_line(&self, runner: &RunnerSpec, target: &Target, _file: &ConfigFile) -> Vec<String> {
        runner.command([target.name.as_str()])
    }
}

pub(crate) const FILE_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};
