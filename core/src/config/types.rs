use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::task::{GroupRuleConfig, RunnerSpec};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Per-dialect settings keyed by dialect id (`npm`, `make`, ...).
    #[serde(default)]
    pub dialects: BTreeMap<String, DialectConfig>,
}

impl AppConfig {
    /// Settings for one dialect; defaults when the table is absent.
    pub fn dialect(&self, id: &str) -> DialectConfig {
        self.dialects.get(id).cloned().unwrap_or_default()
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.dialects.get(id).map(|d| d.enabled).unwrap_or(true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a daily-rolled file under `directory`.
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "taskdeck_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Directory for log files. Defaults to `~/.taskdeck/logs`.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Globs matched case-insensitively against absolute candidate paths.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Upper bound on concurrent file reads within one discovery pass.
    #[serde(default = "default_max_concurrent_reads")]
    pub max_concurrent_reads: usize,
}

fn default_max_concurrent_reads() -> usize {
    16
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            max_concurrent_reads: default_max_concurrent_reads(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialectConfig {
    #[serde(default = "default_dialect_enabled")]
    pub enabled: bool,

    /// Extra globs (relative to each folder root) searched besides the
    /// dialect's own file names.
    #[serde(default)]
    pub include: Vec<String>,

    /// Overrides the dialect's built-in runner.
    #[serde(default)]
    pub runner: Option<RunnerSpec>,

    /// Overrides the dialect's built-in group rules.
    #[serde(default)]
    pub group_rules: Option<Vec<GroupRuleConfig>>,

    /// Skip files at a folder root. Unset means "use the dialect's default".
    #[serde(default)]
    pub skip_root: Option<bool>,
}

fn default_dialect_enabled() -> bool {
    true
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            enabled: default_dialect_enabled(),
            include: Vec::new(),
            runner: None,
            group_rules: None,
            skip_root: None,
        }
    }
}
