//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `taskdeck_core::api` instead of reaching into internal modules.

pub use crate::cache::{CacheEntry, Invalidation, TaskCache};
pub use crate::config::{
    load_default, load_from_path, parse_config, AppConfig, DialectConfig, DiscoveryConfig,
    LoggingConfig,
};
pub use crate::dialect::Dialect;
pub use crate::discovery::{
    DiscoveryEngine, DiscoverySettings, LocalHost, PathFilter, WorkspaceHost,
};
pub use crate::error::{CliError, DiscoveryError};
pub use crate::extract::{
    extract_json, extract_scripts, extract_task_labels, line_offsets, JsonSection, Target,
    Targets,
};
pub use crate::provider::{ChangeKind, SourceChange, TaskProvider, TaskRegistry};
pub use crate::scan::{scan, Literal, Scanner, Token};
pub use crate::task::{
    ConfigFile, GroupRuleConfig, GroupRules, Materializer, RunnerSpec, TaskDescriptor, TaskGroup,
    WorkspaceFolder,
};
