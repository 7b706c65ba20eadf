mod group;
mod materialize;
mod types;

pub use group::{GroupRuleConfig, GroupRules};
pub use materialize::Materializer;
pub use types::{ConfigFile, RunnerSpec, TaskDescriptor, TaskGroup, WorkspaceFolder};
