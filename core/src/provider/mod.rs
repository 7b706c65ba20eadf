//! Providers bind a dialect to its discovery engine and cache; the registry
//! routes requests and change notifications to them.

mod change;
mod registry;
mod task_provider;

pub use change::{ChangeKind, SourceChange};
pub use registry::TaskRegistry;
pub use task_provider::TaskProvider;
