//! Workspace enumeration and per-file target loading.

mod engine;
mod filter;
mod host;

pub use engine::{DiscoveryEngine, DiscoverySettings};
pub use filter::{expand_braces, PathFilter};
pub use host::{LocalHost, WorkspaceHost};
