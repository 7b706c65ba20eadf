#[allow(clippy::module_inception)]
pub mod error;
pub mod discovery;

pub use discovery::DiscoveryError;
pub use error::CliError;
