mod load;
mod types;

pub use load::{apply_env_overrides, get_data_dir, load_default, load_from_path, parse_config};
pub use types::{AppConfig, DialectConfig, DiscoveryConfig, LoggingConfig};
