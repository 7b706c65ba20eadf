use thiserror::Error;

use super::discovery::DiscoveryError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// 11: config error, 20: I/O, 50: internal/uncategorized.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 11,
            CliError::Discovery(de) => match de {
                DiscoveryError::UnknownDialect(_) | DiscoveryError::Pattern { .. } => 11,
                DiscoveryError::Glob(_) | DiscoveryError::Read { .. } => 20,
                DiscoveryError::Join(_) => 50,
            },
            CliError::Io(_) => 20,
            CliError::Command(_) => 20,
            CliError::Anyhow(_) => 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_category() {
        assert_eq!(CliError::Config("x".into()).exit_code(), 11);
        assert_eq!(
            CliError::from(DiscoveryError::UnknownDialect("ant".into())).exit_code(),
            11
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(CliError::from(io).exit_code(), 20);
        assert_eq!(CliError::from(anyhow::anyhow!("boom")).exit_code(), 50);
    }
}
