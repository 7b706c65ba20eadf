use std::path::PathBuf;

use thiserror::Error;

/// Failures of a discovery pass or a point invalidation.
///
/// Scan syntax errors never appear here; they degrade to partial extraction.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("file enumeration failed: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("discovery task failed: {0}")]
    Join(String),

    #[error("unknown task dialect: {0}")]
    UnknownDialect(String),
}

impl DiscoveryError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_the_path() {
        let err = DiscoveryError::read(
            "/repo/package.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to read /repo/package.json: denied");
    }

    #[test]
    fn pattern_error_keeps_pattern() {
        let source = glob::Pattern::new("a[").unwrap_err();
        let err = DiscoveryError::pattern("a[", source);
        assert!(err.to_string().starts_with("invalid glob pattern 'a['"));
    }
}
