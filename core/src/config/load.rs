use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default taskdeck data directory: ~/.taskdeck
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".taskdeck"))
}

pub fn parse_config(s: &str) -> anyhow::Result<AppConfig> {
    Ok(toml::from_str::<AppConfig>(s)?)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read config {}: {e}", path.display()))?;
    parse_config(&s)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.taskdeck/config.toml
    let user_config = get_data_dir()?.join("config.toml");

    // Priority 2: ./taskdeck.toml (current directory)
    let local_config = Path::new("taskdeck.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok());
    Ok(cfg)
}

/// Environment variable overrides (highest priority).
///
/// `TASKDECK_LOG_LEVEL` replaces the log level; `TASKDECK_EXCLUDE` is a
/// comma-separated list appended to the exclude globs.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = var("TASKDECK_LOG_LEVEL") {
        if !v.trim().is_empty() {
            cfg.logging.level = v.trim().to_string();
        }
    }

    if let Some(v) = var("TASKDECK_EXCLUDE") {
        cfg.discovery.exclude.extend(
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskGroup;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert!(cfg.logging.enabled);
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.discovery.max_concurrent_reads, 16);
        assert!(cfg.is_enabled("npm"));
        assert!(cfg.dialect("npm").skip_root.is_none());
    }

    #[test]
    fn parses_dialect_tables() {
        let cfg = parse_config(
            r#"
            [discovery]
            exclude = ["**/dist/**", "**/{tmp,out}/**"]

            [dialects.npm]
            skip_root = false
            include = ["**/*.package.json"]
            runner = { program = "pnpm", args = ["run"] }
            group_rules = [{ pattern = "ci*", group = "build" }]

            [dialects.ant]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(cfg.discovery.exclude.len(), 2);
        let npm = cfg.dialect("npm");
        assert_eq!(npm.skip_root, Some(false));
        assert_eq!(npm.include, vec!["**/*.package.json"]);
        assert_eq!(npm.runner.map(|r| r.program), Some("pnpm".to_string()));
        let rules = npm.group_rules.unwrap();
        assert_eq!(rules[0].group, TaskGroup::Build);
        assert!(!cfg.is_enabled("ant"));
        assert!(cfg.is_enabled("make"));
    }

    #[test]
    fn rejects_unknown_group() {
        let err = parse_config(
            r#"
            [dialects.npm]
            group_rules = [{ pattern = "x", group = "deploy" }]
            "#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(&mut cfg, |k| match k {
            "TASKDECK_LOG_LEVEL" => Some("debug".to_string()),
            "TASKDECK_EXCLUDE" => Some("**/a/**, ,**/b/**".to_string()),
            _ => None,
        });
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.discovery.exclude, vec!["**/a/**", "**/b/**"]);
    }
}
