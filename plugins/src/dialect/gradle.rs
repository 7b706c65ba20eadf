use std::sync::OnceLock;

use regex::Regex;
use taskdeck_core::api::{ConfigFile, Dialect, RunnerSpec, Targets};

use super::{cached_regex, regex_targets};

static TASK: OnceLock<Regex> = OnceLock::new();

/// Task declarations in Groovy and Kotlin build scripts.
pub struct GradleDialect;

impl Dialect for GradleDialect {
    fn id(&self) -> &str {
        "gradle"
    }

    fn file_globs(&self) -> &[&'static str] {
        &["**/build.gradle", "**/build.gradle.kts"]
    }

    fn default_runner(&self) -> RunnerSpec {
        RunnerSpec::new("gradle")
    }

    fn extract(&self, text: &str, _file: &ConfigFile) -> Targets {
        let re = cached_regex(
            &TASK,
            r#"(?m)^\s*task\s+([A-Za-z_][\w-]*)|\btask\s*\(\s*["']([^"']+)["']|\btasks\.(?:register|create)\s*(?:<[^>]*>\s*)?\(\s*["']([^"']+)["']"#,
        );
        regex_targets(re, text)
    }
}
