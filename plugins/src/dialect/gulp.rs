use std::sync::OnceLock;

use regex::Regex;
use taskdeck_core::api::{ConfigFile, Dialect, RunnerSpec, Targets};

use super::{cached_regex, regex_targets};

static TASK: OnceLock<Regex> = OnceLock::new();

/// `gulp.task(...)` registrations and exported task functions.
pub struct GulpDialect;

impl Dialect for GulpDialect {
    fn id(&self) -> &str {
        "gulp"
    }

    fn file_globs(&self) -> &[&'static str] {
        &[
            "**/gulpfile.js",
            "**/gulpfile.mjs",
            "**/gulpfile.cjs",
            "**/gulpfile.babel.js",
        ]
    }

    fn default_runner(&self) -> RunnerSpec {
        RunnerSpec::new("gulp")
    }

    fn extract(&self, text: &str, _file: &ConfigFile) -> Targets {
        let re = cached_regex(
            &TASK,
            r#"(?m)\bgulp\.task\s*\(\s*(?:"([^"]+)"|'([^']+)')|^\s*(?:module\.)?exports\.([A-Za-z_$][\w$]*)\s*="#,
        );
        regex_targets(re, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use taskdeck_core::api::WorkspaceFolder;

    #[test]
    fn extracts_tasks_and_exports() {
        let file = ConfigFile::new("/p/gulpfile.js", WorkspaceFolder::new("p", "/p"));
        let text = r#"
const { series } = require('gulp');
gulp.task('styles', () => {});
function clean(cb) { cb(); }
exports.clean = clean;
module.exports.build = series(clean);
exports.default = exports.build;
"#;
        let targets = GulpDialect.extract(text, &file);
        assert_eq!(targets.names(), vec!["styles", "clean", "build", "default"]);
    }
}
