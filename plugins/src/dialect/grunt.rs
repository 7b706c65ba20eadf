use std::sync::OnceLock;

use regex::Regex;
use taskdeck_core::api::{ConfigFile, Dialect, RunnerSpec, Targets};

use super::{cached_regex, regex_targets};

static REGISTER: OnceLock<Regex> = OnceLock::new();

pub struct GruntDialect;

impl Dialect for GruntDialect {
    fn id(&self) -> &str {
        "grunt"
    }

    fn file_globs(&self) -> &[&'static str] {
        &["**/Gruntfile.js", "**/Gruntfile.coffee"]
    }

    fn default_runner(&self) -> RunnerSpec {
        RunnerSpec::new("grunt")
    }

    fn extract(&self, text: &str, _file: &ConfigFile) -> Targets {
        // Parenthesis is optional for CoffeeScript call syntax.
        let re = cached_regex(
            &REGISTER,
            r#"\bgrunt\.register(?:Multi)?Task\s*\(?\s*(?:"([^"]+)"|'([^']+)')"#,
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
    fn extracts_registered_tasks() {
        let file = ConfigFile::new("/p/Gruntfile.js", WorkspaceFolder::new("p", "/p"));
        let text = r#"
module.exports = function (grunt) {
  grunt.initConfig({ uglify: {} });
  grunt.registerTask('default', ['uglify']);
  grunt.registerMultiTask("log", "Log stuff.", function () {});
  grunt.registerTask 'dist', ['default']
};
"#;
        let targets = GruntDialect.extract(text, &file);
        assert_eq!(targets.names(), vec!["default", "log", "dist"]);
    }
}
