use std::sync::OnceLock;

use regex::Regex;
use taskdeck_core::api::{ConfigFile, Dialect, RunnerSpec, Targets};

use super::{cached_regex, regex_targets};

static TARGET: OnceLock<Regex> = OnceLock::new();

/// `<target name="...">` elements of Ant build files.
pub struct AntDialect;

impl Dialect for AntDialect {
    fn id(&self) -> &str {
        "ant"
    }

    fn file_globs(&self) -> &[&'static str] {
        &["**/build.xml"]
    }

    fn default_runner(&self) -> RunnerSpec {
        RunnerSpec::new("ant")
    }

    fn extract(&self, text: &str, _file: &ConfigFile) -> Targets {
        let re = cached_regex(
            &TARGET,
            r#"<target\b[^>]*?\bname\s*=\s*(?:"([^"]+)"|'([^']+)')"#,
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
    fn extracts_target_names() {
        let file = ConfigFile::new("/p/build.xml", WorkspaceFolder::new("p", "/p"));
        let text = r#"<?xml version="1.0"?>
<project name="demo" default="jar">
  <target name="init"/>
  <target depends="init" name='compile' description="javac">
    <javac srcdir="src"/>
  </target>
  <!-- <targets name="nope"> -->
  <target
      name="jar" depends="compile">
  </target>
</project>
"#;
        let targets = AntDialect.extract(text, &file);
        assert_eq!(targets.names(), vec!["init", "compile", "jar"]);
        assert_eq!(
            targets.get("init").unwrap().source_offset,
            text.find("init\"/>").unwrap()
        );
    }
}
