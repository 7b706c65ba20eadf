use std::path::Path;

use taskdeck_core::api::{ConfigFile, Dialect, RunnerSpec, Target, Targets};

/// Executable scripts under `scripts/` directories; one task per file.
pub struct ScriptDialect;

impl Dialect for ScriptDialect {
    fn id(&self) -> &str {
        "script"
    }

    fn file_globs(&self) -> &[&'static str] {
        &[
            "**/scripts/*.sh",
            "**/scripts/*.bash",
            "**/scripts/*.py",
            "**/scripts/*.pl",
            "**/scripts/*.rb",
            "**/scripts/*.ps1",
            "**/scripts/*.bat",
            "**/scripts/*.cmd",
        ]
    }

    /// Empty program: the interpreter is picked per file extension.
    fn default_runner(&self) -> RunnerSpec {
        RunnerSpec::new("")
    }

    fn extract(&self, text: &str, file: &ConfigFile) -> Targets {
        let mut target = Target::new(file.file_name(), 0);
        if let Some(shebang) = text.lines().next().filter(|l| l.starts_with("#!")) {
            target.raw_value = Some(shebang.to_string());
        }
        [target].into_iter().collect()
    }

    fn command_line(&self, runner: &RunnerSpec, _target: &Target, file: &ConfigFile) -> Vec<String> {
        let path = file.path.to_string_lossy().to_string();
        if runner.program.is_empty() {
            interpreter_for(&file.path).command([path])
        } else {
            runner.command([path])
        }
    }
}

fn interpreter_for(path: &Path) -> RunnerSpec {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "py" => RunnerSpec::new("python"),
        "pl" => RunnerSpec::new("perl"),
        "rb" => RunnerSpec::new("ruby"),
        "ps1" => RunnerSpec::new("pwsh").with_args(["-File"]),
        "bat" | "cmd" => RunnerSpec::new("cmd").with_args(["/c"]),
        _ => RunnerSpec::new("bash"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use taskdeck_core::api::{Materializer, WorkspaceFolder};

    fn file(path: &str) -> ConfigFile {
        ConfigFile::new(path, WorkspaceFolder::new("p", "/p"))
    }

    #[test]
    fn one_target_named_after_the_file() {
        let f = file("/p/scripts/deploy.sh");
        let targets = ScriptDialect.extract("#!/usr/bin/env bash\nset -e\n", &f);
        assert_eq!(targets.names(), vec!["deploy.sh"]);
        assert_eq!(
            targets.get("deploy.sh").unwrap().raw_value.as_deref(),
            Some("#!/usr/bin/env bash")
        );
    }

    #[test]
    fn interpreter_follows_extension() {
        let m = Materializer::with_defaults(Arc::new(ScriptDialect));
        let cases = [
            ("/p/scripts/a.sh", vec!["bash", "/p/scripts/a.sh"]),
            ("/p/scripts/b.PY", vec!["python", "/p/scripts/b.PY"]),
            ("/p/scripts/c.ps1", vec!["pwsh", "-File", "/p/scripts/c.ps1"]),
            ("/p/scripts/d.cmd", vec!["cmd", "/c", "/p/scripts/d.cmd"]),
        ];
        for (path, expected) in cases {
            let f = file(path);
            let targets = ScriptDialect.extract("", &f);
            let task = m.materialize(targets.iter().next().unwrap(), &f);
            assert_eq!(task.command_line, expected);
            assert_eq!(task.relative_path, "scripts");
        }
    }

    #[test]
    fn configured_runner_wins() {
        let f = file("/p/scripts/a.sh");
        let cmd = ScriptDialect.command_line(
            &RunnerSpec::new("zsh"),
            &Target::new("a.sh", 0),
            &f,
        );
        assert_eq!(cmd, vec!["zsh", "/p/scripts/a.sh"]);
    }
}
