use std::path::PathBuf;

use taskdeck_core::api::{extract_task_labels, ConfigFile, Dialect, RunnerSpec, Targets};

/// Labelled entries of `.vscode/tasks.json`. The host runs them itself, so
/// the command line is just the label unless a runner is configured.
pub struct WorkspaceTasksDialect;

impl Dialect for WorkspaceTasksDialect {
    fn id(&self) -> &str {
        "workspace"
    }

    fn file_globs(&self) -> &[&'static str] {
        &["**/.vscode/tasks.json"]
    }

    fn default_runner(&self) -> RunnerSpec {
        RunnerSpec::new("")
    }

    fn extract(&self, text: &str, _file: &ConfigFile) -> Targets {
        extract_task_labels(text)
    }

    /// The project directory holding `.vscode`.
    fn working_directory(&self, file: &ConfigFile) -> PathBuf {
        let dir = file.dir();
        let settings_dir = dir
            .file_name()
            .is_some_and(|n| n.to_string_lossy().eq_ignore_ascii_case(".vscode"));
        match dir.parent() {
            Some(parent) if settings_dir => parent.to_path_buf(),
            _ => dir.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use taskdeck_core::api::{Materializer, WorkspaceFolder};

    #[test]
    fn labels_run_from_the_project_directory() {
        let folder = WorkspaceFolder::new("repo", "/repo");
        let file = ConfigFile::new("/repo/tools/.vscode/tasks.json", folder);
        let text = r#"{
            // comments are allowed here
            "version": "2.0.0",
            "tasks": [
                { "label": "compile", "type": "shell", "command": "make" },
                { "type": "shell", "command": "echo" },
                { "label": "rebuild all", "dependsOn": ["compile"] },
            ]
        }"#;

        let targets = WorkspaceTasksDialect.extract(text, &file);
        assert_eq!(targets.names(), vec!["compile", "rebuild all"]);

        let m = Materializer::with_defaults(Arc::new(WorkspaceTasksDialect));
        let task = m.materialize(targets.get("compile").unwrap(), &file);
        assert_eq!(task.working_directory, PathBuf::from("/repo/tools"));
        assert_eq!(task.relative_path, "tools/.vscode");
        assert_eq!(task.command_line, vec!["compile"]);
    }
}
