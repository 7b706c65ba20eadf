use std::sync::Arc;

use crate::dialect::Dialect;
use crate::extract::Target;

use super::group::GroupRules;
use super::types::{ConfigFile, RunnerSpec, TaskDescriptor};

/// Turns extracted targets into [`TaskDescriptor`]s for one dialect.
#[derive(Clone)]
pub struct Materializer {
    dialect: Arc<dyn Dialect>,
    runner: RunnerSpec,
    rules: GroupRules,
}

impl Materializer {
    pub fn new(dialect: Arc<dyn Dialect>, runner: RunnerSpec, rules: GroupRules) -> Self {
        Self {
            dialect,
            runner,
            rules,
        }
    }

    /// Materializer using the dialect's built-in runner and group rules.
    pub fn with_defaults(dialect: Arc<dyn Dialect>) -> Self {
        let runner = dialect.default_runner();
        let rules = dialect.default_group_rules();
        Self::new(dialect, runner, rules)
    }

    pub fn runner(&self) -> &RunnerSpec {
        &self.runner
    }

    pub fn materialize(&self, target: &Target, file: &ConfigFile) -> TaskDescriptor {
        let working_directory = self.dialect.working_directory(file);
        TaskDescriptor {
            task_type: self.dialect.id().to_string(),
            name: target.name.clone(),
            group: self.rules.classify(&target.name),
            relative_path: file.relative_dir(),
            working_directory,
            command_line: self.dialect.command_line(&self.runner, target, file),
            source_file: file.clone(),
            source_folder: file.folder.clone(),
            source_offset: target.source_offset,
            detail: target.raw_value.clone(),
        }
    }
}

impl std::fmt::Debug for Materializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Materializer")
            .field("dialect", &self.dialect.id())
            .field("runner", &self.runner)
            .field("rules", &self.rules)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract_scripts, Targets};
    use crate::task::{TaskGroup, WorkspaceFolder};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    struct Scripts;

    impl Dialect for Scripts {
        fn id(&self) -> &str {
            "npm"
        }

        fn file_globs(&self) -> &[&'static str] {
            &["**/package.json"]
        }

        fn default_runner(&self) -> RunnerSpec {
            RunnerSpec::new("npm").with_args(["run"])
        }

        fn extract(&self, text: &str, _file: &ConfigFile) -> Targets {
            extract_scripts(text)
        }
    }

    #[test]
    fn materializes_script_target() {
        let folder = WorkspaceFolder::new("repo", "/repo");
        let file = ConfigFile::new("/repo/package.json", folder.clone());
        let targets = extract_scripts(r#"{"scripts": {"build": "tsc -p .", "test": "mocha"}}"#);
        let m = Materializer::with_defaults(Arc::new(Scripts));

        let task = m.materialize(targets.get("build").unwrap(), &file);

        assert_eq!(task.task_type, "npm");
        assert_eq!(task.name, "build");
        assert_eq!(task.group, TaskGroup::Build);
        assert_eq!(task.working_directory, PathBuf::from("/repo"));
        assert_eq!(task.command_line, vec!["npm", "run", "build"]);
        assert_eq!(task.relative_path, "");
        assert_eq!(task.source_folder, folder);
        assert_eq!(task.detail.as_deref(), Some("tsc -p ."));
    }

    #[test]
    fn configured_runner_overrides_default() {
        let folder = WorkspaceFolder::new("repo", "/repo");
        let file = ConfigFile::new("/repo/web/package.json", folder);
        let m = Materializer::new(
            Arc::new(Scripts),
            RunnerSpec::new("pnpm"),
            GroupRules::default(),
        );

        let task = m.materialize(&Target::new("test", 0), &file);

        assert_eq!(task.command_line, vec!["pnpm", "test"]);
        assert_eq!(task.group, TaskGroup::None);
        assert_eq!(task.working_directory, PathBuf::from("/repo/web"));
        assert_eq!(task.relative_path, "web");
    }
}
