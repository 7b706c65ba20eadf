use taskdeck_core::api::{extract_scripts, ConfigFile, Dialect, RunnerSpec, Targets};

/// `scripts` of `package.json` files, run with `npm run <name>`.
pub struct NpmDialect;

impl Dialect for NpmDialect {
    fn id(&self) -> &str {
        "npm"
    }

    fn file_globs(&self) -> &[&'static str] {
        &["**/package.json"]
    }

    // Root-level package.json files belong to the host's own npm support.
    fn shadowed_at_root(&self) -> bool {
        true
    }

    fn default_runner(&self) -> RunnerSpec {
        RunnerSpec::new("npm").with_args(["run"])
    }

    fn extract(&self, text: &str, _file: &ConfigFile) -> Targets {
        extract_scripts(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use taskdeck_core::api::{Materializer, TaskGroup, WorkspaceFolder};
    use std::sync::Arc;

    #[test]
    fn scripts_become_npm_run_tasks() {
        let folder = WorkspaceFolder::new("repo", "/repo");
        let file = ConfigFile::new("/repo/web/package.json", folder);
        let text = r#"{
            "name": "web",
            "scripts": { "build": "vite build", "clean": "rimraf dist", "test": "vitest" },
            "devDependencies": { "vite": "^5.0.0" }
        }"#;

        let targets = NpmDialect.extract(text, &file);
        assert_eq!(targets.names(), vec!["build", "clean", "test"]);

        let m = Materializer::with_defaults(Arc::new(NpmDialect));
        let tasks: Vec<_> = targets.iter().map(|t| m.materialize(t, &file)).collect();
        assert_eq!(tasks[0].command_line, vec!["npm", "run", "build"]);
        assert_eq!(tasks[0].group, TaskGroup::Build);
        assert_eq!(tasks[1].group, TaskGroup::Clean);
        assert_eq!(tasks[2].group, TaskGroup::None);
        assert_eq!(tasks[0].relative_path, "web");
        assert_eq!(tasks[0].detail.as_deref(), Some("vite build"));
    }

    #[test]
    fn root_files_are_shadowed() {
        assert!(NpmDialect.shadowed_at_root());
    }
}
