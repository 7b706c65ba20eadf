use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use taskdeck_core::api::{
    AppConfig, CliError, ConfigFile, Dialect, DiscoveryError, LocalHost, TaskDescriptor,
    WorkspaceFolder,
};
use taskdeck_plugins::factory;

use crate::commands::cli::{DialectsArgs, ListArgs, OutputFormat, TargetsArgs};

pub async fn run_list(args: ListArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let tasks = collect_tasks(&args, cfg).await?;
    match args.format {
        OutputFormat::Text => print!("{}", render_tasks(&tasks)),
        OutputFormat::Json => println!("{}", to_json(&tasks)?),
    }
    Ok(0)
}

pub async fn collect_tasks(args: &ListArgs, cfg: &AppConfig) -> Result<Vec<TaskDescriptor>, CliError> {
    let roots = if args.folders.is_empty() {
        vec![std::env::current_dir()?]
    } else {
        args.folders.clone()
    };

    let mut folders = Vec::with_capacity(roots.len());
    for root in roots {
        let root = tokio::fs::canonicalize(&root)
            .await
            .map_err(|e| CliError::Discovery(DiscoveryError::read(&root, e)))?;
        folders.push(WorkspaceFolder::from_root(root));
    }

    let host = Arc::new(LocalHost::new(folders));
    let registry =
        factory::build_registry(cfg, host).map_err(|e| CliError::Config(format!("{e:#}")))?;

    let tasks = match args.dialect.as_deref() {
        Some(id) => registry.provide_tasks(id).await?,
        None => registry.provide_all().await,
    };
    tracing::info!(count = tasks.len(), "tasks discovered");
    Ok(tasks)
}

pub async fn run_targets(args: TargetsArgs) -> Result<i32, CliError> {
    let dialect = resolve_dialect(&args.file, args.dialect.as_deref())?;
    let text = tokio::fs::read(&args.file)
        .await
        .map_err(|e| DiscoveryError::read(&args.file, e))?;
    let text = String::from_utf8_lossy(&text);

    let dir = args
        .file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file = ConfigFile::new(&args.file, WorkspaceFolder::from_root(dir));
    let targets = dialect.extract(&text, &file);

    match args.format {
        OutputFormat::Text => {
            for t in &targets {
                match &t.raw_value {
                    Some(v) => println!("{:>8}  {}  {}", t.source_offset, t.name, v),
                    None => println!("{:>8}  {}", t.source_offset, t.name),
                }
            }
        }
        OutputFormat::Json => {
            let list: Vec<_> = targets.iter().collect();
            println!("{}", to_json(&list)?);
        }
    }
    Ok(0)
}

fn resolve_dialect(file: &Path, id: Option<&str>) -> Result<Arc<dyn Dialect>, CliError> {
    match id {
        Some(id) => factory::build_dialect(id)
            .ok_or_else(|| DiscoveryError::UnknownDialect(id.to_string()).into()),
        None => factory::build_dialects()
            .into_iter()
            .find(|d| d.claims_file_name(file))
            .ok_or_else(|| {
                CliError::Command(format!(
                    "no dialect recognizes {}; pass --dialect",
                    file.display()
                ))
            }),
    }
}

#[derive(Debug, Serialize)]
pub struct DialectInfo {
    pub id: String,
    pub enabled: bool,
    pub file_globs: Vec<String>,
    pub include: Vec<String>,
    pub runner: Vec<String>,
    pub skip_root: bool,
}

pub fn dialect_infos(cfg: &AppConfig) -> Vec<DialectInfo> {
    factory::build_dialects()
        .iter()
        .map(|d| {
            let dcfg = cfg.dialect(d.id());
            let runner = dcfg.runner.clone().unwrap_or_else(|| d.default_runner());
            DialectInfo {
                id: d.id().to_string(),
                enabled: dcfg.enabled,
                file_globs: d.file_globs().iter().map(|g| g.to_string()).collect(),
                include: dcfg.include.clone(),
                runner: runner.command(std::iter::empty::<String>()),
                skip_root: dcfg.skip_root.unwrap_or_else(|| d.shadowed_at_root()),
            }
        })
        .collect()
}

pub fn run_dialects(args: DialectsArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let infos = dialect_infos(cfg);
    match args.format {
        OutputFormat::Text => {
            for info in &infos {
                let state = if info.enabled { "on" } else { "off" };
                println!(
                    "{:<10} {:<3} {:<24} {}",
                    info.id,
                    state,
                    info.runner.join(" "),
                    info.file_globs.join(", ")
                );
            }
        }
        OutputFormat::Json => println!("{}", to_json(&infos)?),
    }
    Ok(0)
}

/// One line per task: type, group, folder-relative directory, name, command.
pub fn render_tasks(tasks: &[TaskDescriptor]) -> String {
    let mut out = String::new();
    for t in tasks {
        let dir = if t.relative_path.is_empty() {
            "."
        } else {
            t.relative_path.as_str()
        };
        out.push_str(&format!(
            "{}\t{}\t{}/{}\t{}\t{}\n",
            t.task_type,
            t.group,
            t.source_folder.name,
            dir,
            t.name,
            t.command_line.join(" ")
        ));
    }
    out
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Command(format!("json output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn list_args(root: &Path) -> ListArgs {
        ListArgs {
            folders: vec![root.to_path_buf()],
            dialect: None,
            format: OutputFormat::Text,
        }
    }

    #[tokio::test]
    async fn lists_tasks_from_a_real_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("web")).unwrap();
        fs::write(root.join("package.json"), r#"{"scripts": {"start": "node ."}}"#).unwrap();
        fs::write(root.join("web/package.json"), r#"{"scripts": {"build": "vite build"}}"#).unwrap();
        fs::write(root.join("Makefile"), "all:\n\techo hi\nclean:\n\trm -rf out\n").unwrap();

        let tasks = collect_tasks(&list_args(root), &AppConfig::default()).await.unwrap();
        let names: Vec<_> = tasks
            .iter()
            .map(|t| format!("{}:{}", t.task_type, t.name))
            .collect();
        assert_eq!(names, vec!["npm:build", "make:all", "make:clean"]);

        let text = render_tasks(&tasks);
        assert!(text.contains("make\tclean\t"));
        assert!(text.contains("npm run build"));
    }

    #[tokio::test]
    async fn unknown_dialect_maps_to_config_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = list_args(dir.path());
        args.dialect = Some("cargo".to_string());

        let err = collect_tasks(&args, &AppConfig::default()).await.unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[tokio::test]
    async fn missing_folder_is_an_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let args = list_args(&dir.path().join("missing"));

        let err = collect_tasks(&args, &AppConfig::default()).await.unwrap_err();
        assert_eq!(err.exit_code(), 20);
    }

    #[test]
    fn dialect_is_guessed_from_file_name() {
        let d = resolve_dialect(Path::new("/x/GNUmakefile"), None).unwrap();
        assert_eq!(d.id(), "make");
        let d = resolve_dialect(Path::new("/x/.vscode/tasks.json"), None).unwrap();
        assert_eq!(d.id(), "workspace");
        assert!(resolve_dialect(Path::new("/x/Cargo.toml"), None).is_err());
    }

    #[test]
    fn dialect_infos_reflect_overrides() {
        let cfg = taskdeck_core::api::parse_config(
            "[dialects.npm]\nskip_root = false\nrunner = { program = \"pnpm\" }\n",
        )
        .unwrap();
        let infos = dialect_infos(&cfg);
        let npm = infos.iter().find(|i| i.id == "npm").unwrap();
        assert!(!npm.skip_root);
        assert_eq!(npm.runner, vec!["pnpm"]);
    }
}
