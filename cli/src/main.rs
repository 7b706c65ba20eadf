use clap::Parser;
use taskdeck_cli::app;
use taskdeck_cli::commands::cli;
use taskdeck_cli::logging::init_tracing;
use taskdeck_core::api::{AppConfig, CliError};

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = load_config(&args).map_err(|e| CliError::Config(format!("{e:#}")))?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    match args.command {
        cli::Commands::List(list_args) => app::run_list(list_args, &cfg).await,
        cli::Commands::Targets(targets_args) => app::run_targets(targets_args).await,
        cli::Commands::Dialects(dialects_args) => app::run_dialects(dialects_args, &cfg),
    }
}

fn load_config(args: &cli::Args) -> anyhow::Result<AppConfig> {
    match &args.config {
        Some(path) => {
            let mut cfg = taskdeck_core::config::load_from_path(path)?;
            taskdeck_core::config::apply_env_overrides(&mut cfg, |k| std::env::var(k).ok());
            Ok(cfg)
        }
        None => taskdeck_core::config::load_default(),
    }
}
