use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Discover build and run tasks in a workspace")]
pub struct Args {
    /// Config file to load instead of ~/.taskdeck/config.toml or ./taskdeck.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List discovered tasks.
    List(ListArgs),
    /// Show the targets extracted from a single file.
    Targets(TargetsArgs),
    /// Show the built-in dialects and their effective settings.
    Dialects(DialectsArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    /// Workspace folder root. Can be specified multiple times; defaults to
    /// the current directory.
    #[arg(long = "folder", action = clap::ArgAction::Append)]
    pub folders: Vec<PathBuf>,

    /// Only list tasks of this dialect.
    #[arg(long)]
    pub dialect: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TargetsArgs {
    pub file: PathBuf,

    /// Dialect to extract with; guessed from the file name when omitted.
    #[arg(long)]
    pub dialect: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DialectsArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
