use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Shelf CLI — drive an in-memory CRUD resource store")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store config file: schema and seed records in TOML
    /// (a built-in todo schema is used when omitted)
    #[arg(short, long, global = true, env = "SHELF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// One-line JSON bodies
    #[default]
    Json,
    /// Pretty-printed JSON bodies
    Pretty,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a store from the config and apply a script of operations
    Run(RunArgs),
    /// Print the effective schema as JSON
    Schema,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Script file, one JSON operation per line (reads stdin when omitted)
    pub script: Option<PathBuf>,
}
