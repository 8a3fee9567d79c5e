mod cli;
mod config;
mod output;
mod script;

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shelf_api::ResourceApi;
use shelf_storage::create_store;

use cli::{Cli, Commands};
use output::print_error;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format.unwrap_or_default();
    let store_config = config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Run(args) => {
            let text = match &args.script {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read script {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("failed to read script from stdin")?;
                    buffer
                }
            };
            let operations = script::parse(&text)?;

            let store = create_store(&store_config).context("failed to build store")?;
            let api = ResourceApi::new(store);

            for operation in &operations {
                let (status, body) = script::apply(&api, operation).await?;
                output::print_response(status, &body, format);
            }
        }
        Commands::Schema => {
            let schema = serde_json::to_value(&store_config.schema)
                .context("failed to serialize schema")?;
            output::print_value(&schema, format);
        }
    }

    Ok(())
}
