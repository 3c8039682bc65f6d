mod config;
mod error;
mod repl;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use runtime::{DebugLog, OllamaBackend, Pipeline, ToolRegistry};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::Result;

const CONFIG_FILE: &str = "toolchat.toml";

#[derive(Parser)]
#[command(name = "toolchat")]
#[command(about = "Chat with a local model that can call tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file (optional)
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Model to use, overriding config and environment
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::load_or_default(&cli.config)?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(model) = cli.model {
        config.model.name = model;
    }

    let debug = DebugLog::from_level(&config.log_level);
    let client = config.http_client()?;
    let registry = ToolRegistry::builtin(client.clone(), &config.endpoints)?;
    let backend = OllamaBackend::builder(&config.model.name)
        .endpoint(&config.model.endpoint)
        .client(client)
        .build();
    info!(%backend, tools = registry.len(), "starting chat loop");

    let pipeline = Pipeline::new(backend, registry, debug);

    let turns = repl::run(
        io::stdin().lock(),
        &mut io::stdout(),
        &mut io::stderr(),
        &pipeline,
    )
    .await?;
    info!(turns, "chat loop ended");

    Ok(())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
