//! Function entry point: reads one invocation event from stdin and writes the
//! response to stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::warn;

use chatlite::config::{self, Config};
use chatlite::function;
use chatlite::server::{self, AppState, Deployment};

#[derive(Parser)]
#[command(name = "chatlite-fn", version, about = "Run one chat relay invocation")]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, env = "CHATLITE_CONFIG", default_value = "chatlite.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .await
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let api_key = config::api_key_from_env();
    if api_key.is_none() {
        warn!("{} is not set", config::API_KEY_ENV);
    }

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("failed to read invocation event from stdin")?;
    let event = function::parse_event(&input)?;

    let state = AppState::from_config(&config, api_key, Deployment::Function);
    let app = server::build_app(state, config.server.request_timeout_seconds);
    let response = function::invoke(app, event).await?;

    let mut out = serde_json::to_vec(&response)?;
    out.push(b'\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&out).await?;
    stdout.flush().await?;

    Ok(())
}
