use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use chatlite::config::{self, Config};
use chatlite::server::{self, AppState, Deployment};

#[derive(Parser)]
#[command(name = "chatlite", version, about = "Chat relay for Google Gemini")]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, env = "CHATLITE_CONFIG", default_value = "chatlite.yaml")]
    config: PathBuf,

    /// Host to bind (overrides config and environment)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)
        .await
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    config.apply_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let api_key = config::api_key_from_env();
    if api_key.is_none() {
        warn!(
            "{} is not set; requests must supply apiKey in the body",
            config::API_KEY_ENV
        );
    }

    let state = AppState::from_config(&config, api_key, Deployment::Server);
    info!(
        provider = state.relay.provider_name(),
        model = state.relay.model(),
        "Chat relay ready"
    );

    let app = server::build_app(state, config.server.request_timeout_seconds);
    server::serve(app, &config.server.host, config.server.port)
        .await
        .context("server error")?;

    Ok(())
}
