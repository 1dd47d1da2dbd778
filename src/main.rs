use std::sync::Arc;

use clap::Parser;
use tracing::debug;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use opticini_studio::cli::{self, Cli};
use opticini_studio::client::{ApiClient, ApiError, FileTokenStore, MemoryTokenStore, TokenStore};
use opticini_studio::config::StudioConfig;

fn init_logging() {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily("logs", "opticini.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    // Diagnostics go to stderr so they never mix with table output on stdout
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,opticini_studio=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ApiError> {
    let config = StudioConfig::load(cli.config.as_deref()).map_err(ApiError::Config)?;
    let api_url = cli.api_url.unwrap_or_else(|| config.api_url.clone());
    debug!(api_url = %api_url, "Resolved backend base URL.");

    let tokens: Arc<dyn TokenStore> = match &cli.token {
        Some(token) => Arc::new(MemoryTokenStore::with_tokens(Some(token.as_str()), None)),
        None => Arc::new(FileTokenStore::new(&config.credentials_path)),
    };

    let client = ApiClient::new(&api_url, tokens)?;
    cli::run(&client, cli.command, cli.json).await
}
