use std::sync::Arc;

use {
    clap::Parser,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use gramgate_config::Credentials;
use gramgate_telegram::TelegramClient;

#[derive(Parser)]
#[command(name = "gramgate", about = "gramgate — personal Telegram HTTP gateway")]
struct Cli {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "GRAMGATE_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on.
    #[arg(long, env = "GRAMGATE_PORT", default_value_t = 8484)]
    port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "gramgate starting");

    // Credentials are startup-fatal: refuse to serve with a partial set.
    let credentials = Credentials::from_env()?;
    let client = TelegramClient::connect(&credentials).await?;

    gramgate_gateway::server::start_gateway(
        &cli.bind,
        cli.port,
        credentials.api_key(),
        Arc::new(client),
    )
    .await
}
