use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qrhub::config::{DEFAULT_EVENT_TIMEOUT_SECS, DEFAULT_FRAME_DELAY_MS};
use qrhub::{run_bot, BotConfig};

#[derive(Parser)]
#[command(name = "qrhub")]
#[command(author, version, about = "Telegram bot that creates and scans QR codes and barcodes", long_about = None)]
struct Cli {
    /// Bot API token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Delay after each frame of the creation animation, in milliseconds
    #[arg(long, env = "QRHUB_FRAME_DELAY_MS", default_value_t = DEFAULT_FRAME_DELAY_MS)]
    frame_delay_ms: u64,

    /// Maximum time spent on a single update, in seconds
    #[arg(long, env = "QRHUB_EVENT_TIMEOUT_SECS", default_value_t = DEFAULT_EVENT_TIMEOUT_SECS)]
    event_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Cli::parse();

    let config = BotConfig::new(args.token, args.frame_delay_ms, args.event_timeout_secs)?;
    tracing::info!("starting bot with {:?}", config);

    run_bot(config).await?;

    Ok(())
}
