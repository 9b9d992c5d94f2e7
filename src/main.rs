use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_transcripts::{Cli, Config, Downloader};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "yt_transcripts=debug"
    } else {
        "yt_transcripts=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::debug!(
        "output root: {}, language: {}, api key: {}",
        config.output_root.display(),
        config.language,
        if config.api_key.is_some() { "set" } else { "not set" }
    );

    Downloader::new(config, cli.quiet).run().await
}
