use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ladiowatch::cli::{console, Cli};
use ladiowatch::watcher::Watcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = cli.into_config().map_err(anyhow::Error::msg)?;

    let watcher = Arc::new(Watcher::new(config)?);
    watcher.start()?;

    console::run(watcher).await?;

    Ok(())
}
