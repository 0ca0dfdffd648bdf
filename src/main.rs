use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use meshfeed::app::AppContext;
use meshfeed::cli::Cli;
use meshfeed::config::Config;
use meshfeed::daemon::Daemon;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    let ctx = AppContext::new(config)?;
    ctx.shutdown.listen_for_signals();

    Daemon::new(ctx).run().await;

    Ok(())
}
