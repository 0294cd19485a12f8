use std::process;

use anyhow::Context;
use jserver::{config::Config, handler, server::Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        tracing::error!("server failed: {err:#}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    let server = Server::new((), handler::echo)
        .with_limits(config.limits())
        .with_read_timeout(config.read_timeout());

    server
        .bind(&config.address)
        .await
        .with_context(|| format!("failed to serve on {}", config.address))
}
