// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use curiesync_injector::config::Config;
use curiesync_injector::injection::CuriesyncInjector;
use curiesync_injector::mutator::Mutator;
use curiesync_injector::webhook::WebhookServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting curiesync injector");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: curiesync_image={}, bucket_link={:?}, listen_addr={}",
        config.curiesync_image, config.bucket_link, config.listen_addr
    );

    let mutator = Mutator::new(CuriesyncInjector::from_config(&config));

    WebhookServer::new(config.listen_addr, mutator).run().await
}
