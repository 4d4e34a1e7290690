//! pdfstitch - Merge uploaded PDFs and images into a single PDF.
//!
//! A small web service: upload files through the form at `/`, get one merged
//! PDF back.

mod cli;
mod config;
mod logging;
mod routes;

use anyhow::Context;
use clap::Parser;

use crate::cli::Cli;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    let config = ServerConfig::try_from(&cli)?;
    let app = routes::router(&config);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    tracing::info!(
        name = pdfstitch::NAME,
        version = pdfstitch::VERSION,
        addr = %config.bind,
        max_upload_bytes = config.max_upload_bytes,
        compression = ?config.merge.compression,
        spool = ?config.merge.spool,
        "Listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
