pub mod api;
pub mod config;
pub mod header;
pub mod model;
pub mod resource;
pub mod router;
pub mod shell;
pub mod upload;
pub mod views;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use api::{DocumentApi, HttpDocumentApi};
use config::Cli;
use shell::Shell;

/// Parse the command line, build the client once and hand it to the shell.
pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.client_config()?;
    let start = cli.start_route()?;
    tracing::info!(base_url = %config.base_url(), route = %start, "starting pdf-copilot");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let api: Arc<dyn DocumentApi> = Arc::new(HttpDocumentApi::new(config));
        let mut shell = Shell::new(api)?;
        shell.run(start).await
    })
}
