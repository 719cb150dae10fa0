// tagkit - component fragment server
//
// Architecture:
// - View compositor: loads component assets, scopes css, binds js, localizes
// - Resource registry: content-addressed css/js shared by all requests
// - HTTP server (axum): fragment endpoint plus resource delivery
// - CLI: config management and one-shot rendering

mod cli;
mod startup;

use anyhow::Result;
use tagkit::config::Config;
use tagkit::{logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config, render)
    // If a command was handled, exit early
    if cli::handle_cli().await? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // The guard must outlive the server so file logs flush
    let _log_guard = logging::init(&config.logging);

    startup::print_startup(&config);

    // Create shutdown channel for graceful server shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let mut server_handle = tokio::spawn(server::start_server(config, shutdown_rx));

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
            }
            tracing::info!("Shutdown requested");
        }
        result = &mut server_handle => {
            // Server exited on its own (bind failure, ...)
            return result?;
        }
    }

    // Stop accepting connections and let in-flight requests finish
    let _ = shutdown_tx.send(());
    server_handle.await??;

    Ok(())
}
