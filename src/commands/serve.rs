use anyhow::Result;
use colored::Colorize;
use pricing_desk::{config, server};
use std::path::Path;
use tracing::info;

/// Execute the serve command
///
/// Loads configuration and runs the web calculator until a shutdown signal
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Starting Pricing Desk...".green());

    let cfg = config::load_config(config_path)?;
    info!(config = %config_path.display(), "Configuration loaded");

    println!(
        "  Open {} in a browser",
        format!("http://{}:{}", cfg.server.host, cfg.server.port).cyan()
    );

    // Blocks until shutdown
    server::start_server(cfg).await?;

    Ok(())
}
