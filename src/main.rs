use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use pricing_desk::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Logging follows the config file when it loads; commands report config errors themselves
    let (log_level, log_format) = match config::load_config(&args.config) {
        Ok(cfg) => (cfg.server.log_level, cfg.server.log_format),
        Err(_) => ("info".to_string(), "text".to_string()),
    };
    init_tracing(&log_level, &log_format);

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Serve => {
            commands::serve::execute(&args.config).await?;
        }
        cli::Commands::Analyze(analyze_args) => {
            commands::analyze::execute(&args.config, analyze_args).await?;
        }
        cli::Commands::Catalog(catalog_args) => {
            commands::catalog::execute(&args.config, catalog_args).await?;
        }
        cli::Commands::Cost(cost_args) => {
            commands::cost::execute(&args.config, cost_args)?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
        },
        cli::Commands::Version => {
            println!("Pricing Desk v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
