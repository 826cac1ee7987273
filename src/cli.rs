use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pricing-desk", version, about = "Seller pricing and margin calculator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the web calculator (default)
    Serve,

    /// Run a margin analysis in the terminal
    Analyze(crate::commands::analyze::AnalyzeArgs),

    /// List the product catalog
    Catalog(crate::commands::catalog::CatalogArgs),

    /// Estimate a garment's factory price
    Cost(crate::commands::cost::CostArgs),

    /// Test configuration file validity
    Test,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with the password masked)
    Show,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_serve() {
        let cli = Cli {
            config: PathBuf::from("config.toml"),
            command: None,
        };

        assert!(matches!(cli.get_command(), Commands::Serve));
    }

    #[test]
    fn test_cli_parsing_analyze_repeated_flags() {
        let args = vec![
            "pricing-desk",
            "analyze",
            "--item",
            "Shirt:18000:39000/45000",
            "--product",
            "[DESK] OFFICE SHIRT [FOG]",
            "--discount",
            "10",
            "--discount",
            "30",
            "--json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Analyze(a) => {
                assert_eq!(a.item, vec!["Shirt:18000:39000/45000"]);
                assert_eq!(a.product, vec!["[DESK] OFFICE SHIRT [FOG]"]);
                assert_eq!(a.discount, vec![10, 30]);
                assert!(a.json);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_cli_parsing_cost() {
        let args = vec![
            "pricing-desk",
            "--config",
            "desk.toml",
            "cost",
            "--item",
            "Jacket",
            "--fabric-price",
            "8000",
            "--fabric-yield",
            "1.5",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, PathBuf::from("desk.toml"));

        match cli.get_command() {
            Commands::Cost(c) => {
                assert_eq!(c.item, "Jacket");
                assert_eq!(c.fabric_price, 8000.0);
                assert_eq!(c.fabric_yield, 1.5);
                assert!(c.lining_price.is_none());
                assert!(c.export.is_none());
            }
            _ => panic!("Expected Cost command"),
        }
    }

    #[test]
    fn test_cli_parsing_config_show() {
        let args = vec!["pricing-desk", "config", "show"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Config { action } => {
                assert!(matches!(action, ConfigCommands::Show));
            }
            _ => panic!("Expected Config command"),
        }
    }
}
