use anyhow::Result;
use colored::Colorize;
use pricing_desk::config::{self, Config};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with the password masked
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    // Serialize to TOML format
    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    info!("Configuration displayed successfully");
    Ok(())
}

/// Sanitize secrets in configuration for safe display
fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.auth.password = mask_password(&sanitized.auth.password);
    sanitized
}

/// Mask a password for safe display
///
/// Shows first 2 and last 2 characters with asterisks in between.
/// Example: "desk-secret-2026" -> "de...26"
fn mask_password(password: &str) -> String {
    if password.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = password.chars().collect();
    if chars.len() <= 8 {
        // Too short to mask meaningfully
        return "***".to_string();
    }

    let prefix: String = chars[..2].iter().collect();
    let suffix: String = chars[chars.len() - 2..].iter().collect();

    format!("{}...{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_password() {
        assert_eq!(mask_password("desk-secret-2026"), "de...26");
        assert_eq!(mask_password("short"), "***");
        assert_eq!(mask_password(""), "");
    }

    #[test]
    fn test_sanitize_secrets_masks_only_password() {
        let mut cfg = Config::default();
        cfg.auth.password = "desk-secret-2026".to_string();

        let sanitized = sanitize_secrets(&cfg);
        assert_eq!(sanitized.auth.password, "de...26");
        assert_eq!(sanitized.server.port, cfg.server.port);
        assert_eq!(cfg.auth.password, "desk-secret-2026");
    }
}
