use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub manufacturing: ManufacturingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

/// Where the product catalog comes from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// CSV file; when unset the built-in list is used (if enabled)
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_use_builtin")]
    pub use_builtin: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            use_builtin: default_use_builtin(),
        }
    }
}

/// Optional shared-password gate
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Empty disables the gate
    #[serde(default)]
    pub password: String,

    /// Idle sessions older than this are dropped
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password: String::new(),
            session_ttl_minutes: default_session_ttl_minutes(),
        }
    }
}

impl AuthConfig {
    pub fn is_enabled(&self) -> bool {
        !self.password.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManufacturingConfig {
    /// VAT applied on top of the material + labor subtotal
    #[serde(default = "default_vat_rate")]
    pub vat_rate: f64,
}

impl Default for ManufacturingConfig {
    fn default() -> Self {
        Self {
            vat_rate: default_vat_rate(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_use_builtin() -> bool {
    true
}

/// One year
pub const MAX_SESSION_TTL_MINUTES: u64 = 365 * 24 * 60;

fn default_session_ttl_minutes() -> u64 {
    720
}

fn default_vat_rate() -> f64 {
    0.10
}

/// Load configuration from `path` (optional) layered with
/// `PRICING_DESK__SECTION__KEY` environment variables
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("PRICING_DESK").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        anyhow::bail!("Server port must be non-zero");
    }

    match cfg.server.log_format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log format '{}', expected 'text' or 'json'", other),
    }

    if !(0.0..=1.0).contains(&cfg.manufacturing.vat_rate) {
        anyhow::bail!(
            "VAT rate must be between 0 and 1, got {}",
            cfg.manufacturing.vat_rate
        );
    }

    if !(1..=MAX_SESSION_TTL_MINUTES).contains(&cfg.auth.session_ttl_minutes) {
        anyhow::bail!(
            "Session TTL must be between 1 and {} minutes, got {}",
            MAX_SESSION_TTL_MINUTES,
            cfg.auth.session_ttl_minutes
        );
    }

    Ok(())
}
