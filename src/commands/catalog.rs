use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use pricing_desk::catalog::CatalogService;
use pricing_desk::config;
use pricing_desk::render::table::catalog_table;
use std::path::Path;
use tracing::info;

/// List catalog products
#[derive(Debug, Clone, Parser)]
pub struct CatalogArgs {
    /// Only products whose name contains TEXT (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Execute the catalog command
pub async fn execute(config_path: &Path, args: CatalogArgs) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let service = CatalogService::load(cfg.catalog.clone()).await;
    let snapshot = service.snapshot().await;

    if let Some(err) = &snapshot.load_error {
        println!("{} {}", "Catalog could not be loaded:".red(), err);
        return Ok(());
    }

    let products = match args.search.as_deref() {
        Some(q) => snapshot.catalog.search(q),
        None => snapshot.catalog.products().iter().collect(),
    };

    let source = match &cfg.catalog.path {
        Some(path) => path.display().to_string(),
        None if cfg.catalog.use_builtin => "built-in list".to_string(),
        None => "none".to_string(),
    };
    info!(source = %source, matches = products.len(), "Catalog listed");

    if products.is_empty() {
        println!("{}", "No products found".yellow());
        return Ok(());
    }

    println!("{}", catalog_table(&products));
    println!(
        "{} {} of {} product(s) from {}",
        "Catalog:".bold(),
        products.len(),
        snapshot.catalog.len(),
        source.cyan()
    );

    Ok(())
}
