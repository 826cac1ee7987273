//! Analyze command
//!
//! Runs the margin analysis from the command line and prints a color-coded table.

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use colored::Colorize;
use pricing_desk::catalog::CatalogService;
use pricing_desk::config;
use pricing_desk::pricing::{AnalysisRequest, ProductInput};
use pricing_desk::render::table::{analysis_table, band_legend};
use std::path::Path;

/// Compare products across discount rates
#[derive(Debug, Clone, Parser)]
pub struct AnalyzeArgs {
    /// Manual product as NAME:COST:PRICE[/PRICE...] (repeatable)
    #[arg(short, long)]
    pub item: Vec<String>,

    /// Catalog product by exact name (repeatable)
    #[arg(short, long)]
    pub product: Vec<String>,

    /// Discount percentage: 0-90 in steps of 5 (repeatable)
    #[arg(short, long)]
    pub discount: Vec<u32>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the analyze command
pub async fn execute(config_path: &Path, args: AnalyzeArgs) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let request = build_request(&args)?;

    let catalog = if args.product.is_empty() {
        Default::default()
    } else {
        let service = CatalogService::load(cfg.catalog.clone()).await;
        let snapshot = service.snapshot().await;
        if let Some(err) = &snapshot.load_error {
            eprintln!("{} {}", "Catalog could not be loaded:".red(), err);
        }
        snapshot.catalog
    };

    let report = request.run(&catalog)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", band_legend());
    println!("{}", analysis_table(&report));
    println!(
        "{} {} row(s), discounts: {}",
        "Analysis:".bold(),
        report.rows.len(),
        report
            .discounts
            .iter()
            .map(|d| format!("{}%", d))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}

fn build_request(args: &AnalyzeArgs) -> Result<AnalysisRequest> {
    let mut products = args
        .item
        .iter()
        .map(|spec| parse_item(spec))
        .collect::<Result<Vec<_>>>()?;

    products.extend(args.product.iter().map(|name| ProductInput::Catalog {
        name: name.clone(),
        prices: Vec::new(),
    }));

    if products.is_empty() {
        bail!("Give at least one --item NAME:COST:PRICE or --product NAME");
    }

    Ok(AnalysisRequest {
        products,
        discounts: args.discount.clone(),
    })
}

/// Parse `NAME:COST:PRICE[/PRICE...]`; the name itself may contain `:`
fn parse_item(spec: &str) -> Result<ProductInput> {
    let mut parts = spec.rsplitn(3, ':');
    let (prices, cost, name) = match (parts.next(), parts.next(), parts.next()) {
        (Some(prices), Some(cost), Some(name)) => (prices, cost, name),
        _ => bail!("Invalid --item '{}': expected NAME:COST:PRICE[/PRICE...]", spec),
    };

    let cost = parse_amount(cost).ok_or_else(|| anyhow!("Invalid cost in --item '{}'", spec))?;
    let prices = prices
        .split('/')
        .map(|p| parse_amount(p).ok_or_else(|| anyhow!("Invalid price '{}' in --item '{}'", p, spec)))
        .collect::<Result<Vec<_>>>()?;

    Ok(ProductInput::Manual {
        name: name.to_string(),
        cost: Some(cost),
        prices,
    })
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().replace(',', "").parse().ok()
}
