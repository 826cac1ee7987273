use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use pricing_desk::config;
use pricing_desk::manufacturing::{estimate, history::write_records, CostInput};
use pricing_desk::render::format_won;
use pricing_desk::render::table::cost_record_table;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Garment cost inputs; amounts in KRW, yields in yards
#[derive(Debug, Clone, Parser)]
pub struct CostArgs {
    /// Item name
    #[arg(short, long)]
    pub item: String,

    /// Fabric unit price per yard
    #[arg(long)]
    pub fabric_price: f64,

    /// Fabric yield in yards
    #[arg(long)]
    pub fabric_yield: f64,

    /// Lining unit price per yard
    #[arg(long)]
    pub lining_price: Option<f64>,

    /// Lining yield in yards
    #[arg(long)]
    pub lining_yield: Option<f64>,

    /// Sewing and cutting
    #[arg(long)]
    pub labor: Option<f64>,

    /// Trims and other materials
    #[arg(long)]
    pub trim: Option<f64>,

    /// Write the record to a CSV file
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

impl From<&CostArgs> for CostInput {
    fn from(args: &CostArgs) -> Self {
        Self {
            item: args.item.clone(),
            fabric_price: Some(args.fabric_price),
            fabric_yield: Some(args.fabric_yield),
            lining_price: args.lining_price,
            lining_yield: args.lining_yield,
            labor: args.labor,
            trim: args.trim,
        }
    }
}

/// Execute the cost command
pub fn execute(config_path: &Path, args: CostArgs) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let record = estimate(&CostInput::from(&args), cfg.manufacturing.vat_rate, Local::now())?;

    println!("{} {}", "Item:".bold(), record.item);
    println!("{}", cost_record_table(&record));
    println!(
        "{} {} won (VAT {:.0}% included)",
        "Factory price:".green().bold(),
        format_won(record.final_cost),
        cfg.manufacturing.vat_rate * 100.0
    );

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_records(std::slice::from_ref(&record), file)?;
        info!(path = %path.display(), "Cost record exported");
        println!("{} {}", "✓ Exported to".green(), path.display());
    }

    Ok(())
}
