use chrono::{DateTime, Local};

use crate::error::AppError;
use crate::manufacturing::models::{CostInput, CostRecord};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Turn a cost input into a record
///
/// fabric and lining totals are unit price × yield; the factory price is
/// `(fabric + lining + labor + trim) × (1 + vat_rate)` rounded to the won.
pub fn estimate(
    input: &CostInput,
    vat_rate: f64,
    at: DateTime<Local>,
) -> Result<CostRecord, AppError> {
    let item = input.item.trim();
    if item.is_empty() {
        return Err(AppError::Validation("Enter an item name".to_string()));
    }

    let fabric_price = required(input.fabric_price, "fabric price")?;
    let fabric_yield = required(input.fabric_yield, "fabric yield")?;
    let lining_price = optional(input.lining_price, "lining price")?;
    let lining_yield = optional(input.lining_yield, "lining yield")?;
    let labor = optional(input.labor, "labor")?;
    let trim = optional(input.trim, "trim")?;

    let fabric_total = fabric_price * fabric_yield;
    let lining_total = lining_price * lining_yield;
    let subtotal = fabric_total + lining_total + labor + trim;
    let final_cost = (subtotal * (1.0 + vat_rate)).round();

    Ok(CostRecord {
        timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        item: item.to_string(),
        fabric_price,
        fabric_yield,
        fabric_total,
        lining_price,
        lining_yield,
        lining_total,
        labor,
        trim,
        subtotal,
        final_cost,
    })
}

fn required(value: Option<f64>, field: &str) -> Result<f64, AppError> {
    let value = value.ok_or_else(|| AppError::Validation(format!("Enter the {}", field)))?;
    non_negative(value, field)
}

fn optional(value: Option<f64>, field: &str) -> Result<f64, AppError> {
    non_negative(value.unwrap_or(0.0), field)
}

fn non_negative(value: f64, field: &str) -> Result<f64, AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!(
            "The {} must be a non-negative number",
            field
        )));
    }
    Ok(value)
}
