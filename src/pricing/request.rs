use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::pricing::calculator::analyze;
use crate::pricing::models::{AnalysisReport, ProductSpec};

pub const MAX_PRODUCTS: usize = 3;
pub const MAX_PRICES: usize = 3;
pub const MAX_DISCOUNT_PCT: u32 = 90;
pub const DISCOUNT_STEP: u32 = 5;

/// How a product enters an analysis
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ProductInput {
    /// Typed in by the user
    Manual {
        #[serde(default)]
        name: String,
        cost: Option<f64>,
        #[serde(default)]
        prices: Vec<f64>,
    },
    /// Picked from the catalog; `prices` overrides the stored list price
    Catalog {
        name: String,
        #[serde(default)]
        prices: Vec<f64>,
    },
}

/// Products plus the discount percentages the user ticked
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisRequest {
    pub products: Vec<ProductInput>,
    #[serde(default)]
    pub discounts: Vec<u32>,
}

/// Validated input for the pricing engine
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAnalysis {
    pub products: Vec<ProductSpec>,
    pub discounts: Vec<f64>,
}

/// Discount percentages offered for selection: 0, 5, ..., 90
pub fn selectable_discounts() -> Vec<u32> {
    (0..=MAX_DISCOUNT_PCT).step_by(DISCOUNT_STEP as usize).collect()
}

impl AnalysisRequest {
    /// Validate the request and look up catalog products
    pub fn resolve(&self, catalog: &Catalog) -> Result<ResolvedAnalysis, AppError> {
        if self.products.is_empty() {
            return Err(AppError::Validation(
                "Select or enter at least one product".to_string(),
            ));
        }
        if self.products.len() > MAX_PRODUCTS {
            return Err(AppError::Validation(format!(
                "At most {} products can be compared at once",
                MAX_PRODUCTS
            )));
        }

        for &discount in &self.discounts {
            if discount > MAX_DISCOUNT_PCT || discount % DISCOUNT_STEP != 0 {
                return Err(AppError::Validation(format!(
                    "Discount {}% is not one of 0-{}% in steps of {}",
                    discount, MAX_DISCOUNT_PCT, DISCOUNT_STEP
                )));
            }
        }

        let products = self
            .products
            .iter()
            .enumerate()
            .map(|(idx, input)| resolve_product(idx, input, catalog))
            .collect::<Result<Vec<_>, _>>()?;

        let mut discounts: Vec<f64> = self.discounts.iter().map(|&d| d as f64).collect();
        discounts.extend(products.iter().filter_map(|p| p.fixed_discount));
        discounts.sort_by(|a, b| a.total_cmp(b));
        discounts.dedup();
        if discounts.is_empty() {
            discounts.push(0.0);
        }

        debug!(
            products = products.len(),
            discounts = ?discounts,
            "Analysis request resolved"
        );

        Ok(ResolvedAnalysis {
            products,
            discounts,
        })
    }

    /// Resolve and compute in one step
    pub fn run(&self, catalog: &Catalog) -> Result<AnalysisReport, AppError> {
        let resolved = self.resolve(catalog)?;
        Ok(analyze(&resolved.products, &resolved.discounts))
    }
}

fn resolve_product(
    idx: usize,
    input: &ProductInput,
    catalog: &Catalog,
) -> Result<ProductSpec, AppError> {
    match input {
        ProductInput::Manual { name, cost, prices } => {
            let cost = cost.ok_or_else(|| {
                AppError::Validation(format!("Product {}: enter cost and price", idx + 1))
            })?;
            if prices.is_empty() {
                return Err(AppError::Validation(format!(
                    "Product {}: enter cost and price",
                    idx + 1
                )));
            }
            check_prices(idx, prices)?;
            check_amount(idx, "cost", cost)?;

            let name = name.trim();
            Ok(ProductSpec {
                name: if name.is_empty() {
                    format!("Product {}", idx + 1)
                } else {
                    name.to_string()
                },
                cost,
                prices: prices.clone(),
                fixed_discount: None,
            })
        }
        ProductInput::Catalog { name, prices } => {
            let product = catalog.find(name).ok_or_else(|| {
                AppError::Validation(format!("Product '{}' is not in the catalog", name))
            })?;
            check_prices(idx, prices)?;
            if !(0.0..=f64::from(MAX_DISCOUNT_PCT)).contains(&product.discount) {
                return Err(AppError::Validation(format!(
                    "Product '{}': stored discount {}% is outside 0-{}%",
                    name, product.discount, MAX_DISCOUNT_PCT
                )));
            }

            Ok(ProductSpec {
                name: product.name.clone(),
                cost: product.cost,
                prices: if prices.is_empty() {
                    vec![product.price]
                } else {
                    prices.clone()
                },
                fixed_discount: Some(product.discount),
            })
        }
    }
}

fn check_prices(idx: usize, prices: &[f64]) -> Result<(), AppError> {
    if prices.len() > MAX_PRICES {
        return Err(AppError::Validation(format!(
            "Product {}: at most {} list prices",
            idx + 1,
            MAX_PRICES
        )));
    }
    prices
        .iter()
        .try_for_each(|&price| check_amount(idx, "price", price))
}

fn check_amount(idx: usize, field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!(
            "Product {}: {} must be a non-negative number",
            idx + 1,
            field
        )));
    }
    Ok(())
}
