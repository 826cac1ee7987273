use serde::{Deserialize, Serialize};

use crate::pricing::bands::MarginBand;

/// A product ready for analysis: one cost and one to three list prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub name: String,
    pub cost: f64,
    pub prices: Vec<f64>,
    /// Stored discount (percent), only set for catalog-sourced products
    pub fixed_discount: Option<f64>,
}

/// Fee tier selected by the discount rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeBand {
    /// Inclusive upper bound of the discount rate (0.0..=1.0) for this tier
    pub max_discount_rate: f64,
    pub fee_rate: f64,
}

/// Fee tiers in ascending discount order; anything above the last bound pays
/// `FLOOR_FEE_RATE`.
pub const FEE_BANDS: [FeeBand; 3] = [
    FeeBand { max_discount_rate: 0.09, fee_rate: 0.28 },
    FeeBand { max_discount_rate: 0.19, fee_rate: 0.27 },
    FeeBand { max_discount_rate: 0.29, fee_rate: 0.26 },
];

pub const FLOOR_FEE_RATE: f64 = 0.25;

/// Figures for a single (cost, list price, discount) combination
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScenarioFigures {
    pub fee_rate: f64,
    pub sell_price: f64,
    pub fee: f64,
    pub profit: f64,
    pub margin_pct: f64,
    pub roi_pct: f64,
}

/// One row of the analysis table
#[derive(Debug, Clone, Serialize)]
pub struct PricingScenario {
    pub product: String,
    pub fee_note: String,
    pub discount_pct: f64,
    pub list_price: f64,
    pub cost: f64,
    #[serde(flatten)]
    pub figures: ScenarioFigures,
    pub band: MarginBand,
}

impl PricingScenario {
    pub fn sell_price(&self) -> f64 {
        self.figures.sell_price
    }

    pub fn profit(&self) -> f64 {
        self.figures.profit
    }

    pub fn margin_pct(&self) -> f64 {
        self.figures.margin_pct
    }

    pub fn roi_pct(&self) -> f64 {
        self.figures.roi_pct
    }
}

/// Output of an analysis request
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Discounts actually applied, ascending
    pub discounts: Vec<f64>,
    pub rows: Vec<PricingScenario>,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
