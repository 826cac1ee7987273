use serde::{Deserialize, Serialize};

/// Raw form input for a garment cost estimate; amounts in KRW, yields in yards
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CostInput {
    #[serde(default)]
    pub item: String,
    pub fabric_price: Option<f64>,
    pub fabric_yield: Option<f64>,
    #[serde(default)]
    pub lining_price: Option<f64>,
    #[serde(default)]
    pub lining_yield: Option<f64>,
    /// Sewing + cutting
    #[serde(default)]
    pub labor: Option<f64>,
    /// Trims and other materials
    #[serde(default)]
    pub trim: Option<f64>,
}

/// A computed estimate as kept in the session history
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CostRecord {
    pub timestamp: String,
    #[serde(default)]
    pub item: String,
    pub fabric_price: f64,
    pub fabric_yield: f64,
    pub fabric_total: f64,
    pub lining_price: f64,
    pub lining_yield: f64,
    pub lining_total: f64,
    pub labor: f64,
    pub trim: f64,
    pub subtotal: f64,
    /// Subtotal with VAT, rounded to the won
    pub final_cost: f64,
}
