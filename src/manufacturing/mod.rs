//! Garment manufacturing cost estimator
//!
//! Material (fabric + lining) cost, labor and trims rolled up into a
//! VAT-inclusive factory price, with a per-session history that can be
//! exported as CSV.

pub mod calculator;
pub mod history;
pub mod models;

pub use calculator::estimate;
pub use history::CostHistory;
pub use models::{CostInput, CostRecord};
