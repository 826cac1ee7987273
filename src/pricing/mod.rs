pub mod bands;
pub mod calculator;
pub mod models;
pub mod request;

pub use bands::MarginBand;
pub use calculator::{analyze, compute_scenario, fee_rate_for};
pub use models::{AnalysisReport, PricingScenario, ProductSpec, ScenarioFigures};
pub use request::{selectable_discounts, AnalysisRequest, ProductInput, ResolvedAnalysis};
