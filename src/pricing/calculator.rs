use crate::pricing::bands::MarginBand;
use crate::pricing::models::{
    AnalysisReport, PricingScenario, ProductSpec, ScenarioFigures, FEE_BANDS, FLOOR_FEE_RATE,
};
use tracing::debug;

/// Platform fee rate for a discount rate in `0.0..=1.0`
///
/// Band bounds are inclusive, so a 30% discount already pays the floor rate.
pub fn fee_rate_for(discount_rate: f64) -> f64 {
    FEE_BANDS
        .iter()
        .find(|band| discount_rate <= band.max_discount_rate)
        .map(|band| band.fee_rate)
        .unwrap_or(FLOOR_FEE_RATE)
}

/// Label shown next to each row, e.g. `Fee 28%`
pub fn fee_note(fee_rate: f64) -> String {
    format!("Fee {}%", (fee_rate * 100.0).round() as i64)
}

/// Compute sell price, fee, profit, margin and ROI
///
/// Margin is 0 when the sell price is 0 and ROI is 0 when the cost is 0.
pub fn compute_scenario(cost: f64, list_price: f64, discount_pct: f64) -> ScenarioFigures {
    let discount_rate = discount_pct / 100.0;
    let fee_rate = fee_rate_for(discount_rate);

    let sell_price = list_price * (1.0 - discount_rate);
    let fee = sell_price * fee_rate;
    let profit = sell_price - cost - fee;

    let margin_pct = if sell_price > 0.0 {
        profit / sell_price * 100.0
    } else {
        0.0
    };
    let roi_pct = if cost > 0.0 { profit / cost * 100.0 } else { 0.0 };

    ScenarioFigures {
        fee_rate,
        sell_price,
        fee,
        profit,
        margin_pct,
        roi_pct,
    }
}

/// Build every {product × list price × discount} row
pub fn analyze(products: &[ProductSpec], discounts: &[f64]) -> AnalysisReport {
    let mut rows = Vec::with_capacity(
        products.iter().map(|p| p.prices.len()).sum::<usize>() * discounts.len(),
    );

    for product in products {
        for &list_price in &product.prices {
            for &discount_pct in discounts {
                let figures = compute_scenario(product.cost, list_price, discount_pct);
                rows.push(PricingScenario {
                    product: product.name.clone(),
                    fee_note: fee_note(figures.fee_rate),
                    discount_pct,
                    list_price,
                    cost: product.cost,
                    band: MarginBand::classify(figures.margin_pct),
                    figures,
                });
            }
        }
    }

    debug!(
        products = products.len(),
        discounts = discounts.len(),
        rows = rows.len(),
        "Pricing analysis computed"
    );

    AnalysisReport {
        discounts: discounts.to_vec(),
        rows,
    }
}
