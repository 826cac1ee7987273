use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::catalog::CatalogProduct;
use crate::manufacturing::CostRecord;
use crate::pricing::{AnalysisReport, MarginBand};
use crate::render::{format_discount, format_pct, format_won};

pub const ANALYSIS_HEADERS: [&str; 9] = [
    "PRODUCT", "FEE", "DISCOUNT", "LIST PRICE", "SELL PRICE", "COST", "PROFIT", "ROI", "MARGIN",
];

/// Terminal color for a margin band
pub fn band_color(band: MarginBand) -> Color {
    match band {
        MarginBand::Excellent => Color::Green,
        MarginBand::Good => Color::Cyan,
        MarginBand::Fair => Color::Yellow,
        MarginBand::Thin => Color::Magenta,
        MarginBand::Loss => Color::Red,
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cells(headers: &[&str]) -> Vec<Cell> {
    headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect()
}

fn amount(value: f64) -> Cell {
    Cell::new(format_won(value)).set_alignment(CellAlignment::Right)
}

/// Analysis rows with the margin column colored by band
pub fn analysis_table(report: &AnalysisReport) -> Table {
    let mut table = new_table();
    table.set_header(header_cells(&ANALYSIS_HEADERS));

    for row in &report.rows {
        let color = band_color(row.band);
        table.add_row(vec![
            Cell::new(&row.product),
            Cell::new(&row.fee_note),
            Cell::new(format_discount(row.discount_pct)).set_alignment(CellAlignment::Right),
            amount(row.list_price),
            amount(row.sell_price()),
            amount(row.cost),
            amount(row.profit()).fg(if row.profit() < 0.0 { Color::Red } else { Color::Reset }),
            Cell::new(format_pct(row.roi_pct())).set_alignment(CellAlignment::Right),
            Cell::new(format_pct(row.margin_pct()))
                .fg(color)
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// One-line legend of the margin bands
pub fn band_legend() -> Table {
    let mut table = new_table();
    table.add_row(
        MarginBand::all()
            .iter()
            .map(|band| Cell::new(band.label()).fg(band_color(*band)))
            .collect::<Vec<_>>(),
    );
    table
}

pub fn catalog_table(products: &[&CatalogProduct]) -> Table {
    let mut table = new_table();
    table.set_header(header_cells(&["#", "PRODUCT", "COST", "LIST PRICE", "DISCOUNT"]));

    for (idx, product) in products.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&product.name),
            amount(product.cost),
            amount(product.price),
            Cell::new(format_discount(product.discount)).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

pub fn cost_record_table(record: &CostRecord) -> Table {
    let mut table = new_table();
    table.set_header(header_cells(&["ITEM", "UNIT PRICE", "YIELD", "AMOUNT"]));

    table.add_row(vec![
        Cell::new("Fabric"),
        amount(record.fabric_price),
        Cell::new(format!("{:.1} yd", record.fabric_yield)),
        amount(record.fabric_total),
    ]);
    table.add_row(vec![
        Cell::new("Lining"),
        amount(record.lining_price),
        Cell::new(format!("{:.1} yd", record.lining_yield)),
        amount(record.lining_total),
    ]);
    table.add_row(vec![Cell::new("Labor"), Cell::new(""), Cell::new(""), amount(record.labor)]);
    table.add_row(vec![Cell::new("Trim"), Cell::new(""), Cell::new(""), amount(record.trim)]);
    table.add_row(vec![
        Cell::new("Subtotal").fg(Color::Cyan),
        Cell::new(""),
        Cell::new(""),
        amount(record.subtotal),
    ]);
    table.add_row(vec![
        Cell::new("Factory price (VAT)").fg(Color::Green),
        Cell::new(""),
        Cell::new(""),
        amount(record.final_cost).fg(Color::Green),
    ]);

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{analyze, ProductSpec};

    #[test]
    fn test_analysis_table_has_one_row_per_scenario() {
        let products = vec![ProductSpec {
            name: "Shirt".to_string(),
            cost: 18000.0,
            prices: vec![39000.0],
            fixed_discount: None,
        }];
        let report = analyze(&products, &[0.0, 30.0]);
        let table = analysis_table(&report);
        assert_eq!(table.row_iter().count(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("39,000"));
        assert!(rendered.contains("27,300"));
        assert!(rendered.contains("25.85%"));
        assert!(rendered.contains("Fee 25%"));
    }

    #[test]
    fn test_band_colors_are_distinct() {
        let colors: Vec<Color> = MarginBand::all().iter().map(|b| band_color(*b)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
