//! Presentation of analysis results and estimates
//!
//! `table` renders for the terminal (comfy-table), `html` for the web page.

pub mod html;
pub mod table;

/// Format an amount in won with thousands separators, e.g. `39,000`
pub fn format_won(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Two-decimal percentage, e.g. `25.85%`
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Discount percentage without a trailing `.0` for whole numbers
pub fn format_discount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}%", value)
    } else {
        format!("{}%", value)
    }
}
