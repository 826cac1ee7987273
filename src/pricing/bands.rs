use serde::Serialize;

/// Display category for a margin percentage
///
/// Bands are half-open with the lower bound inclusive, except that exactly 35
/// still counts as `Good`:
/// `> 35`, `31..=35`, `25..31`, `20..25`, `< 20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginBand {
    Excellent,
    Good,
    Fair,
    Thin,
    Loss,
}

impl MarginBand {
    pub fn classify(margin_pct: f64) -> Self {
        if margin_pct > 35.0 {
            Self::Excellent
        } else if margin_pct >= 31.0 {
            Self::Good
        } else if margin_pct >= 25.0 {
            Self::Fair
        } else if margin_pct >= 20.0 {
            Self::Thin
        } else {
            Self::Loss
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "> 35%",
            Self::Good => "31-35%",
            Self::Fair => "25-31%",
            Self::Thin => "20-25%",
            Self::Loss => "< 20%",
        }
    }

    /// (foreground, background) CSS colors
    pub fn css_colors(&self) -> (&'static str, &'static str) {
        match self {
            Self::Excellent => ("#1b5e20", "#c8e6c9"),
            Self::Good => ("#0d47a1", "#bbdefb"),
            Self::Fair => ("#795548", "#fff9c4"),
            Self::Thin => ("#e65100", "#ffe0b2"),
            Self::Loss => ("#b71c1c", "#ffcdd2"),
        }
    }

    pub fn all() -> [MarginBand; 5] {
        [
            Self::Excellent,
            Self::Good,
            Self::Fair,
            Self::Thin,
            Self::Loss,
        ]
    }
}
