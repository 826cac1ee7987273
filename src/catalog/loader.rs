//! CSV catalog loader.
//!
//! Decodes the file (UTF-8, then EUC-KR/CP949), resolves the header row into a
//! [`ColumnMap`] and coerces numeric cells. Expected columns, in any order and
//! under any of the accepted synonyms: name, cost, price, discount.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::catalog::models::CatalogProduct;
use crate::pricing::request::MAX_DISCOUNT_PCT;

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File is neither UTF-8 nor EUC-KR/CP949 text")]
    Decode,

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: value in column '{column}' must not be negative")]
    NegativeValue { row: usize, column: &'static str },

    #[error("Row {row}: {value} in column '{column}' exceeds the maximum of {max}")]
    OutOfRange {
        row: usize,
        column: &'static str,
        value: f64,
        max: f64,
    },
}

const NAME_HEADERS: &[&str] = &[
    "name", "product", "productname", "product_name", "item", "상품명", "제품명", "품목명",
];
const COST_HEADERS: &[&str] = &["cost", "unitcost", "unit_cost", "원가", "매입가"];
const PRICE_HEADERS: &[&str] = &[
    "price", "listprice", "list_price", "retailprice", "정가", "판매가",
];
const DISCOUNT_HEADERS: &[&str] = &[
    "discount", "discountrate", "discount_rate", "할인율", "할인",
];

/// Column positions of the canonical fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub cost: usize,
    pub price: Option<usize>,
    pub discount: Option<usize>,
}

impl ColumnMap {
    /// Resolve a header row; `name` and `cost` are required
    pub fn from_headers(headers: &StringRecord) -> Result<Self, CatalogError> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let position = |synonyms: &[&str]| {
            normalized
                .iter()
                .position(|h| synonyms.contains(&h.as_str()))
        };

        let name = position(NAME_HEADERS);
        let cost = position(COST_HEADERS);

        match (name, cost) {
            (Some(name), Some(cost)) => Ok(Self {
                name,
                cost,
                price: position(PRICE_HEADERS),
                discount: position(DISCOUNT_HEADERS),
            }),
            _ => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("name".to_string());
                }
                if cost.is_none() {
                    missing.push("cost".to_string());
                }
                Err(CatalogError::MissingColumns { missing })
            }
        }
    }
}

/// Lowercase, drop whitespace and a leading byte-order mark
fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse a numeric cell: `"39,000"`, `"₩39,000"`, `"39000원"`, `"15%"`; blank is 0
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '₩' | '원' | '%'))
        .collect();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decode raw bytes as UTF-8 (BOM stripped), falling back to EUC-KR/CP949
pub fn decode_bytes(bytes: &[u8]) -> Result<Cow<'_, str>, CatalogError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }

    debug!("Catalog is not UTF-8, trying EUC-KR");
    encoding_rs::EUC_KR
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or(CatalogError::Decode)
}

/// Parse catalog rows from a UTF-8 CSV reader
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<CatalogProduct>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

    let mut products = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        // Header is line 1
        let row = idx + 2;

        let name = record.get(columns.name).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }

        products.push(CatalogProduct {
            name: name.to_string(),
            cost: numeric_cell(&record, Some(columns.cost), row, "cost")?,
            price: numeric_cell(&record, columns.price, row, "price")?,
            discount: discount_cell(&record, columns.discount, row)?,
        });
    }

    Ok(products)
}

fn numeric_cell(
    record: &StringRecord,
    column: Option<usize>,
    row: usize,
    label: &'static str,
) -> Result<f64, CatalogError> {
    let raw = column.and_then(|c| record.get(c)).unwrap_or("");
    let value = parse_number(raw).ok_or_else(|| CatalogError::InvalidNumber {
        row,
        column: label,
        value: raw.to_string(),
    })?;
    if value < 0.0 {
        return Err(CatalogError::NegativeValue { row, column: label });
    }
    Ok(value)
}

/// Discounts share the 0-90% range offered for selection
fn discount_cell(
    record: &StringRecord,
    column: Option<usize>,
    row: usize,
) -> Result<f64, CatalogError> {
    let value = numeric_cell(record, column, row, "discount")?;
    let max = f64::from(MAX_DISCOUNT_PCT);
    if value > max {
        return Err(CatalogError::OutOfRange {
            row,
            column: "discount",
            value,
            max,
        });
    }
    Ok(value)
}

/// Parse catalog rows from raw file bytes in any supported encoding
pub fn parse_catalog_bytes(bytes: &[u8]) -> Result<Vec<CatalogProduct>, CatalogError> {
    let text = decode_bytes(bytes)?;
    parse_catalog(text.as_bytes())
}

/// Load the catalog file; a missing file is an empty catalog
pub fn load_catalog_file(path: &Path) -> Result<Vec<CatalogProduct>, CatalogError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Catalog file not found, starting with an empty catalog");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(CatalogError::Io {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    let products = parse_catalog_bytes(&bytes)?;
    info!(path = %path.display(), count = products.len(), "Loaded catalog");
    Ok(products)
}
