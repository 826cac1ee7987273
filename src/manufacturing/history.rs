use std::io::Write;

use crate::manufacturing::models::CostRecord;

/// Append-only list of estimates for one session
#[derive(Debug, Clone, Default)]
pub struct CostHistory {
    records: Vec<CostRecord>,
}

impl CostHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: CostRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[CostRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Write the history as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        write_records(&self.records, writer)
    }

    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Serialize records as CSV; the header is written even when there are none
pub fn write_records<W: Write>(records: &[CostRecord], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub const CSV_HEADER: [&str; 12] = [
    "timestamp",
    "item",
    "fabric_price",
    "fabric_yield",
    "fabric_total",
    "lining_price",
    "lining_yield",
    "lining_total",
    "labor",
    "trim",
    "subtotal",
    "final_cost",
];
