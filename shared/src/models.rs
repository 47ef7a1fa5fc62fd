use serde::Serialize;

use crate::utils::numeric_format::{clean_numeric, format_currency};

/// One input row, as raw text. Cells the row does not carry are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleRecord {
    pub product: String,
    pub price: String,
    pub quantity: String,
    pub date: String,
    pub region: String,
}

impl SaleRecord {
    /// Case- and whitespace-insensitive product match.
    pub fn is_product(&self, target: &str) -> bool {
        self.product.trim().to_lowercase() == target.trim().to_lowercase()
    }
}

/// A retained row after numeric cleanup. `sales` is `None` when either the
/// price or the quantity could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSale {
    pub sales: Option<f64>,
    pub date: String,
    pub region: String,
}

impl ProcessedSale {
    pub fn from_record(record: &SaleRecord) -> Self {
        let price = clean_numeric(&record.price);
        let quantity = clean_numeric(&record.quantity);
        ProcessedSale {
            sales: price.zip(quantity).map(|(p, q)| p * q),
            date: record.date.clone(),
            region: record.region.clone(),
        }
    }

    pub fn to_output_row(&self) -> OutputRow {
        OutputRow {
            sales: format_currency(self.sales),
            date: self.date.clone(),
            region: self.region.clone(),
        }
    }
}

/// Column order of the processed files: `sales,date,region`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub sales: String,
    pub date: String,
    pub region: String,
}

impl OutputRow {
    pub const HEADERS: [&'static str; 3] = ["sales", "date", "region"];
}
