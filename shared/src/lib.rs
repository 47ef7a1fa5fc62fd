pub mod models;
pub mod utils;

pub use models::{OutputRow, ProcessedSale, SaleRecord};
pub use utils::numeric_format::{clean_numeric, format_currency};
