// Writes processed sales files with the fixed `sales,date,region` header.
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use csv::WriterBuilder;
use sales_shared::models::{OutputRow, ProcessedSale};

use crate::error::EngineError;

pub struct SalesCsvWriter;

impl SalesCsvWriter {
    /// Writes the header and one row per sale, in the given order. An empty
    /// slice produces a header-only file.
    pub fn write_processed(file_path: &Path, sales: &[ProcessedSale]) -> Result<(), EngineError> {
        let file = File::create(file_path)?;
        // Header is written by hand so that header-only files still get one.
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        wtr.write_record(OutputRow::HEADERS)?;
        for sale in sales {
            wtr.serialize(sale.to_output_row())?;
        }
        wtr.flush()?;
        Ok(())
    }
}
