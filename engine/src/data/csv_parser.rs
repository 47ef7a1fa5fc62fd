use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use sales_shared::models::SaleRecord;

use crate::error::EngineError;

/// Columns a file must have to be processed at all.
pub const REQUIRED_COLUMNS: [&str; 3] = ["product", "price", "quantity"];
/// Columns copied through to the output. Absent ones are written empty.
pub const PASSTHROUGH_COLUMNS: [&str; 2] = ["date", "region"];

/// A loaded sales export: trimmed headers plus every data row.
#[derive(Debug, Clone)]
pub struct SalesTable {
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl SalesTable {
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a column by exact (already trimmed) name. First match wins.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Required columns this table lacks, in `REQUIRED_COLUMNS` order.
    pub fn missing_required(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|name| self.column(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    /// Pass-through columns this table lacks.
    pub fn missing_passthrough(&self) -> Vec<String> {
        PASSTHROUGH_COLUMNS
            .iter()
            .filter(|name| self.column(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    /// Maps every row to a `SaleRecord`. Fails only on a schema violation.
    pub fn sale_records(&self) -> Result<Vec<SaleRecord>, EngineError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(EngineError::MissingColumns(missing));
        }

        let product = self.column("product");
        let price = self.column("price");
        let quantity = self.column("quantity");
        let date = self.column("date");
        let region = self.column("region");

        Ok(self
            .records
            .iter()
            .map(|record| SaleRecord {
                product: Self::get_field(record, product).to_string(),
                price: Self::get_field(record, price).to_string(),
                quantity: Self::get_field(record, quantity).to_string(),
                date: Self::get_field(record, date).to_string(),
                region: Self::get_field(record, region).to_string(),
            })
            .collect())
    }

    // Short rows and absent columns both read as empty cells.
    fn get_field(record: &StringRecord, pos: Option<usize>) -> &str {
        pos.and_then(|pos| record.get(pos)).unwrap_or("")
    }
}

pub struct SalesCsvParser;

impl SalesCsvParser {
    // Header: product,price,quantity,date,region (any order, names may carry whitespace)
    // Example Row: Pink Morsel,"$1,234.56",2,2024-01-01,north
    pub fn load_table(file_path: &Path) -> Result<SalesTable, EngineError> {
        let file = File::open(file_path)?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers: StringRecord = rdr.headers()?.iter().map(str::trim).collect();

        let mut records = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| {
                EngineError::CsvDataFormatError(format!("Error reading CSV record at line {}: {}", idx + 2, e))
            })?;
            records.push(record);
        }
        Ok(SalesTable { headers, records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_table_valid_data() {
        let csv_content = "\
product,price,quantity,date,region
Pink Morsel,\"$1,234.56\",2,2024-01-01,north
Choc Bar,$5.00,1,2024-01-01,north";
        let tmp_file = create_test_csv(csv_content);
        let table = SalesCsvParser::load_table(tmp_file.path()).unwrap();
        assert_eq!(table.len(), 2);

        let records = table.sale_records().unwrap();
        assert_eq!(records[0].product, "Pink Morsel");
        assert_eq!(records[0].price, "$1,234.56");
        assert_eq!(records[0].quantity, "2");
        assert_eq!(records[0].date, "2024-01-01");
        assert_eq!(records[0].region, "north");
        assert_eq!(records[1].product, "Choc Bar");
    }

    #[test]
    fn test_load_table_trims_header_names() {
        let csv_content = "\
 product , price,quantity ,date, region
Pink Morsel,$3.00,4,2024-02-01,south";
        let tmp_file = create_test_csv(csv_content);
        let table = SalesCsvParser::load_table(tmp_file.path()).unwrap();
        assert_eq!(
            table.headers().iter().collect::<Vec<_>>(),
            vec!["product", "price", "quantity", "date", "region"]
        );
        assert!(table.missing_required().is_empty());

        let records = table.sale_records().unwrap();
        assert_eq!(records[0].region, "south");
    }

    #[test]
    fn test_load_table_empty_file() {
        let tmp_file = create_test_csv("product,price,quantity,date,region");
        let table = SalesCsvParser::load_table(tmp_file.path()).unwrap();
        assert!(table.is_empty());
        assert!(table.sale_records().unwrap().is_empty());
    }

    #[test]
    fn test_missing_required_column() {
        let csv_content = "\
product,price,date,region
Pink Morsel,$3.00,2024-02-01,south";
        let tmp_file = create_test_csv(csv_content);
        let table = SalesCsvParser::load_table(tmp_file.path()).unwrap();
        assert_eq!(table.missing_required(), vec!["quantity".to_string()]);

        let err = table.sale_records().unwrap_err();
        assert!(matches!(err, EngineError::MissingColumns(_)));
        assert!(err.to_string().contains("quantity"));
    }

    #[test]
    fn test_missing_passthrough_column_reads_empty() {
        let csv_content = "\
product,price,quantity,date
Pink Morsel,$3.00,4,2024-02-01";
        let tmp_file = create_test_csv(csv_content);
        let table = SalesCsvParser::load_table(tmp_file.path()).unwrap();
        assert_eq!(table.missing_passthrough(), vec!["region".to_string()]);

        let records = table.sale_records().unwrap();
        assert_eq!(records[0].region, "");
        assert_eq!(records[0].date, "2024-02-01");
    }

    #[test]
    fn test_short_rows_read_as_empty_cells() {
        let csv_content = "\
product,price,quantity,date,region
Pink Morsel,$3.00";
        let tmp_file = create_test_csv(csv_content);
        let records = SalesCsvParser::load_table(tmp_file.path()).unwrap().sale_records().unwrap();
        assert_eq!(records[0].price, "$3.00");
        assert_eq!(records[0].quantity, "");
        assert_eq!(records[0].region, "");
    }

    #[test]
    fn test_duplicate_header_first_wins() {
        let csv_content = "\
product,price,quantity,price
Pink Morsel,1.00,2,9.99";
        let tmp_file = create_test_csv(csv_content);
        let records = SalesCsvParser::load_table(tmp_file.path()).unwrap().sale_records().unwrap();
        assert_eq!(records[0].price, "1.00");
    }

    #[test]
    fn test_load_table_missing_file() {
        let result = SalesCsvParser::load_table(Path::new("/no/such/file.csv"));
        assert!(matches!(result, Err(EngineError::IoError { .. })));
    }

    #[test]
    fn test_load_table_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"product,price,quantity\nPink Morsel,\xff\xfe,1\n").unwrap();
        file.flush().unwrap();
        let result = SalesCsvParser::load_table(file.path());
        assert!(matches!(result, Err(EngineError::CsvDataFormatError(_))));
    }
}
