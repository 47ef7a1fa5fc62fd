// Reading raw sales exports and writing processed files.
pub mod csv_parser;
pub mod csv_writer;
