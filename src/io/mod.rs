//! I/O module
//!
//! Handles everything that touches the filesystem or file formats.
//!
//! # Components
//!
//! - `filename` - File name validation and field extraction
//! - `csv_format` - CSV format handling (record conversion)
//! - `account_reader` - Account export reader with iterator interface
//! - `archive` - Moving handled files and sweeping old ones

pub mod account_reader;
pub mod archive;
pub mod csv_format;
pub mod filename;

pub use account_reader::{read_account_rows, AccountReader};
pub use archive::{archive, move_to, sweep, Disposition};
pub use csv_format::{convert_csv_record, CsvRecord};
pub use filename::{parse_account_file_name, parse_market_file_name, AccountFileName, MarketFileName};
