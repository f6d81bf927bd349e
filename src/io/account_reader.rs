//! Account export reader with iterator interface
//!
//! Provides a streaming iterator over typed rows of an account export.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The AccountReader uses csv::Reader configured for semicolon-delimited input
//! with a header row. Each record is deserialized by header name into a
//! `CsvRecord` and converted with `convert_csv_record`.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, unreadable header, missing columns) are
//!   returned from `open()`
//! - Row errors are yielded as Err variants carrying the CSV line number
//! - `read_account_rows` stops at the first Err: one bad row rejects the file
//!
//! ```no_run
//! use mt4_watcher::io::account_reader::read_account_rows;
//! use std::path::Path;
//!
//! match read_account_rows(Path::new("AccountTradingData_12345.csv")) {
//!     Ok(rows) => println!("{} rows", rows.len()),
//!     Err(e) => eprintln!("Rejected: {}", e),
//! }
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord, ACCOUNT_HEADER, DELIMITER, OPTIONAL_COLUMN};
use crate::types::{AccountRow, WatcherError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Account export reader
///
/// Yields one `Result<AccountRow, WatcherError>` per data line, in file order.
#[derive(Debug)]
pub struct AccountReader<R: Read = File> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    record: StringRecord,
}

impl AccountReader<File> {
    /// Open an account export from a file path
    ///
    /// # Returns
    ///
    /// * `Ok(AccountReader)` if the file opened and its header was read
    /// * `Err(WatcherError::Io)` if the file could not be opened
    /// * `Err(WatcherError::Parse)` if the header lacks a required column
    pub fn open(path: &Path) -> Result<Self, WatcherError> {
        let file = File::open(path).map_err(|e| WatcherError::Io {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> AccountReader<R> {
    /// Create a reader over any byte source
    ///
    /// The CSV reader is configured to:
    /// - Split on `;`
    /// - Trim whitespace from all fields
    /// - Allow a missing trailing Comment column
    ///
    /// Every column except Comment must be named in the header row.
    pub fn from_reader(source: R) -> Result<Self, WatcherError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        check_header(&headers)?;

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
        })
    }
}

impl<R: Read> Iterator for AccountReader<R> {
    type Item = Result<AccountRow, WatcherError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                // Short rows leave trailing columns empty
                while self.record.len() < self.headers.len() {
                    self.record.push_field("");
                }
                let line = self.record.position().map(|pos| pos.line()).unwrap_or(0);
                let row = self
                    .record
                    .deserialize::<CsvRecord>(Some(&self.headers))
                    .map_err(WatcherError::from)
                    .and_then(convert_csv_record)
                    .map_err(|e| e.at_line(line));
                Some(row)
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

fn check_header(headers: &StringRecord) -> Result<(), WatcherError> {
    let missing: Vec<&str> = ACCOUNT_HEADER
        .iter()
        .copied()
        .filter(|column| *column != OPTIONAL_COLUMN)
        .filter(|column| !headers.iter().any(|name| name == *column))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(WatcherError::Parse {
        line: Some(1),
        message: format!("Missing column(s): {}", missing.join(", ")),
    })
}

/// Read every row of an account export
///
/// Returns the rows in file order, or the first error encountered.
pub fn read_account_rows(path: &Path) -> Result<Vec<AccountRow>, WatcherError> {
    AccountReader::open(path)?.collect()
}
