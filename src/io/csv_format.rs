//! CSV format handling for account exports
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to typed account rows
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::time_format::parse_csv_timestamp;
use crate::types::{AccountRow, TradeType, WatcherError};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Field delimiter used by terminal exports
pub const DELIMITER: u8 = b';';

/// Header row of an account export, in column order
pub const ACCOUNT_HEADER: [&str; 12] = [
    "Ticket",
    "Open Time",
    "Type",
    "Lots",
    "Symbol",
    "Open Price",
    "Stop Loss",
    "Take Profit",
    "Close Time",
    "Close Price",
    "Net Profit",
    "Comment",
];

/// The only column an export may leave out
pub const OPTIONAL_COLUMN: &str = "Comment";

/// CSV record structure for deserialization
///
/// Matches the account export columns by header name. Every cell is kept as a
/// string so conversion errors can name the column and the raw value.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "Ticket")]
    pub ticket: String,
    #[serde(rename = "Open Time")]
    pub open_time: String,
    #[serde(rename = "Type")]
    pub trade_type: String,
    #[serde(rename = "Lots")]
    pub lots: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Open Price")]
    pub open_price: String,
    #[serde(rename = "Stop Loss")]
    pub stop_loss: String,
    #[serde(rename = "Take Profit")]
    pub take_profit: String,
    #[serde(rename = "Close Time")]
    pub close_time: String,
    #[serde(rename = "Close Price")]
    pub close_price: String,
    #[serde(rename = "Net Profit")]
    pub net_profit: String,
    #[serde(rename = "Comment", default)]
    pub comment: String,
}

/// Convert a CsvRecord to an AccountRow
///
/// This function:
/// - Parses the Type column into a TradeType (case-insensitive)
/// - Parses both timestamps with the `YYYY.MM.DD HH:MM:SS` format
/// - Parses every numeric column into a Decimal
///
/// Any failure rejects the row, and callers reject the whole file.
///
/// # Returns
///
/// * `Ok(AccountRow)` - Successfully converted row
/// * `Err(WatcherError)` - The first column that failed to convert (without line number)
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<AccountRow, WatcherError> {
    let trade_type = TradeType::from_str(&csv_record.trade_type)
        .map_err(|token| WatcherError::invalid_trade_type(&token, None))?;

    Ok(AccountRow {
        open_time: parse_timestamp(&csv_record.open_time)?,
        trade_type,
        lots: parse_decimal("Lots", &csv_record.lots)?,
        open_price: parse_decimal("Open Price", &csv_record.open_price)?,
        stop_loss: parse_decimal("Stop Loss", &csv_record.stop_loss)?,
        take_profit: parse_decimal("Take Profit", &csv_record.take_profit)?,
        close_time: parse_timestamp(&csv_record.close_time)?,
        close_price: parse_decimal("Close Price", &csv_record.close_price)?,
        net_profit: parse_decimal("Net Profit", &csv_record.net_profit)?,
        ticket: csv_record.ticket,
        symbol: csv_record.symbol,
        comment: csv_record.comment,
    })
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, WatcherError> {
    parse_csv_timestamp(value).ok_or_else(|| WatcherError::invalid_timestamp(value, None))
}

// Accepts plain and scientific notation; empty cells are an error
fn parse_decimal(field: &str, value: &str) -> Result<Decimal, WatcherError> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| WatcherError::invalid_number(field, value, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(trade_type: &str) -> CsvRecord {
        CsvRecord {
            ticket: "1001".to_string(),
            open_time: "2024.01.02 10:00:00".to_string(),
            trade_type: trade_type.to_string(),
            lots: "0.10".to_string(),
            symbol: "EURUSD".to_string(),
            open_price: "1.08500".to_string(),
            stop_loss: "1.08000".to_string(),
            take_profit: "1.09000".to_string(),
            close_time: "2024.01.02 12:30:00".to_string(),
            close_price: "1.08750".to_string(),
            net_profit: "25.00".to_string(),
            comment: "".to_string(),
        }
    }

    #[rstest]
    #[case("buy", TradeType::Buy)]
    #[case("Sell", TradeType::Sell)]
    #[case("UNKNOWN", TradeType::Unknown)] // case insensitive
    fn test_convert_csv_record_valid(#[case] trade_type: &str, #[case] expected: TradeType) {
        let row = convert_csv_record(record(trade_type)).unwrap();

        assert_eq!(row.trade_type, expected);
        assert_eq!(row.ticket, "1001");
        assert_eq!(row.symbol, "EURUSD");
        assert_eq!(row.lots, Decimal::new(10, 2));
        assert_eq!(row.net_profit, Decimal::new(2500, 2));
        assert_eq!(
            row.close_time,
            parse_csv_timestamp("2024.01.02 12:30:00").unwrap()
        );
    }

    #[test]
    fn test_convert_csv_record_negative_and_scientific_numbers() {
        let mut csv_record = record("unknown");
        csv_record.net_profit = "-150.5".to_string();
        csv_record.lots = "1e-2".to_string();

        let row = convert_csv_record(csv_record).unwrap();
        assert_eq!(row.net_profit, Decimal::new(-1505, 1));
        assert_eq!(row.lots, Decimal::new(1, 2));
    }

    #[rstest]
    #[case::invalid_type(
        CsvRecord { trade_type: "balance".to_string(), ..record("buy") },
        WatcherError::invalid_trade_type("balance", None)
    )]
    #[case::bad_open_time(
        CsvRecord { open_time: "2024-01-02 10:00:00".to_string(), ..record("buy") },
        WatcherError::invalid_timestamp("2024-01-02 10:00:00", None)
    )]
    #[case::bad_close_time(
        CsvRecord { close_time: "".to_string(), ..record("buy") },
        WatcherError::invalid_timestamp("", None)
    )]
    #[case::bad_lots(
        CsvRecord { lots: "lots".to_string(), ..record("buy") },
        WatcherError::invalid_number("Lots", "lots", None)
    )]
    #[case::empty_net_profit(
        CsvRecord { net_profit: "  ".to_string(), ..record("sell") },
        WatcherError::invalid_number("Net Profit", "  ", None)
    )]
    fn test_convert_csv_record_errors(#[case] csv_record: CsvRecord, #[case] expected: WatcherError) {
        assert_eq!(convert_csv_record(csv_record), Err(expected));
    }
}
