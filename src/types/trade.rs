//! Trade-related types for the MT4 watchers
//!
//! This module defines the typed CSV row read from an account export and the
//! normalized trade record sent to the upload API.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use super::time_format;

/// Trade type column of an account export
///
/// `Buy` and `Sell` are positions. `Unknown` is what the terminal writes for
/// balance operations (deposits, withdrawals, credits), which become transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    Buy,
    Sell,
    Unknown,
}

impl FromStr for TradeType {
    type Err = String;

    /// Case-insensitive; anything but buy, sell or unknown is rejected
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_lowercase().as_str() {
            "buy" => Ok(TradeType::Buy),
            "sell" => Ok(TradeType::Sell),
            "unknown" => Ok(TradeType::Unknown),
            _ => Err(token.to_string()),
        }
    }
}

/// Trading platform tag carried by every uploaded trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TradePlatform {
    #[serde(rename = "METATRADER4")]
    MetaTrader4,
}

/// One typed row of an account export
///
/// Produced by `io::csv_format::convert_csv_record`. All columns are required;
/// only the comment may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRow {
    /// Ticket number as written by the terminal
    pub ticket: String,
    pub open_time: NaiveDateTime,
    pub trade_type: TradeType,
    pub lots: Decimal,
    pub symbol: String,
    pub open_price: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub close_time: NaiveDateTime,
    pub close_price: Decimal,
    pub net_profit: Decimal,
    /// Free-text comment, source of the transaction name
    pub comment: String,
}

/// Normalized trade record
///
/// Field names are snake_case here; the uploader rewrites every key to
/// lowerCamelCase before sending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    pub trade_id: String,
    pub trade_platform: TradePlatform,
    pub product: String,
    pub trade_type: TradeType,
    #[serde(with = "time_format")]
    pub trade_open_time: NaiveDateTime,
    pub lot_size: Decimal,
    pub open_price: Decimal,
    pub net_profit: Option<Decimal>,
    pub close_price: Option<Decimal>,
    #[serde(serialize_with = "time_format::option::serialize")]
    pub trade_close_time: Option<NaiveDateTime>,
    pub stop_loss: Option<Decimal>,
    pub take_profit: Option<Decimal>,
}
