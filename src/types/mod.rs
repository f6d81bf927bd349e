//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `trade`: Typed CSV rows and trade records
//! - `transaction`: Deposit/withdrawal records
//! - `account`: The account upload request
//! - `time_format`: Timestamp formats for CSV input and JSON output
//! - `error`: Error types for the watchers

pub mod account;
pub mod error;
pub mod time_format;
pub mod trade;
pub mod transaction;

pub use account::AccountUploadRequest;
pub use error::WatcherError;
pub use trade::{AccountRow, Trade, TradePlatform, TradeType};
pub use transaction::{Transaction, TransactionStatus, TransactionType};
