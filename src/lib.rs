//! MT4 Watcher Library
//! # Overview
//!
//! This library watches the directory a MetaTrader 4 terminal exports csv files
//! into and forwards each new file to an HTTP API.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (AccountRow, Trade, Transaction, etc.)
//! - [`config`] - YAML configuration
//! - [`cli`] - CLI arguments parsing
//! - [`io`] - File name validation, csv reading and archival
//! - [`core`] - Row classification and JSON key conversion
//! - [`upload`] - The `Uploader` seam and its HTTP client
//! - [`handler`] - Per-category file handlers
//! - [`watcher`] - Directory observation and file lifecycle
//! - [`health`] - Periodic liveness pings
//!
//! # File Categories
//!
//! - **Account exports** (`AccountTradingData_<account>.csv`): parsed row by
//!   row; `buy`/`sell` rows become trades, `unknown` rows become deposits or
//!   withdrawals, and the result is posted as camelCase JSON.
//! - **Market exports** (`MarketData_<symbol>_<date>_<time>_<interval>.csv`):
//!   uploaded unchanged as multipart form data.
//!
//! # File Lifecycle
//!
//! Every csv file that appears in the watch directory ends in `processed` if
//! the API answered 200, or in `failed` otherwise. After each move, files in
//! that subdirectory older than the cleanup threshold are deleted.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod handler;
pub mod health;
pub mod io;
pub mod types;
pub mod upload;
pub mod watcher;

pub use config::WatchConfig;
pub use handler::{create_handler, FileHandler, WatcherKind};
pub use health::HealthPinger;
pub use types::{
    AccountRow, AccountUploadRequest, Trade, TradeType, Transaction, TransactionType, WatcherError,
};
pub use upload::{ApiClient, Uploader};
pub use watcher::DirectoryWatcher;
