//! Error types for the MT4 watchers
//!
//! This module defines all error types that can occur while a watched file moves
//! through validation, parsing and upload. Errors carry enough context (file name,
//! line number, status code, response body) to diagnose a failed file by reading
//! the log alone.
//!
//! # Error Categories
//!
//! - **Validation Errors**: File name does not match the expected pattern
//! - **Parse Errors**: Malformed CSV, unknown type token, bad timestamp or number
//! - **Transport Errors**: Non-200 responses, network failures, timeouts
//! - **File I/O Errors**: Move, sweep and read failures
//! - **Configuration Errors**: Missing or malformed settings

use thiserror::Error;

/// Main error type for the watchers
///
/// Every failure that routes a file to `failed` (or stops a process at startup)
/// is one of these variants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WatcherError {
    /// Configuration could not be loaded or is incomplete
    ///
    /// Fatal at startup, never raised while a watcher is running.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// File name does not follow the expected naming convention
    #[error("Invalid file name format: {name} (expected {expected})")]
    InvalidFileName {
        /// The offending file name
        name: String,
        /// Human readable description of the expected shape
        expected: String,
    },

    /// I/O error occurred while reading, moving or deleting files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV structure could not be read
    ///
    /// The whole file is rejected.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The Type column held something other than buy, sell or unknown
    #[error("Invalid trade type '{token}'{}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidTradeType {
        /// The unrecognized token
        token: String,
        /// Line number (if available)
        line: Option<u64>,
    },

    /// A timestamp column did not match `YYYY.MM.DD HH:MM:SS`
    #[error("Invalid timestamp '{value}'{}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidTimestamp {
        /// The raw timestamp string
        value: String,
        /// Line number (if available)
        line: Option<u64>,
    },

    /// A numeric column could not be parsed
    #[error("Invalid number '{value}' in column {field}{}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidNumber {
        /// Column name
        field: String,
        /// The raw cell value
        value: String,
        /// Line number (if available)
        line: Option<u64>,
    },

    /// The API answered with something other than HTTP 200
    #[error("Upload rejected with status {status}: {body}")]
    UploadRejected {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },

    /// The request never produced a response (connect failure, timeout, ...)
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },
}

// Conversion from io::Error to WatcherError
impl From<std::io::Error> for WatcherError {
    fn from(error: std::io::Error) -> Self {
        WatcherError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to WatcherError
impl From<csv::Error> for WatcherError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        WatcherError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for WatcherError {
    fn from(error: serde_json::Error) -> Self {
        WatcherError::Parse {
            line: None,
            message: format!("JSON serialization failed: {}", error),
        }
    }
}

impl From<serde_yaml::Error> for WatcherError {
    fn from(error: serde_yaml::Error) -> Self {
        WatcherError::Config {
            message: error.to_string(),
        }
    }
}

impl From<reqwest::Error> for WatcherError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("request timed out: {}", error)
        } else {
            error.to_string()
        };
        WatcherError::Transport { message }
    }
}

// Helper functions for creating common errors

impl WatcherError {
    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        WatcherError::Config {
            message: message.into(),
        }
    }

    /// Create an InvalidFileName error
    pub fn invalid_file_name(name: &str, expected: &str) -> Self {
        WatcherError::InvalidFileName {
            name: name.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Create an InvalidTradeType error
    pub fn invalid_trade_type(token: &str, line: Option<u64>) -> Self {
        WatcherError::InvalidTradeType {
            token: token.to_string(),
            line,
        }
    }

    /// Create an InvalidTimestamp error
    pub fn invalid_timestamp(value: &str, line: Option<u64>) -> Self {
        WatcherError::InvalidTimestamp {
            value: value.to_string(),
            line,
        }
    }

    /// Create an InvalidNumber error
    pub fn invalid_number(field: &str, value: &str, line: Option<u64>) -> Self {
        WatcherError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
            line,
        }
    }

    /// Create an UploadRejected error
    pub fn upload_rejected(status: u16, body: &str) -> Self {
        WatcherError::UploadRejected {
            status,
            body: body.to_string(),
        }
    }

    /// Attach a line number to row-level errors that don't carry one yet
    pub fn at_line(self, line: u64) -> Self {
        match self {
            WatcherError::Parse { line: None, message } => WatcherError::Parse {
                line: Some(line),
                message,
            },
            WatcherError::InvalidTradeType { token, line: None } => {
                WatcherError::InvalidTradeType {
                    token,
                    line: Some(line),
                }
            }
            WatcherError::InvalidTimestamp { value, line: None } => {
                WatcherError::InvalidTimestamp {
                    value,
                    line: Some(line),
                }
            }
            WatcherError::InvalidNumber {
                field,
                value,
                line: None,
            } => WatcherError::InvalidNumber {
                field,
                value,
                line: Some(line),
            },
            other => other,
        }
    }
}
