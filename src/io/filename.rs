//! File name validation for terminal exports
//!
//! Two naming conventions are recognized:
//!
//! - `AccountTradingData_<account>.csv`
//! - `MarketData_<symbol>_<yyyymmdd>_<hhmmss>_<interval>.csv`
//!
//! Both functions are pure: they return the extracted fields or an
//! `InvalidFileName` error and leave logging to the caller.

use crate::types::WatcherError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

const ACCOUNT_EXPECTED: &str = "AccountTradingData_<digits>.csv";
const MARKET_EXPECTED: &str = "MarketData_<symbol>_<yyyymmdd>_<hhmmss>_<interval>.csv";

static ACCOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^AccountTradingData_\d+$").expect("valid account pattern"));

static MARKET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^MarketData_[^_]+_\d{8}_\d{6}_.+$").expect("valid market pattern")
});

/// Fields embedded in an account export name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFileName {
    pub account_number: u64,
}

/// Fields embedded in a market export name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketFileName {
    pub symbol: String,
    /// Price interval, e.g. `M15`; may itself contain underscores
    pub interval: String,
}

/// Validate an account export name and extract the account number
pub fn parse_account_file_name(path: &Path) -> Result<AccountFileName, WatcherError> {
    let name = display_name(path);
    let invalid = || WatcherError::invalid_file_name(&name, ACCOUNT_EXPECTED);

    let has_csv_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !has_csv_extension {
        return Err(invalid());
    }

    let stem = file_stem(path).ok_or_else(invalid)?;
    if !ACCOUNT_PATTERN.is_match(stem) {
        return Err(invalid());
    }

    let account_number = stem
        .split('_')
        .nth(1)
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or_else(invalid)?;

    Ok(AccountFileName { account_number })
}

/// Validate a market export name and extract symbol and interval
pub fn parse_market_file_name(path: &Path) -> Result<MarketFileName, WatcherError> {
    let name = display_name(path);
    let invalid = || WatcherError::invalid_file_name(&name, MARKET_EXPECTED);

    let stem = file_stem(path).ok_or_else(invalid)?;
    if !MARKET_PATTERN.is_match(stem) {
        return Err(invalid());
    }

    let parts: Vec<&str> = stem.splitn(5, '_').collect();
    match parts.as_slice() {
        [_, symbol, _, _, interval] => Ok(MarketFileName {
            symbol: symbol.to_string(),
            interval: interval.to_string(),
        }),
        _ => Err(invalid()),
    }
}

/// Last path component, lossily converted for log output
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}
