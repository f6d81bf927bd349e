//! Transaction-related types for the MT4 watchers
//!
//! Balance operations (rows whose type is `UNKNOWN`) are uploaded as transactions
//! rather than trades.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use super::time_format;

/// Direction of a cash movement
///
/// Derived from the sign of the row's net profit: strictly positive is a
/// deposit, zero or negative is a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl TransactionType {
    /// Classify an amount
    pub fn from_amount(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            TransactionType::Deposit
        } else {
            TransactionType::Withdrawal
        }
    }

    /// Name used when the comment carries no bracketed label
    pub fn default_name(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdrawal => "Withdrawal",
        }
    }
}

/// Settlement status; terminal exports only contain settled movements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Completed,
}

/// Normalized transaction record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub transaction_type: TransactionType,
    #[serde(with = "time_format")]
    pub transaction_date: NaiveDateTime,
    pub name: String,
    /// Signed amount, negative for withdrawals
    pub amount: Decimal,
    pub transaction_status: TransactionStatus,
}
