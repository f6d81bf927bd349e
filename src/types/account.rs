//! Account upload request
//!
//! One request is built per account export and consumed by a single upload.

use serde::Serialize;

use super::trade::Trade;
use super::transaction::Transaction;

/// Payload of an account upload
///
/// Trades and transactions keep the order of the rows they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountUploadRequest {
    /// Identifier of the user the account belongs to
    pub user_identifier: String,

    /// Account number taken from the file name
    pub account_number: u64,

    pub trades: Vec<Trade>,

    pub transactions: Vec<Transaction>,
}
