//! Row classification and transformation
//!
//! Every typed row becomes exactly one record: rows typed `UNKNOWN` are balance
//! operations and become transactions, everything else becomes a trade.

use crate::types::{
    AccountRow, AccountUploadRequest, Trade, TradePlatform, TradeType, Transaction,
    TransactionStatus, TransactionType,
};

/// Outcome of classifying one row
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Trade(Trade),
    Transaction(Transaction),
}

/// Classify a row and derive its normalized record
pub fn classify_row(row: AccountRow) -> Record {
    match row.trade_type {
        TradeType::Unknown => Record::Transaction(to_transaction(row)),
        TradeType::Buy | TradeType::Sell => Record::Trade(to_trade(row)),
    }
}

fn to_trade(row: AccountRow) -> Trade {
    Trade {
        trade_id: row.ticket,
        trade_platform: TradePlatform::MetaTrader4,
        product: row.symbol,
        trade_type: row.trade_type,
        trade_open_time: row.open_time,
        lot_size: row.lots,
        open_price: row.open_price,
        net_profit: Some(row.net_profit),
        close_price: Some(row.close_price),
        trade_close_time: Some(row.close_time),
        stop_loss: Some(row.stop_loss),
        take_profit: Some(row.take_profit),
    }
}

fn to_transaction(row: AccountRow) -> Transaction {
    let transaction_type = TransactionType::from_amount(row.net_profit);
    Transaction {
        transaction_type,
        transaction_date: row.close_time,
        name: transaction_name(&row.comment, transaction_type.default_name()),
        amount: row.net_profit,
        transaction_status: TransactionStatus::Completed,
    }
}

/// Extract the bracketed label from a comment
///
/// Returns the trimmed text between the first `[` and the next `]`, or
/// `default` when the comment has no such pair.
pub fn transaction_name(comment: &str, default: &str) -> String {
    comment
        .find('[')
        .and_then(|open| {
            let rest = &comment[open + 1..];
            rest.find(']').map(|close| rest[..close].trim().to_string())
        })
        .unwrap_or_else(|| default.to_string())
}

/// Build the upload request for one account export
pub fn build_upload_request(
    user_identifier: &str,
    account_number: u64,
    rows: Vec<AccountRow>,
) -> AccountUploadRequest {
    let mut trades = Vec::new();
    let mut transactions = Vec::new();

    for row in rows {
        match classify_row(row) {
            Record::Trade(trade) => trades.push(trade),
            Record::Transaction(transaction) => transactions.push(transaction),
        }
    }

    AccountUploadRequest {
        user_identifier: user_identifier.to_string(),
        account_number,
        trades,
        transactions,
    }
}
