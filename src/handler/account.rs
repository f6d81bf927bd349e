//! Account export handler
//!
//! Validates the file name, parses every row (off the async runtime), builds
//! the upload request and hands it to the uploader.

use crate::core::build_upload_request;
use crate::handler::{FileHandler, WatcherKind};
use crate::io::filename::display_name;
use crate::io::{parse_account_file_name, read_account_rows};
use crate::types::WatcherError;
use crate::upload::Uploader;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

pub struct AccountFileHandler {
    user_identifier: String,
    uploader: Arc<dyn Uploader>,
}

impl AccountFileHandler {
    pub fn new(user_identifier: String, uploader: Arc<dyn Uploader>) -> Self {
        Self {
            user_identifier,
            uploader,
        }
    }
}

#[async_trait]
impl FileHandler for AccountFileHandler {
    fn kind(&self) -> WatcherKind {
        WatcherKind::Account
    }

    async fn handle(&self, path: &Path) -> Result<(), WatcherError> {
        let file_name = display_name(path);

        let account = parse_account_file_name(path).inspect_err(|e| error!("{}", e))?;

        let owned = path.to_path_buf();
        let rows = tokio::task::spawn_blocking(move || read_account_rows(&owned))
            .await
            .map_err(|e| WatcherError::Io {
                message: format!("Reader task for {} failed: {}", file_name, e),
            })?
            .inspect_err(|e| error!("Error reading file {}: {}", file_name, e))?;

        let request = build_upload_request(&self.user_identifier, account.account_number, rows);
        info!(
            "Parsed {}: {} trades, {} transactions",
            file_name,
            request.trades.len(),
            request.transactions.len()
        );

        self.uploader.upload_account(&request, &file_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::RecordingUploader;
    use crate::types::{TradeType, TransactionType};
    use std::fs;
    use tempfile::tempdir;

    const CONTENT: &str = "Ticket;Open Time;Type;Lots;Symbol;Open Price;Stop Loss;Take Profit;Close Time;Close Price;Net Profit;Comment\n\
        1001;2024.01.02 10:00:00;buy;0.10;EURUSD;1.08500;1.08000;1.09000;2024.01.02 12:30:00;1.08750;25.00;\n\
        1002;2024.01.03 08:00:00;unknown;0.00;;0;0;0;2024.01.03 08:00:00;0;500.00;Deposit [Bonus Credit]\n";

    #[tokio::test]
    async fn test_handle_uploads_request() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("AccountTradingData_12345.csv");
        fs::write(&path, CONTENT).unwrap();
        let uploader = Arc::new(RecordingUploader::accepting());
        let handler = AccountFileHandler::new("trader".to_string(), uploader.clone());

        handler.handle(&path).await.unwrap();

        let accounts = uploader.accounts.lock().unwrap();
        assert_eq!(accounts.len(), 1);
        let (request, file_name) = &accounts[0];
        assert_eq!(file_name, "AccountTradingData_12345.csv");
        assert_eq!(request.user_identifier, "trader");
        assert_eq!(request.account_number, 12345);
        assert_eq!(request.trades.len(), 1);
        assert_eq!(request.trades[0].trade_type, TradeType::Buy);
        assert_eq!(request.transactions.len(), 1);
        assert_eq!(
            request.transactions[0].transaction_type,
            TransactionType::Deposit
        );
        assert_eq!(request.transactions[0].name, "Bonus Credit");
    }

    #[tokio::test]
    async fn test_invalid_name_skips_parse_and_upload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("AccountData_12345.csv");
        fs::write(&path, CONTENT).unwrap();
        let uploader = Arc::new(RecordingUploader::accepting());
        let handler = AccountFileHandler::new("trader".to_string(), uploader.clone());

        let result = handler.handle(&path).await;

        assert!(matches!(result, Err(WatcherError::InvalidFileName { .. })));
        assert!(uploader.accounts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_parse_failure_skips_upload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("AccountTradingData_1.csv");
        fs::write(&path, CONTENT.replace("unknown", "balance")).unwrap();
        let uploader = Arc::new(RecordingUploader::accepting());
        let handler = AccountFileHandler::new("trader".to_string(), uploader.clone());

        let result = handler.handle(&path).await;

        assert_eq!(
            result,
            Err(WatcherError::invalid_trade_type("balance", Some(3)))
        );
        assert!(uploader.accounts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_upload_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("AccountTradingData_1.csv");
        fs::write(&path, CONTENT).unwrap();
        let handler =
            AccountFileHandler::new("trader".to_string(), Arc::new(RecordingUploader::rejecting(500)));

        let result = handler.handle(&path).await;
        assert!(matches!(result, Err(WatcherError::UploadRejected { status: 500, .. })));
    }
}
