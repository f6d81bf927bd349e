//! File handler module
//!
//! This module defines the handler pattern for the two export categories. A
//! handler takes one detected csv file through validation, parsing (account
//! exports only) and upload. Moving the file afterwards is the watcher's job.

use crate::config::WatchConfig;
use crate::types::WatcherError;
use crate::upload::Uploader;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub mod account;
pub mod market;

pub use account::AccountFileHandler;
pub use market::MarketFileHandler;

/// The two watcher processes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherKind {
    Account,
    Market,
}

impl WatcherKind {
    /// Name the process reports itself as in liveness pings
    pub fn system_name(&self) -> &'static str {
        match self {
            WatcherKind::Account => "account_data_watcher",
            WatcherKind::Market => "market_price_watcher",
        }
    }

    pub fn all() -> [WatcherKind; 2] {
        [WatcherKind::Account, WatcherKind::Market]
    }
}

/// Handler trait for one export category
#[async_trait]
pub trait FileHandler: Send + Sync {
    fn kind(&self) -> WatcherKind;

    /// Validate, parse and upload one file
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the upload was accepted; the file belongs in `processed`
    /// * `Err(WatcherError)` for any validation, parse or upload failure; the
    ///   file belongs in `failed`
    async fn handle(&self, path: &Path) -> Result<(), WatcherError>;
}

/// Create the handler for a watcher kind
pub fn create_handler(
    kind: WatcherKind,
    config: &WatchConfig,
    uploader: Arc<dyn Uploader>,
) -> Box<dyn FileHandler> {
    match kind {
        WatcherKind::Account => Box::new(AccountFileHandler::new(
            config.user_identifier.clone(),
            uploader,
        )),
        WatcherKind::Market => Box::new(MarketFileHandler::new(uploader, config.upload_pause())),
    }
}

/// In-memory uploader shared by handler and watcher tests
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::io::MarketFileName;
    use crate::types::AccountUploadRequest;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct RecordingUploader {
        pub reject_with: Option<u16>,
        pub accounts: Mutex<Vec<(AccountUploadRequest, String)>>,
        pub markets: Mutex<Vec<(PathBuf, MarketFileName)>>,
    }

    impl RecordingUploader {
        pub fn accepting() -> Self {
            Self::default()
        }

        pub fn rejecting(status: u16) -> Self {
            Self {
                reject_with: Some(status),
                ..Self::default()
            }
        }

        fn outcome(&self) -> Result<(), WatcherError> {
            match self.reject_with {
                Some(status) => Err(WatcherError::upload_rejected(status, "rejected")),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl Uploader for RecordingUploader {
        async fn upload_account(
            &self,
            request: &AccountUploadRequest,
            file_name: &str,
        ) -> Result<(), WatcherError> {
            self.accounts
                .lock()
                .unwrap()
                .push((request.clone(), file_name.to_string()));
            self.outcome()
        }

        async fn upload_market(
            &self,
            path: &Path,
            market: &MarketFileName,
        ) -> Result<(), WatcherError> {
            self.markets
                .lock()
                .unwrap()
                .push((path.to_path_buf(), market.clone()));
            self.outcome()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::RecordingUploader;

    fn config() -> WatchConfig {
        WatchConfig::from_yaml(
            "watch_directory: /w\napi_endpoint: http://x\napi_token: t\nuser: trader\n",
        )
        .unwrap()
    }

    #[test]
    fn test_system_names() {
        assert_eq!(WatcherKind::Account.system_name(), "account_data_watcher");
        assert_eq!(WatcherKind::Market.system_name(), "market_price_watcher");
    }

    #[test]
    fn test_create_handler_matches_kind() {
        for kind in WatcherKind::all() {
            let handler = create_handler(kind, &config(), Arc::new(RecordingUploader::accepting()));
            assert_eq!(handler.kind(), kind);
        }
    }

    #[test]
    fn test_handlers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AccountFileHandler>();
        assert_send_sync::<MarketFileHandler>();
    }
}
