//! Market export handler
//!
//! Market files are uploaded as-is; only the name is decomposed, and it is
//! validated here and nowhere else.

use crate::handler::{FileHandler, WatcherKind};
use crate::io::parse_market_file_name;
use crate::types::WatcherError;
use crate::upload::Uploader;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub struct MarketFileHandler {
    uploader: Arc<dyn Uploader>,
    /// Pause after every file, rejected names included
    pause: Duration,
}

impl MarketFileHandler {
    pub fn new(uploader: Arc<dyn Uploader>, pause: Duration) -> Self {
        Self { uploader, pause }
    }

    async fn upload(&self, path: &Path) -> Result<(), WatcherError> {
        let market = parse_market_file_name(path).inspect_err(|e| warn!("{}", e))?;
        self.uploader.upload_market(path, &market).await
    }
}

#[async_trait]
impl FileHandler for MarketFileHandler {
    fn kind(&self) -> WatcherKind {
        WatcherKind::Market
    }

    async fn handle(&self, path: &Path) -> Result<(), WatcherError> {
        let result = self.upload(path).await;
        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
        result
    }
}
