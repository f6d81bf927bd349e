//! Upload module
//!
//! The `Uploader` trait is the seam between file handlers and the network:
//! handlers are tested against in-memory implementations, while the watcher
//! binaries use the HTTP `ApiClient`.

use crate::io::MarketFileName;
use crate::types::{AccountUploadRequest, WatcherError};
use async_trait::async_trait;
use std::path::Path;

pub mod client;

pub use client::{ApiClient, API_TOKEN_HEADER};

/// Destination for parsed account data and raw market files
///
/// Implementations log their own outcome and make exactly one attempt.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Upload an account request as camelCase JSON
    async fn upload_account(
        &self,
        request: &AccountUploadRequest,
        file_name: &str,
    ) -> Result<(), WatcherError>;

    /// Upload a market file as multipart form data
    async fn upload_market(&self, path: &Path, market: &MarketFileName)
        -> Result<(), WatcherError>;
}
