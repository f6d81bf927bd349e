//! Core business logic module
//!
//! This module contains the pure transformation steps of the account pipeline:
//! - `transformer` - Row classification into trades and transactions
//! - `camel_case` - JSON key conversion for the upload payload

pub mod camel_case;
pub mod transformer;

pub use camel_case::{convert_keys, to_camel_case};
pub use transformer::{build_upload_request, classify_row, transaction_name, Record};
