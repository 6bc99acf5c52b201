//! BigQuery Error Classification
//!
//! Classifies client errors by the HTTP status BigQuery returned

use google_cloud_bigquery::http::error::Error;

/// HTTP status BigQuery returns for a missing dataset or table
pub const NOT_FOUND: u16 = 404;

/// Check if an error means the dataset or table does not exist
///
/// Only the status code is inspected. The message text can mention
/// arbitrary identifiers and is never matched.
pub fn is_not_found(error: &Error) -> bool {
    matches!(error, Error::Response(response) if response.code == NOT_FOUND)
}
