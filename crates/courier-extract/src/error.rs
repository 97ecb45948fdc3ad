//! Request data errors.

use thiserror::Error;

/// Error raised while building [`RequestData`](crate::RequestData) from raw
/// input.
#[derive(Debug, Error)]
pub enum RequestDataError {
    /// A urlencoded string could not be decoded.
    #[error("invalid urlencoded data: {0}")]
    InvalidEncoding(#[from] serde_urlencoded::de::Error),
}
