//! Error types for fetching and list patching.

use thiserror::Error;

/// Failure reported by an endpoint source while fetching a page.
///
/// Captured by the pagination controller as a `Failed` state; never
/// propagated further up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection could not be made or was interrupted.
    #[error("Transport failure: {message}")]
    Transport { message: String },

    /// Server answered with a non-success status.
    #[error("Server returned {code}: {message}")]
    Status { code: u16, message: String },

    /// Body could not be decoded into entities.
    #[error("Failed to decode page: {message}")]
    Decode { message: String },

    /// The fetch task was aborted before it completed.
    #[error("Fetch cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode {
            message: err.to_string(),
        }
    }
}

/// Why a message left a controller's list untouched.
///
/// Neither case is an error: stale completions are dropped by policy and
/// a screen is not expected to hold every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    /// A fetch completion issued under an older generation.
    StaleCompletion { issued: u64, current: u64 },
    /// An edit or delete for an id this list does not hold.
    NotFound,
}
