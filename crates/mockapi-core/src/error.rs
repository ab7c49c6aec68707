//! Errors returned by request dispatch.

use crate::storage::StorageError;
use thiserror::Error;

/// Error returned to the caller of a mock endpoint.
///
/// Each variant maps to the HTTP status a real backend would answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain rule violated (duplicate relation, missing record, ...)
    #[error("{0}")]
    BadRequest(String),
    /// No route matched the URL
    #[error("{0}")]
    NotFound(String),
    /// Mutation applied in memory but could not be persisted
    #[error("failed to persist state: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    /// HTTP status code for this error
    pub fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Storage(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::bad_request("no such user"), 400, "no such user")]
    #[case(ApiError::not_found("Not Found"), 404, "Not Found")]
    #[case(
        ApiError::Storage(StorageError::Poisoned),
        500,
        "failed to persist state: storage lock poisoned"
    )]
    fn test_api_error_status_and_message(
        #[case] error: ApiError,
        #[case] status: u16,
        #[case] message: &str,
    ) {
        assert_eq!(error.status(), status);
        assert_eq!(error.to_string(), message);
    }
}
