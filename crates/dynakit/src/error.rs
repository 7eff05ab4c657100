//! Error type for the item helpers.

use dynakit_core::{BackendError, ConversionError, ExpressionError};
use thiserror::Error;

/// Result type alias for dynakit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the item helpers.
///
/// Nothing is retried or reinterpreted: a conversion failure means no request
/// was sent, a backend failure carries the client's error unchanged.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl Error {
    /// The backend failure, if this is one.
    pub fn as_backend(&self) -> Option<&BackendError> {
        match self {
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynakit_core::BackendErrorKind;

    #[test]
    fn test_conversion_error_is_transparent() {
        let error: Error = ConversionError::Serialize("bad".to_string()).into();
        assert_eq!(error.to_string(), "Failed to convert value into a record: bad");
        assert!(error.as_backend().is_none());
    }

    #[test]
    fn test_backend_error_is_transparent() {
        let error: Error = BackendError::new(
            "Query",
            BackendErrorKind::Throttled,
            Some("ProvisionedThroughputExceededException".to_string()),
            "Rate exceeded",
        )
        .into();

        assert_eq!(error.to_string(), "Query failed (throttled): Rate exceeded");
        assert!(error.as_backend().is_some_and(BackendError::is_throttled));
    }
}
