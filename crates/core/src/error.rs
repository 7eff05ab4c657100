use std::fmt;

use thiserror::Error;

/// Errors raised while turning caller data into DynamoDB records, or back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Failed to convert value into a record: {0}")]
    Serialize(String),
    #[error("Failed to convert record into value: {0}")]
    Deserialize(String),
}

/// Errors raised while building condition, key condition or update expressions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("Expression builder has nothing to build")]
    EmptyBuilder,
    #[error("Invalid attribute name: {0:?}")]
    InvalidName(String),
    #[error("Empty operand list for {0}")]
    EmptyOperand(&'static str),
    #[error("Expression is missing a {0}")]
    Missing(&'static str),
}

/// Coarse classification of a failed backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// A condition expression evaluated to false.
    ConditionalCheckFailed,
    /// Provisioned throughput or account request limits were exceeded.
    Throttled,
    /// The table or index does not exist.
    ResourceNotFound,
    /// The request was rejected as malformed.
    Validation,
    /// The request never got a service response (dispatch, timeout, bad response).
    Transport,
    /// Any other service-side error.
    Service,
}

impl BackendErrorKind {
    /// Classifies a DynamoDB service error code.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("ConditionalCheckFailedException") => Self::ConditionalCheckFailed,
            Some(
                "ProvisionedThroughputExceededException"
                | "RequestLimitExceeded"
                | "ThrottlingException",
            ) => Self::Throttled,
            Some("ResourceNotFoundException") => Self::ResourceNotFound,
            Some("ValidationException") => Self::Validation,
            _ => Self::Service,
        }
    }
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ConditionalCheckFailed => "conditional check failed",
            Self::Throttled => "throttled",
            Self::ResourceNotFound => "resource not found",
            Self::Validation => "validation",
            Self::Transport => "transport",
            Self::Service => "service",
        };
        f.write_str(label)
    }
}

/// A failed call to the underlying DynamoDB client.
///
/// The service's own error code and message are kept verbatim; `kind` is a
/// classification on top, never a replacement.
#[derive(Debug, Error)]
#[error("{operation} failed ({kind}): {message}")]
pub struct BackendError {
    operation: &'static str,
    kind: BackendErrorKind,
    code: Option<String>,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl BackendError {
    /// Creates an error without an underlying source.
    pub fn new(
        operation: &'static str,
        kind: BackendErrorKind,
        code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the original client error.
    pub fn with_source(
        mut self,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Name of the DynamoDB operation that failed, e.g. `"PutItem"`.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn kind(&self) -> BackendErrorKind {
        self.kind
    }

    /// Service error code, e.g. `"ConditionalCheckFailedException"`.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_throttled(&self) -> bool {
        self.kind == BackendErrorKind::Throttled
    }
}
