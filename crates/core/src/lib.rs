//! Pure building blocks for the dynakit DynamoDB helpers.
//!
//! Nothing in this crate performs I/O. It holds the record model and the
//! conversion capabilities, the expression builder, the batch plan and the
//! request/response values exchanged with a backend.

pub mod batch;
pub mod error;
pub mod expression;
pub mod record;
pub mod request;

pub use batch::{batches, chunk_count, BATCH_WRITE_LIMIT};
pub use error::{BackendError, BackendErrorKind, ConversionError, ExpressionError};
pub use expression::{
    Comparator, Condition, Expression, ExpressionBuilder, KeyComparator, KeyCondition, Update,
};
pub use record::{
    bool_value, from_record, from_records, number_value, string_value, Payload, Payloads, Record,
    SerdePayload,
};
pub use request::{
    BatchWriteOutcome, BatchWriteRequest, PutItemRequest, QueryPage, QueryRequest,
    UpdateItemRequest,
};

/// Re-exported so callers can build records without naming the SDK crate.
pub use aws_sdk_dynamodb::types::AttributeValue;
