//! Helpers over the DynamoDB client for the common item operations.
//!
//! Every operation takes the client explicitly. Anything implementing
//! [`DynamoBackend`] works, including `aws_sdk_dynamodb::Client` itself and
//! the scripted [`MockBackend`] used in tests.
//!
//! ```no_run
//! use dynakit::{config, write_many, Record};
//!
//! # async fn example(records: Vec<Record>) -> dynakit::Result<()> {
//! let client = config::create_client(&config::ClientConfig::default()).await;
//! let summary = write_many(&client, &records, "events").await?;
//! assert!(summary.is_complete());
//! # Ok(())
//! # }
//! ```

mod access;
pub mod backend;
pub mod config;
mod error;
pub mod pretty;

pub use access::{
    increment_counter, query_by_index, query_by_index_as, query_by_key_condition,
    query_by_key_condition_as, write_many, write_one, write_payloads, BatchWriteSummary,
};
pub use backend::{Call, DynamoBackend, MockBackend};
pub use error::{Error, Result};
pub use pretty::{pretty_print, pretty_print_records, pretty_string};

pub use dynakit_core::{
    bool_value, from_record, from_records, number_value, string_value, AttributeValue,
    BackendError, BackendErrorKind, BatchWriteOutcome, BatchWriteRequest, Comparator, Condition,
    ConversionError, Expression, ExpressionBuilder, ExpressionError, KeyComparator, KeyCondition,
    Payload, Payloads, PutItemRequest, QueryPage, QueryRequest, Record, SerdePayload, Update,
    UpdateItemRequest, BATCH_WRITE_LIMIT,
};
