//! The seam between the item helpers and the DynamoDB client.
//!
//! The trait is kept as small and as close to the SDK client as possible so
//! that the untestable part (the SDK mapping) stays thin.

mod mock;
mod sdk;

use async_trait::async_trait;
use dynakit_core::{
    BackendError, BatchWriteOutcome, BatchWriteRequest, PutItemRequest, QueryPage, QueryRequest,
    UpdateItemRequest,
};

pub use mock::{Call, MockBackend};

/// A DynamoDB client capable of the four calls the helpers issue.
///
/// Implementations must surface the client's failures unchanged; they must
/// not retry on their own beyond what the client already does.
#[async_trait]
pub trait DynamoBackend: Send + Sync {
    async fn put_item(&self, request: PutItemRequest) -> Result<(), BackendError>;

    async fn batch_write_item(
        &self,
        request: BatchWriteRequest,
    ) -> Result<BatchWriteOutcome, BackendError>;

    async fn query(&self, request: QueryRequest) -> Result<QueryPage, BackendError>;

    async fn update_item(&self, request: UpdateItemRequest) -> Result<(), BackendError>;
}
