//! `DynamoBackend` for the AWS SDK client (Imperative Shell).

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::{PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use dynakit_core::{
    BackendError, BackendErrorKind, BatchWriteOutcome, BatchWriteRequest, PutItemRequest,
    QueryPage, QueryRequest, UpdateItemRequest,
};

use super::DynamoBackend;

#[async_trait]
impl DynamoBackend for Client {
    async fn put_item(&self, request: PutItemRequest) -> Result<(), BackendError> {
        Client::put_item(self)
            .table_name(request.table_name)
            .set_item(Some(request.item))
            .send()
            .await
            .map_err(|e| map_sdk_error("PutItem", e))?;

        Ok(())
    }

    async fn batch_write_item(
        &self,
        request: BatchWriteRequest,
    ) -> Result<BatchWriteOutcome, BackendError> {
        let table_name = request.table_name;

        let write_requests = request
            .items
            .into_iter()
            .map(|item| {
                PutRequest::builder()
                    .set_item(Some(item))
                    .build()
                    .map(|put| WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                BackendError::new(
                    "BatchWriteItem",
                    BackendErrorKind::Validation,
                    None,
                    e.to_string(),
                )
                .with_source(e)
            })?;

        let output = Client::batch_write_item(self)
            .request_items(table_name.clone(), write_requests)
            .send()
            .await
            .map_err(|e| map_sdk_error("BatchWriteItem", e))?;

        let unprocessed = output
            .unprocessed_items
            .unwrap_or_default()
            .remove(&table_name)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|write| write.put_request.map(|put| put.item))
            .collect();

        Ok(BatchWriteOutcome { unprocessed })
    }

    async fn query(&self, request: QueryRequest) -> Result<QueryPage, BackendError> {
        let output = Client::query(self)
            .table_name(request.table_name)
            .set_index_name(request.index_name)
            .key_condition_expression(request.key_condition_expression)
            .set_filter_expression(request.filter_expression)
            .set_expression_attribute_names(request.expression_attribute_names)
            .set_expression_attribute_values(request.expression_attribute_values)
            .set_exclusive_start_key(request.exclusive_start_key)
            .send()
            .await
            .map_err(|e| map_sdk_error("Query", e))?;

        Ok(QueryPage {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output.last_evaluated_key,
        })
    }

    async fn update_item(&self, request: UpdateItemRequest) -> Result<(), BackendError> {
        Client::update_item(self)
            .table_name(request.table_name)
            .set_key(Some(request.key))
            .update_expression(request.update_expression)
            .set_expression_attribute_names(request.expression_attribute_names)
            .set_expression_attribute_values(request.expression_attribute_values)
            .send()
            .await
            .map_err(|e| map_sdk_error("UpdateItem", e))?;

        Ok(())
    }
}

/// Map an SDK error to BackendError, keeping the service code and message verbatim.
fn map_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> BackendError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    let kind = match &err {
        SdkError::ServiceError(_) => BackendErrorKind::from_code(err.code()),
        SdkError::ConstructionFailure(_) => BackendErrorKind::Validation,
        _ => BackendErrorKind::Transport,
    };
    let code = err.code().map(str::to_string);
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

    BackendError::new(operation, kind, code, message).with_source(err)
}
