//! Scripted in-memory backend for tests.
//!
//! Every request is recorded in order. Responses are popped from per-call
//! queues; when a queue is empty the call succeeds with an empty result.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use dynakit_core::{
    BackendError, BatchWriteOutcome, BatchWriteRequest, PutItemRequest, QueryPage, QueryRequest,
    UpdateItemRequest,
};

use super::DynamoBackend;

/// A request received by [`MockBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PutItem(PutItemRequest),
    BatchWriteItem(BatchWriteRequest),
    Query(QueryRequest),
    UpdateItem(UpdateItemRequest),
}

#[derive(Debug, Default)]
struct Script {
    calls: Vec<Call>,
    put_item: VecDeque<Result<(), BackendError>>,
    batch_write_item: VecDeque<Result<BatchWriteOutcome, BackendError>>,
    query: VecDeque<Result<QueryPage, BackendError>>,
    update_item: VecDeque<Result<(), BackendError>>,
}

#[derive(Debug, Default)]
pub struct MockBackend {
    script: Mutex<Script>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_put_item(&self, response: Result<(), BackendError>) -> &Self {
        self.lock().put_item.push_back(response);
        self
    }

    pub fn push_batch_write_item(
        &self,
        response: Result<BatchWriteOutcome, BackendError>,
    ) -> &Self {
        self.lock().batch_write_item.push_back(response);
        self
    }

    pub fn push_query(&self, response: Result<QueryPage, BackendError>) -> &Self {
        self.lock().query.push_back(response);
        self
    }

    pub fn push_update_item(&self, response: Result<(), BackendError>) -> &Self {
        self.lock().update_item.push_back(response);
        self
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DynamoBackend for MockBackend {
    async fn put_item(&self, request: PutItemRequest) -> Result<(), BackendError> {
        let mut script = self.lock();
        script.calls.push(Call::PutItem(request));
        script.put_item.pop_front().unwrap_or(Ok(()))
    }

    async fn batch_write_item(
        &self,
        request: BatchWriteRequest,
    ) -> Result<BatchWriteOutcome, BackendError> {
        let mut script = self.lock();
        script.calls.push(Call::BatchWriteItem(request));
        script
            .batch_write_item
            .pop_front()
            .unwrap_or_else(|| Ok(BatchWriteOutcome::default()))
    }

    async fn query(&self, request: QueryRequest) -> Result<QueryPage, BackendError> {
        let mut script = self.lock();
        script.calls.push(Call::Query(request));
        script
            .query
            .pop_front()
            .unwrap_or_else(|| Ok(QueryPage::default()))
    }

    async fn update_item(&self, request: UpdateItemRequest) -> Result<(), BackendError> {
        let mut script = self.lock();
        script.calls.push(Call::UpdateItem(request));
        script.update_item.pop_front().unwrap_or(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynakit_core::{string_value, BackendErrorKind, Record};

    fn put(table: &str) -> PutItemRequest {
        PutItemRequest {
            table_name: table.to_string(),
            item: Record::from([("id".to_string(), string_value("1"))]),
        }
    }

    #[tokio::test]
    async fn test_unscripted_calls_succeed() {
        let backend = MockBackend::new();

        backend.put_item(put("t")).await.unwrap();
        let page = backend
            .query(QueryRequest {
                table_name: "t".to_string(),
                index_name: None,
                key_condition_expression: "#n0 = :v0".to_string(),
                filter_expression: None,
                expression_attribute_names: None,
                expression_attribute_values: None,
                exclusive_start_key: None,
            })
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_scripted_responses_are_consumed_in_order() {
        let backend = MockBackend::new();
        backend
            .push_put_item(Err(BackendError::new(
                "PutItem",
                BackendErrorKind::Throttled,
                None,
                "slow down",
            )))
            .push_put_item(Ok(()));

        assert!(backend.put_item(put("a")).await.is_err());
        assert!(backend.put_item(put("b")).await.is_ok());
        assert!(backend.put_item(put("c")).await.is_ok());

        let tables: Vec<String> = backend
            .calls()
            .into_iter()
            .map(|call| match call {
                Call::PutItem(request) => request.table_name,
                other => panic!("unexpected call {other:?}"),
            })
            .collect();
        assert_eq!(tables, vec!["a", "b", "c"]);
    }
}
