//! Item helpers: single put, chunked batch put, paginated queries, counters.
//!
//! Every helper is stateless and takes the backend explicitly. Multi-request
//! helpers issue their requests one after another and stop at the first
//! failure; nothing already written is rolled back.

use dynakit_core::{
    batches, chunk_count, from_records, number_value, string_value, BatchWriteRequest, Condition,
    ExpressionBuilder, KeyCondition, Payload, Payloads, PutItemRequest, QueryRequest, Record,
    Update, UpdateItemRequest,
};
use serde::de::DeserializeOwned;

use crate::backend::DynamoBackend;
use crate::error::Result;

/// What a [`write_many`] call sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchWriteSummary {
    /// BatchWriteItem requests issued.
    pub requests: usize,
    /// Records submitted across all requests.
    pub items: usize,
    /// Records the service reported back as unprocessed. They are not retried.
    pub unprocessed: Vec<Record>,
}

impl BatchWriteSummary {
    /// True when the service processed every submitted record.
    pub fn is_complete(&self) -> bool {
        self.unprocessed.is_empty()
    }
}

/// Converts `item` and writes it with a single PutItem.
///
/// A conversion failure returns before any request is sent.
pub async fn write_one<B, P>(backend: &B, item: &P, table: &str) -> Result<()>
where
    B: DynamoBackend + ?Sized,
    P: Payload + ?Sized,
{
    let item = item.payload()?;

    tracing::debug!(table, attributes = item.len(), "Putting item");

    backend
        .put_item(PutItemRequest {
            table_name: table.to_string(),
            item,
        })
        .await?;

    Ok(())
}

/// Writes `items` with one BatchWriteItem per chunk of at most 25 records.
///
/// Chunks go out strictly in order. The first failing chunk aborts the call
/// and later chunks are never attempted. An empty slice sends nothing.
pub async fn write_many<B>(backend: &B, items: &[Record], table: &str) -> Result<BatchWriteSummary>
where
    B: DynamoBackend + ?Sized,
{
    let total = chunk_count(items.len());
    let mut summary = BatchWriteSummary::default();

    for (index, chunk) in batches(items).enumerate() {
        tracing::debug!(
            table,
            chunk = index + 1,
            chunks = total,
            items = chunk.len(),
            "Writing batch"
        );

        let outcome = backend
            .batch_write_item(BatchWriteRequest {
                table_name: table.to_string(),
                items: chunk.to_vec(),
            })
            .await?;

        summary.requests += 1;
        summary.items += chunk.len();
        summary.unprocessed.extend(outcome.unprocessed);
    }

    if !summary.is_complete() {
        tracing::warn!(
            table,
            unprocessed = summary.unprocessed.len(),
            "Batch write left unprocessed items"
        );
    }

    Ok(summary)
}

/// Converts every payload, then forwards to [`write_many`].
pub async fn write_payloads<B, P>(
    backend: &B,
    payloads: &P,
    table: &str,
) -> Result<BatchWriteSummary>
where
    B: DynamoBackend + ?Sized,
    P: Payloads + ?Sized,
{
    let items = payloads.payloads()?;
    write_many(backend, &items, table).await
}

/// Queries `index` for items whose `key_name` equals `key_value`, optionally
/// filtered, following pagination until the last page.
pub async fn query_by_index<B>(
    backend: &B,
    table: &str,
    index: &str,
    key_name: &str,
    key_value: &str,
    filter: Option<Condition>,
) -> Result<Vec<Record>>
where
    B: DynamoBackend + ?Sized,
{
    let expression = ExpressionBuilder::new()
        .with_key_condition(KeyCondition::equal(key_name, string_value(key_value)))
        .with_optional_filter(filter)
        .build()?;

    let request = QueryRequest::new(table, Some(index.to_string()), &expression)?;
    query_all(backend, request).await
}

/// Queries the table with a caller-supplied key condition, optionally
/// filtered, following pagination until the last page.
pub async fn query_by_key_condition<B>(
    backend: &B,
    table: &str,
    key_condition: KeyCondition,
    filter: Option<Condition>,
) -> Result<Vec<Record>>
where
    B: DynamoBackend + ?Sized,
{
    let expression = ExpressionBuilder::new()
        .with_key_condition(key_condition)
        .with_optional_filter(filter)
        .build()?;

    let request = QueryRequest::new(table, None, &expression)?;
    query_all(backend, request).await
}

/// [`query_by_index`], deserializing each record into `T`.
pub async fn query_by_index_as<T, B>(
    backend: &B,
    table: &str,
    index: &str,
    key_name: &str,
    key_value: &str,
    filter: Option<Condition>,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    B: DynamoBackend + ?Sized,
{
    let records = query_by_index(backend, table, index, key_name, key_value, filter).await?;
    Ok(from_records(records)?)
}

/// [`query_by_key_condition`], deserializing each record into `T`.
pub async fn query_by_key_condition_as<T, B>(
    backend: &B,
    table: &str,
    key_condition: KeyCondition,
    filter: Option<Condition>,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    B: DynamoBackend + ?Sized,
{
    let records = query_by_key_condition(backend, table, key_condition, filter).await?;
    Ok(from_records(records)?)
}

/// Atomically adds `delta` to the numeric attribute `attribute_name` of the
/// item identified by `key`, with a single `ADD` update.
pub async fn increment_counter<B>(
    backend: &B,
    table: &str,
    key: Record,
    attribute_name: &str,
    delta: i64,
) -> Result<()>
where
    B: DynamoBackend + ?Sized,
{
    let expression = ExpressionBuilder::new()
        .with_update(Update::new().add(attribute_name, number_value(delta)))
        .build()?;
    let request = UpdateItemRequest::new(table, key, &expression)?;

    tracing::debug!(table, attribute = attribute_name, delta, "Incrementing counter");

    backend.update_item(request).await?;
    Ok(())
}

/// Issues `request` page by page until the service stops returning a cursor.
///
/// A failing page discards everything gathered so far.
async fn query_all<B>(backend: &B, mut request: QueryRequest) -> Result<Vec<Record>>
where
    B: DynamoBackend + ?Sized,
{
    let mut items = Vec::new();
    let mut page_number = 0_usize;

    loop {
        page_number += 1;
        let page = backend.query(request.clone()).await?;

        tracing::debug!(
            table = %request.table_name,
            page = page_number,
            items = page.items.len(),
            "Fetched query page"
        );

        let cursor = page.next_cursor().cloned();
        items.extend(page.items);

        match cursor {
            Some(key) => request.exclusive_start_key = Some(key),
            None => break,
        }
    }

    Ok(items)
}
