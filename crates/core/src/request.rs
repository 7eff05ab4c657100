//! Request and response values exchanged with a backend.
//!
//! These mirror the subset of the DynamoDB API the helpers use and nothing
//! more, so a backend implementation is a direct field-by-field mapping.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::ExpressionError;
use crate::expression::Expression;
use crate::record::Record;

/// PutItem.
#[derive(Debug, Clone, PartialEq)]
pub struct PutItemRequest {
    pub table_name: String,
    pub item: Record,
}

/// BatchWriteItem with put requests against a single table.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchWriteRequest {
    pub table_name: String,
    pub items: Vec<Record>,
}

/// Result of one BatchWriteItem call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchWriteOutcome {
    /// Items the service accepted the request for but did not write.
    pub unprocessed: Vec<Record>,
}

/// One Query call.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub table_name: String,
    pub index_name: Option<String>,
    pub key_condition_expression: String,
    pub filter_expression: Option<String>,
    pub expression_attribute_names: Option<HashMap<String, String>>,
    pub expression_attribute_values: Option<HashMap<String, AttributeValue>>,
    pub exclusive_start_key: Option<Record>,
}

impl QueryRequest {
    /// Builds the first-page request. The expression must carry a key condition.
    pub fn new(
        table_name: impl Into<String>,
        index_name: Option<String>,
        expression: &Expression,
    ) -> Result<Self, ExpressionError> {
        let key_condition_expression = expression
            .key_condition
            .clone()
            .ok_or(ExpressionError::Missing("key condition"))?;

        Ok(Self {
            table_name: table_name.into(),
            index_name,
            key_condition_expression,
            filter_expression: expression.filter.clone(),
            expression_attribute_names: expression.names(),
            expression_attribute_values: expression.values(),
            exclusive_start_key: None,
        })
    }
}

/// One page of Query results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPage {
    pub items: Vec<Record>,
    pub last_evaluated_key: Option<Record>,
}

impl QueryPage {
    /// The cursor for the next page, if the service reported more results.
    ///
    /// An empty `LastEvaluatedKey` counts as "no more pages".
    pub fn next_cursor(&self) -> Option<&Record> {
        self.last_evaluated_key.as_ref().filter(|key| !key.is_empty())
    }
}

/// UpdateItem.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateItemRequest {
    pub table_name: String,
    pub key: Record,
    pub update_expression: String,
    pub expression_attribute_names: Option<HashMap<String, String>>,
    pub expression_attribute_values: Option<HashMap<String, AttributeValue>>,
}

impl UpdateItemRequest {
    /// The expression must carry an update.
    pub fn new(
        table_name: impl Into<String>,
        key: Record,
        expression: &Expression,
    ) -> Result<Self, ExpressionError> {
        let update_expression = expression
            .update
            .clone()
            .ok_or(ExpressionError::Missing("update"))?;

        Ok(Self {
            table_name: table_name.into(),
            key,
            update_expression,
            expression_attribute_names: expression.names(),
            expression_attribute_values: expression.values(),
        })
    }
}
