//! Expression builder for key conditions, filters and update expressions.
//!
//! DynamoDB expressions refer to attributes and values through
//! placeholders (`#n0`, `:v0`) so reserved words and arbitrary values never
//! appear in the expression text. The builder renders every part against a
//! single placeholder table, in the order key condition, filter, update.

mod condition;
mod key;
mod placeholders;
mod update;

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

pub use condition::{Comparator, Condition};
pub use key::{KeyComparator, KeyCondition};
pub use update::Update;

use crate::error::ExpressionError;
use placeholders::Placeholders;

/// Rendered expressions plus the placeholder maps they reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    pub key_condition: Option<String>,
    pub filter: Option<String>,
    pub update: Option<String>,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

impl Expression {
    /// Attribute names map, or `None` when empty (DynamoDB rejects empty maps).
    pub fn names(&self) -> Option<HashMap<String, String>> {
        (!self.names.is_empty()).then(|| self.names.clone())
    }

    /// Attribute values map, or `None` when empty.
    pub fn values(&self) -> Option<HashMap<String, AttributeValue>> {
        (!self.values.is_empty()).then(|| self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpressionBuilder {
    key_condition: Option<KeyCondition>,
    filter: Option<Condition>,
    update: Option<Update>,
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_condition(mut self, key_condition: KeyCondition) -> Self {
        self.key_condition = Some(key_condition);
        self
    }

    pub fn with_filter(mut self, filter: Condition) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the filter only when one is given.
    pub fn with_optional_filter(mut self, filter: Option<Condition>) -> Self {
        if filter.is_some() {
            self.filter = filter;
        }
        self
    }

    pub fn with_update(mut self, update: Update) -> Self {
        self.update = Some(update);
        self
    }

    pub fn build(self) -> Result<Expression, ExpressionError> {
        if self.key_condition.is_none() && self.filter.is_none() && self.update.is_none() {
            return Err(ExpressionError::EmptyBuilder);
        }

        let mut ph = Placeholders::default();
        let key_condition = self
            .key_condition
            .map(|k| k.render(&mut ph))
            .transpose()?;
        let filter = self.filter.map(|f| f.render(&mut ph)).transpose()?;
        let update = self.update.map(|u| u.render(&mut ph)).transpose()?;
        let (names, values) = ph.into_maps();

        Ok(Expression {
            key_condition,
            filter,
            update,
            names,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{number_value, string_value};

    #[test]
    fn test_empty_builder() {
        assert_eq!(
            ExpressionBuilder::new().build(),
            Err(ExpressionError::EmptyBuilder)
        );
    }

    #[test]
    fn test_key_condition_and_filter_share_placeholders() {
        let expression = ExpressionBuilder::new()
            .with_key_condition(KeyCondition::equal("status", string_value("open")))
            .with_filter(Condition::greater_than("priority", number_value(3)))
            .build()
            .unwrap();

        assert_eq!(expression.key_condition.as_deref(), Some("#n0 = :v0"));
        assert_eq!(expression.filter.as_deref(), Some("#n1 > :v1"));
        assert_eq!(expression.update, None);
        assert_eq!(expression.names.get("#n0").map(String::as_str), Some("status"));
        assert_eq!(expression.names.get("#n1").map(String::as_str), Some("priority"));
        assert_eq!(expression.values.get(":v0"), Some(&string_value("open")));
        assert_eq!(expression.values.get(":v1"), Some(&number_value(3)));
    }

    #[test]
    fn test_optional_filter_none_leaves_filter_unset() {
        let expression = ExpressionBuilder::new()
            .with_key_condition(KeyCondition::equal("PK", string_value("a")))
            .with_optional_filter(None)
            .build()
            .unwrap();

        assert_eq!(expression.filter, None);
        assert_eq!(expression.names.len(), 1);
        assert_eq!(expression.values.len(), 1);
    }

    #[test]
    fn test_update_only() {
        let expression = ExpressionBuilder::new()
            .with_update(Update::new().add("visits", number_value(5)))
            .build()
            .unwrap();

        assert_eq!(expression.update.as_deref(), Some("ADD #n0 :v0"));
        assert_eq!(expression.key_condition, None);
        assert_eq!(expression.values.get(":v0"), Some(&number_value(5)));
    }

    #[test]
    fn test_empty_maps_become_none() {
        let expression = Expression::default();
        assert!(expression.names().is_none());
        assert!(expression.values().is_none());
    }

    #[test]
    fn test_errors_surface_from_build() {
        let result = ExpressionBuilder::new()
            .with_key_condition(KeyCondition::equal("PK", string_value("a")))
            .with_filter(Condition::is_in("state", Vec::new()))
            .build();
        assert_eq!(result, Err(ExpressionError::EmptyOperand("IN")));
    }
}
