use aws_sdk_dynamodb::types::AttributeValue;

use super::condition::Comparator;
use super::placeholders::Placeholders;
use crate::error::ExpressionError;

/// Operators DynamoDB allows on a sort key. `<>` is not one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyComparator {
    Equal,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl From<KeyComparator> for Comparator {
    fn from(op: KeyComparator) -> Self {
        match op {
            KeyComparator::Equal => Comparator::Equal,
            KeyComparator::LessThan => Comparator::LessThan,
            KeyComparator::LessOrEqual => Comparator::LessOrEqual,
            KeyComparator::GreaterThan => Comparator::GreaterThan,
            KeyComparator::GreaterOrEqual => Comparator::GreaterOrEqual,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Compare {
        name: String,
        op: KeyComparator,
        value: AttributeValue,
    },
    Between {
        name: String,
        low: AttributeValue,
        high: AttributeValue,
    },
    BeginsWith {
        name: String,
        prefix: String,
    },
}

/// Key condition scoping a query: partition key equality, optionally
/// narrowed by one sort key constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCondition {
    partition_name: String,
    partition_value: AttributeValue,
    sort: Option<SortKey>,
}

impl KeyCondition {
    /// `partition_name = partition_value`.
    pub fn equal(partition_name: impl Into<String>, partition_value: AttributeValue) -> Self {
        Self {
            partition_name: partition_name.into(),
            partition_value,
            sort: None,
        }
    }

    pub fn and_sort(
        mut self,
        name: impl Into<String>,
        op: KeyComparator,
        value: AttributeValue,
    ) -> Self {
        self.sort = Some(SortKey::Compare {
            name: name.into(),
            op,
            value,
        });
        self
    }

    pub fn and_sort_between(
        mut self,
        name: impl Into<String>,
        low: AttributeValue,
        high: AttributeValue,
    ) -> Self {
        self.sort = Some(SortKey::Between {
            name: name.into(),
            low,
            high,
        });
        self
    }

    pub fn and_sort_begins_with(
        mut self,
        name: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        self.sort = Some(SortKey::BeginsWith {
            name: name.into(),
            prefix: prefix.into(),
        });
        self
    }

    pub(crate) fn render(&self, ph: &mut Placeholders) -> Result<String, ExpressionError> {
        let name = ph.key(&self.partition_name)?;
        let value = ph.value(self.partition_value.clone());
        let partition = format!("{name} = {value}");

        let sort = match &self.sort {
            None => return Ok(partition),
            Some(SortKey::Compare { name, op, value }) => {
                let name = ph.key(name)?;
                let symbol = Comparator::from(*op).symbol();
                format!("{name} {symbol} {}", ph.value(value.clone()))
            }
            Some(SortKey::Between { name, low, high }) => {
                let name = ph.key(name)?;
                let low = ph.value(low.clone());
                let high = ph.value(high.clone());
                format!("{name} BETWEEN {low} AND {high}")
            }
            Some(SortKey::BeginsWith { name, prefix }) => {
                let name = ph.key(name)?;
                let prefix = ph.value(AttributeValue::S(prefix.clone()));
                format!("begins_with({name}, {prefix})")
            }
        };

        Ok(format!("({partition}) AND ({sort})"))
    }
}
