use aws_sdk_dynamodb::types::AttributeValue;

use super::placeholders::Placeholders;
use crate::error::ExpressionError;

/// Comparison operators usable in filter and condition expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl Comparator {
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
        }
    }
}

/// A filter or condition expression tree.
///
/// Attribute names are document paths (`a.b[0]`); values are native
/// `AttributeValue`s. Trees compose with [`Condition::and`],
/// [`Condition::or`] and `!`.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare {
        name: String,
        op: Comparator,
        value: AttributeValue,
    },
    Between {
        name: String,
        low: AttributeValue,
        high: AttributeValue,
    },
    In {
        name: String,
        values: Vec<AttributeValue>,
    },
    BeginsWith {
        name: String,
        prefix: String,
    },
    Contains {
        name: String,
        operand: AttributeValue,
    },
    Exists(String),
    NotExists(String),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn compare(name: impl Into<String>, op: Comparator, value: AttributeValue) -> Self {
        Self::Compare {
            name: name.into(),
            op,
            value,
        }
    }

    pub fn equal(name: impl Into<String>, value: AttributeValue) -> Self {
        Self::compare(name, Comparator::Equal, value)
    }

    pub fn not_equal(name: impl Into<String>, value: AttributeValue) -> Self {
        Self::compare(name, Comparator::NotEqual, value)
    }

    pub fn less_than(name: impl Into<String>, value: AttributeValue) -> Self {
        Self::compare(name, Comparator::LessThan, value)
    }

    pub fn less_or_equal(name: impl Into<String>, value: AttributeValue) -> Self {
        Self::compare(name, Comparator::LessOrEqual, value)
    }

    pub fn greater_than(name: impl Into<String>, value: AttributeValue) -> Self {
        Self::compare(name, Comparator::GreaterThan, value)
    }

    pub fn greater_or_equal(name: impl Into<String>, value: AttributeValue) -> Self {
        Self::compare(name, Comparator::GreaterOrEqual, value)
    }

    /// Inclusive range.
    pub fn between(name: impl Into<String>, low: AttributeValue, high: AttributeValue) -> Self {
        Self::Between {
            name: name.into(),
            low,
            high,
        }
    }

    pub fn is_in(name: impl Into<String>, values: Vec<AttributeValue>) -> Self {
        Self::In {
            name: name.into(),
            values,
        }
    }

    pub fn begins_with(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::BeginsWith {
            name: name.into(),
            prefix: prefix.into(),
        }
    }

    /// Substring match on strings, membership on sets and lists.
    pub fn contains(name: impl Into<String>, operand: AttributeValue) -> Self {
        Self::Contains {
            name: name.into(),
            operand,
        }
    }

    pub fn exists(name: impl Into<String>) -> Self {
        Self::Exists(name.into())
    }

    pub fn not_exists(name: impl Into<String>) -> Self {
        Self::NotExists(name.into())
    }

    pub fn and(self, other: Condition) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Condition) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    pub(crate) fn render(&self, ph: &mut Placeholders) -> Result<String, ExpressionError> {
        let rendered = match self {
            Self::Compare { name, op, value } => {
                let name = ph.path(name)?;
                format!("{name} {} {}", op.symbol(), ph.value(value.clone()))
            }
            Self::Between { name, low, high } => {
                let name = ph.path(name)?;
                let low = ph.value(low.clone());
                let high = ph.value(high.clone());
                format!("{name} BETWEEN {low} AND {high}")
            }
            Self::In { name, values } => {
                if values.is_empty() {
                    return Err(ExpressionError::EmptyOperand("IN"));
                }
                let name = ph.path(name)?;
                let values: Vec<String> = values.iter().map(|v| ph.value(v.clone())).collect();
                format!("{name} IN ({})", values.join(", "))
            }
            Self::BeginsWith { name, prefix } => {
                let name = ph.path(name)?;
                let prefix = ph.value(AttributeValue::S(prefix.clone()));
                format!("begins_with({name}, {prefix})")
            }
            Self::Contains { name, operand } => {
                let name = ph.path(name)?;
                format!("contains({name}, {})", ph.value(operand.clone()))
            }
            Self::Exists(name) => format!("attribute_exists({})", ph.path(name)?),
            Self::NotExists(name) => format!("attribute_not_exists({})", ph.path(name)?),
            Self::And(left, right) => {
                format!("({}) AND ({})", left.render(ph)?, right.render(ph)?)
            }
            Self::Or(left, right) => {
                format!("({}) OR ({})", left.render(ph)?, right.render(ph)?)
            }
            Self::Not(inner) => format!("NOT ({})", inner.render(ph)?),
        };
        Ok(rendered)
    }
}

impl std::ops::Not for Condition {
    type Output = Condition;

    fn not(self) -> Self::Output {
        Condition::Not(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{number_value, string_value};

    fn render(condition: &Condition) -> Result<String, ExpressionError> {
        condition.render(&mut Placeholders::default())
    }

    #[test]
    fn test_comparisons() {
        let cases = [
            (Condition::equal("a", number_value(1)), "#n0 = :v0"),
            (Condition::not_equal("a", number_value(1)), "#n0 <> :v0"),
            (Condition::less_than("a", number_value(1)), "#n0 < :v0"),
            (Condition::less_or_equal("a", number_value(1)), "#n0 <= :v0"),
            (Condition::greater_than("a", number_value(1)), "#n0 > :v0"),
            (Condition::greater_or_equal("a", number_value(1)), "#n0 >= :v0"),
        ];

        for (condition, expected) in cases {
            assert_eq!(render(&condition).unwrap(), expected);
        }
    }

    #[test]
    fn test_functions() {
        assert_eq!(
            render(&Condition::begins_with("sk", "ORDER#")).unwrap(),
            "begins_with(#n0, :v0)"
        );
        assert_eq!(
            render(&Condition::contains("tags", string_value("red"))).unwrap(),
            "contains(#n0, :v0)"
        );
        assert_eq!(
            render(&Condition::exists("deletedAt")).unwrap(),
            "attribute_exists(#n0)"
        );
        assert_eq!(
            render(&Condition::not_exists("deletedAt")).unwrap(),
            "attribute_not_exists(#n0)"
        );
    }

    #[test]
    fn test_between_and_in() {
        assert_eq!(
            render(&Condition::between("age", number_value(18), number_value(65))).unwrap(),
            "#n0 BETWEEN :v0 AND :v1"
        );
        assert_eq!(
            render(&Condition::is_in(
                "status",
                vec![string_value("open"), string_value("pending")]
            ))
            .unwrap(),
            "#n0 IN (:v0, :v1)"
        );
    }

    #[test]
    fn test_empty_in_is_rejected() {
        assert_eq!(
            render(&Condition::is_in("status", Vec::new())),
            Err(ExpressionError::EmptyOperand("IN"))
        );
    }

    #[test]
    fn test_composition() {
        let condition = Condition::equal("status", string_value("open"))
            .and(Condition::greater_than("priority", number_value(2)))
            .or(!Condition::exists("owner"));

        assert_eq!(
            render(&condition).unwrap(),
            "((#n0 = :v0) AND (#n1 > :v1)) OR (NOT (attribute_exists(#n2)))"
        );
    }

    #[test]
    fn test_invalid_name_propagates() {
        let condition = Condition::equal("ok", number_value(1))
            .and(Condition::equal("bad..path", number_value(2)));
        assert!(matches!(
            render(&condition),
            Err(ExpressionError::InvalidName(_))
        ));
    }
}
