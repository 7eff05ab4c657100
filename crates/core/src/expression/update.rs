use aws_sdk_dynamodb::types::AttributeValue;

use super::placeholders::Placeholders;
use crate::error::ExpressionError;

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Add { name: String, value: AttributeValue },
    Delete { name: String, value: AttributeValue },
    Remove { name: String },
    Set { name: String, value: AttributeValue },
}

/// An update expression made of `ADD`, `DELETE`, `REMOVE` and `SET` actions.
///
/// Clauses are always rendered in that order regardless of the order the
/// actions were added; within a clause, insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    actions: Vec<Action>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically adds `value` to a number attribute, or its elements to a set.
    pub fn add(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.actions.push(Action::Add {
            name: name.into(),
            value,
        });
        self
    }

    /// Removes the elements of `value` from a set attribute.
    pub fn delete(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.actions.push(Action::Delete {
            name: name.into(),
            value,
        });
        self
    }

    pub fn remove(mut self, name: impl Into<String>) -> Self {
        self.actions.push(Action::Remove { name: name.into() });
        self
    }

    pub fn set(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.actions.push(Action::Set {
            name: name.into(),
            value,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub(crate) fn render(&self, ph: &mut Placeholders) -> Result<String, ExpressionError> {
        if self.actions.is_empty() {
            return Err(ExpressionError::EmptyOperand("update"));
        }

        let mut add = Vec::new();
        let mut delete = Vec::new();
        let mut remove = Vec::new();
        let mut set = Vec::new();

        for action in &self.actions {
            match action {
                Action::Add { name, value } => {
                    let name = ph.path(name)?;
                    add.push(format!("{name} {}", ph.value(value.clone())));
                }
                Action::Delete { name, value } => {
                    let name = ph.path(name)?;
                    delete.push(format!("{name} {}", ph.value(value.clone())));
                }
                Action::Remove { name } => remove.push(ph.path(name)?),
                Action::Set { name, value } => {
                    let name = ph.path(name)?;
                    set.push(format!("{name} = {}", ph.value(value.clone())));
                }
            }
        }

        let clauses: Vec<String> = [
            ("ADD", add),
            ("DELETE", delete),
            ("REMOVE", remove),
            ("SET", set),
        ]
        .into_iter()
        .filter(|(_, parts)| !parts.is_empty())
        .map(|(keyword, parts)| format!("{keyword} {}", parts.join(", ")))
        .collect();

        Ok(clauses.join(" "))
    }
}
