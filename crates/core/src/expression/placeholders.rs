//! Placeholder allocation for expression attribute names and values.
//!
//! Every path segment becomes `#nN` and every value becomes `:vN`, numbered
//! in allocation order. A segment name that appears twice reuses its
//! placeholder; values never do.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::ExpressionError;

#[derive(Debug, Default)]
pub(crate) struct Placeholders {
    names: HashMap<String, String>,
    by_name: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl Placeholders {
    /// Renders a document path such as `a.b[0].c` with placeholders.
    pub(crate) fn path(&mut self, path: &str) -> Result<String, ExpressionError> {
        let mut rendered = Vec::new();

        for segment in path.split('.') {
            let (name, indexes) = match segment.find('[') {
                Some(pos) => segment.split_at(pos),
                None => (segment, ""),
            };

            if name.is_empty() || name.contains(']') || !valid_indexes(indexes) {
                return Err(ExpressionError::InvalidName(path.to_string()));
            }

            let placeholder = self.segment(name);
            rendered.push(format!("{placeholder}{indexes}"));
        }

        Ok(rendered.join("."))
    }

    /// Renders a key attribute. The name is taken literally, so `user.id`
    /// is one attribute, not a path.
    pub(crate) fn key(&mut self, name: &str) -> Result<String, ExpressionError> {
        if name.is_empty() {
            return Err(ExpressionError::InvalidName(name.to_string()));
        }
        Ok(self.segment(name))
    }

    pub(crate) fn value(&mut self, value: AttributeValue) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values.insert(placeholder.clone(), value);
        placeholder
    }

    pub(crate) fn into_maps(self) -> (HashMap<String, String>, HashMap<String, AttributeValue>) {
        (self.names, self.values)
    }

    fn segment(&mut self, name: &str) -> String {
        if let Some(existing) = self.by_name.get(name) {
            return existing.clone();
        }

        let placeholder = format!("#n{}", self.names.len());
        self.names.insert(placeholder.clone(), name.to_string());
        self.by_name.insert(name.to_string(), placeholder.clone());
        placeholder
    }
}

/// Accepts zero or more `[digits]` groups and nothing else.
fn valid_indexes(mut rest: &str) -> bool {
    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return false;
        };
        let Some(end) = inner.find(']') else {
            return false;
        };

        let digits = &inner[..end];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        rest = &inner[end + 1..];
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        let mut ph = Placeholders::default();
        assert_eq!(ph.path("status").unwrap(), "#n0");

        let (names, _) = ph.into_maps();
        assert_eq!(names.get("#n0").map(String::as_str), Some("status"));
    }

    #[test]
    fn test_nested_path_with_index() {
        let mut ph = Placeholders::default();
        assert_eq!(ph.path("address.lines[1].zip").unwrap(), "#n0.#n1[1].#n2");
        assert_eq!(ph.path("matrix[0][2]").unwrap(), "#n3[0][2]");
    }

    #[test]
    fn test_repeated_segment_reuses_placeholder() {
        let mut ph = Placeholders::default();
        assert_eq!(ph.path("count").unwrap(), "#n0");
        assert_eq!(ph.path("stats.count").unwrap(), "#n1.#n0");

        let (names, _) = ph.into_maps();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_invalid_paths() {
        let mut ph = Placeholders::default();
        for path in ["", "a..b", ".a", "a.", "a[", "a[]", "a[x]", "a[1]b", "[0]", "a]"] {
            assert_eq!(
                ph.path(path),
                Err(ExpressionError::InvalidName(path.to_string())),
                "path {path:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_key_names_are_literal() {
        let mut ph = Placeholders::default();
        assert_eq!(ph.key("pk").unwrap(), "#n0");
        assert_eq!(ph.key("user.id").unwrap(), "#n1");
        assert_eq!(ph.key("a[0]").unwrap(), "#n2");
        assert_eq!(ph.key("user.id").unwrap(), "#n1");
        assert_eq!(ph.key(""), Err(ExpressionError::InvalidName(String::new())));

        let (names, _) = ph.into_maps();
        assert_eq!(names.get("#n1").map(String::as_str), Some("user.id"));
        assert_eq!(names.get("#n2").map(String::as_str), Some("a[0]"));
    }

    #[test]
    fn test_values_are_numbered_in_order() {
        let mut ph = Placeholders::default();
        assert_eq!(ph.value(AttributeValue::S("a".to_string())), ":v0");
        assert_eq!(ph.value(AttributeValue::S("a".to_string())), ":v1");

        let (_, values) = ph.into_maps();
        assert_eq!(values.len(), 2);
    }
}
