//! The record model and the conversion capabilities callers implement.
//!
//! A record is DynamoDB's native item representation: a map from attribute
//! name to a type-tagged `AttributeValue`.

use std::collections::HashMap;
use std::fmt::Display;

use aws_sdk_dynamodb::types::AttributeValue;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ConversionError;

/// A single DynamoDB item.
pub type Record = HashMap<String, AttributeValue>;

/// Anything that can produce one record.
pub trait Payload {
    fn payload(&self) -> Result<Record, ConversionError>;
}

/// Anything that can produce a sequence of records.
pub trait Payloads {
    fn payloads(&self) -> Result<Vec<Record>, ConversionError>;
}

impl Payload for Record {
    fn payload(&self) -> Result<Record, ConversionError> {
        Ok(self.clone())
    }
}

impl<T: Payload> Payloads for [T] {
    fn payloads(&self) -> Result<Vec<Record>, ConversionError> {
        self.iter().map(Payload::payload).collect()
    }
}

impl<T: Payload> Payloads for Vec<T> {
    fn payloads(&self) -> Result<Vec<Record>, ConversionError> {
        self.as_slice().payloads()
    }
}

/// Adapts any `Serialize` value into a [`Payload`] through `serde_dynamo`.
///
/// The value must serialize to a map (a struct or a map type); anything else
/// is a [`ConversionError::Serialize`].
#[derive(Debug, Clone, Copy)]
pub struct SerdePayload<'a, T: ?Sized>(pub &'a T);

impl<T: Serialize + ?Sized> Payload for SerdePayload<'_, T> {
    fn payload(&self) -> Result<Record, ConversionError> {
        serde_dynamo::to_item(self.0).map_err(|e| ConversionError::Serialize(e.to_string()))
    }
}

/// Deserializes one record into `T`.
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, ConversionError> {
    serde_dynamo::from_item(record).map_err(|e| ConversionError::Deserialize(e.to_string()))
}

/// Deserializes every record into `T`, failing on the first bad record.
pub fn from_records<T: DeserializeOwned>(records: Vec<Record>) -> Result<Vec<T>, ConversionError> {
    records.into_iter().map(from_record).collect()
}

/// `S` attribute.
pub fn string_value(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

/// `N` attribute. DynamoDB carries numbers as decimal strings.
pub fn number_value(value: impl Display) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

/// `BOOL` attribute.
pub fn bool_value(value: bool) -> AttributeValue {
    AttributeValue::Bool(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Visit {
        site: String,
        hits: i64,
        tags: Vec<String>,
    }

    fn sample_visit() -> Visit {
        Visit {
            site: "example.com".to_string(),
            hits: 42,
            tags: vec!["news".to_string()],
        }
    }

    struct Broken;

    impl Payload for Broken {
        fn payload(&self) -> Result<Record, ConversionError> {
            Err(ConversionError::Serialize("broken".to_string()))
        }
    }

    #[test]
    fn test_serde_payload_produces_native_attributes() {
        let visit = sample_visit();
        let record = SerdePayload(&visit).payload().unwrap();

        assert_eq!(record.get("site"), Some(&string_value("example.com")));
        assert_eq!(record.get("hits"), Some(&number_value(42)));
        assert!(matches!(record.get("tags"), Some(AttributeValue::L(list)) if list.len() == 1));
    }

    #[test]
    fn test_serde_payload_rejects_non_map() {
        let result = SerdePayload(&17_u32).payload();
        assert!(matches!(result, Err(ConversionError::Serialize(_))));
    }

    #[test]
    fn test_from_record_reads_back_struct() {
        let visit = sample_visit();
        let record = SerdePayload(&visit).payload().unwrap();
        let parsed: Visit = from_record(record).unwrap();
        assert_eq!(parsed, visit);
    }

    #[test]
    fn test_from_record_missing_field() {
        let mut record = Record::new();
        record.insert("site".to_string(), string_value("example.com"));

        let result: Result<Visit, _> = from_record(record);
        assert!(matches!(result, Err(ConversionError::Deserialize(_))));
    }

    #[test]
    fn test_payloads_stops_at_first_failure() {
        let good = Record::from([("id".to_string(), string_value("a"))]);
        let records = vec![good.clone(), good];
        assert_eq!(records.payloads().unwrap().len(), 2);

        let broken = vec![Broken, Broken];
        assert!(broken.payloads().is_err());
    }

    #[test]
    fn test_value_helpers() {
        assert_eq!(string_value("x"), AttributeValue::S("x".to_string()));
        assert_eq!(number_value(-3), AttributeValue::N("-3".to_string()));
        assert_eq!(number_value(1.5), AttributeValue::N("1.5".to_string()));
        assert_eq!(bool_value(true), AttributeValue::Bool(true));
    }
}
