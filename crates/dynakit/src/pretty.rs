//! Diagnostic pretty-printing to standard error.

use dynakit_core::{from_records, ConversionError, Record};
use serde::Serialize;

/// Serializes `value` as indented JSON.
pub fn pretty_string<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Writes `value` as indented JSON to standard error.
///
/// Serialization failures are logged, never returned.
pub fn pretty_print<T: Serialize + ?Sized>(value: &T) {
    match pretty_string(value) {
        Ok(text) => anstream::eprintln!("{text}"),
        Err(err) => tracing::error!(error = %err, "Failed to serialize value for printing"),
    }
}

/// Renders records as a JSON array of plain objects.
///
/// Binary attributes have no JSON form and make the conversion fail.
pub fn records_to_json(records: &[Record]) -> Result<serde_json::Value, ConversionError> {
    from_records::<serde_json::Value>(records.to_vec()).map(serde_json::Value::Array)
}

/// Writes records as indented JSON to standard error.
pub fn pretty_print_records(records: &[Record]) {
    match records_to_json(records) {
        Ok(json) => pretty_print(&json),
        Err(err) => tracing::error!(error = %err, "Failed to convert records for printing"),
    }
}
