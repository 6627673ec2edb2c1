//! Helpers for the comma-joined upstream lists.

use serde_json::Value;

use crate::record::LIST_SEPARATOR;

/// Splits a flat list value into its entries.
///
/// Strings are split on `", "`; an empty string has no entries. A number is a
/// single entry (its decimal text). Anything else (`null`, arrays, objects)
/// counts as no data.
pub fn split_list(value: &Value) -> Vec<Option<String>> {
    match value {
        Value::String(s) if s.is_empty() => Vec::new(),
        Value::String(s) => s
            .split(LIST_SEPARATOR)
            .map(|part| Some(part.to_string()))
            .collect(),
        Value::Number(n) => vec![Some(n.to_string())],
        _ => Vec::new(),
    }
}

/// Resizes `values` to exactly `len`: trailing entries beyond `len` are
/// dropped, missing ones are filled with `None`.
pub fn pad_or_truncate<T>(values: &mut Vec<Option<T>>, len: usize) {
    values.truncate(len);
    values.resize_with(len, || None);
}
