//! URL query encoding for filtered list parameters.

use serde_json::Value;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::filter::FilteredFields;

/// Encode `fields` as `application/x-www-form-urlencoded`, keys in sorted
/// order.
///
/// Only booleans, strings and integers have a query form. Anything else
/// fails with `ApiError::UnsupportedQueryValue`. Empty strings are dropped.
pub fn encode_query(fields: &FilteredFields) -> Result<String, ApiError> {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    // Map order depends on serde_json features; sort explicitly.
    let mut entries: Vec<_> = fields.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (key, value) in entries {
        let text = match value {
            Value::Bool(b) => b.to_string(),
            Value::String(s) => s.clone(),
            Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
            other => {
                return Err(ApiError::UnsupportedQueryValue {
                    key: key.clone(),
                    kind: kind_of(other),
                })
            }
        };
        if !text.is_empty() {
            serializer.append_pair(key, &text);
        }
    }

    Ok(serializer.finish())
}

/// Join `path` and an encoded query, leaving off `?` when there is nothing
/// to append.
pub fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
