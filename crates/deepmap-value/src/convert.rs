//! Conversions from `serde_json` documents.
//!
//! JSON has no date or callable types, so converted values only ever contain
//! null, primitives, arrays and objects. Date-looking strings stay strings.

use std::sync::Arc;

use crate::error::{ValueError, ValueResult};
use crate::value::Value;

impl TryFrom<&serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(json: &serde_json::Value) -> ValueResult<Self> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(
                n.as_f64()
                    .ok_or_else(|| ValueError::InvalidNumber(n.to_string()))?,
            ),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::Array(Arc::new(
                items.iter().map(Value::try_from).collect::<ValueResult<_>>()?,
            )),
            serde_json::Value::Object(map) => Value::Object(Arc::new(
                map.iter()
                    .map(|(k, v)| -> ValueResult<(String, Value)> {
                        Ok((k.clone(), Value::try_from(v)?))
                    })
                    .collect::<ValueResult<_>>()?,
            )),
        })
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(json: serde_json::Value) -> ValueResult<Self> {
        Value::try_from(&json)
    }
}

impl Value {
    /// Parse a JSON document.
    pub fn from_json_str(text: &str) -> ValueResult<Self> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Value::try_from(&json)
    }
}
