//! Generic decoded tree.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Decoded but untyped payload data.
///
/// Leaves are always strings; the decoder never guesses numbers or booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredValue {
    Scalar(String),
    Array(Vec<StructuredValue>),
    Object(BTreeMap<String, StructuredValue>),
}

impl StructuredValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            StructuredValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, StructuredValue>> {
        match self {
            StructuredValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Object member lookup. `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&StructuredValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Short shape name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            StructuredValue::Scalar(_) => "string",
            StructuredValue::Array(_) => "array",
            StructuredValue::Object(_) => "object",
        }
    }

    /// Render as JSON (scalars stay JSON strings).
    pub fn to_json(&self) -> Value {
        match self {
            StructuredValue::Scalar(s) => Value::String(s.clone()),
            StructuredValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            StructuredValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<&str> for StructuredValue {
    fn from(s: &str) -> Self {
        StructuredValue::Scalar(s.to_owned())
    }
}
