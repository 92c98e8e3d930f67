//! Normalizes raw model payloads into a `LandmarkRecord`.
//!
//! Models return whatever JSON shape they like for a field: a string, a
//! list of architects, a year as a number, a dimensions object. Each value
//! is lifted into [`RawValue`] and then flattened by [`coerce`]:
//!
//! 1. sequence → elements joined with `", "`
//! 2. integer → decimal string
//! 3. mapping → `"key: value"` pairs joined with `"; "`, in key order
//! 4. text → unchanged
//!
//! The normalizer never invents values: absent and `null` fields stay
//! absent, and the `no_value` sentinel is just another string.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ValidationError;
use crate::types::record::{LandmarkField, LandmarkRecord, ERROR_KEY};

/// A field value in one of the shapes the normalizer accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Integer(i128),
    Sequence(Vec<String>),
    Mapping(Vec<(String, String)>),
}

impl RawValue {
    /// Lift a JSON value. `Ok(None)` means the field is absent (`null`).
    pub fn from_json(field: &str, value: Value) -> Result<Option<Self>, ValidationError> {
        let raw = match value {
            Value::Null => return Ok(None),
            Value::Array(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(|item| scalar_to_string(field, item))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::Number(n) => match n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from)) {
                Some(i) => Self::Integer(i),
                None => return Err(unsupported(field, "floating-point number")),
            },
            Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(k, v)| scalar_to_string(field, v).map(|s| (k, s)))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::String(s) => Self::Text(s),
            Value::Bool(_) => return Err(unsupported(field, "boolean")),
        };
        Ok(Some(raw))
    }
}

/// Flatten a raw value into its single-string form.
pub fn coerce(value: RawValue) -> String {
    match value {
        RawValue::Sequence(items) => items.join(", "),
        RawValue::Integer(i) => i.to_string(),
        RawValue::Mapping(pairs) => pairs
            .into_iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; "),
        RawValue::Text(s) => s,
    }
}

fn scalar_to_string(field: &str, value: Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(unsupported(field, "null inside a list or object")),
        Value::Array(_) => Err(unsupported(field, "nested list")),
        Value::Object(_) => Err(unsupported(field, "nested object")),
    }
}

fn unsupported(field: &str, kind: &str) -> ValidationError {
    ValidationError::UnsupportedValue {
        field: field.to_string(),
        kind: kind.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Converts model payloads into records.
///
/// Unknown keys are ignored unless the normalizer is strict.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer {
    strict: bool,
}

impl ResponseNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A normalizer that rejects keys outside the record schema.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parse completion text and normalize it.
    pub fn normalize_str(&self, text: &str) -> Result<LandmarkRecord, ValidationError> {
        let value: Value = serde_json::from_str(text)?;
        self.normalize_value(value)
    }

    pub fn normalize_value(&self, value: Value) -> Result<LandmarkRecord, ValidationError> {
        match value {
            Value::Object(map) => self.normalize(map),
            other => Err(ValidationError::NotAnObject {
                kind: json_kind(&other),
            }),
        }
    }

    /// Normalize a field-name → JSON-value mapping.
    pub fn normalize(&self, payload: Map<String, Value>) -> Result<LandmarkRecord, ValidationError> {
        let mut record = LandmarkRecord::new();

        for (key, value) in payload {
            if key == ERROR_KEY {
                if let Some(raw) = RawValue::from_json(&key, value)? {
                    record = record.with_error(coerce(raw));
                }
                continue;
            }

            let Some(field) = LandmarkField::from_key(&key) else {
                if self.strict {
                    return Err(ValidationError::UnknownField { field: key });
                }
                debug!(field = %key, "Ignoring unrecognized landmark field");
                continue;
            };

            if let Some(raw) = RawValue::from_json(&key, value)? {
                record = record.with(field, coerce(raw));
            }
        }

        Ok(record)
    }
}
