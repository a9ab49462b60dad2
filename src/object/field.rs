//! Field Value Type
//!
//! Tagged union stored under each field of a node: either an opaque
//! scalar, passed through untouched, or a child node created for a
//! value that was itself a mapping.

use serde_json::Value as JsonValue;

use super::map_object::MapObject;

#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Scalar(JsonValue),
    Object(MapObject),
}

impl Field {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(value) => json_type_name(value),
            Self::Object(_) => "object",
        }
    }

    pub fn as_scalar(&self) -> Option<&JsonValue> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&MapObject> {
        match self {
            Self::Object(node) => Some(node),
            Self::Scalar(_) => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut MapObject> {
        match self {
            Self::Object(node) => Some(node),
            Self::Scalar(_) => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Raw-view rendition: original keys restored in nested nodes.
    pub(crate) fn to_raw(&self) -> JsonValue {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Object(node) => JsonValue::Object(node.dict()),
        }
    }

    /// Sanitized-view rendition: rewritten keys in nested nodes.
    pub(crate) fn to_sanitized(&self) -> JsonValue {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Object(node) => JsonValue::Object(node.export()),
        }
    }
}

impl From<JsonValue> for Field {
    fn from(value: JsonValue) -> Self {
        Self::Scalar(value)
    }
}

impl From<MapObject> for Field {
    fn from(node: MapObject) -> Self {
        Self::Object(node)
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Self::Scalar(JsonValue::from(value))
    }
}

impl From<i64> for Field {
    fn from(value: i64) -> Self {
        Self::Scalar(JsonValue::from(value))
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Self::Scalar(JsonValue::from(value))
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Self::Scalar(JsonValue::from(value))
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Self::Scalar(JsonValue::from(value))
    }
}

pub(crate) fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
