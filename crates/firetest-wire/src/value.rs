//! Firestore document field values (REST JSON encoding).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Firestore document field value.
///
/// Values travel as single-key JSON objects tagged with the value kind,
/// e.g. `{"stringValue": "x"}`. 64-bit integers are string-encoded so they
/// survive JSON number precision limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    /// Explicit null, `{"nullValue": null}`.
    NullValue(()),

    /// Boolean value.
    BooleanValue(bool),

    /// 64-bit integer, string-encoded on the wire.
    IntegerValue(#[serde(with = "integer_string")] i64),

    /// Double-precision float.
    DoubleValue(f64),

    /// RFC 3339 timestamp.
    TimestampValue(DateTime<Utc>),

    /// UTF-8 string.
    StringValue(String),

    /// Ordered list of values.
    ArrayValue(ArrayValue),

    /// Nested set of named fields.
    MapValue(MapValue),
}

/// Wrapper carrying the elements of an `arrayValue`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

/// Wrapper carrying the fields of a `mapValue`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    /// Builds a string value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::StringValue(value.into())
    }

    /// Builds an integer value.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::IntegerValue(value)
    }

    /// Builds a boolean value.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::BooleanValue(value)
    }

    /// Builds a double value.
    #[must_use]
    pub const fn double(value: f64) -> Self {
        Self::DoubleValue(value)
    }

    /// Builds a timestamp value.
    #[must_use]
    pub const fn timestamp(value: DateTime<Utc>) -> Self {
        Self::TimestampValue(value)
    }

    /// Builds an explicit null value.
    #[must_use]
    pub const fn null() -> Self {
        Self::NullValue(())
    }

    /// Builds an array value.
    #[must_use]
    pub fn array(values: impl Into<Vec<Value>>) -> Self {
        Self::ArrayValue(ArrayValue {
            values: values.into(),
        })
    }

    /// Builds a map value.
    #[must_use]
    pub fn map(fields: BTreeMap<String, Value>) -> Self {
        Self::MapValue(MapValue { fields })
    }

    /// Returns the value as a string if applicable.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::StringValue(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an integer if applicable.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::IntegerValue(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a boolean if applicable.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::BooleanValue(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as a timestamp if applicable.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::TimestampValue(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the nested fields if this is a map value.
    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::MapValue(m) => Some(&m.fields),
            _ => None,
        }
    }
}

mod integer_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
