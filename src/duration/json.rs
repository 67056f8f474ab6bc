//! JSON boundary for [`Duration`]
//!
//! Decoding accepts two shapes:
//! - a number: raw nanosecond count (floats truncate toward zero)
//! - a string: parsed with the duration grammar
//!
//! Everything else is `FUNKS-002` (invalid duration format). Encoding is
//! always the canonical string, so any encoded value decodes again through
//! the string branch.
//!
//! The serde impls here are the default for `Duration`, so a plain
//! `#[derive(Deserialize)]` field behaves this way in any self-describing
//! format.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

use super::Duration;
use crate::error::{FunksError, Result};

impl Duration {
    /// Decode an already-parsed JSON value
    pub fn from_json_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(from_number(n)),
            Value::String(s) => Duration::parse(s),
            other => Err(invalid_format(json_kind(other))),
        }
    }

    /// Decode a JSON document holding a single duration (`7`, `"7s"`)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    /// Canonical string as a JSON value
    pub fn to_json_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

fn from_number(n: &Number) -> Duration {
    if let Some(nanos) = n.as_i64() {
        Duration::from_nanos(nanos)
    } else if let Some(nanos) = n.as_u64() {
        from_unsigned(nanos)
    } else {
        from_float(n.as_f64().unwrap_or_default())
    }
}

fn from_unsigned(nanos: u64) -> Duration {
    Duration::from_nanos(i64::try_from(nanos).unwrap_or(i64::MAX))
}

/// `as` truncates toward zero and saturates at the `i64` bounds
fn from_float(nanos: f64) -> Duration {
    Duration::from_nanos(nanos as i64)
}

fn invalid_format(found: &str) -> FunksError {
    FunksError::InvalidDurationFormat {
        found: found.to_string(),
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

impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DurationVisitor)
    }
}

struct DurationVisitor;

impl<'de> Visitor<'de> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a duration string such as \"5s\" or a nanosecond count")
    }

    fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Duration::from_nanos(value))
    }

    fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(from_unsigned(value))
    }

    fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(from_float(value))
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Duration::parse(value).map_err(E::custom)
    }

    fn visit_bool<E>(self, _value: bool) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(E::custom(invalid_format("boolean")))
    }

    fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(E::custom(invalid_format("null")))
    }

    fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(E::custom(invalid_format("null")))
    }

    fn visit_bytes<E>(self, _value: &[u8]) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(E::custom(invalid_format("bytes")))
    }

    fn visit_seq<A>(self, _seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Err(de::Error::custom(invalid_format("array")))
    }

    fn visit_map<M>(self, _map: M) -> std::result::Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        Err(de::Error::custom(invalid_format("object")))
    }
}
