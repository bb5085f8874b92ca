//! Loosely-typed parameter values.
//!
//! Request parameters arrive with mixed shapes: a language tag is a string,
//! an enhancement toggle is a boolean, forward-compatible extension fields
//! may be nested objects. [`JsonValue`] models that union explicitly.
//! Deserialisation tries the variants in declaration order, so a JSON
//! string `"true"` stays a string rather than collapsing into a boolean.
//! Arrays and floating-point numbers have no variant and fail to decode,
//! which matches the accepted parameter shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single protocol parameter value.
///
/// Variant order is load-bearing: serde's untagged deserialiser attempts
/// `String`, then `Bool`, then `Integer`, then `Object`, taking the first
/// interpretation that fits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonValue {
    /// A JSON string.
    String(String),
    /// A JSON boolean.
    Bool(bool),
    /// A JSON integer. Floats are rejected at decode time.
    Integer(i64),
    /// A nested JSON object, representable at any depth.
    Object(BTreeMap<String, JsonValue>),
}

impl JsonValue {
    /// Returns the string payload when this value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean payload when this value is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer payload when this value is an integer.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the object payload when this value is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&BTreeMap<String, JsonValue>> {
        match self {
            Self::Object(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &str) -> Result<JsonValue, serde_json::Error> {
        serde_json::from_str(input)
    }

    #[test]
    fn string_true_decodes_as_string() {
        let value = decode(r#""true""#).expect("decode");
        assert_eq!(value, JsonValue::String("true".to_owned()));
    }

    #[test]
    fn bare_true_decodes_as_bool() {
        let value = decode("true").expect("decode");
        assert_eq!(value, JsonValue::Bool(true));
    }

    #[test]
    fn integer_decodes_as_integer() {
        let value = decode("42").expect("decode");
        assert_eq!(value, JsonValue::Integer(42));
    }

    #[test]
    fn nested_object_decodes_at_depth() {
        let value = decode(r#"{"outer":{"inner":{"leaf":1}}}"#).expect("decode");
        let outer = value.as_object().expect("outer object");
        let inner = outer
            .get("outer")
            .and_then(JsonValue::as_object)
            .expect("inner object");
        let leaf = inner
            .get("inner")
            .and_then(JsonValue::as_object)
            .expect("leaf object");
        assert_eq!(leaf.get("leaf"), Some(&JsonValue::Integer(1)));
    }

    #[test]
    fn float_is_rejected() {
        assert!(decode("1.5").is_err());
    }

    #[test]
    fn array_is_rejected() {
        assert!(decode(r#"["a","b"]"#).is_err());
    }

    #[test]
    fn null_is_rejected() {
        assert!(decode("null").is_err());
    }

    #[test]
    fn round_trips_every_variant() {
        let mut object = BTreeMap::new();
        object.insert("name".to_owned(), JsonValue::from("ocr"));
        object.insert("enabled".to_owned(), JsonValue::from(true));
        object.insert("count".to_owned(), JsonValue::from(-7_i64));

        let values = [
            JsonValue::from("hello"),
            JsonValue::from(false),
            JsonValue::from(123_i64),
            JsonValue::Object(object),
        ];

        for value in values {
            let encoded = serde_json::to_string(&value).expect("encode");
            let decoded: JsonValue = serde_json::from_str(&encoded).expect("decode");
            assert_eq!(decoded, value, "round trip failed for {encoded}");
        }
    }

    #[test]
    fn accessors_match_only_their_variant() {
        let value = JsonValue::from("text");
        assert_eq!(value.as_str(), Some("text"));
        assert_eq!(value.as_bool(), None);
        assert_eq!(value.as_integer(), None);
        assert!(value.as_object().is_none());
    }
}
