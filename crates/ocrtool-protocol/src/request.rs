//! Request-line parsing.
//!
//! The transport is newline-delimited: each request arrives as one line of
//! text. Lines whose first non-whitespace character is not `{` are not
//! requests at all (stray output, blank lines) and are skipped without an
//! error so the session keeps reading.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ProtocolError;
use crate::value::JsonValue;

/// A parsed JSON-RPC request.
///
/// Created once per input line and immutable afterwards. Absent `params`
/// is an empty map; absent `id` is `None` and echoes back as `null`.
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    /// Protocol version string, required on every request.
    pub jsonrpc: String,
    /// Request id of any value shape, or `None` for id-less requests.
    #[serde(default)]
    pub id: Option<JsonValue>,
    /// The method name, matched exactly by the dispatcher.
    pub method: String,
    /// Method parameters keyed by name.
    #[serde(default)]
    pub params: BTreeMap<String, JsonValue>,
}

impl RpcRequest {
    /// Parses one line of input.
    ///
    /// Returns `Ok(None)` when the line should be silently skipped (empty,
    /// or not starting with `{` after trimming).
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedRequest`] when the line looks like
    /// a JSON object but does not decode as a request.
    pub fn parse(line: &str) -> Result<Option<Self>, ProtocolError> {
        let trimmed = line.trim();
        if !trimmed.starts_with('{') {
            return Ok(None);
        }

        serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|error| ProtocolError::malformed_request(error.to_string()))
    }

    /// Returns the string value of a parameter, if present with that shape.
    ///
    /// Parameters carrying a non-string value are treated as absent, the
    /// resolver's contract for every string-typed field.
    #[must_use]
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(JsonValue::as_str)
    }

    /// Returns the boolean value of a parameter, if present with that shape.
    #[must_use]
    pub fn param_bool(&self, key: &str) -> Option<bool> {
        self.params.get(key).and_then(JsonValue::as_bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_request() {
        let line = r#"{"jsonrpc":"2.0","id":1,"method":"ocr_text","params":{"image":"a.png"}}"#;
        let request = RpcRequest::parse(line).expect("parse").expect("request");
        assert_eq!(request.jsonrpc, "2.0");
        assert_eq!(request.id, Some(JsonValue::Integer(1)));
        assert_eq!(request.method, "ocr_text");
        assert_eq!(request.param_str("image"), Some("a.png"));
    }

    #[test]
    fn skips_blank_and_non_object_lines() {
        assert!(RpcRequest::parse("").expect("parse").is_none());
        assert!(RpcRequest::parse("   \t").expect("parse").is_none());
        assert!(RpcRequest::parse("ready to serve").expect("parse").is_none());
        assert!(RpcRequest::parse("[1,2,3]").expect("parse").is_none());
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let line = "  {\"jsonrpc\":\"2.0\",\"method\":\"shutdown\"}  \n";
        let request = RpcRequest::parse(line).expect("parse").expect("request");
        assert_eq!(request.method, "shutdown");
    }

    #[test]
    fn absent_params_is_empty_map() {
        let line = r#"{"jsonrpc":"2.0","id":"x","method":"initialize"}"#;
        let request = RpcRequest::parse(line).expect("parse").expect("request");
        assert!(request.params.is_empty());
    }

    #[test]
    fn absent_and_null_ids_are_none() {
        let absent = RpcRequest::parse(r#"{"jsonrpc":"2.0","method":"shutdown"}"#)
            .expect("parse")
            .expect("request");
        assert!(absent.id.is_none());

        let null = RpcRequest::parse(r#"{"jsonrpc":"2.0","id":null,"method":"shutdown"}"#)
            .expect("parse")
            .expect("request");
        assert!(null.id.is_none());
    }

    #[test]
    fn truncated_object_is_a_malformed_request() {
        let result = RpcRequest::parse(r#"{"jsonrpc":"2.0","method":"#);
        assert!(matches!(
            result,
            Err(ProtocolError::MalformedRequest { .. })
        ));
    }

    #[test]
    fn missing_method_is_a_malformed_request() {
        let result = RpcRequest::parse(r#"{"jsonrpc":"2.0","id":1}"#);
        assert!(matches!(
            result,
            Err(ProtocolError::MalformedRequest { .. })
        ));
    }

    #[test]
    fn array_params_are_a_malformed_request() {
        let result = RpcRequest::parse(r#"{"jsonrpc":"2.0","method":"ocr_text","params":[1]}"#);
        assert!(matches!(
            result,
            Err(ProtocolError::MalformedRequest { .. })
        ));
    }

    #[test]
    fn mixed_typed_params_read_as_absent() {
        let line = r#"{"jsonrpc":"2.0","method":"ocr_text","params":{"image":true,"enhanced":"yes"}}"#;
        let request = RpcRequest::parse(line).expect("parse").expect("request");
        assert!(request.param_str("image").is_none());
        assert!(request.param_bool("enhanced").is_none());
    }
}
