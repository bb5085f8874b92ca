//! Response envelopes written to the primary stream.
//!
//! Two envelope shapes exist: a success envelope carrying an arbitrary
//! `result` payload and an error envelope carrying an [`RpcErrorBody`].
//! Both echo the request id, serialising an unrecoverable or absent id as
//! `null`.

use serde::Serialize;

use crate::error::ProtocolError;
use crate::value::JsonValue;

/// The protocol version stamped on every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Wire shape of a JSON-RPC error object.
#[derive(Debug, Clone, Serialize)]
pub struct RpcErrorBody {
    /// JSON-RPC error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
    /// Optional hint, omitted from the wire when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Optional diagnostic details, omitted from the wire when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A JSON-RPC success envelope.
#[derive(Debug, Serialize)]
pub struct ResultEnvelope<T> {
    /// Always [`JSONRPC_VERSION`].
    pub jsonrpc: &'static str,
    /// The request id, `null` when the request carried none.
    pub id: Option<JsonValue>,
    /// The method result payload.
    pub result: T,
}

impl<T: Serialize> ResultEnvelope<T> {
    /// Wraps a result payload in an envelope echoing the given id.
    pub fn new(id: Option<JsonValue>, result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

/// A JSON-RPC error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Always [`JSONRPC_VERSION`].
    pub jsonrpc: &'static str,
    /// The request id, `null` when none could be recovered.
    pub id: Option<JsonValue>,
    /// The structured error.
    pub error: RpcErrorBody,
}

impl ErrorEnvelope {
    /// Builds an error envelope for the given protocol error.
    #[must_use]
    pub fn new(id: Option<JsonValue>, error: &ProtocolError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            error: error.to_body(),
        }
    }
}
