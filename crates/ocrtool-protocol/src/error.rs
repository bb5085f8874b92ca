//! Error taxonomy for the request protocol.
//!
//! Protocol failures are always surfaced to the caller as structured
//! JSON-RPC errors and never terminate the session. Collaborator failures
//! (image acquisition, recognition) deliberately do not appear here: they
//! are downgraded to empty results at the dispatch boundary and never reach
//! the wire as errors.

use thiserror::Error;

use crate::response::RpcErrorBody;

/// JSON-RPC error code for an unknown method.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// JSON-RPC error code for invalid parameters or a malformed request.
pub const INVALID_PARAMS: i64 = -32602;

/// Errors surfaced to callers as JSON-RPC error envelopes.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The request line was not a decodable JSON-RPC request.
    ///
    /// Reported with `id: null` because no reliable id could be recovered
    /// from the broken line.
    #[error("malformed request: {details}")]
    MalformedRequest {
        /// The underlying decode failure, forwarded as the `details` field.
        details: String,
    },

    /// The method name matched none of the fixed method set.
    #[error("method not found: {method}")]
    MethodNotFound {
        /// The unrecognised method name.
        method: String,
    },

    /// Method parameters violated a validation rule.
    #[error("invalid params: {message}")]
    InvalidParams {
        /// Human-readable description of the violated rule.
        message: String,
        /// Optional hint, e.g. the list of accepted values.
        hint: Option<String>,
    },
}

impl ProtocolError {
    /// Creates a malformed request error from a decode failure.
    pub fn malformed_request(details: impl Into<String>) -> Self {
        Self::MalformedRequest {
            details: details.into(),
        }
    }

    /// Creates a method-not-found error.
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            method: method.into(),
        }
    }

    /// Creates an invalid-params error without a hint.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
            hint: None,
        }
    }

    /// Creates an invalid-params error carrying a hint for the caller.
    pub fn invalid_params_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Returns the JSON-RPC error code for this error.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::MethodNotFound { .. } => METHOD_NOT_FOUND,
            Self::MalformedRequest { .. } | Self::InvalidParams { .. } => INVALID_PARAMS,
        }
    }

    /// Builds the wire representation of this error.
    ///
    /// The malformed-request message is fixed so scripted callers can match
    /// on it; the decode cause travels in `details`.
    #[must_use]
    pub fn to_body(&self) -> RpcErrorBody {
        match self {
            Self::MalformedRequest { details } => RpcErrorBody {
                code: INVALID_PARAMS,
                message: "Invalid request: Ensure JSON is complete and contains fields like \
                          'method' and 'params'."
                    .to_owned(),
                hint: None,
                details: Some(details.clone()),
            },
            Self::MethodNotFound { .. } => RpcErrorBody {
                code: METHOD_NOT_FOUND,
                message: "Method not found".to_owned(),
                hint: None,
                details: None,
            },
            Self::InvalidParams { message, hint } => RpcErrorBody {
                code: INVALID_PARAMS,
                message: message.clone(),
                hint: hint.clone(),
                details: None,
            },
        }
    }
}
