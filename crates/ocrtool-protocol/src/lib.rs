//! Wire types for the OCR JSON-RPC protocol.
//!
//! This crate defines the value model, request schema, response envelopes
//! and error taxonomy shared between the daemon and its tests. It contains
//! no I/O: parsing consumes a single line of text and every type serialises
//! to exactly the shape written on the wire.
//!
//! The parameter space of the protocol is deliberately narrow. Parameters
//! arrive as JSON scalars or nested objects, never arrays or floating-point
//! numbers; [`value::JsonValue`] encodes that restriction in the type
//! system so call sites match exhaustively instead of probing a dynamic
//! document.

pub mod error;
pub mod ocr;
pub mod request;
pub mod response;
pub mod value;

pub use error::ProtocolError;
pub use ocr::{BoundingBox, OcrLine, OcrResult};
pub use request::RpcRequest;
pub use response::{ErrorEnvelope, JSONRPC_VERSION, ResultEnvelope, RpcErrorBody};
pub use value::JsonValue;
