//! Method routing for the fixed JSON-RPC surface.
//!
//! Routes a parsed request to one of the fixed methods and produces either
//! a result payload or a structured error. The router owns the two
//! collaborator capabilities but carries no per-request state; requests
//! are handled strictly one at a time.

use std::io::Write;

use serde::Serialize;
use tracing::{debug, warn};

use ocrtool_protocol::{OcrResult, ProtocolError, ResultEnvelope, RpcRequest};

use crate::image::AcquireImage;
use crate::recognizer::RecogniseText;

use super::params::{self, ResolvedOcrRequest};
use super::render;
use super::response::{ResponseError, ResponseWriter};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Protocol revision reported by `initialize`.
const PROTOCOL_REVISION: &str = "2024-11-05";

/// What the session loop should do after a dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading requests.
    Continue,
    /// Terminal state: stop reading, end the process.
    Shutdown,
}

/// The fixed method set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    OcrText,
    Initialize,
    Shutdown,
    Cancelled,
}

impl Method {
    /// Matches a method name exactly; anything else is unknown.
    fn parse(name: &str) -> Option<Self> {
        match name {
            "ocr_text" => Some(Self::OcrText),
            "initialize" => Some(Self::Initialize),
            "shutdown" => Some(Self::Shutdown),
            "notifications/cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Capability and metadata payload of an `initialize` response.
#[derive(Debug, Serialize)]
struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    protocol_version: &'static str,
    metadata: ServerMetadata,
}

#[derive(Debug, Serialize)]
struct ServerMetadata {
    name: &'static str,
    description: &'static str,
    version: &'static str,
}

impl InitializeResult {
    const fn current() -> Self {
        Self {
            protocol_version: PROTOCOL_REVISION,
            metadata: ServerMetadata {
                name: env!("CARGO_PKG_NAME"),
                description: "Local OCR tool speaking JSON-RPC over stdio",
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

/// Routes requests to method handlers.
#[derive(Debug)]
pub struct MethodRouter<A, R> {
    acquirer: A,
    recognizer: R,
}

impl<A: AcquireImage, R: RecogniseText> MethodRouter<A, R> {
    /// Creates a router over the two collaborator capabilities.
    pub const fn new(acquirer: A, recognizer: R) -> Self {
        Self {
            acquirer,
            recognizer,
        }
    }

    /// Dispatches one request and writes its response.
    ///
    /// Protocol errors become error envelopes on the primary stream;
    /// collaborator failures become empty results. Neither terminates the
    /// session.
    pub fn dispatch<W: Write>(
        &self,
        request: &RpcRequest,
        writer: &mut ResponseWriter<W>,
    ) -> Result<Outcome, ResponseError> {
        let Some(method) = Method::parse(&request.method) else {
            warn!(target: DISPATCH_TARGET, method = %request.method, "method not found");
            writer.write_error(
                request.id.clone(),
                &ProtocolError::method_not_found(&request.method),
            )?;
            return Ok(Outcome::Continue);
        };

        debug!(target: DISPATCH_TARGET, method = %request.method, "dispatching request");

        match method {
            Method::OcrText => self.handle_ocr_text(request, writer),
            Method::Initialize => {
                writer.write_envelope(&ResultEnvelope::new(
                    request.id.clone(),
                    InitializeResult::current(),
                ))?;
                Ok(Outcome::Continue)
            }
            Method::Shutdown => {
                writer.write_envelope(&ResultEnvelope::new(request.id.clone(), ()))?;
                Ok(Outcome::Shutdown)
            }
            Method::Cancelled => {
                // Notifications get no response line. Cancellation is
                // advisory only: requests run one at a time, so there is
                // never an in-flight request to interrupt.
                warn!(target: DISPATCH_TARGET, "request cancelled by client");
                Ok(Outcome::Continue)
            }
        }
    }

    fn handle_ocr_text<W: Write>(
        &self,
        request: &RpcRequest,
        writer: &mut ResponseWriter<W>,
    ) -> Result<Outcome, ResponseError> {
        let resolved = match params::resolve(request) {
            Ok(resolved) => resolved,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "invalid ocr_text parameters");
                writer.write_error(request.id.clone(), &error)?;
                return Ok(Outcome::Continue);
            }
        };

        let result = self.run_pipeline(&resolved);
        render::render(writer, &resolved, request.id.clone(), &result)?;
        Ok(Outcome::Continue)
    }

    /// Runs the two-stage acquire-then-recognise pipeline.
    ///
    /// Any collaborator failure is reported as "no lines found" rather
    /// than an RPC error: the protocol layer cannot tell a truly empty
    /// image from an unreadable one. A staged temporary file is deleted
    /// when the acquired image drops at the end of this call.
    fn run_pipeline(&self, resolved: &ResolvedOcrRequest) -> OcrResult {
        let image = match self.acquirer.acquire(&resolved.source) {
            Ok(image) => image,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "image acquisition failed, reporting no lines");
                return OcrResult::empty();
            }
        };

        match self
            .recognizer
            .recognise(image.path(), &resolved.languages, resolved.enhanced)
        {
            Ok(result) => result,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "recognition failed, reporting no lines");
                OcrResult::empty()
            }
        }
    }
}
