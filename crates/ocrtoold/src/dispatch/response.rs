//! Serialisation of responses onto the primary stream.
//!
//! The writer owns the output handle for the lifetime of the session and
//! flushes after every response so a downstream reader observes one
//! complete response before the next request is read. Passing the handle
//! in explicitly (rather than printing to the process stdout) lets tests
//! capture output without redirection.

use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

use ocrtool_protocol::{ErrorEnvelope, JsonValue, ProtocolError};

/// Failures while writing a response.
///
/// These are logged and survived; no write failure terminates the session
/// loop.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The underlying stream rejected the write.
    #[error("failed to write response: {0}")]
    Io(#[from] io::Error),
    /// The payload could not be serialised.
    #[error("failed to serialise response: {0}")]
    Serialise(#[from] serde_json::Error),
}

/// Writer that serialises responses to the primary stream.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Wraps the given output stream.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes an envelope as a single line and flushes.
    pub fn write_envelope<T: Serialize>(&mut self, envelope: &T) -> Result<(), ResponseError> {
        serde_json::to_writer(&mut self.writer, envelope)?;
        self.finish_line()
    }

    /// Writes an envelope pretty-printed (the `full` rendering) and
    /// flushes.
    pub fn write_pretty<T: Serialize>(&mut self, envelope: &T) -> Result<(), ResponseError> {
        let rendered = serde_json::to_string_pretty(envelope)?;
        self.writer.write_all(rendered.as_bytes())?;
        self.finish_line()
    }

    /// Writes already-rendered text followed by a newline and flushes.
    pub fn write_text(&mut self, text: &str) -> Result<(), ResponseError> {
        self.writer.write_all(text.as_bytes())?;
        self.finish_line()
    }

    /// Writes an error envelope echoing the given id.
    pub fn write_error(
        &mut self,
        id: Option<JsonValue>,
        error: &ProtocolError,
    ) -> Result<(), ResponseError> {
        self.write_envelope(&ErrorEnvelope::new(id, error))
    }

    fn finish_line(&mut self) -> Result<(), ResponseError> {
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
