//! The request-at-a-time session loop.
//!
//! Reads lines from the input stream until end-of-input or a `shutdown`
//! request, dispatching each through the router. Malformed lines and
//! collaborator failures are always recoverable; only shutdown and EOF end
//! the loop.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use ocrtool_protocol::RpcRequest;

use crate::dispatch::{MethodRouter, Outcome, ResponseWriter};
use crate::image::AcquireImage;
use crate::recognizer::RecogniseText;

/// Tracing target for session lifecycle events.
pub(crate) const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// Owns process lifetime: one session per process, one request in flight.
#[derive(Debug)]
pub struct Session<A, R> {
    router: MethodRouter<A, R>,
}

impl<A: AcquireImage, R: RecogniseText> Session<A, R> {
    /// Creates a session over a configured router.
    pub const fn new(router: MethodRouter<A, R>) -> Self {
        Self { router }
    }

    /// Runs the loop until end-of-input or shutdown.
    ///
    /// Every response is fully flushed before the next line is read. Lines
    /// whose first non-whitespace character is not `{` are skipped
    /// silently; undecodable request lines get an `id: null` error
    /// envelope and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error only when reading the input stream itself fails.
    pub fn run<I: BufRead, W: Write>(&self, mut input: I, output: W) -> io::Result<()> {
        let mut writer = ResponseWriter::new(output);
        info!(target: SESSION_TARGET, "ready to accept JSON-RPC over stdin");

        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                debug!(target: SESSION_TARGET, "end of input, leaving session loop");
                break;
            }

            // Decode lossily rather than with `read_line`: a stray binary
            // line must not end the session, and the replacement
            // characters fall through the non-`{` skip below.
            let line = String::from_utf8_lossy(&buffer);
            let request = match RpcRequest::parse(&line) {
                Ok(Some(request)) => request,
                Ok(None) => continue,
                Err(error) => {
                    warn!(target: SESSION_TARGET, %error, "malformed request line");
                    // No reliable id could be recovered from the broken
                    // line, so the envelope reports id: null.
                    if let Err(write_error) = writer.write_error(None, &error) {
                        warn!(target: SESSION_TARGET, %write_error, "failed to report parse failure");
                    }
                    continue;
                }
            };

            match self.router.dispatch(&request, &mut writer) {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Shutdown) => {
                    info!(target: SESSION_TARGET, "shutdown requested, leaving session loop");
                    break;
                }
                Err(error) => {
                    warn!(target: SESSION_TARGET, %error, "failed to write response");
                }
            }
        }

        Ok(())
    }
}
