//! Long-lived OCR daemon speaking line-delimited JSON-RPC over stdio.
//!
//! The daemon reads one request per line from standard input, dispatches
//! it to a small fixed method set (`ocr_text`, `initialize`, `shutdown`,
//! `notifications/cancelled`), and writes the response to standard output
//! before reading the next line. Diagnostics travel on stderr through
//! structured telemetry, keeping the primary stream pure protocol.
//!
//! Image acquisition and text recognition are external collaborators
//! behind the [`image::AcquireImage`] and [`recognizer::RecogniseText`]
//! capabilities: remote and inline image sources are staged to temporary
//! files, recognition shells out to a configured engine binary. The
//! dispatch core only ever sees a local path and an ordered line sequence.

pub mod cli;
pub mod dispatch;
pub mod image;
pub mod recognizer;
pub mod session;
pub mod telemetry;

pub use cli::Cli;
pub use dispatch::{MethodRouter, Outcome};
pub use image::{AcquireImage, HttpImageAcquirer};
pub use recognizer::{CommandRecognizer, RecogniseText};
pub use session::Session;
pub use telemetry::{TelemetryError, TelemetryHandle};
