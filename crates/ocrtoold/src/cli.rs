//! CLI argument definitions for the OCR daemon.
//!
//! The binary takes no positional arguments: invoked without `--help` it
//! enters the session loop unconditionally. The flags below configure the
//! side-channel diagnostics and the external recognition engine.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Parameter overview appended to `--help`, mirroring the request schema.
const PARAMETER_HELP: &str = "\
Request parameters (method \"ocr_text\"):
  image / image_path     Path to the local image file (string)
  url                    URL to download the image from (string)
  base64                 Base64 encoded image data (string)
  lang                   OCR language(s), e.g. \"en+zh\" (string)
  enhanced               Use enhanced recognition (true/false)
  format                 Output format (text, simple, table, markdown, auto, full, structured)
  output.insertAsComment If true, insert output as code comments
  output.language        Comment style, e.g. python, swift, html

Other JSON-RPC methods: initialize, shutdown, notifications/cancelled

Example request:
  {\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ocr_text\",\"params\":{\"image\":\"sample.jpg\",\"lang\":\"en+zh\",\"format\":\"markdown\"}}";

/// Diagnostic output format on the error stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Compact,
    /// Structured JSON records for log shippers.
    Json,
}

/// Command-line interface for the OCR daemon.
#[derive(Parser, Debug)]
#[command(
    name = "ocrtoold",
    version,
    about = "Line-delimited JSON-RPC OCR daemon over standard input/output",
    after_help = PARAMETER_HELP
)]
pub struct Cli {
    /// Tracing filter expression for side-channel diagnostics.
    #[arg(long, env = "OCRTOOLD_LOG", default_value = "info")]
    pub log_filter: String,

    /// Rendering of diagnostics on the error stream.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Executable invoked to recognise text in an image.
    #[arg(long, env = "OCRTOOLD_OCR_COMMAND", default_value = "ocr-engine")]
    pub ocr_command: PathBuf,
}
