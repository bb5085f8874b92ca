//! Recognition result types.
//!
//! Produced by the external recognition collaborator and consumed by the
//! renderer. The line order is the collaborator's contract (top-to-bottom,
//! left-to-right); the core never re-sorts it.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle locating recognised text, in pixel coordinates
/// of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// One recognised line of text with its location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrLine {
    /// The recognised text.
    pub text: String,
    /// Location of the text in the source image.
    pub bbox: BoundingBox,
}

impl OcrLine {
    /// Creates a line from its text and bounding box.
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// An ordered sequence of recognised lines.
///
/// Serialises as `{"lines": [...]}`, the `result` payload of a full
/// response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognised lines in collaborator order.
    pub lines: Vec<OcrLine>,
}

impl OcrResult {
    /// Creates a result from recognised lines.
    #[must_use]
    pub const fn new(lines: Vec<OcrLine>) -> Self {
        Self { lines }
    }

    /// The empty result, also the downgrade target for collaborator
    /// failures.
    #[must_use]
    pub const fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    /// Returns true when no lines were recognised.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
