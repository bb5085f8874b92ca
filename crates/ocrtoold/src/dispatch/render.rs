//! Multi-mode response rendering.
//!
//! Given a recognition result and the resolved request, renders either raw
//! formatted text (plain lines, markdown table, commented source) or the
//! full pretty-printed JSON-RPC envelope. Comment rendering takes
//! precedence over `format`; an absent format means the full envelope.

use std::io::Write;

use ocrtool_protocol::{JsonValue, OcrResult, ResultEnvelope};

use super::params::{OutputFormat, ResolvedOcrRequest};
use super::response::{ResponseError, ResponseWriter};

/// Placeholder rendered instead of an empty markdown table.
const EMPTY_TABLE_TEXT: &str = "No text found.";

/// Renders the result of an `ocr_text` request onto the primary stream.
pub fn render<W: Write>(
    writer: &mut ResponseWriter<W>,
    resolved: &ResolvedOcrRequest,
    id: Option<JsonValue>,
    result: &OcrResult,
) -> Result<(), ResponseError> {
    if resolved.insert_as_comment {
        return writer.write_text(&commented(result, &resolved.comment_language));
    }

    match resolved.format {
        Some(OutputFormat::Text | OutputFormat::Simple) => writer.write_text(&plain_text(result)),
        Some(OutputFormat::Table | OutputFormat::Markdown) => {
            writer.write_text(&markdown_table(result))
        }
        Some(OutputFormat::Auto) => {
            if result.lines.len() == 1 {
                writer.write_text(&plain_text(result))
            } else {
                writer.write_text(&markdown_table(result))
            }
        }
        Some(OutputFormat::Full | OutputFormat::Structured) | None => {
            writer.write_pretty(&ResultEnvelope::new(id, result))
        }
    }
}

/// Joins the line texts with newlines, no structural metadata.
pub fn plain_text(result: &OcrResult) -> String {
    result
        .lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a markdown table with Text, X, Y, Width and Height columns.
///
/// Coordinates are printed as whole pixels (truncated) and literal `|` in
/// the text is escaped. An empty result renders [`EMPTY_TABLE_TEXT`]
/// instead of a bare header.
pub fn markdown_table(result: &OcrResult) -> String {
    if result.is_empty() {
        return EMPTY_TABLE_TEXT.to_owned();
    }

    let mut rows = vec![
        "| Text | X | Y | Width | Height |".to_owned(),
        "|------|---|---|--------|--------|".to_owned(),
    ];
    for line in &result.lines {
        let bbox = line.bbox;
        rows.push(format!(
            "| {} | {} | {} | {} | {} |",
            line.text.replace('|', "\\|"),
            px(bbox.x),
            px(bbox.y),
            px(bbox.width),
            px(bbox.height),
        ));
    }
    rows.join("\n")
}

/// Renders the plain text wrapped in comment markers for the given
/// language. Unrecognised languages fall back to C-family `//` markers.
pub fn commented(result: &OcrResult, language: &str) -> String {
    let text = plain_text(result);
    match language.to_ascii_lowercase().as_str() {
        "python" | "shell" | "bash" => prefix_lines(&text, "# "),
        "html" | "xml" => format!("<!--\n{text}\n-->"),
        // cpp, c++, java, swift, go and everything unrecognised
        _ => prefix_lines(&text, "// "),
    }
}

/// Formats a pixel coordinate as a whole number, truncating fractions.
fn px(value: f64) -> String {
    format!("{:.0}", value.trunc())
}

fn prefix_lines(text: &str, marker: &str) -> String {
    text.lines()
        .filter(|line| !line.is_empty())
        .map(|line| format!("{marker}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
