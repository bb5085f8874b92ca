//! Parameter resolution for the `ocr_text` method.
//!
//! Extracts and validates the method-specific fields from the generic
//! parameter map: image source selection with its mutual-exclusivity
//! rules, the format enumeration, language and output defaults, and local
//! path normalisation. Everything here fails with `-32602` before any
//! collaborator is touched.

use std::path::PathBuf;

use ocrtool_protocol::{ProtocolError, RpcRequest};

use crate::image::ImageSource;

/// The accepted values of the `format` parameter, in hint order.
pub const FORMAT_OPTIONS: &[&str] = &[
    "text",
    "simple",
    "table",
    "markdown",
    "auto",
    "full",
    "structured",
];

/// Default language list when `lang` is absent, split on `+`.
const DEFAULT_LANGUAGES: &str = "zh+en";

/// Requested output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain line texts.
    Text,
    /// Alias of [`OutputFormat::Text`].
    Simple,
    /// Markdown table with bounding boxes.
    Table,
    /// Alias of [`OutputFormat::Table`].
    Markdown,
    /// `Text` for a single line, `Table` otherwise.
    Auto,
    /// Full pretty-printed JSON-RPC envelope.
    Full,
    /// Alias of [`OutputFormat::Full`].
    Structured,
}

impl OutputFormat {
    /// Parses a format value case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an invalid-params error carrying a hint listing
    /// [`FORMAT_OPTIONS`] when the value is not in the enumeration.
    pub fn parse(value: &str) -> Result<Self, ProtocolError> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "simple" => Ok(Self::Simple),
            "table" => Ok(Self::Table),
            "markdown" => Ok(Self::Markdown),
            "auto" => Ok(Self::Auto),
            "full" => Ok(Self::Full),
            "structured" => Ok(Self::Structured),
            _ => Err(ProtocolError::invalid_params_with_hint(
                format!("Invalid value for 'format': '{value}'"),
                format!("Allowed values are: {}", FORMAT_OPTIONS.join(", ")),
            )),
        }
    }
}

/// A fully validated `ocr_text` request, ready for the pipeline.
#[derive(Debug, Clone)]
pub struct ResolvedOcrRequest {
    /// The single selected image source.
    pub source: ImageSource,
    /// Ordered recognition language tags.
    pub languages: Vec<String>,
    /// Whether to use the engine's enhanced recognition level.
    pub enhanced: bool,
    /// Requested rendering; absent means the full envelope.
    pub format: Option<OutputFormat>,
    /// Render output lines as source-code comments.
    pub insert_as_comment: bool,
    /// Comment style language for comment rendering.
    pub comment_language: String,
}

/// Resolves the parameter map of an `ocr_text` request.
///
/// String-typed parameters only: a field carrying any other value shape is
/// treated as absent. Presence means non-empty after trimming.
///
/// # Errors
///
/// Returns a `-32602` [`ProtocolError`] when the source selection rules or
/// the format enumeration are violated.
pub fn resolve(request: &RpcRequest) -> Result<ResolvedOcrRequest, ProtocolError> {
    let image_path = request
        .param_str("image")
        .or_else(|| request.param_str("image_path"))
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let url = request
        .param_str("url")
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let base64 = request
        .param_str("base64")
        .map(str::trim)
        .filter(|value| !value.is_empty());

    // The dedicated image+url guard runs first so the common user error of
    // supplying both gets its specific message, whatever base64 says.
    if image_path.is_some() && url.is_some() {
        return Err(ProtocolError::invalid_params(
            "Conflicting parameters: use only one of 'image'/'image_path' or 'url'.",
        ));
    }

    let provided = [&image_path, &url, &base64]
        .iter()
        .filter(|value| value.is_some())
        .count();
    if provided != 1 {
        return Err(ProtocolError::invalid_params(
            "Exactly one of 'image'/'image_path', 'url', or 'base64' must be provided.",
        ));
    }

    let format = request
        .param_str("format")
        .map(OutputFormat::parse)
        .transpose()?;

    let source = if let Some(path) = image_path {
        ImageSource::Path(normalise_path(path))
    } else if let Some(address) = url {
        ImageSource::Url(address.to_owned())
    } else {
        // `provided == 1` leaves base64 as the only remaining option.
        ImageSource::Base64(base64.unwrap_or_default().to_owned())
    };

    let languages = request
        .param_str("lang")
        .unwrap_or(DEFAULT_LANGUAGES)
        .split('+')
        .map(str::to_owned)
        .collect();

    Ok(ResolvedOcrRequest {
        source,
        languages,
        enhanced: request.param_bool("enhanced").unwrap_or(true),
        format,
        insert_as_comment: request.param_bool("output.insertAsComment").unwrap_or(false),
        comment_language: request
            .param_str("output.language")
            .unwrap_or("python")
            .to_owned(),
    })
}

/// Normalises a user-supplied image path.
///
/// A leading `~` expands to the user's home directory; relative paths are
/// resolved against the current working directory. Runs before acquisition
/// ever sees the path.
fn normalise_path(raw: &str) -> PathBuf {
    let expanded = raw
        .strip_prefix('~')
        .and_then(|rest| {
            dirs::home_dir().map(|home| home.join(rest.trim_start_matches('/')))
        })
        .unwrap_or_else(|| PathBuf::from(raw));

    if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    }
}
