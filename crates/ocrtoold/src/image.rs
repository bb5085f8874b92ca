//! Image acquisition collaborator.
//!
//! Whatever the request supplied (local path, URL, base64 payload), the
//! recognition stage only ever sees a local file. Remote and inline
//! sources are staged into a temporary file which is removed once the
//! [`AcquiredImage`] drops, after recognition has read it.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Tracing target for acquisition operations.
pub(crate) const IMAGE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::image");

/// The single image source selected by the parameter resolver.
///
/// Exactly one source exists per request by construction; the resolver
/// enforces the mutual-exclusivity rules before one of these is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A normalised local filesystem path.
    Path(PathBuf),
    /// A URL to download the image from.
    Url(String),
    /// Base64-encoded image bytes supplied inline.
    Base64(String),
}

/// A locally readable image handed to the recognition stage.
#[derive(Debug)]
pub enum AcquiredImage {
    /// The caller's own file; never deleted by the daemon.
    Local(PathBuf),
    /// A staged temporary file, deleted when this value drops.
    Staged(NamedTempFile),
}

impl AcquiredImage {
    /// Returns the local path recognition should read.
    pub fn path(&self) -> &Path {
        match self {
            Self::Local(path) => path,
            Self::Staged(file) => file.path(),
        }
    }
}

/// Failures while producing a locally readable image.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// The supplied local path does not exist.
    #[error("image file not found at path: {}", path.display())]
    FileNotFound {
        /// The missing path, after normalisation.
        path: PathBuf,
    },
    /// Downloading the image failed.
    #[error("failed to download image from {url}: {source}")]
    Download {
        /// The requested URL.
        url: String,
        /// The transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// The inline payload was not valid base64.
    #[error("invalid base64 image data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    /// Staging the image bytes to a temporary file failed.
    #[error("failed to stage image data: {0}")]
    Io(#[from] io::Error),
}

/// Capability to turn an [`ImageSource`] into a locally readable image.
#[cfg_attr(test, mockall::automock)]
pub trait AcquireImage {
    /// Produces a local file for the given source.
    ///
    /// # Errors
    ///
    /// Returns an [`AcquisitionError`] when the source cannot be read,
    /// downloaded, decoded or staged.
    fn acquire(&self, source: &ImageSource) -> Result<AcquiredImage, AcquisitionError>;
}

/// Acquirer backed by a blocking HTTP client and the temp directory.
#[derive(Debug)]
pub struct HttpImageAcquirer {
    http: reqwest::blocking::Client,
}

impl HttpImageAcquirer {
    /// Creates an acquirer with a default HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpImageAcquirer {
    fn default() -> Self {
        Self::new()
    }
}

impl AcquireImage for HttpImageAcquirer {
    fn acquire(&self, source: &ImageSource) -> Result<AcquiredImage, AcquisitionError> {
        match source {
            ImageSource::Path(path) => {
                if !path.exists() {
                    return Err(AcquisitionError::FileNotFound { path: path.clone() });
                }
                Ok(AcquiredImage::Local(path.clone()))
            }
            ImageSource::Url(url) => {
                let bytes = self
                    .http
                    .get(url)
                    .send()
                    .and_then(reqwest::blocking::Response::error_for_status)
                    .and_then(|response| response.bytes())
                    .map_err(|source| AcquisitionError::Download {
                        url: url.clone(),
                        source,
                    })?;
                let staged = stage_bytes(&bytes)?;
                debug!(
                    target: IMAGE_TARGET,
                    url,
                    path = %staged.path().display(),
                    "downloaded image to temporary file"
                );
                Ok(AcquiredImage::Staged(staged))
            }
            ImageSource::Base64(data) => {
                let bytes = general_purpose::STANDARD.decode(data)?;
                let staged = stage_bytes(&bytes)?;
                debug!(
                    target: IMAGE_TARGET,
                    path = %staged.path().display(),
                    "decoded base64 image to temporary file"
                );
                Ok(AcquiredImage::Staged(staged))
            }
        }
    }
}

/// Writes image bytes to a fresh temporary file.
fn stage_bytes(bytes: &[u8]) -> Result<NamedTempFile, io::Error> {
    let mut file = tempfile::Builder::new()
        .prefix("ocrtoold-")
        .suffix(".jpg")
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_path_must_exist() {
        let acquirer = HttpImageAcquirer::new();
        let missing = ImageSource::Path(PathBuf::from("/nonexistent/image.png"));
        assert!(matches!(
            acquirer.acquire(&missing),
            Err(AcquisitionError::FileNotFound { .. })
        ));
    }

    #[test]
    fn existing_local_path_is_passed_through() {
        let file = NamedTempFile::new().expect("temp file");
        let acquirer = HttpImageAcquirer::new();
        let acquired = acquirer
            .acquire(&ImageSource::Path(file.path().to_path_buf()))
            .expect("acquire");
        assert_eq!(acquired.path(), file.path());
    }

    #[test]
    fn base64_payload_is_staged_to_a_temp_file() {
        let payload = general_purpose::STANDARD.encode(b"fake image bytes");
        let acquirer = HttpImageAcquirer::new();
        let acquired = acquirer
            .acquire(&ImageSource::Base64(payload))
            .expect("acquire");

        let contents = std::fs::read(acquired.path()).expect("read staged file");
        assert_eq!(contents, b"fake image bytes");
        assert_eq!(
            acquired.path().extension().and_then(|e| e.to_str()),
            Some("jpg")
        );
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let acquirer = HttpImageAcquirer::new();
        assert!(matches!(
            acquirer.acquire(&ImageSource::Base64("not base64!!!".to_owned())),
            Err(AcquisitionError::InvalidBase64(_))
        ));
    }

    #[test]
    fn staged_file_is_removed_on_drop() {
        let payload = general_purpose::STANDARD.encode(b"transient");
        let acquirer = HttpImageAcquirer::new();
        let acquired = acquirer
            .acquire(&ImageSource::Base64(payload))
            .expect("acquire");
        let path = acquired.path().to_path_buf();
        assert!(path.exists());
        drop(acquired);
        assert!(!path.exists());
    }
}
