//! Text recognition collaborator.
//!
//! Recognition itself is external: the daemon spawns the configured engine
//! binary once per request and parses its stdout as an [`OcrResult`]
//! document. Engine failures never surface on the wire; the dispatcher
//! downgrades them to an empty result with a side-channel diagnostic.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::debug;

use ocrtool_protocol::OcrResult;

/// Tracing target for recognition operations.
pub(crate) const RECOGNIZER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::recognizer");

/// Failures while running the recognition engine.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The engine executable was not found on the path.
    #[error("recognition engine not found: {command}")]
    EngineNotFound {
        /// The configured engine command.
        command: String,
    },
    /// Spawning the engine failed for another reason.
    #[error("failed to run recognition engine: {0}")]
    Spawn(#[source] io::Error),
    /// The engine exited unsuccessfully.
    #[error("recognition engine exited with {status}: {stderr}")]
    EngineFailed {
        /// The engine's exit status.
        status: ExitStatus,
        /// Captured engine stderr, trimmed.
        stderr: String,
    },
    /// The engine's stdout was not a valid result document.
    #[error("unreadable recognition output: {0}")]
    InvalidOutput(#[from] serde_json::Error),
}

/// Capability to recognise text in a locally readable image.
#[cfg_attr(test, mockall::automock)]
pub trait RecogniseText {
    /// Runs recognition over the image at `image`.
    ///
    /// # Errors
    ///
    /// Returns a [`RecognitionError`] when the engine cannot be run or its
    /// output cannot be parsed.
    fn recognise(
        &self,
        image: &Path,
        languages: &[String],
        enhanced: bool,
    ) -> Result<OcrResult, RecognitionError>;
}

/// Recogniser that shells out to an external engine binary.
///
/// The engine contract: invoked as
/// `<command> --image <path> --lang <a+b+…> --level <accurate|fast>`, it
/// prints a JSON document of the shape `{"lines":[{"text":…,"bbox":…}]}`
/// on stdout and exits zero.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    command: PathBuf,
}

impl CommandRecognizer {
    /// Creates a recogniser for the given engine executable.
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl RecogniseText for CommandRecognizer {
    fn recognise(
        &self,
        image: &Path,
        languages: &[String],
        enhanced: bool,
    ) -> Result<OcrResult, RecognitionError> {
        let level = if enhanced { "accurate" } else { "fast" };

        debug!(
            target: RECOGNIZER_TARGET,
            command = %self.command.display(),
            image = %image.display(),
            languages = ?languages,
            level,
            "spawning recognition engine"
        );

        let output = Command::new(&self.command)
            .arg("--image")
            .arg(image)
            .arg("--lang")
            .arg(languages.join("+"))
            .arg("--level")
            .arg(level)
            .output()
            .map_err(|error| {
                if error.kind() == io::ErrorKind::NotFound {
                    RecognitionError::EngineNotFound {
                        command: self.command.display().to_string(),
                    }
                } else {
                    RecognitionError::Spawn(error)
                }
            })?;

        if !output.status.success() {
            return Err(RecognitionError::EngineFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let result: OcrResult = serde_json::from_slice(&output.stdout)?;
        debug!(
            target: RECOGNIZER_TARGET,
            lines = result.lines.len(),
            "recognition complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use tempfile::TempDir;

    use super::*;

    /// Writes an executable stub engine script into `dir`.
    fn stub_engine(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("engine.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub");
        let mut perms = fs::metadata(&path).expect("stat stub").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod stub");
        path
    }

    #[test]
    fn parses_engine_output() {
        let dir = TempDir::new().expect("temp dir");
        let engine = stub_engine(
            &dir,
            r#"echo '{"lines":[{"text":"Hello","bbox":{"x":0,"y":0,"width":10,"height":5}}]}'"#,
        );

        let recognizer = CommandRecognizer::new(engine);
        let result = recognizer
            .recognise(Path::new("/tmp/a.png"), &["en".to_owned()], true)
            .expect("recognise");
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].text, "Hello");
    }

    #[test]
    fn missing_engine_maps_to_engine_not_found() {
        let recognizer = CommandRecognizer::new("/nonexistent/ocr-engine");
        let error = recognizer
            .recognise(Path::new("/tmp/a.png"), &["en".to_owned()], true)
            .expect_err("should fail");
        assert!(matches!(error, RecognitionError::EngineNotFound { .. }));
    }

    #[test]
    fn nonzero_exit_carries_engine_stderr() {
        let dir = TempDir::new().expect("temp dir");
        let engine = stub_engine(&dir, "echo 'model missing' >&2\nexit 3");

        let recognizer = CommandRecognizer::new(engine);
        let error = recognizer
            .recognise(Path::new("/tmp/a.png"), &["en".to_owned()], false)
            .expect_err("should fail");
        match error {
            RecognitionError::EngineFailed { stderr, .. } => {
                assert_eq!(stderr, "model missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn garbage_output_is_invalid() {
        let dir = TempDir::new().expect("temp dir");
        let engine = stub_engine(&dir, "echo 'not json'");

        let recognizer = CommandRecognizer::new(engine);
        let error = recognizer
            .recognise(Path::new("/tmp/a.png"), &["en".to_owned()], true)
            .expect_err("should fail");
        assert!(matches!(error, RecognitionError::InvalidOutput(_)));
    }
}
