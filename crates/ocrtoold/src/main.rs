//! Entrypoint for the OCR daemon.
//!
//! Wires the CLI, telemetry and collaborators together, then hands the
//! locked stdio streams to the session loop. Exit is 0 on `shutdown` or
//! end-of-input; `--help` is handled by clap before the loop starts.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use ocrtoold::cli::Cli;
use ocrtoold::dispatch::MethodRouter;
use ocrtoold::image::HttpImageAcquirer;
use ocrtoold::recognizer::CommandRecognizer;
use ocrtoold::session::Session;
use ocrtoold::telemetry;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = telemetry::initialise(&cli) {
        // Telemetry is not up yet, so this goes straight to stderr.
        eprintln!("ocrtoold: {error}");
        return ExitCode::FAILURE;
    }

    let router = MethodRouter::new(
        HttpImageAcquirer::new(),
        CommandRecognizer::new(&cli.ocr_command),
    );
    let session = Session::new(router);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    match session.run(stdin, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "session loop failed");
            ExitCode::FAILURE
        }
    }
}
