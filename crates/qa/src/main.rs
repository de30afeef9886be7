//! Entry point for the `qa` test runner binary.
//! Parses the command line, runs the bundled Gherkin engine once and exits
//! with a status reflecting the outcome.
//!
//! The binary registers no step definitions, so every step it runs is
//! undefined and fails. Projects with their own steps call [`qa::run`]
//! with a populated `StepRegistry`.

use std::io::Write as _;
use std::process::ExitCode;

use clap::Parser;
use qa::driver::EXIT_STARTUP_ERROR;
use qa::reporter::Sink;
use qa::{Args, RunError};
use qa_engine::{GherkinEngine, StepRegistry};

#[tokio::main]
async fn main() -> ExitCode {
    qa::logging::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let status = if e.use_stderr() { EXIT_STARTUP_ERROR } else { 0 };
            if let Err(print_err) = e.print() {
                tracing::error!(error = %print_err, "Failed to print usage");
            }
            return ExitCode::from(status);
        }
    };

    let engine = GherkinEngine::new(StepRegistry::new());
    let result = qa::run(&args, engine, Sink::stdout()).await;
    if let Err(RunError::Config(e)) = &result {
        if writeln!(std::io::stderr(), "qa: {e}").is_err() {
            tracing::debug!("stderr is closed");
        }
    }
    ExitCode::from(qa::exit_status(&result))
}
