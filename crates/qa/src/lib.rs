//! Library for the `qa` command-line test runner.
//!
//! The CLI resolves the optional configuration file into engine options,
//! attaches progress reporting to the engine's event bus according to the
//! verbosity flags, runs the engine once over the target folder, and maps
//! the outcome to a process status.
//!
//! The `qa` binary runs the bundled engine with no step definitions.
//! Suites with real steps embed this library and pass their own engine to
//! [`run`], as below.
//!
//! # Examples
//!
//! ```rust,no_run
//! use clap::Parser;
//! use qa::{Args, reporter::Sink};
//! use qa_engine::{GherkinEngine, StepRegistry};
//!
//! # async fn try_run() {
//! let args = Args::parse_from(["qa", "--verbose", "--folder", "features"]);
//! let steps = StepRegistry::new()
//!     .define("the site is up", |_scope, _args| Ok(()))
//!     .expect("valid pattern");
//! let engine = GherkinEngine::new(steps);
//! let result = qa::run(&args, engine, Sink::stdout()).await;
//! std::process::exit(i32::from(qa::exit_status(&result)));
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod logging;
pub mod reporter;

use std::path::PathBuf;

use clap::Parser;
use qa_lib::{Engine, EngineError, EventBus, ResultSet};
use thiserror::Error;

use crate::config::ConfigError;
use crate::driver::{Driver, EXIT_RUN_ERROR, EXIT_STARTUP_ERROR, failure_status};
use crate::reporter::{Reporter, Sink, Verbosity};

/// Command line arguments for the `qa` runner.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "qa",
    version,
    about = "Execute test cases",
    long_about = "Execute test cases.\n\nThe bundled engine has no step definitions, so every \
                  step fails as undefined. Embed the `qa` library and pass a `GherkinEngine` \
                  built from your own `StepRegistry` to run real suites."
)]
pub struct Args {
    /// Verbose mode: report features, scenarios and the result summary.
    #[arg(short, long)]
    pub verbose: bool,

    /// Debug mode: report every step as it runs.
    #[arg(short, long)]
    pub debug: bool,

    /// File or folder containing features.
    #[arg(short, long, value_name = "PATH", env = "QA_FOLDER")]
    pub folder: Option<PathBuf>,

    /// Configuration file (JSON or YAML) passed to the engine.
    #[arg(short, long, value_name = "FILE", env = "QA_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Verbosity flags selected on the command line.
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity {
            verbose: self.verbose,
            debug: self.debug,
        }
    }
}

/// Errors that end a run without a result set.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration could not be resolved; the engine never started.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The engine started but could not complete the run.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl RunError {
    /// Process status for this error.
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        match self {
            Self::Config(_) => EXIT_STARTUP_ERROR,
            Self::Engine(_) => EXIT_RUN_ERROR,
        }
    }
}

/// Run the engine once as described by `args`, reporting to `sink`.
///
/// Configuration is resolved first; if that fails the engine is never
/// started. Reporting listeners are attached before the run begins.
///
/// # Errors
///
/// Returns [`RunError::Config`] for configuration failures and
/// [`RunError::Engine`] when the engine rejects the run.
pub async fn run<E: Engine>(args: &Args, engine: E, sink: Sink) -> Result<ResultSet, RunError> {
    let options = config::resolve(args.config.as_deref())?;

    let mut bus = EventBus::new();
    let _reporter = Reporter::attach(&mut bus, args.verbosity(), &sink);
    let driver = Driver::new(engine, bus, sink, args.verbose);

    Ok(driver.execute(&options, args.folder.as_deref()).await?)
}

/// Map the outcome of [`run`] to a process status.
///
/// | Outcome | Status |
/// |---|---|
/// | completed with `n` failures | `n`, capped at [`driver::EXIT_FAILURE_CAP`] |
/// | engine rejected the run | [`EXIT_RUN_ERROR`] |
/// | configuration error | [`EXIT_STARTUP_ERROR`] |
#[must_use]
pub fn exit_status(result: &Result<ResultSet, RunError>) -> u8 {
    match result {
        Ok(results) => failure_status(results),
        Err(e) => e.exit_status(),
    }
}
