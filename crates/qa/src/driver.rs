//! Execution of a single engine run.
//!
//! The [`Driver`] owns the engine and the event bus for one invocation. It
//! builds the scope from the resolved options, awaits the engine's `read`,
//! reports the summary or the error, and hands the outcome back. Turning
//! the outcome into a process status is a pure function so the binary is
//! the only place that exits.

use std::path::Path;

use qa_lib::{Engine, EngineError, EventBus, Options, ResultSet};

use crate::reporter::Sink;

/// Highest status used to encode a failure count.
///
/// Runs with more failures than this still exit with this code.
pub const EXIT_FAILURE_CAP: u8 = 253;
/// Status used when the engine could not complete the run.
pub const EXIT_RUN_ERROR: u8 = 254;
/// Status used when the CLI aborts before starting the engine.
pub const EXIT_STARTUP_ERROR: u8 = 255;

/// Map a completed run to a process status: the failure count, capped at
/// [`EXIT_FAILURE_CAP`].
#[must_use]
pub fn failure_status(results: &ResultSet) -> u8 {
    u8::try_from(results.fails()).map_or(EXIT_FAILURE_CAP, |fails| fails.min(EXIT_FAILURE_CAP))
}

/// Runs the engine once and reports the outcome.
#[derive(Debug)]
pub struct Driver<E> {
    engine: E,
    bus: EventBus,
    sink: Sink,
    verbose: bool,
}

impl<E: Engine> Driver<E> {
    /// Create a driver. `bus` must already carry every listener for the run.
    pub const fn new(engine: E, bus: EventBus, sink: Sink, verbose: bool) -> Self {
        Self {
            engine,
            bus,
            sink,
            verbose,
        }
    }

    /// Run the engine over `folder` with the given options.
    ///
    /// A completed run prints `test results: <passed> / <total>` when
    /// verbose. A rejected run prints `errors: <error>`. Report lines that
    /// cannot be written are logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns the engine's [`EngineError`] if the run does not complete.
    pub async fn execute(
        &self,
        options: &Options,
        folder: Option<&Path>,
    ) -> Result<ResultSet, EngineError> {
        let scope = self.engine.scope(options);
        tracing::debug!(folder = ?folder, "Starting engine run");

        match self.engine.read(&scope, folder, &self.bus).await {
            Ok(results) => {
                tracing::info!(
                    total = results.total(),
                    fails = results.fails(),
                    "Engine run completed"
                );
                if self.verbose {
                    self.report(format_args!(
                        "test results: {} / {}",
                        results.passed(),
                        results.total()
                    ));
                }
                Ok(results)
            }
            Err(e) => {
                tracing::error!(error = %e, "Engine run failed");
                self.report(format_args!("errors: {e}"));
                Err(e)
            }
        }
    }

    fn report(&self, line: std::fmt::Arguments<'_>) {
        if let Err(e) = self.sink.line(line) {
            tracing::warn!(error = %e, "Failed to write report line");
        }
    }
}
