//! Human-readable progress reporting.
//!
//! [`Reporter`] attaches listeners to the engine's [`EventBus`] according
//! to the verbosity flags and renders each event as one line on a shared
//! [`Sink`]. Failing steps are always reported. Rendering errors are handed
//! back to the bus, which logs and drops them.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use qa_lib::{EventBus, SubscriptionId};
use thiserror::Error;

/// Errors raised while rendering a report line.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the sink failed.
    #[error("failed to write report line: {0}")]
    Write(#[from] io::Error),
    /// An event payload could not be formatted.
    #[error("failed to format report line: {0}")]
    Format(#[from] serde_json::Error),
    /// A previous writer panicked while holding the sink.
    #[error("report sink is poisoned")]
    Poisoned,
}

/// Which progress events are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verbosity {
    /// Report features, scenarios and the final summary.
    pub verbose: bool,
    /// Report every step before it runs.
    pub debug: bool,
}

/// Shared, line-oriented output stream for report lines.
#[derive(Clone)]
pub struct Sink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

impl Sink {
    /// Wrap an arbitrary writer.
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Write one line and flush it.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the sink is poisoned or the write fails.
    pub fn line(&self, args: fmt::Arguments<'_>) -> Result<(), ReportError> {
        let mut writer = self.inner.lock().map_err(|_| ReportError::Poisoned)?;
        writer.write_fmt(args)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Set of listeners attached for one run.
#[derive(Debug)]
pub struct Reporter {
    subscriptions: Vec<SubscriptionId>,
}

impl Reporter {
    /// Attach listeners to `bus` according to `verbosity`.
    ///
    /// | Flag | Listeners |
    /// |---|---|
    /// | `verbose` | `feature`, `scenario` |
    /// | `debug` | `step` |
    /// | always | `step:fail` |
    ///
    /// Call this before handing the bus to the engine; events emitted
    /// earlier are not replayed.
    pub fn attach(bus: &mut EventBus, verbosity: Verbosity, sink: &Sink) -> Self {
        let mut subscriptions = Vec::new();

        if verbosity.verbose {
            let out = sink.clone();
            subscriptions.push(bus.on_feature(move |e| {
                out.line(format_args!("feature: {}", e.title))?;
                Ok(())
            }));
            let out = sink.clone();
            subscriptions.push(bus.on_scenario(move |e| {
                let annotations =
                    serde_json::to_string(&e.annotations).map_err(ReportError::from)?;
                out.line(format_args!("  scenario: {} -> {annotations}", e.title))?;
                Ok(())
            }));
        }

        if verbosity.debug {
            let out = sink.clone();
            subscriptions.push(bus.on_step(move |e| {
                out.line(format_args!("    step: {}", e.step))?;
                Ok(())
            }));
        }

        let out = sink.clone();
        subscriptions.push(bus.on_step_fail(move |e| {
            out.line(format_args!("    step failed: {}", e.step))?;
            Ok(())
        }));

        tracing::debug!(
            listeners = subscriptions.len(),
            verbose = verbosity.verbose,
            debug = verbosity.debug,
            "Reporter attached"
        );
        Self { subscriptions }
    }

    /// Number of listeners this reporter attached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// `true` if nothing was attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Remove every listener this reporter attached.
    pub fn detach(self, bus: &mut EventBus) {
        for id in self.subscriptions {
            bus.unsubscribe(id);
        }
    }
}
