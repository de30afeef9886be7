//! Scripted engine double.
//!
//! [`ScriptedEngine`] publishes a fixed list of events and then resolves to
//! a fixed outcome. Every call to `read` is recorded so tests can assert
//! whether, and with what, the engine was started.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use qa_lib::{Engine, EngineError, Event, EventBus, Options, ResultSet};

/// One recorded call to [`Engine::read`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReadCall {
    /// Options the scope was built from.
    pub options: Options,
    /// Folder passed to `read`.
    pub folder: Option<PathBuf>,
}

/// Shared log of `read` calls, readable after the engine has been moved.
#[derive(Debug, Clone, Default)]
pub struct ReadLog {
    calls: Arc<Mutex<Vec<ReadCall>>>,
}

impl ReadLog {
    /// Calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ReadCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: ReadCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

/// Engine that replays scripted events and outcome.
#[derive(Debug, Clone)]
pub struct ScriptedEngine {
    events: Vec<Event>,
    outcome: Result<ResultSet, String>,
    reads: ReadLog,
}

impl ScriptedEngine {
    /// Engine whose run completes with `results`.
    #[must_use]
    pub fn completing(results: ResultSet) -> Self {
        Self {
            events: Vec::new(),
            outcome: Ok(results),
            reads: ReadLog::default(),
        }
    }

    /// Engine whose run is rejected with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            events: Vec::new(),
            outcome: Err(message.into()),
            reads: ReadLog::default(),
        }
    }

    /// Publish `events`, in order, before resolving.
    #[must_use]
    pub fn with_events(mut self, events: impl IntoIterator<Item = Event>) -> Self {
        self.events.extend(events);
        self
    }

    /// Handle on the log of `read` calls.
    #[must_use]
    pub fn reads(&self) -> ReadLog {
        self.reads.clone()
    }
}

impl Engine for ScriptedEngine {
    type Scope = Options;

    fn scope(&self, options: &Options) -> Options {
        options.clone()
    }

    fn read(
        &self,
        scope: &Options,
        folder: Option<&Path>,
        bus: &EventBus,
    ) -> impl Future<Output = Result<ResultSet, EngineError>> + Send {
        self.reads.record(ReadCall {
            options: scope.clone(),
            folder: folder.map(Path::to_path_buf),
        });
        let outcome = self.outcome.clone().map_err(EngineError::Internal);
        async move {
            for event in &self.events {
                bus.emit(event);
            }
            outcome
        }
    }
}
