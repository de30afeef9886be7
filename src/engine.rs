//! Contract between the front end and a feature-test engine.
//!
//! An engine turns [`Options`] into an execution scope, then runs the
//! features found under a folder, publishing progress on the [`EventBus`]
//! it is handed and resolving to a [`ResultSet`].

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{EventBus, Options, ResultSet};

/// Errors raised when an engine run cannot complete.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The discovery target does not exist.
    #[error("feature path not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Reading features from disk failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A feature file could not be parsed.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    /// Any other engine fault.
    #[error("{0}")]
    Internal(String),
}

/// A feature-test execution engine.
///
/// `read` is the only suspension point of a run. Listeners must be attached
/// to the bus before calling it; the shared borrow taken for the duration of
/// the run prevents late subscriptions.
pub trait Engine {
    /// Execution context derived from [`Options`].
    type Scope: Send + Sync;

    /// Build the execution scope. Pure and infallible.
    fn scope(&self, options: &Options) -> Self::Scope;

    /// Run the features found under `folder`, publishing progress on `bus`.
    ///
    /// When `folder` is `None` the engine picks its own default location.
    fn read(
        &self,
        scope: &Self::Scope,
        folder: Option<&Path>,
        bus: &EventBus,
    ) -> impl Future<Output = Result<ResultSet, EngineError>> + Send;
}
