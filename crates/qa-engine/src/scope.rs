//! Execution scope shared by every step of a run.

use std::sync::Arc;

use qa_lib::Options;
use serde_json::Value;

/// Read-only execution context built from the run's options.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    options: Arc<Options>,
}

impl Scope {
    /// Wrap the resolved options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    /// Look up a configured option.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}
