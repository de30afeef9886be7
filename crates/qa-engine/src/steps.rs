//! Step definitions.
//!
//! A [`StepRegistry`] maps regular expressions to step bodies. Patterns are
//! anchored at both ends and matched against the step text without its
//! keyword; capture groups are passed to the body in order. The first
//! definition that matches wins.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use thiserror::Error;

use crate::Scope;

/// Result returned by a step body.
pub type StepResult = anyhow::Result<()>;

type StepFn = Arc<dyn Fn(&Scope, &[String]) -> StepResult + Send + Sync>;

/// Why a step did not pass.
#[derive(Debug, Error)]
pub enum StepFailure {
    /// No definition matches the step text.
    #[error("undefined step")]
    Undefined,
    /// The step body returned an error.
    #[error("{0:#}")]
    Failed(anyhow::Error),
}

#[derive(Clone)]
struct StepDefinition {
    pattern: Regex,
    body: StepFn,
}

/// Ordered collection of step definitions.
#[derive(Clone, Default)]
pub struct StepRegistry {
    definitions: Vec<StepDefinition>,
}

impl fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.definitions.iter().map(|d| d.pattern.as_str()))
            .finish()
    }
}

impl StepRegistry {
    /// Create an empty registry. Every step run against it is undefined.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if `pattern` is not a valid expression.
    pub fn define<F>(mut self, pattern: &str, body: F) -> Result<Self, regex::Error>
    where
        F: Fn(&Scope, &[String]) -> StepResult + Send + Sync + 'static,
    {
        let pattern = Regex::new(&format!("^(?:{pattern})$"))?;
        self.definitions.push(StepDefinition {
            pattern,
            body: Arc::new(body),
        });
        Ok(self)
    }

    /// Run the first definition matching `text`.
    ///
    /// # Errors
    ///
    /// Returns [`StepFailure::Undefined`] when nothing matches and
    /// [`StepFailure::Failed`] when the body fails.
    pub fn execute(&self, scope: &Scope, text: &str) -> Result<(), StepFailure> {
        for definition in &self.definitions {
            if let Some(captures) = definition.pattern.captures(text) {
                let args: Vec<String> = captures
                    .iter()
                    .skip(1)
                    .map(|m| m.map_or_else(String::new, |m| m.as_str().to_owned()))
                    .collect();
                return (definition.body)(scope, &args).map_err(StepFailure::Failed);
            }
        }
        Err(StepFailure::Undefined)
    }
}
