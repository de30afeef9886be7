//! Bundled feature-test engine for the `qa` runner.
//!
//! [`GherkinEngine`] discovers `.feature` files, parses them with the
//! `gherkin` crate and executes every step against a [`StepRegistry`] of
//! regular-expression step definitions, publishing progress on the event
//! bus it is handed.
//!
//! # Examples
//!
//! ```rust,no_run
//! use qa_engine::{GherkinEngine, StepRegistry};
//!
//! let steps = StepRegistry::new()
//!     .define(r"a user named (\w+)", |_scope, args| {
//!         anyhow::ensure!(!args[0].is_empty(), "empty name");
//!         Ok(())
//!     })
//!     .expect("valid pattern");
//! let engine = GherkinEngine::new(steps);
//! ```

mod discovery;
mod runner;
mod scope;
mod steps;

pub use discovery::{DEFAULT_FOLDER, discover};
pub use runner::GherkinEngine;
pub use scope::Scope;
pub use steps::{StepFailure, StepRegistry, StepResult};
