//! Shared types for the QA runner.
//!
//! This library defines the data exchanged between the command-line front
//! end and the feature-test engine it drives: the engine [`Options`], the
//! aggregate [`ResultSet`], the typed progress [`bus`], and the [`Engine`]
//! contract itself.

pub mod bus;
pub mod engine;
pub mod options;

pub use bus::{Event, EventBus, EventKind, FeatureEvent, ScenarioEvent, StepEvent, SubscriptionId};
pub use engine::{Engine, EngineError};
pub use options::{NotAMapping, Options};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of one engine run.
///
/// `fails` never exceeds `total`; both constructors and deserialisation
/// enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawResultSet")]
pub struct ResultSet {
    total: u64,
    fails: u64,
}

#[derive(Deserialize)]
struct RawResultSet {
    total: u64,
    fails: u64,
}

/// Returned when a failure count exceeds the number of executed items.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{fails} failures exceed {total} executed")]
pub struct InvalidResultSet {
    /// Executed items.
    pub total: u64,
    /// Reported failures.
    pub fails: u64,
}

impl ResultSet {
    /// Build a result set from raw counts.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidResultSet`] when `fails > total`.
    pub const fn new(total: u64, fails: u64) -> Result<Self, InvalidResultSet> {
        if fails > total {
            return Err(InvalidResultSet { total, fails });
        }
        Ok(Self { total, fails })
    }

    /// Build a result set from passed and failed counts.
    #[must_use]
    pub const fn from_counts(passed: u64, failed: u64) -> Self {
        Self {
            total: passed.saturating_add(failed),
            fails: failed,
        }
    }

    /// Number of executed items.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of failed items.
    #[must_use]
    pub const fn fails(&self) -> u64 {
        self.fails
    }

    /// Number of items that passed.
    #[must_use]
    pub const fn passed(&self) -> u64 {
        self.total - self.fails
    }
}

impl TryFrom<RawResultSet> for ResultSet {
    type Error = InvalidResultSet;

    fn try_from(raw: RawResultSet) -> Result<Self, Self::Error> {
        Self::new(raw.total, raw.fails)
    }
}
