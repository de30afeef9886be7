//! Test support utilities.
//!
//! Doubles and helpers shared by the unit, integration and behavioural
//! tests of the `qa` workspace.

pub mod buffer;
pub mod engine;
pub mod env_guard;

pub use buffer::{ClosedPipe, SharedBuffer};
pub use engine::{ReadCall, ReadLog, ScriptedEngine};
pub use env_guard::EnvVarGuard;
