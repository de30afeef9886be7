//! Step definitions for the behavioural test suite.

pub mod cli_steps;
pub mod config_steps;
pub mod report_steps;
pub mod run_steps;

pub use cli_steps::CliWorld;
pub use config_steps::ConfigWorld;
pub use report_steps::ReportWorld;
pub use run_steps::RunWorld;
