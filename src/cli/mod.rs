//! CLI argument definitions and the run driver.

pub mod commands;
pub mod commands_processor;

pub use commands::Cli;
pub use commands_processor::{RunReport, run};
