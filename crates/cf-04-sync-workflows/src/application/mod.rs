//! Application layer: workers, listeners and UI entry points.

pub mod commands;
pub mod fetch;
pub mod listener;
pub mod workers;

pub use commands::CaseCommands;
pub use listener::{WorkflowContext, Workflows};
