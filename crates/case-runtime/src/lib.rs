//! # Case Runtime Library
//!
//! Assembles the case-management state layer:
//!
//! ```text
//! InMemoryEventBus ◀──publish── Store ◀──dispatch── CaseCommands
//!        │                        ▲
//!        └──subscribe──▶ Workflows ┘──▶ CaseApi (HTTP or fixture)
//! ```
//!
//! - `cli` - subcommands of the `caseflow` binary
//! - `config` - `RuntimeConfig` from defaults and `CASEFLOW_*` variables
//! - `telemetry` - tracing subscriber setup
//! - `wiring` - `CaseRuntime`, start and graceful shutdown

pub mod cli;
pub mod config;
pub mod telemetry;
pub mod wiring;

pub use config::{ConfigError, RuntimeConfig};
pub use wiring::CaseRuntime;
