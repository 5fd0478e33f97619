//! Sutra Player terminal host
//!
//! Drives the playback controller from a line-oriented command session
//! against a simulated media output.
//!
//! This library exposes the host components for testing purposes.

pub mod command;
pub mod config;
pub mod error;
pub mod session;
pub mod simulated;
pub mod terminal;

// Re-export commonly used types for convenience
pub use command::Command;
pub use config::{AutoplayPolicy, CliConfig, LoggingSettings, SimulationSettings};
pub use error::{CliError, Result};
pub use session::{Flow, Session};
pub use simulated::SimulatedOutput;
pub use terminal::TerminalView;
