//! CLI commands
//!
//! Command implementations for the `release-train` binary.

mod progress;
mod style;
mod train;

pub use train::{TrainArgs, run_train};
