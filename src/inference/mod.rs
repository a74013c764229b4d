//! Execution backend selection
//!
//! Chooses which runner build executes a resolved model.

pub mod runner;

pub use runner::{ggml_runner, select_runner, RunnerChoice, RunnerSelector};
