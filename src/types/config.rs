//! Configuration types
//!
//! Runner location configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default GPU runner build output
pub fn default_gpu_runner_dir() -> PathBuf {
    ["llama.cpp", "ggml", "build", "gpu", "bin"].iter().collect()
}

/// Default CPU runner build output
pub fn default_cpu_runner_dir() -> PathBuf {
    ["llama.cpp", "ggml", "build", "cpu", "bin"].iter().collect()
}

/// Candidate runner directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Directory holding the GPU-enabled runner
    #[serde(default = "default_gpu_runner_dir")]
    pub gpu_runner_dir: PathBuf,
    /// Directory holding the CPU-only runner
    #[serde(default = "default_cpu_runner_dir")]
    pub cpu_runner_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            gpu_runner_dir: default_gpu_runner_dir(),
            cpu_runner_dir: default_cpu_runner_dir(),
        }
    }
}
