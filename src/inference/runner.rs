//! Runner selection
//!
//! Picks the GPU or CPU runner directory once and caches the choice.

use crate::error::{ModelFileError, Result};
use crate::system::gpu::detect_gpu;
use crate::types::config::RunnerConfig;
use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which build of the runner was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerBackend {
    Gpu,
    Cpu,
}

/// Selected runner directory, returned unmodified from the candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerChoice {
    pub path: PathBuf,
    pub backend: RunnerBackend,
}

/// Which candidates are usable on this machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Availability {
    pub gpu: bool,
    pub cpu: bool,
}

/// Source of hardware and installation facts for runner selection
pub trait RunnerProbe: Send + Sync {
    fn probe(&self, gpu_dir: &Path, cpu_dir: &Path) -> Availability;
}

impl<F> RunnerProbe for F
where
    F: Fn(&Path, &Path) -> Availability + Send + Sync,
{
    fn probe(&self, gpu_dir: &Path, cpu_dir: &Path) -> Availability {
        self(gpu_dir, cpu_dir)
    }
}

/// Probe backed by GPU detection and the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl RunnerProbe for SystemProbe {
    fn probe(&self, gpu_dir: &Path, cpu_dir: &Path) -> Availability {
        let gpu = gpu_dir.is_dir() && {
            let info = detect_gpu();
            tracing::debug!("GPU probe: {} (available: {})", info.name, info.is_available);
            info.is_available
        };
        Availability {
            gpu,
            cpu: cpu_dir.is_dir(),
        }
    }
}

/// Lazily selects a runner and keeps the outcome for its lifetime
pub struct RunnerSelector<P = SystemProbe> {
    probe: P,
    /// Chosen runner, or the (gpu, cpu) candidates that were probed and rejected
    choice: OnceCell<std::result::Result<RunnerChoice, (PathBuf, PathBuf)>>,
}

impl<P: RunnerProbe> RunnerSelector<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            choice: OnceCell::new(),
        }
    }

    /// Select between the GPU and CPU runner directories.
    ///
    /// The first call probes; every later call returns that outcome, whatever
    /// paths it passes. Concurrent first calls probe exactly once. A failed
    /// selection reports the directories that were actually probed.
    pub fn select_runner(&self, gpu_dir: &Path, cpu_dir: &Path) -> Result<&RunnerChoice> {
        match self.choice.get_or_init(|| self.choose(gpu_dir, cpu_dir)) {
            Ok(choice) => Ok(choice),
            Err((gpu, cpu)) => Err(ModelFileError::NoRunnerAvailable {
                gpu: gpu.clone(),
                cpu: cpu.clone(),
            }),
        }
    }

    fn choose(
        &self,
        gpu_dir: &Path,
        cpu_dir: &Path,
    ) -> std::result::Result<RunnerChoice, (PathBuf, PathBuf)> {
        let available = self.probe.probe(gpu_dir, cpu_dir);
        let choice = if available.gpu {
            Ok(RunnerChoice {
                path: gpu_dir.to_path_buf(),
                backend: RunnerBackend::Gpu,
            })
        } else if available.cpu {
            Ok(RunnerChoice {
                path: cpu_dir.to_path_buf(),
                backend: RunnerBackend::Cpu,
            })
        } else {
            Err((gpu_dir.to_path_buf(), cpu_dir.to_path_buf()))
        };

        match &choice {
            Ok(runner) => tracing::info!(
                "Selected {:?} runner at {}",
                runner.backend,
                runner.path.display()
            ),
            Err(_) => tracing::warn!(
                "Neither {} nor {} is a usable runner",
                gpu_dir.display(),
                cpu_dir.display()
            ),
        }
        choice
    }
}

impl Default for RunnerSelector<SystemProbe> {
    fn default() -> Self {
        Self::new(SystemProbe)
    }
}

static GGML_RUNNER: Lazy<RunnerSelector> = Lazy::new(RunnerSelector::default);

/// Process-wide runner selection using the system probe
pub fn select_runner(gpu_dir: &Path, cpu_dir: &Path) -> Result<&'static RunnerChoice> {
    let selector: &'static RunnerSelector = &GGML_RUNNER;
    selector.select_runner(gpu_dir, cpu_dir)
}

/// Process-wide runner for ggml-family models at the configured locations
pub fn ggml_runner(config: &RunnerConfig) -> Result<&'static RunnerChoice> {
    select_runner(&config.gpu_runner_dir, &config.cpu_runner_dir)
}
