use clap::{Parser, Subcommand};
use modelfile::inference::ggml_runner;
use modelfile::storage::settings::{load_settings, save_settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "modelfile", version, about = "Inspect ggml-family model files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the decoded header of each file as JSON
    Inspect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the runner directory selected for this machine
    Runner,
    /// Show the persisted settings, updating them when directories are given
    Config {
        /// Directory holding the GPU-enabled runner
        #[arg(long)]
        gpu_dir: Option<PathBuf>,
        /// Directory holding the CPU-only runner
        #[arg(long)]
        cpu_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Installed before anything that logs, settings loading included
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut settings = load_settings();

    match cli.command {
        Command::Inspect { files } => {
            let mut failed = false;
            for file in files {
                match modelfile::resolve_path(&file) {
                    Ok(resolved) => match serde_json::to_string(&resolved) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            tracing::error!("{}: {}", file.display(), e);
                            failed = true;
                        }
                    },
                    Err(e) => {
                        tracing::error!("{}: {}", file.display(), e);
                        failed = true;
                    }
                }
            }
            if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Command::Runner => match ggml_runner(&settings.runner) {
            Ok(runner) => {
                println!("{}", runner.path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("{}", e);
                ExitCode::FAILURE
            }
        },
        Command::Config { gpu_dir, cpu_dir } => {
            let changed = gpu_dir.is_some() || cpu_dir.is_some();
            if let Some(dir) = gpu_dir {
                settings.runner.gpu_runner_dir = dir;
            }
            if let Some(dir) = cpu_dir {
                settings.runner.cpu_runner_dir = dir;
            }
            settings.validate();

            if changed {
                if let Err(e) = save_settings(&settings) {
                    tracing::error!("Failed to save settings: {}", e);
                    return ExitCode::FAILURE;
                }
            }

            match serde_json::to_string_pretty(&settings) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
