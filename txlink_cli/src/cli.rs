//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub const DEFAULT_CONFIG_PATH: &str = "etc/txlink.toml";

#[derive(Parser, Debug)]
#[command(name = "txlink", version, about = "R/C transmitter to GCS UDP link")]
pub struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calibrate and stream demands to the ground-control station
    Fly {
        /// Override station host
        #[arg(long, value_name = "HOST")]
        host: Option<String>,
        /// Override station UDP port
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,
        /// Override seconds between transmissions
        #[arg(long, value_name = "SECS")]
        poll_interval_s: Option<f32>,
        /// Override the rail-noise threshold
        #[arg(long, value_name = "FRACTION")]
        zero_thresh: Option<f32>,
        /// Cap each calibration wait (seconds); by default waits forever
        #[arg(long, value_name = "SECS")]
        max_wait_s: Option<f32>,
        /// Use the simulated transmitter instead of the configured backend
        #[arg(long, action = ArgAction::SetTrue)]
        sim: bool,
    },
    /// Poll the transmitter and report demands without transmitting
    Monitor {
        /// Number of samples to report
        #[arg(long, value_name = "N", default_value_t = 20)]
        samples: u32,
        /// Use the simulated transmitter instead of the configured backend
        #[arg(long, action = ArgAction::SetTrue)]
        sim: bool,
    },
    /// Construct the configured backend and sink, poll once, report
    SelfCheck {
        /// Use the simulated transmitter instead of the configured backend
        #[arg(long, action = ArgAction::SetTrue)]
        sim: bool,
    },
}
