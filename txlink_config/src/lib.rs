#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and validation for the transmitter link.
//!
//! `Config` and its sub-structs are deserialized from TOML and validated
//! before a session starts. Every section has sensible defaults so a
//! missing config file still yields a usable configuration.

use serde::Deserialize;

/// Ground-control station endpoint.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Link {
    pub host: String,
    pub port: u16,
}

impl Default for Link {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5005,
        }
    }
}

/// Loop pacing and rail-noise threshold.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Timing {
    /// Seconds between successive transmissions (blocking sleep).
    pub poll_interval_s: f32,
    /// Noise threshold: readings within this fraction of a rail are
    /// snapped to the rail. Full deflection never quite reaches ±1.0.
    pub zero_thresh: f32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            poll_interval_s: 0.1,
            zero_thresh: 0.02,
        }
    }
}

/// Which transmitter backend to attach.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// A joystick device (requires the `gamepad` build feature).
    #[default]
    Gamepad,
    /// Deterministic scripted transmitter; flies one session and quits.
    Sim,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ControllerCfg {
    pub backend: Backend,
    /// Flight samples a simulated session produces before its quit gesture.
    pub sim_flight_samples: usize,
}

impl Default for ControllerCfg {
    fn default() -> Self {
        Self {
            backend: Backend::Gamepad,
            sim_flight_samples: 50,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub link: Link,
    pub timing: Timing,
    pub controller: ControllerCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a config file.
pub fn load_path(path: &std::path::Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Link
        if self.link.host.trim().is_empty() {
            eyre::bail!("link.host must not be empty");
        }
        if self.link.port == 0 {
            eyre::bail!("link.port must be > 0");
        }

        // Timing
        if !(self.timing.poll_interval_s.is_finite() && self.timing.poll_interval_s > 0.0) {
            eyre::bail!("timing.poll_interval_s must be > 0");
        }
        if self.timing.poll_interval_s > 10.0 {
            eyre::bail!("timing.poll_interval_s is unreasonably large (>10s)");
        }
        if !(0.0..1.0).contains(&self.timing.zero_thresh) {
            eyre::bail!("timing.zero_thresh must be in [0, 1)");
        }

        // Controller
        if self.controller.sim_flight_samples == 0 {
            eyre::bail!("controller.sim_flight_samples must be >= 1");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}
