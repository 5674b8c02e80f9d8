//! Session assembly: config mapping, backend selection, command bodies.

use eyre::WrapErr;
use txlink_config::{Backend, Config};
use txlink_core::io_error::map_device_error;
use txlink_core::runner::{self, RunParams};
use txlink_core::{LinkCfg, LinkError, normalize};
use txlink_io::{SimulatedController, UdpSink};
use txlink_traits::{Controller, Sink};

/// CLI overrides for the `fly` subcommand; `None` keeps the config value.
#[derive(Debug, Default)]
pub struct FlyOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub poll_interval_s: Option<f32>,
    pub zero_thresh: Option<f32>,
    pub max_wait_s: Option<f32>,
    pub sim: bool,
}

fn effective_cfg(cfg: &Config, poll_interval_s: Option<f32>, zero_thresh: Option<f32>) -> LinkCfg {
    let mut link_cfg: LinkCfg = (&cfg.timing).into();
    if let Some(s) = poll_interval_s {
        link_cfg.poll_interval_s = s;
    }
    if let Some(z) = zero_thresh {
        link_cfg.zero_thresh = z;
    }
    link_cfg
}

fn make_controller(cfg: &Config, force_sim: bool) -> txlink_core::Result<Box<dyn Controller>> {
    let backend = if force_sim {
        Backend::Sim
    } else {
        cfg.controller.backend
    };
    match backend {
        Backend::Sim => Ok(Box::new(SimulatedController::new(
            cfg.controller.sim_flight_samples,
        ))),
        Backend::Gamepad => {
            #[cfg(feature = "gamepad")]
            {
                let pad = txlink_io::GamepadController::attach()
                    .map_err(|e| eyre::Report::new(LinkError::DeviceUnavailable(e.to_string())))?;
                Ok(Box::new(pad))
            }
            #[cfg(not(feature = "gamepad"))]
            {
                Err(eyre::Report::new(LinkError::DeviceUnavailable(
                    "built without the `gamepad` feature; use --sim or rebuild with --features gamepad"
                        .to_string(),
                )))
            }
        }
    }
}

fn connect_sink(host: &str, port: u16) -> txlink_core::Result<UdpSink> {
    UdpSink::connect(host, port)
        .map_err(|e| eyre::Report::new(LinkError::Transport(e.to_string())))
        .wrap_err("connecting to ground-control station")
}

/// Calibrate and stream one session until the quit gesture.
pub fn run_fly(cfg: &Config, ov: FlyOverrides) -> txlink_core::Result<()> {
    let link_cfg = effective_cfg(cfg, ov.poll_interval_s, ov.zero_thresh);
    let host = ov.host.unwrap_or_else(|| cfg.link.host.clone());
    let port = ov.port.unwrap_or(cfg.link.port);
    let deadline = runner::deadline_from_secs(ov.max_wait_s)?;

    let controller = make_controller(cfg, ov.sim)?;
    let sink = connect_sink(&host, port)?;
    tracing::info!(host, port, "station link up");

    runner::run(
        controller,
        sink,
        None,
        RunParams {
            cfg: link_cfg,
            calibration_deadline: deadline,
        },
    )
}

/// Poll the transmitter and report normalized demands without
/// transmitting anything.
pub fn run_monitor(cfg: &Config, samples: u32, sim: bool) -> txlink_core::Result<()> {
    let mut controller = make_controller(cfg, sim)?;
    for _ in 0..samples {
        let raw = controller
            .poll()
            .map_err(|e| eyre::Report::new(map_device_error(&*e)))
            .wrap_err("polling transmitter")?;
        let demands = normalize(&raw, cfg.timing.zero_thresh);
        let (alt_hold, pos_hold) = raw.hold_switches();
        println!(
            "pitch={:+.3} roll={:+.3} yaw={:+.3} throttle={:.3} | alt-hold={:5} pos-hold={:5}",
            demands.pitch, demands.roll, demands.yaw, demands.throttle, alt_hold, pos_hold
        );
    }
    Ok(())
}

/// Construct the configured backend and sink, poll once, report.
pub fn run_self_check(cfg: &Config, sim: bool) -> txlink_core::Result<()> {
    let mut controller = make_controller(cfg, sim)?;
    let raw = controller
        .poll()
        .map_err(|e| eyre::Report::new(map_device_error(&*e)))
        .wrap_err("polling transmitter")?;

    let mut sink = connect_sink(&cfg.link.host, cfg.link.port)?;
    // A check transmits nothing; just release the socket again.
    sink.close()
        .map_err(|e| eyre::Report::new(LinkError::Transport(e.to_string())))
        .wrap_err("closing sink")?;

    println!(
        "self-check ok: {} switches, station {}:{}",
        raw.switches.len(),
        cfg.link.host,
        cfg.link.port
    );
    Ok(())
}
