#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core link logic (device-agnostic).
//!
//! This crate drives a cabled R/C transmitter session against a
//! ground-control-station sink. All device interactions go through the
//! `txlink_traits::Controller` and `txlink_traits::Sink` traits.
//!
//! ## Architecture
//!
//! - **Normalization**: dead-zone rail snapping and throttle rescale
//!   (`demands` module)
//! - **Gesture gating**: pre-flight switch/stick sequence and the quit
//!   transition (`state` module)
//! - **Control loop**: poll → normalize → hold hook → transmit at a
//!   fixed cadence (`bridge` module)
//! - **Configuration**: runtime config structs (`config` module),
//!   mapped from the TOML schema in `txlink_config` (`conversions`)
//! - **Errors**: typed `LinkError`/`BuildError` propagated through
//!   `eyre` (`error`, `io_error` modules)

pub mod bridge;
pub mod builder;
pub mod config;
pub mod conversions;
pub mod demands;
pub mod error;
pub mod hold;
pub mod io_error;
pub mod mocks;
pub mod runner;
pub mod state;

pub use bridge::{Bridge, LinkStatus};
pub use builder::BridgeBuilder;
pub use config::LinkCfg;
pub use demands::{Demands, normalize, snap_rails};
pub use error::{BuildError, LinkError, Result};
pub use hold::{HoldHook, default_hold};
pub use state::{GestureGate, TxState};
pub use txlink_traits::{Controller, RawSample, Sink};
