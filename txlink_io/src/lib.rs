//! Device-facing implementations of the link's boundary traits.
//!
//! - [`UdpSink`]: datagram transport to the ground-control station.
//! - [`SimulatedController`]: deterministic scripted transmitter for
//!   `--sim` runs and integration tests.
//! - `GamepadController` (feature `gamepad`): a cabled transmitter
//!   exposed to the host as a joystick device.

pub mod error;
pub mod sim;
pub mod udp;

#[cfg(feature = "gamepad")]
pub mod gamepad;

pub use error::IoError;
pub use sim::SimulatedController;
pub use udp::UdpSink;

#[cfg(feature = "gamepad")]
pub use gamepad::GamepadController;
