//! Joystick-backed transmitter (`gamepad` feature).
//!
//! A cabled R/C transmitter in trainer mode shows up to the host as a
//! joystick device. Mapping assumes a mode-2 layout: left stick is
//! throttle/yaw, right stick is pitch/roll; the shoulder buttons carry
//! the alt-hold and pos-hold switches.

use gilrs::{Axis, Button, GamepadId, Gilrs};

use txlink_traits::{Controller, RawSample};

use crate::error::{IoError, Result};

pub struct GamepadController {
    gilrs: Gilrs,
    id: GamepadId,
}

impl GamepadController {
    /// Attach to the first connected joystick device. Fails once, at
    /// startup, when no transmitter is attached.
    pub fn attach() -> Result<Self> {
        let gilrs = Gilrs::new().map_err(|e| IoError::NoTransmitter(e.to_string()))?;
        let id = gilrs
            .gamepads()
            .next()
            .map(|(id, _)| id)
            .ok_or_else(|| IoError::NoTransmitter("no joystick device attached".to_string()))?;
        if let Some((_, pad)) = gilrs.gamepads().next() {
            tracing::info!(name = pad.name(), "transmitter attached");
        }
        Ok(Self { gilrs, id })
    }
}

impl Controller for GamepadController {
    fn poll(&mut self) -> std::result::Result<RawSample, Box<dyn std::error::Error + Send + Sync>> {
        // Drain pending events so the cached state is current.
        while self.gilrs.next_event().is_some() {}

        let pad = self.gilrs.gamepad(self.id);
        if !pad.is_connected() {
            return Err(Box::new(IoError::NoTransmitter(
                "joystick disconnected".to_string(),
            )));
        }

        let axis = |a: Axis| pad.axis_data(a).map(|d| d.value()).unwrap_or(0.0);
        Ok(RawSample {
            pitch: axis(Axis::RightStickY),
            roll: axis(Axis::RightStickX),
            yaw: axis(Axis::LeftStickX),
            throttle: axis(Axis::LeftStickY),
            switches: vec![
                pad.is_pressed(Button::LeftTrigger),
                pad.is_pressed(Button::RightTrigger),
            ],
        })
    }
}
