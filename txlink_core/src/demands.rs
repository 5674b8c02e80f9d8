//! Demand normalization: dead-zone rail snapping and throttle rescale.

use txlink_traits::RawSample;

/// Normalized flight-control demands for one transmission.
///
/// Pitch, roll and yaw stay bipolar in [-1, 1]; throttle is unipolar in
/// [0, 1] with 0 meaning throttle cut. Roll keeps the raw sign here and
/// is negated at the transmit call to match the station's convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Demands {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
    pub throttle: f32,
}

/// True when `v` reads as the negative rail under the noise threshold.
#[inline]
pub fn low_rail(v: f32, zero_thresh: f32) -> bool {
    v < -(1.0 - zero_thresh)
}

/// True when `v` reads as the positive rail under the noise threshold.
#[inline]
pub fn high_rail(v: f32, zero_thresh: f32) -> bool {
    v > 1.0 - zero_thresh
}

/// Snap near-rail readings to the exact rail.
///
/// Device and transport noise keep full deflection from ever reaching
/// ±1.0; anything past `1 - zero_thresh` in magnitude counts as rail.
#[inline]
pub fn snap_rails(v: f32, zero_thresh: f32) -> f32 {
    if low_rail(v, zero_thresh) {
        -1.0
    } else if high_rail(v, zero_thresh) {
        1.0
    } else {
        v
    }
}

/// Map a raw sample to transmit-ready demands. Pure; no error path.
///
/// Throttle is snapped, rescaled from [-1, 1] to [0, 1], and clamped so
/// the unipolar invariant holds for any input: a low-rail reading lands
/// at exactly 0.0, center at 0.5, high rail at 1.0.
pub fn normalize(raw: &RawSample, zero_thresh: f32) -> Demands {
    let throttle = (snap_rails(raw.throttle, zero_thresh) / 2.0 + 0.5).clamp(0.0, 1.0);
    Demands {
        pitch: snap_rails(raw.pitch, zero_thresh),
        roll: snap_rails(raw.roll, zero_thresh),
        yaw: snap_rails(raw.yaw, zero_thresh),
        throttle,
    }
}
