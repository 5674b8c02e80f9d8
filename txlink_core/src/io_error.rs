//! Maps `Box<dyn Error>` from trait boundaries to typed `LinkError`.
//!
//! The traits in `txlink_traits` use `Box<dyn Error + Send + Sync>` for
//! maximum flexibility; this module converts those to the typed error
//! enum, with an optional feature-gated path for `txlink_io::IoError`
//! downcasting.

use crate::error::LinkError;

/// Map a controller-boundary error to a typed `LinkError`.
///
/// Attempts to downcast the known device error type first, then falls
/// back to string-based heuristics.
pub fn map_device_error(e: &(dyn std::error::Error + 'static)) -> LinkError {
    // Feature-gated: try to downcast to IoError for precise mapping
    #[cfg(feature = "io-errors")]
    {
        if let Some(io) = e.downcast_ref::<txlink_io::error::IoError>() {
            return match io {
                txlink_io::error::IoError::NoTransmitter(detail) => {
                    LinkError::DeviceUnavailable(detail.clone())
                }
                other => LinkError::Device(other.to_string()),
            };
        }
    }

    // Fallback: string-based detection
    let s = e.to_string();
    if s.to_lowercase().contains("no transmitter") {
        LinkError::DeviceUnavailable(s)
    } else {
        LinkError::Device(s)
    }
}

/// Map a sink-boundary error to a typed `LinkError`. Every transport
/// failure is fatal to the session; no finer categories exist.
pub fn map_transport_error(e: &(dyn std::error::Error + 'static)) -> LinkError {
    LinkError::Transport(e.to_string())
}
