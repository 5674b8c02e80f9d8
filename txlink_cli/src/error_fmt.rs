//! Human-readable error descriptions and structured JSON error formatting.

use txlink_core::{BuildError, LinkError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingController => {
                "What happened: No transmitter was provided to the bridge.\nLikely causes: The controller backend failed to initialize or was not wired into the builder.\nHow to fix: Ensure the backend is created successfully and passed via with_controller(...).".to_string()
            }
            BuildError::MissingSink => {
                "What happened: No station sink was provided to the bridge.\nLikely causes: The UDP sink failed to connect or was not wired into the builder.\nHow to fix: Ensure the sink is created successfully and passed via with_sink(...).".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the TOML or on the command line.\nHow to fix: Fix the [timing] values (poll_interval_s > 0, zero_thresh in [0, 1)), then rerun."
            ),
        };
    }

    if let Some(le) = err.downcast_ref::<LinkError>() {
        return match le {
            LinkError::DeviceUnavailable(detail) => format!(
                "What happened: No transmitter is attached ({detail}).\nLikely causes: The trainer cable is unplugged, or the build lacks the `gamepad` feature.\nHow to fix: Plug the transmitter in and check it enumerates as a joystick, or run with --sim."
            ),
            LinkError::Device(detail) => format!(
                "What happened: The transmitter stopped responding ({detail}).\nLikely causes: Cable unplugged mid-session or the joystick driver reset.\nHow to fix: Reconnect the transmitter and start a new session."
            ),
            LinkError::Transport(detail) => format!(
                "What happened: Sending to the ground-control station failed ({detail}).\nLikely causes: Wrong host/port, or the station is not listening.\nHow to fix: Check [link] in the config and that the station's UDP input is enabled."
            ),
            LinkError::Config(detail) => format!(
                "What happened: Invalid configuration ({detail}).\nLikely causes: Out-of-range values in the TOML or on the command line.\nHow to fix: Edit the config file or flags, then rerun."
            ),
            LinkError::State(detail) => format!(
                "What happened: {detail}.\nLikely causes: A calibration deadline expired or the session was already over.\nHow to fix: Start a new session; raise --max-wait-s if the operator needs more time."
            ),
        };
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Short stable name for the error, used in JSON output.
pub fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(le) = err.downcast_ref::<LinkError>() {
        return match le {
            LinkError::DeviceUnavailable(_) => "DeviceUnavailable",
            LinkError::Device(_) => "Device",
            LinkError::Transport(_) => "Transport",
            LinkError::Config(_) => "Config",
            LinkError::State(_) => "State",
        };
    }
    if err.downcast_ref::<BuildError>().is_some() {
        return "Build";
    }
    "Error"
}

/// Map typed errors to stable exit codes; untyped errors return 1.
pub fn exit_code_for_error(err: &eyre::Report) -> u8 {
    if let Some(le) = err.downcast_ref::<LinkError>() {
        return match le {
            LinkError::DeviceUnavailable(_) => 2,
            LinkError::Device(_) => 3,
            LinkError::Transport(_) => 4,
            LinkError::Config(_) => 5,
            LinkError::State(_) => 6,
        };
    }
    if err.downcast_ref::<BuildError>().is_some() {
        return 5;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    serde_json::json!({
        "reason": reason_name(err),
        "message": humanize(err),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_unavailable_maps_to_exit_code_two() {
        let err = eyre::Report::new(LinkError::DeviceUnavailable("unplugged".into()));
        assert_eq!(exit_code_for_error(&err), 2);
        assert_eq!(reason_name(&err), "DeviceUnavailable");
        assert!(humanize(&err).contains("unplugged"));
    }

    #[test]
    fn untyped_errors_fall_back_to_one() {
        let err = eyre::eyre!("something odd");
        assert_eq!(exit_code_for_error(&err), 1);
        assert_eq!(reason_name(&err), "Error");
    }

    #[test]
    fn json_output_carries_reason_and_message() {
        let err = eyre::Report::new(LinkError::Transport("refused".into()));
        let json: serde_json::Value =
            serde_json::from_str(&format_error_json(&err)).expect("valid JSON");
        assert_eq!(json["reason"], "Transport");
        assert!(json["message"].as_str().unwrap().contains("refused"));
    }
}
