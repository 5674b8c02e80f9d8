use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::net::UdpSocket;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tempfile::tempdir;

// Minimal valid TOML config for a fast simulated session.
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[link]
host = "127.0.0.1"
port = 5005

[timing]
# Keep the simulated session fast.
poll_interval_s = 0.001
zero_thresh = 0.02

[controller]
backend = "sim"
sim_flight_samples = 5
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).expect("write config");
    path
}

fn txlink() -> Command {
    Command::cargo_bin("txlink").expect("binary built")
}

#[test]
fn fly_sim_runs_a_full_session_and_delivers_datagrams() {
    let dir = tempdir().expect("tempdir");
    let cfg = write_valid_config(&dir);

    let receiver = UdpSocket::bind("127.0.0.1:0").expect("bind receiver");
    receiver
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("set timeout");
    let port = receiver.local_addr().expect("addr").port();

    txlink()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&cfg)
        .args(["fly", "--sim", "--port", &port.to_string()])
        .assert()
        .success();

    // Five flight samples → five 16-byte datagrams, already buffered.
    let mut buf = [0u8; 64];
    let mut received = 0;
    while received < 5 {
        let n = receiver.recv(&mut buf).expect("datagram");
        assert_eq!(n, 16);
        received += 1;
    }
}

#[test]
fn fly_rejects_an_invalid_config() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("cfg.toml");
    fs::write(
        &path,
        "[timing]\npoll_interval_s = 0.0\nzero_thresh = 0.02\n",
    )
    .expect("write config");

    txlink()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&path)
        .args(["fly", "--sim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("poll_interval_s"));
}

#[test]
fn an_explicit_missing_config_is_an_error() {
    let dir = tempdir().expect("tempdir");
    txlink()
        .current_dir(dir.path())
        .args(["--config", "/definitely/not/here.toml", "self-check", "--sim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn monitor_sim_reports_the_requested_sample_count() {
    let dir = tempdir().expect("tempdir");
    let cfg = write_valid_config(&dir);

    let output = txlink()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&cfg)
        .args(["monitor", "--sim", "--samples", "5"])
        .output()
        .expect("run monitor");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let demand_lines = stdout.lines().filter(|l| l.starts_with("pitch=")).count();
    assert_eq!(demand_lines, 5);
}

#[test]
fn self_check_sim_succeeds_without_hardware() {
    let dir = tempdir().expect("tempdir");
    let cfg = write_valid_config(&dir);

    txlink()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&cfg)
        .args(["self-check", "--sim"])
        .assert()
        .success()
        .stdout(predicate::str::contains("self-check ok"));
}

// Without the `gamepad` feature the default backend must fail loudly,
// with a stable exit code and structured JSON under --json.
#[cfg(not(feature = "gamepad"))]
#[test]
fn gamepad_backend_without_the_feature_is_device_unavailable() {
    let dir = tempdir().expect("tempdir");

    txlink()
        .current_dir(dir.path())
        .args(["--json", "self-check"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("\"reason\":\"DeviceUnavailable\""));
}
