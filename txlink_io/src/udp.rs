//! UDP transport to the ground-control station.

use std::net::UdpSocket;

use txlink_traits::Sink;

use crate::error::{IoError, Result};

/// Bytes per update: four little-endian `f32` channels.
const DATAGRAM_LEN: usize = 16;

/// Connected UDP socket delivering one datagram per channel update.
///
/// The wire layout is four little-endian `f32` values in transmit order
/// (pitch, yaw, roll, throttle). `close` latches; any use afterwards is
/// a transport error.
pub struct UdpSink {
    socket: UdpSocket,
    open: bool,
}

impl UdpSink {
    /// Bind an ephemeral local port and connect to the station.
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        socket.connect((host, port))?;
        tracing::debug!(host, port, "udp sink connected");
        Ok(Self { socket, open: true })
    }

    fn encode(pitch: f32, yaw: f32, roll: f32, throttle: f32) -> [u8; DATAGRAM_LEN] {
        let mut buf = [0u8; DATAGRAM_LEN];
        for (chunk, v) in buf
            .chunks_exact_mut(4)
            .zip([pitch, yaw, roll, throttle])
        {
            chunk.copy_from_slice(&v.to_le_bytes());
        }
        buf
    }
}

impl Sink for UdpSink {
    fn set(
        &mut self,
        pitch: f32,
        yaw: f32,
        roll: f32,
        throttle: f32,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.open {
            return Err(Box::new(IoError::Closed));
        }
        let buf = Self::encode(pitch, yaw, roll, throttle);
        self.socket
            .send(&buf)
            .map_err(|e| Box::new(IoError::from(e)) as Box<dyn std::error::Error + Send + Sync>)?;
        Ok(())
    }

    fn close(&mut self) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.open {
            return Err(Box::new(IoError::Closed));
        }
        self.open = false;
        tracing::debug!("udp sink closed");
        Ok(())
    }
}
