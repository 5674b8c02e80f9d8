use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum LinkError {
    #[error("no transmitter: {0}")]
    DeviceUnavailable(String),
    #[error("controller error: {0}")]
    Device(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid state: {0}")]
    State(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing controller")]
    MissingController,
    #[error("missing sink")]
    MissingSink,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
