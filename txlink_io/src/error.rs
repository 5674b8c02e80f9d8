use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("no transmitter: {0}")]
    NoTransmitter(String),
    #[error("sink already closed")]
    Closed,
    #[error("io: {0}")]
    Socket(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IoError>;
