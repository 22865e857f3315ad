use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to reserve {requested} bytes for hash input")]
    Allocation { requested: usize },

    #[error("i/o error while hashing: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid digest length {got}: expected 64 hex characters")]
    InvalidDigestLength { got: usize },

    #[error("invalid hex digit {found:?} at position {position}")]
    InvalidHexDigit { position: usize, found: char },

    #[error("invalid bench config: {0}")]
    InvalidBenchConfig(String),
}
