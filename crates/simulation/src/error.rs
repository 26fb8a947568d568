//! Error types for simulation persistence.

use std::fmt;
use std::io;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur while saving or loading simulation state.
#[derive(Debug)]
pub enum SimError {
    /// The snapshot file could not be read or written.
    Io(io::Error),
    /// The snapshot contents could not be encoded or decoded.
    Codec(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io(e) => write!(f, "snapshot io: {}", e),
            SimError::Codec(e) => write!(f, "snapshot codec: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            SimError::Codec(e) => Some(e),
        }
    }
}

impl From<io::Error> for SimError {
    fn from(e: io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Codec(e)
    }
}
