// Error types for the video backend

use std::io;

/// Errors that can occur while bringing up or tearing down the video backend
#[derive(Debug)]
pub enum VideoError {
    /// Both the huge-page and the fallback mapping failed
    OutOfMemory {
        /// Requested mapping size in bytes
        size: usize,
    },

    /// Surface dimensions were zero or otherwise unusable
    InvalidDimensions { width: usize, height: usize },

    /// I/O error
    Io(io::Error),
}

impl std::fmt::Display for VideoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoError::OutOfMemory { size } => {
                write!(f, "Failed to map {} bytes of buffer memory", size)
            }
            VideoError::InvalidDimensions { width, height } => {
                write!(f, "Invalid surface dimensions: {}x{}", width, height)
            }
            VideoError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for VideoError {}

impl From<io::Error> for VideoError {
    fn from(e: io::Error) -> Self {
        VideoError::Io(e)
    }
}
