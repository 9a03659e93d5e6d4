//! Error types for range coding.

use thiserror::Error;

/// Error variants for range coder operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Chunk precision is zero or not a whole number of bytes.
    #[error("precision must be a nonzero multiple of 8 bits, got {0}")]
    InvalidPrecision(u32),

    /// Register width cannot carry the configured chunk size.
    #[error(
        "range size {range_size} unusable with precision {precision}: it must \
         be a multiple of the precision, wider than twice the precision, and \
         at most 128 bits"
    )]
    InvalidRangeSize {
        /// Configured register width in bits.
        range_size: u32,
        /// Configured chunk precision in bits.
        precision: u32,
    },

    /// An I/O error occurred during encoding or decoding.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for range coder operations.
pub type Result<T> = std::result::Result<T, Error>;
