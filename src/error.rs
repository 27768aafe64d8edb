//! Crate-level error type.

use crate::pgm::ParseError;
use thiserror::Error;

/// Errors reported by raster construction and algorithm runs.
#[derive(Debug, Error)]
pub enum Error {
    /// The PGM decoder rejected the input bytes.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The requested index-matrix size is not a power of two >= 2.
    #[error("index matrix size must be a power of two >= 2, got {0}")]
    InvalidMatrixSize(u32),

    /// The algorithm selector string was not recognized.
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// A raster dimension is zero.
    #[error("raster dimensions must be nonzero, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The maximum gray level is zero.
    #[error("max gray level must be in 1..=255")]
    InvalidMaxGray,

    /// The sample buffer does not match the raster dimensions.
    #[error("sample buffer holds {got} samples, expected {width}x{height}")]
    SampleCountMismatch {
        /// Actual buffer length.
        got: usize,
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}
