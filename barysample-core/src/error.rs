//! Error types for barysample

use thiserror::Error;

/// Main error type for barysample operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Degenerate mesh: {0}")]
    DegenerateMesh(String),

    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid allocation: triangle {triangle} has count {count}")]
    InvalidAllocation { triangle: usize, count: i64 },

    #[error("Sampling underflow: {excess} corrections requested but only {available} triangles can absorb one")]
    SamplingUnderflow { excess: usize, available: usize },
}

/// Result type alias for barysample operations
pub type Result<T> = std::result::Result<T, Error>;
