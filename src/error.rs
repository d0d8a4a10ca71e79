/// Error types for the library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("weight matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("flat weight buffer has {len} entries, expected {expected} for {n} vertices")]
    BufferLength { n: usize, len: usize, expected: usize },

    #[error("vertex limit {limit} exceeds matrix dimension {dimension}")]
    VertexLimitExceeded { limit: usize, dimension: usize },

    #[error("vertex {vertex} out of range for {n} vertices")]
    VertexOutOfRange { vertex: usize, n: usize },

    #[error("intermediate entry ({from}, {to}) names vertex {vertex}, outside 0..{n}")]
    CorruptIntermediate { from: usize, to: usize, vertex: usize, n: usize },

    #[error("path {from} -> {to} has more than {limit} intermediates; intermediate matrix is cyclic")]
    PathTooLong { from: usize, to: usize, limit: usize },

    #[error("invalid weight matrix JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Return code used by the C ABI (`0` is success, see `apsp_run`).
    pub fn code(&self) -> i32 {
        match self {
            Error::VertexLimitExceeded { .. } | Error::VertexOutOfRange { .. } => -2,
            Error::CorruptIntermediate { .. } | Error::PathTooLong { .. } => -4,
            Error::NotSquare { .. } | Error::BufferLength { .. } | Error::Json(_) => -6,
        }
    }
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
