//! Error types for patchwork.
//!
//! Only fatal conditions are errors. Degenerate cells and non-manifold edges
//! met while splitting are ordinary algorithm branches and are reported through
//! [`SplitStats`](crate::algo::split::SplitStats) instead.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The input mesh is structurally unusable.
    #[error("invalid input mesh: {0}")]
    InvalidInput(String),

    /// A cell references a point that does not exist.
    #[error("cell {cell} references invalid point index {point}")]
    InvalidPointIndex {
        /// The cell index.
        cell: usize,
        /// The invalid point index.
        point: usize,
    },

    /// Invalid mesh state for the requested operation.
    #[error("invalid mesh state: {0}")]
    InvalidState(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// The operation was cancelled through its cancel token.
    #[error("operation cancelled")]
    Cancelled,
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
