//! Mesh error types

use thiserror::Error;

use crate::validator::MeshIssue;

/// Errors that can occur while generating or constructing a mesh
#[derive(Error, Debug)]
pub enum MeshError {
    /// Maximum element size is not a positive finite number
    #[error("maximum element size must be positive and finite, got {0}")]
    InvalidMaxH(f64),

    /// Box has no volume along at least one axis
    #[error("box must have positive extent on every axis, got min {min:?} and max {max:?}")]
    InvalidBox { min: [f64; 3], max: [f64; 3] },

    /// Requested resolution exceeds the per-axis division limit
    #[error("maxh {maxh} needs {divisions} cells per axis, the limit is {limit}")]
    TooFine {
        maxh: f64,
        divisions: usize,
        limit: usize,
    },

    /// Element data failed validation
    #[error("mesh failed validation: {}", describe(.0))]
    Invalid(Vec<MeshIssue>),
}

/// A specialized Result type for mesh operations.
pub type MeshResult<T> = std::result::Result<T, MeshError>;

fn describe(issues: &[MeshIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
