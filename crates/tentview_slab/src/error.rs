//! Slab error types

use std::io;

use thiserror::Error;

/// Errors that can occur while pitching or querying a slab
#[derive(Error, Debug)]
pub enum SlabError {
    /// A pitching parameter is out of its valid range
    #[error("invalid slab parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A per-vertex wave speed does not match the mesh
    #[error("wave speed has {found} vertex values but the mesh has {expected} vertices")]
    WavespeedLength { expected: usize, found: usize },

    /// Mesh has no vertices to pitch on
    #[error("cannot pitch tents on an empty mesh")]
    EmptyMesh,

    /// No vertex can advance although the slab is not complete
    #[error("tent pitching stalled after {pitched} tents with {incomplete} vertices below the slab top")]
    Stalled { pitched: usize, incomplete: usize },

    /// Requested tent does not exist
    #[error("tent index {index} is out of range 0:{count}")]
    TentOutOfRange { index: usize, count: usize },

    /// IO error while exporting
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized Result type for slab operations.
pub type SlabResult<T> = std::result::Result<T, SlabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let msg = SlabError::TentOutOfRange { index: 12, count: 12 }.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("0:12"));
    }

    #[test]
    fn test_invalid_parameter_display() {
        let msg = SlabError::InvalidParameter { name: "dt", value: -1.0 }.to_string();
        assert!(msg.contains("dt"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: SlabError = io_err.into();
        match err {
            SlabError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io variant"),
        }
    }
}
