//! Tetrahedral meshes
//!
//! This crate provides the spatial mesh that tents are pitched on:
//!
//! - [`Mesh`] - vertices, tetrahedral elements, and derived topology
//!   (edges, faces, vertex patches)
//! - [`Mesh::unit_cube`] / [`Mesh::structured_box`] - structured mesh
//!   generation with a maximum element size
//! - [`MeshValidator`] - static checks on raw element data
//! - [`MeshError`] - errors from generation and construction

mod error;
mod generate;
mod mesh;
mod validator;

pub use error::{MeshError, MeshResult};
pub use generate::MAX_DIVISIONS;
pub use mesh::{Face, Mesh};
pub use validator::{MeshIssue, MeshValidator};

// Re-export commonly used math types for convenience
pub use tentview_math::{Tetrahedron, Vec3};
