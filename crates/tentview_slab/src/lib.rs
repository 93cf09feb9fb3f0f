//! Tent-pitched space-time slabs
//!
//! This crate builds the space-time decomposition that the viewer draws:
//!
//! - [`Tent`] - one advancing-front step at a central vertex
//! - [`TentSlab`] - all tents advancing a mesh from time 0 to `dt`,
//!   with their dependency DAG and parallel layers
//! - [`SlabParams`] - slab height, wave speed, and causality safety factor
//! - [`Wavespeed`] - uniform or per-vertex wave speed
//! - [`vtk`] - legacy VTK export of tent hypersurfaces
//!
//! ## Example
//! ```ignore
//! let mesh = Arc::new(Mesh::unit_cube(0.3)?);
//! let slab = TentSlab::pitch(mesh, 0.5, 1.0)?;
//! println!("The slab has {} tents.", slab.tent_count());
//! ```

mod error;
mod slab;
mod tent;
mod wavespeed;
pub mod vtk;

pub use error::{SlabError, SlabResult};
pub use slab::{SlabParams, TentSlab};
pub use tent::{Tent, TentSurface};
pub use wavespeed::Wavespeed;

// Re-export mesh types for convenient access through tentview_slab
pub use tentview_mesh::{Mesh, MeshError};
