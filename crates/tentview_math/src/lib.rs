//! Math types for tent-pitched meshes
//!
//! This crate provides the small set of vector and simplex types shared by
//! the mesh, slab, and render crates.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D spatial vector in double precision (mesh geometry)
//! - [`Vec4`] - space-time point (x, y, z, t) in single precision (rendering)
//!
//! ## Simplices
//!
//! - [`Tetrahedron`] - A 3-simplex defined by vertex indices
//! - [`Simplex4`] - A 4-simplex (5-cell) defined by vertex indices

mod vec3;
mod vec4;
pub mod shape;

pub use vec3::Vec3;
pub use vec4::Vec4;
pub use shape::{Simplex4, Tetrahedron};
