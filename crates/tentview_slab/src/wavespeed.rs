//! Wave speed bounding the tent slopes

use tentview_mesh::{Mesh, Vec3};

use crate::error::{SlabError, SlabResult};

/// Maximal wave propagation speed, either uniform or given at every mesh
/// vertex
///
/// An edge is bounded by the faster of its two end vertices, so a speed
/// sampled at the vertices is a safe bound for the piecewise linear field.
#[derive(Clone, Debug, PartialEq)]
pub enum Wavespeed {
    /// One speed everywhere
    Constant(f64),
    /// Speed at each vertex, indexed like the mesh points
    PerVertex(Vec<f64>),
}

impl Default for Wavespeed {
    fn default() -> Self {
        Wavespeed::Constant(1.0)
    }
}

impl From<f64> for Wavespeed {
    fn from(c: f64) -> Self {
        Wavespeed::Constant(c)
    }
}

impl Wavespeed {
    /// Sample a speed field at the vertices of `mesh`
    pub fn from_fn(mesh: &Mesh, speed: impl Fn(Vec3) -> f64) -> Self {
        Wavespeed::PerVertex(mesh.points().iter().map(|&p| speed(p)).collect())
    }

    /// Speed at vertex `v`
    #[inline]
    pub fn at(&self, v: usize) -> f64 {
        match self {
            Wavespeed::Constant(c) => *c,
            Wavespeed::PerVertex(speeds) => speeds[v],
        }
    }

    /// Fastest speed anywhere
    pub fn max(&self) -> f64 {
        match self {
            Wavespeed::Constant(c) => *c,
            Wavespeed::PerVertex(speeds) => speeds.iter().copied().fold(0.0, f64::max),
        }
    }

    /// Every speed must be positive and finite
    pub fn validate(&self) -> SlabResult<()> {
        let values: &[f64] = match self {
            Wavespeed::Constant(c) => std::slice::from_ref(c),
            Wavespeed::PerVertex(speeds) => speeds,
        };
        match values.iter().find(|&&c| !(c.is_finite() && c > 0.0)) {
            Some(&value) => Err(SlabError::InvalidParameter {
                name: "wavespeed",
                value,
            }),
            None => Ok(()),
        }
    }

    /// A per-vertex speed must cover exactly the mesh vertices
    pub(crate) fn check_mesh(&self, mesh: &Mesh) -> SlabResult<()> {
        match self {
            Wavespeed::PerVertex(speeds) if speeds.len() != mesh.vertex_count() => {
                Err(SlabError::WavespeedLength {
                    expected: mesh.vertex_count(),
                    found: speeds.len(),
                })
            }
            _ => Ok(()),
        }
    }
}
