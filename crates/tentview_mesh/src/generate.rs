//! Structured tetrahedral mesh generation
//!
//! A box is divided into a grid of hexahedral cells, and each cell is
//! decomposed into 6 tetrahedra using the Kuhn triangulation. All cells use
//! the same decomposition, so neighbouring cells share their face diagonals
//! and the resulting mesh is conforming.

use tentview_math::{Tetrahedron, Vec3};

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

/// Largest number of cells allowed along one axis
pub const MAX_DIVISIONS: usize = 128;

/// Axis orderings for the Kuhn triangulation of a cube
const KUHN_PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

impl Mesh {
    /// Generate a tetrahedral mesh of the unit cube `[0, 1]^3`
    ///
    /// No edge of the result is longer than `maxh`.
    pub fn unit_cube(maxh: f64) -> MeshResult<Self> {
        Self::structured_box(Vec3::ZERO, Vec3::ONE, maxh)
    }

    /// Generate a tetrahedral mesh of an axis-aligned box
    ///
    /// Each axis of length `len` is divided into `ceil(len * sqrt(3) / maxh)`
    /// cells, which keeps the cell diagonal (the longest edge of the Kuhn
    /// triangulation) at or below `maxh`.
    pub fn structured_box(min: Vec3, max: Vec3, maxh: f64) -> MeshResult<Self> {
        if !(maxh.is_finite() && maxh > 0.0) {
            return Err(MeshError::InvalidMaxH(maxh));
        }
        let extent = max - min;
        if !(extent.x > 0.0 && extent.y > 0.0 && extent.z > 0.0) {
            return Err(MeshError::InvalidBox {
                min: min.to_array(),
                max: max.to_array(),
            });
        }

        let divisions = |len: f64| -> MeshResult<usize> {
            let cells = (len * 3f64.sqrt() / maxh).ceil().max(1.0);
            if cells > MAX_DIVISIONS as f64 {
                return Err(MeshError::TooFine {
                    maxh,
                    divisions: cells as usize,
                    limit: MAX_DIVISIONS,
                });
            }
            Ok(cells as usize)
        };
        let n = [divisions(extent.x)?, divisions(extent.y)?, divisions(extent.z)?];
        let step = Vec3::new(
            extent.x / n[0] as f64,
            extent.y / n[1] as f64,
            extent.z / n[2] as f64,
        );

        let index = |i: usize, j: usize, k: usize| i + (n[0] + 1) * (j + (n[1] + 1) * k);

        let mut points = Vec::with_capacity((n[0] + 1) * (n[1] + 1) * (n[2] + 1));
        for k in 0..=n[2] {
            for j in 0..=n[1] {
                for i in 0..=n[0] {
                    points.push(Vec3::new(
                        min.x + i as f64 * step.x,
                        min.y + j as f64 * step.y,
                        min.z + k as f64 * step.z,
                    ));
                }
            }
        }

        let mut elements = Vec::with_capacity(6 * n[0] * n[1] * n[2]);
        for k in 0..n[2] {
            for j in 0..n[1] {
                for i in 0..n[0] {
                    for perm in &KUHN_PERMUTATIONS {
                        // Walk from the cell's low corner to its high corner,
                        // stepping along the axes in permutation order
                        let mut corner = [i, j, k];
                        let mut tet = [index(i, j, k); 4];
                        for (step_idx, &axis) in perm.iter().enumerate() {
                            corner[axis] += 1;
                            tet[step_idx + 1] = index(corner[0], corner[1], corner[2]);
                        }
                        elements.push(Tetrahedron::new(tet));
                    }
                }
            }
        }

        log::debug!(
            "Structured mesh: {}x{}x{} cells, {} vertices, {} elements",
            n[0],
            n[1],
            n[2],
            points.len(),
            elements.len()
        );

        Mesh::new(points, elements)
    }
}
