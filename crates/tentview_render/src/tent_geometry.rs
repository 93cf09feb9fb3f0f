//! Space-time geometry of a single tent
//!
//! A tent over a vertex patch is the union of one 4-simplex per patch
//! element. For element `(v, a, b, c)` with central vertex `v`, the simplex
//! is spanned by `(x_v, tbot)`, `(x_v, ttop)`, `(x_a, t_a)`, `(x_b, t_b)` and
//! `(x_c, t_c)`.

use tentview_math::{Simplex4, Vec4};
use tentview_slab::{SlabResult, TentSlab};

/// Space-time vertices and simplices of one tent
///
/// Vertex 0 is the foot of the tentpole and vertex 1 its top. The remaining
/// vertices are the neighbours in the order the tent lists them.
#[derive(Clone, Debug)]
pub struct TentGeometry {
    /// Index of the tent in its slab
    pub tent_index: usize,
    /// Space-time vertex positions
    pub vertices: Vec<Vec4>,
    /// One simplex per patch element, as indices into `vertices`
    pub simplices: Vec<Simplex4>,
    /// Color of each simplex
    pub colors: Vec<[f32; 4]>,
}

impl TentGeometry {
    /// Build the geometry of tent `index`
    pub fn from_tent(slab: &TentSlab, index: usize) -> SlabResult<Self> {
        let tent = slab.tent(index)?;
        let mesh = slab.mesh();

        let spatial = |v: usize| mesh.point(v).to_f32_array();
        let mut vertices = Vec::with_capacity(2 + tent.nbv.len());
        vertices.push(Vec4::from_spatial(spatial(tent.vertex), tent.tbot as f32));
        vertices.push(Vec4::from_spatial(spatial(tent.vertex), tent.ttop as f32));
        for (&v, &t) in tent.nbv.iter().zip(&tent.nbtime) {
            vertices.push(Vec4::from_spatial(spatial(v), t as f32));
        }

        let mut simplices = Vec::with_capacity(tent.els.len());
        let mut colors = Vec::with_capacity(tent.els.len());
        for (k, &el) in tent.els.iter().enumerate() {
            let mut indices = [0, 1, 0, 0, 0];
            let mut slot = 2;
            for v in mesh.element(el).indices {
                if v == tent.vertex {
                    continue;
                }
                // Patch elements only touch the central vertex and its neighbours
                let Some(pos) = tent.nbv.iter().position(|&u| u == v) else {
                    continue;
                };
                if slot < 5 {
                    indices[slot] = 2 + pos;
                    slot += 1;
                }
            }
            if slot != 5 {
                log::warn!("Tent {}: element {} is not in the vertex patch", index, el);
                continue;
            }
            simplices.push(Simplex4::new(indices));
            colors.push(element_color(k, tent.els.len()));
        }

        log::debug!(
            "Tent {} geometry: {} vertices, {} simplices",
            index,
            vertices.len(),
            simplices.len()
        );

        Ok(Self {
            tent_index: index,
            vertices,
            simplices,
            colors,
        })
    }

    /// Get the number of simplices
    #[inline]
    pub fn simplex_count(&self) -> usize {
        self.simplices.len()
    }

    /// The five space-time corners of a simplex
    pub fn simplex_points(&self, simplex: usize) -> [Vec4; 5] {
        self.simplices[simplex].indices.map(|i| self.vertices[i])
    }

    /// Lowest and highest time of the tent
    pub fn time_range(&self) -> (f32, f32) {
        self.vertices
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.t), hi.max(v.t))
            })
    }

    /// Time at the midpoint of the tentpole
    pub fn pole_midpoint(&self) -> f32 {
        0.5 * (self.vertices[0].t + self.vertices[1].t)
    }

    /// Center and radius of the spatial bounding sphere
    pub fn bounding_sphere(&self) -> ([f32; 3], f32) {
        let mut lo = [f32::INFINITY; 3];
        let mut hi = [f32::NEG_INFINITY; 3];
        for v in &self.vertices {
            for (axis, c) in v.xyz().into_iter().enumerate() {
                lo[axis] = lo[axis].min(c);
                hi[axis] = hi[axis].max(c);
            }
        }
        let center = [
            0.5 * (lo[0] + hi[0]),
            0.5 * (lo[1] + hi[1]),
            0.5 * (lo[2] + hi[2]),
        ];
        let radius = self
            .vertices
            .iter()
            .map(|v| {
                let p = v.xyz();
                let d = [p[0] - center[0], p[1] - center[1], p[2] - center[2]];
                (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
            })
            .fold(0.0, f32::max);
        (center, radius)
    }
}

/// Distinct color for element `k` of `count`
///
/// Hues are spread evenly around the color wheel.
pub fn element_color(k: usize, count: usize) -> [f32; 4] {
    let hue = k as f32 / count.max(1) as f32;
    let [r, g, b] = hue_to_rgb(hue);
    [0.35 + 0.6 * r, 0.35 + 0.6 * g, 0.35 + 0.6 * b, 1.0]
}

/// Fully saturated color for a hue in `[0, 1)`
fn hue_to_rgb(hue: f32) -> [f32; 3] {
    let h = (hue.fract() * 6.0).max(0.0);
    let x = 1.0 - ((h % 2.0) - 1.0).abs();
    match h as u32 {
        0 => [1.0, x, 0.0],
        1 => [x, 1.0, 0.0],
        2 => [0.0, 1.0, x],
        3 => [0.0, x, 1.0],
        4 => [x, 0.0, 1.0],
        _ => [1.0, 0.0, x],
    }
}
