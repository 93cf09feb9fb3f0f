//! Space-time tents
//!
//! A tent is a macroelement built from a tentpole erected at a central
//! vertex in space, together with all space-time simplices that have the
//! tentpole as an edge. It is stored as its projection onto space (the
//! vertex patch), the central vertex, and the times of the neighbouring
//! vertices.

use std::fmt;

use tentview_mesh::{Mesh, Vec3};

/// Which advancing front of a tent to evaluate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TentSurface {
    /// The front the tent is pitched on
    Bottom,
    /// The front after the tent is advanced
    Top,
}

/// One tent of a slab
///
/// The bottom and top of the tent are graphs of piecewise linear functions
/// over the vertex patch. They agree at every neighbour vertex and differ
/// only at the central vertex, where they take the values `tbot` and `ttop`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tent {
    /// Central vertex
    pub vertex: usize,
    /// Time of the central vertex before the tent
    pub tbot: f64,
    /// Time of the central vertex after the tent
    pub ttop: f64,
    /// Neighbour vertices
    pub nbv: Vec<usize>,
    /// Time at each neighbour vertex, parallel to `nbv`
    pub nbtime: Vec<f64>,
    /// Elements in the vertex patch
    pub els: Vec<usize>,
    /// Faces through the central vertex shared by two patch elements
    pub internal_facets: Vec<usize>,
    /// Parallel layer; tents in one layer are independent of each other
    pub level: usize,
    /// Tents that must wait for this one
    pub dependent_tents: Vec<usize>,
}

impl Tent {
    /// Height of the tentpole
    #[inline]
    pub fn height(&self) -> f64 {
        self.ttop - self.tbot
    }

    /// Time of a patch vertex on the given surface
    ///
    /// Returns `None` when the vertex is not in this tent's patch.
    pub fn time_at(&self, vertex: usize, surface: TentSurface) -> Option<f64> {
        if vertex == self.vertex {
            return Some(match surface {
                TentSurface::Bottom => self.tbot,
                TentSurface::Top => self.ttop,
            });
        }
        self.nbv
            .iter()
            .position(|&v| v == vertex)
            .map(|i| self.nbtime[i])
    }

    /// Lowest time anywhere on the tent
    pub fn min_time(&self) -> f64 {
        self.nbtime.iter().copied().fold(self.tbot, f64::min)
    }

    /// Highest time anywhere on the tent
    pub fn max_time(&self) -> f64 {
        self.nbtime.iter().copied().fold(self.ttop, f64::max)
    }

    /// Times at the four corners of a patch element
    ///
    /// Corners that are not in the patch (which cannot happen for elements
    /// listed in `els`) default to `tbot`.
    pub fn element_times(&self, mesh: &Mesh, el: usize, surface: TentSurface) -> [f64; 4] {
        mesh.element(el)
            .indices
            .map(|v| self.time_at(v, surface).unwrap_or(self.tbot))
    }

    /// Gradient of the bottom or top front on a patch element
    pub fn gradphi(&self, mesh: &Mesh, el: usize, surface: TentSurface) -> Vec3 {
        let times = self.element_times(mesh, el, surface);
        mesh.barycentric_gradients(el)
            .iter()
            .zip(times)
            .map(|(&g, t)| g * t)
            .sum()
    }

    /// Tent height (top minus bottom) at the corners of a patch element
    pub fn delta(&self, mesh: &Mesh, el: usize) -> [f64; 4] {
        let height = self.height();
        mesh.element(el)
            .indices
            .map(|v| if v == self.vertex { height } else { 0.0 })
    }

    /// Gradient of the tent height on a patch element
    pub fn graddelta(&self, mesh: &Mesh, el: usize) -> Vec3 {
        self.gradphi(mesh, el, TentSurface::Top) - self.gradphi(mesh, el, TentSurface::Bottom)
    }

    /// Largest slope of the top front over the patch
    pub fn max_top_slope(&self, mesh: &Mesh) -> f64 {
        self.els
            .iter()
            .map(|&el| self.gradphi(mesh, el, TentSurface::Top).length())
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Tent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vertex: {}, tbot = {}, ttop = {}", self.vertex, self.tbot, self.ttop)?;
        write!(f, "neighbour vertices:")?;
        for (v, t) in self.nbv.iter().zip(&self.nbtime) {
            write!(f, " {}@{}", v, t)?;
        }
        writeln!(f)?;
        writeln!(f, "elements: {:?}", self.els)?;
        writeln!(f, "internal facets: {:?}", self.internal_facets)?;
        writeln!(f, "level: {}", self.level)?;
        write!(f, "dependent tents: {:?}", self.dependent_tents)
    }
}
