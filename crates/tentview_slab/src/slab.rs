//! Tent pitching
//!
//! Builds a slab of tents that advances every vertex of a mesh from time 0
//! to `dt`. The construction is an advancing front: a vertex whose time is
//! low enough relative to its neighbours is raised as far as the causality
//! constraint allows, and the raised region over its vertex patch becomes a
//! tent.
//!
//! Causality is enforced per edge: the times at the ends of an edge never
//! differ by more than `tau_factor * |edge| / c`, where `c` is the larger
//! wave speed of the two end vertices.

use std::sync::Arc;

use bitflags::bitflags;
use tentview_mesh::Mesh;

use crate::error::{SlabError, SlabResult};
use crate::tent::Tent;
use crate::wavespeed::Wavespeed;

/// A vertex can be pitched when it can advance by at least this fraction of
/// its reference height
const READY_FRACTION: f64 = 0.5;

/// Relative tolerance for snapping a tent top onto the slab top
const TOP_SNAP: f64 = 1e-12;

bitflags! {
    /// Pitching state of a vertex
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct VertexState: u8 {
        /// Vertex can be pitched next
        const READY = 1 << 0;
        /// Vertex has reached the slab top
        const COMPLETE = 1 << 1;
    }
}

/// Parameters controlling tent pitching
#[derive(Clone, Debug, PartialEq)]
pub struct SlabParams {
    /// Height of the slab (time step bound)
    pub dt: f64,
    /// Maximal wave propagation speed
    pub wavespeed: Wavespeed,
    /// Safety factor in (0, 1] applied to every causality bound
    pub tau_factor: f64,
}

impl Default for SlabParams {
    fn default() -> Self {
        Self {
            dt: 0.5,
            wavespeed: Wavespeed::default(),
            tau_factor: 1.0,
        }
    }
}

impl SlabParams {
    /// Create parameters with the given slab height and wave speed
    pub fn new(dt: f64, wavespeed: impl Into<Wavespeed>) -> Self {
        Self {
            dt,
            wavespeed: wavespeed.into(),
            ..Self::default()
        }
    }

    /// Builder: set the causality safety factor
    pub fn with_tau_factor(mut self, tau_factor: f64) -> Self {
        self.tau_factor = tau_factor;
        self
    }

    /// Check that every parameter is in range
    pub fn validate(&self) -> SlabResult<()> {
        let positive = |name: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SlabError::InvalidParameter { name, value })
            }
        };
        positive("dt", self.dt)?;
        self.wavespeed.validate()?;
        positive("tau_factor", self.tau_factor)?;
        if self.tau_factor > 1.0 {
            return Err(SlabError::InvalidParameter {
                name: "tau_factor",
                value: self.tau_factor,
            });
        }
        Ok(())
    }
}

/// A tent-pitched space-time slab over a mesh
///
/// Tents are stored in the order they were pitched, which is a topological
/// order of the dependency DAG.
#[derive(Clone, Debug)]
pub struct TentSlab {
    mesh: Arc<Mesh>,
    params: SlabParams,
    tents: Vec<Tent>,
    layer_count: usize,
}

impl TentSlab {
    /// Pitch tents over `mesh` up to time `dt` for wave speed `wavespeed`
    pub fn pitch(mesh: Arc<Mesh>, dt: f64, wavespeed: impl Into<Wavespeed>) -> SlabResult<Self> {
        Self::pitch_with(mesh, SlabParams::new(dt, wavespeed))
    }

    /// Pitch tents with explicit parameters
    pub fn pitch_with(mesh: Arc<Mesh>, params: SlabParams) -> SlabResult<Self> {
        params.validate()?;
        if mesh.vertex_count() == 0 {
            return Err(SlabError::EmptyMesh);
        }
        params.wavespeed.check_mesh(&mesh)?;

        let tents = Pitcher::new(&mesh, &params).run()?;
        let layer_count = tents.iter().map(|t| t.level + 1).max().unwrap_or(0);

        let cmax = params.wavespeed.max();
        let slab = Self {
            mesh,
            params,
            tents,
            layer_count,
        };
        log::info!(
            "Pitched {} tents in {} layers (dt = {}, max c = {})",
            slab.tent_count(),
            slab.layer_count,
            slab.params.dt,
            cmax
        );
        log::debug!(
            "Largest tent top slope {:.4} against 1/max c = {:.4}",
            slab.max_slope(),
            1.0 / cmax
        );
        Ok(slab)
    }

    /// Number of tents in the slab
    #[inline]
    pub fn tent_count(&self) -> usize {
        self.tents.len()
    }

    /// Get a tent by index
    pub fn tent(&self, index: usize) -> SlabResult<&Tent> {
        self.tents.get(index).ok_or(SlabError::TentOutOfRange {
            index,
            count: self.tents.len(),
        })
    }

    /// All tents in pitching order
    #[inline]
    pub fn tents(&self) -> &[Tent] {
        &self.tents
    }

    /// Tents that depend on the given tent
    pub fn dependents(&self, index: usize) -> SlabResult<&[usize]> {
        self.tent(index).map(|t| t.dependent_tents.as_slice())
    }

    /// Number of parallel layers
    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Indices of the tents in one layer
    pub fn tents_in_layer(&self, level: usize) -> impl Iterator<Item = usize> + '_ {
        self.tents
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.level == level)
            .map(|(i, _)| i)
    }

    /// Largest slope of any tent top over any element
    pub fn max_slope(&self) -> f64 {
        self.tents
            .iter()
            .map(|t| t.max_top_slope(&self.mesh))
            .fold(0.0, f64::max)
    }

    /// The spatial mesh
    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Pitching parameters
    #[inline]
    pub fn params(&self) -> &SlabParams {
        &self.params
    }

    /// Slab height
    #[inline]
    pub fn dt(&self) -> f64 {
        self.params.dt
    }

    /// Wave speed the slab was pitched for
    #[inline]
    pub fn wavespeed(&self) -> &Wavespeed {
        &self.params.wavespeed
    }
}

/// Working state of one pitching run
struct Pitcher<'a> {
    mesh: &'a Mesh,
    dt: f64,
    /// Causality bound on the time difference along each edge
    edge_refdt: Vec<f64>,
    /// Smallest edge bound at each vertex
    vertex_refdt: Vec<f64>,
    /// Current advancing front
    tau: Vec<f64>,
    /// How far each vertex could advance right now
    ktilde: Vec<f64>,
    state: Vec<VertexState>,
    /// Level the next tent at each vertex would get
    vertex_level: Vec<usize>,
    /// Most recent tent at each vertex
    latest_tent: Vec<Option<usize>>,
    tents: Vec<Tent>,
}

impl<'a> Pitcher<'a> {
    fn new(mesh: &'a Mesh, params: &SlabParams) -> Self {
        let nv = mesh.vertex_count();
        let c = &params.wavespeed;
        let edge_refdt: Vec<f64> = mesh
            .edges()
            .iter()
            .enumerate()
            .map(|(e, &[a, b])| params.tau_factor * mesh.edge_length(e) / c.at(a).max(c.at(b)))
            .collect();
        let vertex_refdt: Vec<f64> = (0..nv)
            .map(|v| {
                mesh.vertex_neighbors(v)
                    .iter()
                    .map(|&(_, e)| edge_refdt[e])
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();

        let mut tau = vec![0.0; nv];
        let mut state = vec![VertexState::READY; nv];
        for v in 0..nv {
            if mesh.vertex_neighbors(v).is_empty() {
                // Isolated vertices have no patch to pitch over
                tau[v] = params.dt;
                state[v] = VertexState::COMPLETE;
            }
        }

        Self {
            mesh,
            dt: params.dt,
            ktilde: vertex_refdt.clone(),
            edge_refdt,
            vertex_refdt,
            tau,
            state,
            vertex_level: vec![0; nv],
            latest_tent: vec![None; nv],
            tents: Vec::new(),
        }
    }

    fn run(mut self) -> SlabResult<Vec<Tent>> {
        while let Some(v) = self.next_ready() {
            self.pitch_tent(v);
        }

        let incomplete = self
            .state
            .iter()
            .filter(|s| !s.contains(VertexState::COMPLETE))
            .count();
        if incomplete > 0 {
            return Err(SlabError::Stalled {
                pitched: self.tents.len(),
                incomplete,
            });
        }
        Ok(self.tents)
    }

    /// Ready vertex with the lowest level, then the lowest time, then the
    /// lowest index
    fn next_ready(&self) -> Option<usize> {
        (0..self.tau.len())
            .filter(|&v| self.state[v].contains(VertexState::READY))
            .min_by(|&a, &b| {
                self.vertex_level[a]
                    .cmp(&self.vertex_level[b])
                    .then(self.tau[a].total_cmp(&self.tau[b]))
                    .then(a.cmp(&b))
            })
    }

    fn pitch_tent(&mut self, v: usize) {
        let mesh = self.mesh;
        let index = self.tents.len();

        let mut ttop = (self.tau[v] + self.ktilde[v]).min(self.dt);
        if self.dt - ttop <= TOP_SNAP * self.dt {
            ttop = self.dt;
        }

        let nbv: Vec<usize> = mesh.vertex_neighbors(v).iter().map(|&(u, _)| u).collect();
        let nbtime: Vec<f64> = nbv.iter().map(|&u| self.tau[u]).collect();
        let internal_facets: Vec<usize> = mesh
            .vertex_faces(v)
            .iter()
            .copied()
            .filter(|&f| !mesh.faces()[f].is_boundary())
            .collect();

        let mut dependencies: Vec<usize> = std::iter::once(v)
            .chain(nbv.iter().copied())
            .filter_map(|u| self.latest_tent[u])
            .collect();
        dependencies.sort_unstable();
        dependencies.dedup();

        let level = dependencies
            .iter()
            .map(|&d| self.tents[d].level + 1)
            .max()
            .unwrap_or(0);
        debug_assert_eq!(level, self.vertex_level[v]);
        for &d in &dependencies {
            self.tents[d].dependent_tents.push(index);
        }

        log::trace!(
            "Tent {} at vertex {}: [{:.4}, {:.4}] level {}",
            index,
            v,
            self.tau[v],
            ttop,
            level
        );

        self.tents.push(Tent {
            vertex: v,
            tbot: self.tau[v],
            ttop,
            nbv,
            nbtime,
            els: mesh.vertex_elements(v).to_vec(),
            internal_facets,
            level,
            dependent_tents: Vec::new(),
        });

        self.latest_tent[v] = Some(index);
        self.tau[v] = ttop;
        self.state[v].remove(VertexState::READY);
        if ttop >= self.dt {
            self.state[v].insert(VertexState::COMPLETE);
        }

        self.vertex_level[v] = self.vertex_level[v].max(level + 1);
        self.refresh(v);
        for &(u, _) in mesh.vertex_neighbors(v) {
            self.vertex_level[u] = self.vertex_level[u].max(level + 1);
            self.refresh(u);
        }
    }

    /// Recompute how far a vertex could advance and whether it is ready
    fn refresh(&mut self, w: usize) {
        if self.state[w].contains(VertexState::COMPLETE) {
            self.state[w].remove(VertexState::READY);
            return;
        }

        let kt = self
            .mesh
            .vertex_neighbors(w)
            .iter()
            .map(|&(u, e)| self.tau[u] - self.tau[w] + self.edge_refdt[e])
            .fold(f64::INFINITY, f64::min);
        self.ktilde[w] = kt;

        let ready = kt > READY_FRACTION * self.vertex_refdt[w]
            || (kt > 0.0 && self.tau[w] + kt >= self.dt);
        self.state[w].set(VertexState::READY, ready);
    }
}
