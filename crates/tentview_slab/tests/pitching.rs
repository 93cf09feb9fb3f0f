//! Integration tests for tent pitching on generated meshes
//!
//! These check the structural invariants of a slab: every vertex reaches the
//! top, tents at a vertex stack without gaps, causality holds along every
//! edge, and the dependency DAG is consistent with pitching order and levels.

use std::sync::Arc;

use tentview_slab::{Mesh, SlabError, SlabParams, TentSlab, Wavespeed};

const TOL: f64 = 1e-12;

fn cube_slab(maxh: f64, dt: f64, c: f64) -> TentSlab {
    let mesh = Arc::new(Mesh::unit_cube(maxh).unwrap());
    TentSlab::pitch(mesh, dt, c).unwrap()
}

#[test]
fn test_every_vertex_reaches_top() {
    let slab = cube_slab(0.5, 0.5, 1.0);
    let mut top = vec![0.0; slab.mesh().vertex_count()];
    for tent in slab.tents() {
        top[tent.vertex] = f64::max(top[tent.vertex], tent.ttop);
    }
    for (v, &t) in top.iter().enumerate() {
        assert_eq!(t, slab.dt(), "vertex {} stopped at {}", v, t);
    }
}

#[test]
fn test_tents_stack_without_gaps() {
    let slab = cube_slab(0.5, 0.5, 1.0);
    for v in 0..slab.mesh().vertex_count() {
        let stack: Vec<_> = slab.tents().iter().filter(|t| t.vertex == v).collect();
        assert!(!stack.is_empty());
        assert_eq!(stack[0].tbot, 0.0);
        for pair in stack.windows(2) {
            assert_eq!(pair[0].ttop, pair[1].tbot);
        }
        assert_eq!(stack[stack.len() - 1].ttop, slab.dt());
    }
}

#[test]
fn test_every_tent_has_positive_height() {
    let slab = cube_slab(0.3, 0.5, 1.0);
    for (i, tent) in slab.tents().iter().enumerate() {
        assert!(tent.ttop > tent.tbot, "tent {} is flat", i);
    }
}

fn assert_edge_causality(slab: &TentSlab) {
    let mesh = slab.mesh();
    let c = slab.wavespeed();
    let tau_factor = slab.params().tau_factor;

    for tent in slab.tents() {
        let neighbors = mesh.vertex_neighbors(tent.vertex);
        for (k, &(nb, edge)) in neighbors.iter().enumerate() {
            assert_eq!(tent.nbv[k], nb);
            let t = tent.nbtime[k];
            let bound = tau_factor * mesh.edge_length(edge) / c.at(tent.vertex).max(c.at(nb));
            assert!(
                (tent.ttop - t).abs() <= bound + TOL,
                "edge {} violates causality: {} vs {}",
                edge,
                tent.ttop - t,
                bound
            );
        }
    }
}

#[test]
fn test_edge_causality() {
    for (c, tau_factor) in [(1.0, 1.0), (2.0, 1.0), (1.0, 0.5)] {
        let mesh = Arc::new(Mesh::unit_cube(0.5).unwrap());
        let params = SlabParams::new(0.5, c).with_tau_factor(tau_factor);
        assert_edge_causality(&TentSlab::pitch_with(mesh, params).unwrap());
    }
}

#[test]
fn test_edge_causality_with_varying_speed() {
    for tau_factor in [1.0, 0.5] {
        let mesh = Arc::new(Mesh::unit_cube(0.5).unwrap());
        let c = Wavespeed::from_fn(&mesh, |p| 1.0 + 2.0 * p.x);
        let params = SlabParams::new(0.5, c).with_tau_factor(tau_factor);
        assert_edge_causality(&TentSlab::pitch_with(mesh, params).unwrap());
    }
}

#[test]
fn test_fast_region_needs_more_tents() {
    let mesh = Arc::new(Mesh::unit_cube(0.5).unwrap());
    let c = Wavespeed::from_fn(&mesh, |p| if p.x > 0.5 { 3.0 } else { 1.0 });
    let slab = TentSlab::pitch(Arc::clone(&mesh), 0.5, c).unwrap();

    let tents_at = |v: usize| slab.tents().iter().filter(|t| t.vertex == v).count();
    let slow: usize = (0..mesh.vertex_count()).filter(|&v| mesh.point(v).x < 0.1).map(tents_at).sum();
    let fast: usize = (0..mesh.vertex_count()).filter(|&v| mesh.point(v).x > 0.9).map(tents_at).sum();
    assert!(fast > slow, "fast side {} tents, slow side {}", fast, slow);
}

#[test]
fn test_dependencies_follow_order_and_levels() {
    let slab = cube_slab(0.5, 0.5, 1.0);
    for (i, tent) in slab.tents().iter().enumerate() {
        for &j in &tent.dependent_tents {
            assert!(i < j, "tent {} depends on later tent {}", j, i);
            assert!(slab.tents()[j].level > tent.level);
        }
    }
    let total: usize = (0..slab.layer_count())
        .map(|l| slab.tents_in_layer(l).count())
        .sum();
    assert_eq!(total, slab.tent_count());
}

#[test]
fn test_tents_in_one_layer_are_independent() {
    let slab = cube_slab(0.5, 0.5, 1.0);
    for level in 0..slab.layer_count() {
        let layer: Vec<usize> = slab.tents_in_layer(level).collect();
        for &i in &layer {
            for &j in slab.dependents(i).unwrap() {
                assert!(!layer.contains(&j));
            }
        }
    }
}

#[test]
fn test_patch_matches_mesh() {
    let slab = cube_slab(0.5, 0.5, 1.0);
    let mesh = slab.mesh();
    for tent in slab.tents() {
        assert_eq!(tent.els, mesh.vertex_elements(tent.vertex));
        assert_eq!(tent.nbv.len(), mesh.vertex_neighbors(tent.vertex).len());
        for &f in &tent.internal_facets {
            let face = &mesh.faces()[f];
            assert!(face.contains(tent.vertex));
            assert!(!face.is_boundary());
        }
    }
}

#[test]
fn test_top_slope_bounded_by_wave_speed() {
    // Causality along edges keeps tent tops well below a slope of ~1/c
    // scaled by the element shape, so only a loose bound is checked.
    let slab = cube_slab(0.5, 0.5, 1.0);
    let slope = slab.max_slope();
    assert!(slope > 0.0);
    assert!(slope < 5.0);
}

#[test]
fn test_smaller_dt_needs_fewer_tents() {
    let short = cube_slab(0.5, 0.1, 1.0);
    let tall = cube_slab(0.5, 1.0, 1.0);
    assert!(short.tent_count() < tall.tent_count());
    // dt below every edge bound: exactly one tent per vertex
    assert_eq!(short.tent_count(), short.mesh().vertex_count());
}

#[test]
fn test_invalid_parameters() {
    let mesh = Arc::new(Mesh::unit_cube(0.5).unwrap());
    assert!(matches!(
        TentSlab::pitch(mesh.clone(), 0.0, 1.0),
        Err(SlabError::InvalidParameter { name: "dt", .. })
    ));
    assert!(matches!(
        TentSlab::pitch(mesh, 0.5, 0.0),
        Err(SlabError::InvalidParameter { name: "wavespeed", .. })
    ));
}

#[test]
fn test_tent_bounds() {
    let slab = cube_slab(0.5, 0.5, 1.0);
    let n = slab.tent_count();
    assert!(slab.tent(n - 1).is_ok());
    let err = slab.tent(n).unwrap_err();
    assert_eq!(err.to_string(), format!("tent index {} is out of range 0:{}", n, n));
}
