//! Integration tests for tent geometry, slicing and the file renderer

use std::path::PathBuf;
use std::sync::Arc;

use tentview_render::slicer::slice_geometry;
use tentview_render::tent_geometry::TentGeometry;
use tentview_render::{RenderError, TentRenderer, Visualization, VtkRenderer};
use tentview_slab::{Mesh, SlabError, TentSlab};

fn slab() -> TentSlab {
    let mesh = Arc::new(Mesh::unit_cube(0.5).unwrap());
    TentSlab::pitch(mesh, 0.5, 1.0).unwrap()
}

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tentview-{}-{}", name, std::process::id()))
}

#[test]
fn test_section_at_pole_midpoint_is_closed() {
    let slab = slab();
    for index in 0..slab.tent_count().min(40) {
        let geometry = TentGeometry::from_tent(&slab, index).unwrap();
        let section = slice_geometry(&geometry, geometry.pole_midpoint());
        assert!(!section.is_empty(), "tent {} has an empty section", index);
        assert_eq!(section.len() % 3, 0);
        for v in &section {
            let n = v.normal;
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }
}

#[test]
fn test_section_stays_inside_patch() {
    let slab = slab();
    let geometry = TentGeometry::from_tent(&slab, 5).unwrap();
    let (center, radius) = geometry.bounding_sphere();
    for v in slice_geometry(&geometry, geometry.pole_midpoint()) {
        let d = [
            v.position[0] - center[0],
            v.position[1] - center[1],
            v.position[2] - center[2],
        ];
        assert!((d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt() <= radius + 1e-5);
    }
}

#[test]
fn test_no_section_outside_time_range() {
    let slab = slab();
    let geometry = TentGeometry::from_tent(&slab, 0).unwrap();
    let (lo, hi) = geometry.time_range();
    assert!(slice_geometry(&geometry, lo - 0.1).is_empty());
    assert!(slice_geometry(&geometry, hi + 0.1).is_empty());
}

#[test]
fn test_vtk_renderer_writes_snapshot() {
    let slab = slab();
    let dir = scratch_dir("snapshot");
    let mut renderer = VtkRenderer::new(&dir);

    let mut snapshot = renderer.render_tent(&slab, 2).unwrap();
    assert_eq!(snapshot.path(), dir.join("tent_2.vtk"));
    snapshot.show().unwrap();
    let path = snapshot.path().to_path_buf();
    snapshot.close();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("# vtk DataFile Version 3.0"));
    assert!(text.contains("DATASET UNSTRUCTURED_GRID"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_vtk_renderer_rejects_bad_index() {
    let slab = slab();
    let dir = scratch_dir("bad-index");
    let mut renderer = VtkRenderer::new(&dir);
    let result = renderer.render_tent(&slab, slab.tent_count());
    assert!(matches!(
        result,
        Err(RenderError::Slab(SlabError::TentOutOfRange { .. }))
    ));
    assert!(!dir.exists());
}
