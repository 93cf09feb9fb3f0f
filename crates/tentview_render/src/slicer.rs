//! CPU slicing of space-time simplices
//!
//! The intersection of a 4-simplex with the hyperplane `t = s` is a convex
//! polytope: empty, a tetrahedron (one vertex on one side), or a triangular
//! prism (two vertices on one side). Its corners are the points where the
//! crossed edges meet the hyperplane. The boundary is recovered as the
//! convex hull of those corners and emitted as outward-facing triangles.

use tentview_math::Vec4;

use crate::pipeline::{case_index, crossed_edges, Vertex3D, EDGES, EDGE_TABLE};
use crate::tent_geometry::TentGeometry;

/// Points closer than this are merged
const MERGE_EPSILON: f32 = 1e-6;

/// Largest distance from a face plane for a point to lie on it
const PLANE_EPSILON: f32 = 1e-5;

/// Slice every simplex of a tent at time `time`
pub fn slice_geometry(geometry: &TentGeometry, time: f32) -> Vec<Vertex3D> {
    let mut out = Vec::new();
    for (k, color) in geometry.colors.iter().enumerate() {
        slice_simplex(&geometry.simplex_points(k), time, *color, &mut out);
    }
    out
}

/// Slice one simplex and append the section triangles to `out`
///
/// Returns the number of triangles added. Sections with fewer than four
/// distinct corners, or with all corners in one plane, add nothing.
pub fn slice_simplex(points: &[Vec4; 5], time: f32, color: [f32; 4], out: &mut Vec<Vertex3D>) -> usize {
    let case = case_index(points.map(|p| p.t), time);
    if EDGE_TABLE[case] == 0 {
        return 0;
    }

    let mut corners: Vec<[f32; 3]> = Vec::with_capacity(6);
    for edge in crossed_edges(case) {
        let [a, b] = EDGES[edge];
        let Some(p) = points[a].at_time(points[b], time) else {
            continue;
        };
        let p = p.xyz();
        if !corners.iter().any(|&q| distance(p, q) <= MERGE_EPSILON) {
            corners.push(p);
        }
    }
    if corners.len() < 4 {
        return 0;
    }

    let faces = hull_faces(&corners);

    let mut added = 0;
    for face in &faces {
        let ordered = order_around(&corners, &face.points, face.normal);
        for k in 1..ordered.len() - 1 {
            for idx in [ordered[0], ordered[k], ordered[k + 1]] {
                out.push(Vertex3D::new(corners[idx], face.normal, color, time));
            }
            added += 1;
        }
    }
    added
}

/// A hull face: the corners on it and its outward unit normal
struct HullFace {
    points: Vec<usize>,
    normal: [f32; 3],
}

/// Find the faces of the convex hull of a handful of points
///
/// Every triple of corners spans a candidate plane. A plane with all other
/// corners on one side is a face; all corners lying on it belong to it.
/// Flat point sets have no faces.
fn hull_faces(corners: &[[f32; 3]]) -> Vec<HullFace> {
    let n = corners.len();
    let mut faces: Vec<HullFace> = Vec::new();

    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                let normal = cross(sub(corners[j], corners[i]), sub(corners[k], corners[i]));
                let len = norm(normal);
                if len <= MERGE_EPSILON * MERGE_EPSILON {
                    continue;
                }
                let mut normal = scale(normal, 1.0 / len);

                let mut on_plane = Vec::new();
                let (mut above, mut below) = (false, false);
                for (m, &p) in corners.iter().enumerate() {
                    let d = dot(normal, sub(p, corners[i]));
                    if d.abs() <= PLANE_EPSILON {
                        on_plane.push(m);
                    } else if d > 0.0 {
                        above = true;
                    } else {
                        below = true;
                    }
                }
                match (above, below) {
                    // Plane cuts through the hull
                    (true, true) => continue,
                    (false, false) => return Vec::new(),
                    (true, false) => normal = scale(normal, -1.0),
                    (false, true) => {}
                }
                if faces.iter().any(|f| f.points == on_plane) {
                    continue;
                }
                faces.push(HullFace {
                    points: on_plane,
                    normal,
                });
            }
        }
    }
    faces
}

/// Order face corners counterclockwise around the face normal
fn order_around(corners: &[[f32; 3]], face: &[usize], normal: [f32; 3]) -> Vec<usize> {
    let center = mean(face.iter().map(|&i| corners[i]));
    let u = normalized(sub(corners[face[0]], center));
    let w = cross(normal, u);

    let mut ordered: Vec<(f32, usize)> = face
        .iter()
        .map(|&i| {
            let d = sub(corners[i], center);
            (dot(d, w).atan2(dot(d, u)), i)
        })
        .collect();
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));
    ordered.into_iter().map(|(_, i)| i).collect()
}

fn mean(points: impl Iterator<Item = [f32; 3]>) -> [f32; 3] {
    let (sum, count) = points.fold(([0.0f32; 3], 0usize), |(acc, n), p| {
        ([acc[0] + p[0], acc[1] + p[1], acc[2] + p[2]], n + 1)
    });
    scale(sum, 1.0 / count.max(1) as f32)
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(v: [f32; 3], s: f32) -> [f32; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(v: [f32; 3]) -> f32 {
    dot(v, v).sqrt()
}

fn normalized(v: [f32; 3]) -> [f32; 3] {
    let len = norm(v);
    if len > 0.0 {
        scale(v, 1.0 / len)
    } else {
        v
    }
}

fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    norm(sub(a, b))
}
