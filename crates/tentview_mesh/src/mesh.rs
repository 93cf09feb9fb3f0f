//! Tetrahedral mesh with derived topology

use std::collections::HashMap;

use tentview_math::{Tetrahedron, Vec3};

use crate::error::{MeshError, MeshResult};
use crate::validator::{signed_volume, MeshValidator};

/// A triangular face of the mesh
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    /// Sorted vertex indices
    pub vertices: [usize; 3],
    /// First adjacent element
    pub first: usize,
    /// Second adjacent element (`None` on the domain boundary)
    pub second: Option<usize>,
}

impl Face {
    /// Whether this face lies on the domain boundary
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.second.is_none()
    }

    /// Whether the face has the given vertex
    #[inline]
    pub fn contains(&self, vertex: usize) -> bool {
        self.vertices.contains(&vertex)
    }
}

/// An immutable tetrahedral mesh
///
/// Elements are stored positively oriented. Edges, faces and vertex
/// incidences are computed once on construction.
#[derive(Clone, Debug)]
pub struct Mesh {
    points: Vec<Vec3>,
    elements: Vec<Tetrahedron>,
    edges: Vec<[usize; 2]>,
    faces: Vec<Face>,
    /// Elements around each vertex (the vertex patch)
    vertex_elements: Vec<Vec<usize>>,
    /// (neighbour vertex, edge index) pairs for each vertex
    vertex_neighbors: Vec<Vec<(usize, usize)>>,
    /// Faces containing each vertex
    vertex_faces: Vec<Vec<usize>>,
}

impl Mesh {
    /// Build a mesh from vertex coordinates and elements
    ///
    /// Negatively oriented elements are flipped. Fails when the data does
    /// not pass [`MeshValidator`].
    pub fn new(points: Vec<Vec3>, mut elements: Vec<Tetrahedron>) -> MeshResult<Self> {
        MeshValidator::validate_or_error(&points, &elements).map_err(MeshError::Invalid)?;

        let mut flipped = 0usize;
        for tet in &mut elements {
            if signed_volume(&points, tet) < 0.0 {
                tet.indices.swap(2, 3);
                flipped += 1;
            }
        }
        if flipped > 0 {
            log::debug!("Reoriented {} of {} elements", flipped, elements.len());
        }

        let nv = points.len();
        let mut vertex_elements = vec![Vec::new(); nv];
        let mut edge_ids: HashMap<[usize; 2], usize> = HashMap::new();
        let mut edges = Vec::new();
        let mut face_ids: HashMap<[usize; 3], usize> = HashMap::new();
        let mut faces: Vec<Face> = Vec::new();

        for (el, tet) in elements.iter().enumerate() {
            for &v in &tet.indices {
                vertex_elements[v].push(el);
            }
            for edge in tet.edges() {
                edge_ids.entry(edge).or_insert_with(|| {
                    edges.push(edge);
                    edges.len() - 1
                });
            }
            for face in tet.faces() {
                match face_ids.get(&face) {
                    Some(&id) => faces[id].second = Some(el),
                    None => {
                        face_ids.insert(face, faces.len());
                        faces.push(Face {
                            vertices: face,
                            first: el,
                            second: None,
                        });
                    }
                }
            }
        }

        let mut vertex_neighbors = vec![Vec::new(); nv];
        for (id, &[a, b]) in edges.iter().enumerate() {
            vertex_neighbors[a].push((b, id));
            vertex_neighbors[b].push((a, id));
        }
        for neighbors in &mut vertex_neighbors {
            neighbors.sort_unstable();
        }

        let mut vertex_faces = vec![Vec::new(); nv];
        for (id, face) in faces.iter().enumerate() {
            for &v in &face.vertices {
                vertex_faces[v].push(id);
            }
        }

        Ok(Self {
            points,
            elements,
            edges,
            faces,
            vertex_elements,
            vertex_neighbors,
            vertex_faces,
        })
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Number of tetrahedral elements
    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of unique edges
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of unique faces
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Vertex coordinates
    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Coordinates of one vertex
    #[inline]
    pub fn point(&self, vertex: usize) -> Vec3 {
        self.points[vertex]
    }

    /// All elements
    #[inline]
    pub fn elements(&self) -> &[Tetrahedron] {
        &self.elements
    }

    /// One element
    #[inline]
    pub fn element(&self, el: usize) -> &Tetrahedron {
        &self.elements[el]
    }

    /// All edges as sorted vertex pairs
    #[inline]
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// All faces
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Faces on the domain boundary
    pub fn boundary_faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter().filter(|f| f.is_boundary())
    }

    /// Elements in the patch of a vertex
    #[inline]
    pub fn vertex_elements(&self, vertex: usize) -> &[usize] {
        &self.vertex_elements[vertex]
    }

    /// Neighbour vertices of a vertex, with the index of the connecting edge
    #[inline]
    pub fn vertex_neighbors(&self, vertex: usize) -> &[(usize, usize)] {
        &self.vertex_neighbors[vertex]
    }

    /// Indices of the faces that contain a vertex
    #[inline]
    pub fn vertex_faces(&self, vertex: usize) -> &[usize] {
        &self.vertex_faces[vertex]
    }

    /// Corner coordinates of an element
    pub fn element_points(&self, el: usize) -> [Vec3; 4] {
        self.elements[el].indices.map(|v| self.points[v])
    }

    /// Volume of an element
    pub fn element_volume(&self, el: usize) -> f64 {
        signed_volume(&self.points, &self.elements[el])
    }

    /// Total mesh volume
    pub fn volume(&self) -> f64 {
        (0..self.elements.len()).map(|el| self.element_volume(el)).sum()
    }

    /// Gradients of the four barycentric coordinate functions on an element
    ///
    /// Entry `i` belongs to local vertex `i`. The gradients sum to zero.
    pub fn barycentric_gradients(&self, el: usize) -> [Vec3; 4] {
        let [p0, p1, p2, p3] = self.element_points(el);
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let e3 = p3 - p0;
        let det = e1.dot(e2.cross(e3));

        let g1 = e2.cross(e3) / det;
        let g2 = e3.cross(e1) / det;
        let g3 = e1.cross(e2) / det;
        let g0 = -(g1 + g2 + g3);
        [g0, g1, g2, g3]
    }

    /// Length of an edge
    #[inline]
    pub fn edge_length(&self, edge: usize) -> f64 {
        let [a, b] = self.edges[edge];
        self.points[a].distance(self.points[b])
    }

    /// Longest edge of an element
    pub fn element_diameter(&self, el: usize) -> f64 {
        self.elements[el]
            .edges()
            .iter()
            .map(|&[a, b]| self.points[a].distance(self.points[b]))
            .fold(0.0, f64::max)
    }

    /// Longest edge in the mesh
    pub fn max_edge_length(&self) -> f64 {
        (0..self.edges.len())
            .map(|e| self.edge_length(e))
            .fold(0.0, f64::max)
    }

    /// Shortest edge in the mesh
    pub fn min_edge_length(&self) -> f64 {
        (0..self.edges.len())
            .map(|e| self.edge_length(e))
            .fold(f64::INFINITY, f64::min)
    }

    /// Axis-aligned bounding box as (min, max)
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        self.points.iter().fold(
            (Vec3::ONE * f64::INFINITY, Vec3::ONE * f64::NEG_INFINITY),
            |(lo, hi), &p| (lo.min_components(p), hi.max_components(p)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_tet() -> Mesh {
        Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
            vec![Tetrahedron::new([0, 1, 2, 3])],
        )
        .unwrap()
    }

    #[test]
    fn test_single_tet_topology() {
        let mesh = single_tet();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.element_count(), 1);
        assert_eq!(mesh.edge_count(), 6);
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.boundary_faces().count(), 4);
        assert_eq!(mesh.vertex_neighbors(0).len(), 3);
        assert_eq!(mesh.vertex_faces(0).len(), 3);
    }

    #[test]
    fn test_negative_element_is_flipped() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
            vec![Tetrahedron::new([0, 2, 1, 3])],
        )
        .unwrap();
        assert!(mesh.element_volume(0) > 0.0);
    }

    #[test]
    fn test_barycentric_gradients() {
        let mesh = single_tet();
        let grads = mesh.barycentric_gradients(0);
        // lambda_1 = x, lambda_2 = y, lambda_3 = z on the reference element
        assert_eq!(grads[1], Vec3::X);
        assert_eq!(grads[2], Vec3::Y);
        assert_eq!(grads[3], Vec3::Z);
        let sum: Vec3 = grads.into_iter().sum();
        assert!(sum.length() < 1e-12);
    }

    #[test]
    fn test_shared_face_is_interior() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(0.0, 0.0, -1.0)],
            vec![Tetrahedron::new([0, 1, 2, 3]), Tetrahedron::new([0, 1, 2, 4])],
        )
        .unwrap();
        assert_eq!(mesh.face_count(), 7);
        assert_eq!(mesh.boundary_faces().count(), 6);
        let shared = mesh.faces().iter().find(|f| f.vertices == [0, 1, 2]).unwrap();
        assert!(!shared.is_boundary());
    }

    #[test]
    fn test_invalid_mesh_rejected() {
        let result = Mesh::new(vec![Vec3::ZERO], vec![]);
        assert!(matches!(result, Err(MeshError::Invalid(_))));
    }

    #[test]
    fn test_diameter_and_bbox() {
        let mesh = single_tet();
        assert!((mesh.element_diameter(0) - 2f64.sqrt()).abs() < 1e-12);
        let (lo, hi) = mesh.bounding_box();
        assert_eq!(lo, Vec3::ZERO);
        assert_eq!(hi, Vec3::ONE);
    }
}
