//! Mesh validation
//!
//! Validates raw element data before topology is built. The
//! [`MeshValidator`] checks for empty meshes, dangling vertex indices,
//! repeated vertices, zero-volume elements, and faces shared by more than
//! two elements.

use std::collections::HashMap;

use tentview_math::{Tetrahedron, Vec3};

/// Volumes below this are treated as degenerate
const VOLUME_EPSILON: f64 = 1e-14;

/// Problem found in mesh data
#[derive(Debug, Clone, PartialEq)]
pub enum MeshIssue {
    /// Mesh has no elements
    Empty,
    /// Element references a vertex that does not exist
    VertexOutOfRange { element: usize, vertex: usize },
    /// Element uses the same vertex more than once
    RepeatedVertex { element: usize },
    /// Element has (near) zero volume
    DegenerateElement { element: usize, volume: f64 },
    /// Face is shared by more than two elements
    NonManifoldFace { face: [usize; 3], count: usize },
}

impl std::fmt::Display for MeshIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshIssue::Empty => write!(f, "Mesh has no elements"),
            MeshIssue::VertexOutOfRange { element, vertex } => {
                write!(f, "Element {} references missing vertex {}", element, vertex)
            }
            MeshIssue::RepeatedVertex { element } => {
                write!(f, "Element {} repeats a vertex", element)
            }
            MeshIssue::DegenerateElement { element, volume } => {
                write!(f, "Element {} is degenerate (volume {:e})", element, volume)
            }
            MeshIssue::NonManifoldFace { face, count } => {
                write!(
                    f,
                    "Face [{}, {}, {}] is shared by {} elements",
                    face[0], face[1], face[2], count
                )
            }
        }
    }
}

impl std::error::Error for MeshIssue {}

/// Validator for raw mesh data
///
/// # Example
/// ```ignore
/// let issues = MeshValidator::validate(&points, &elements);
/// for issue in &issues {
///     log::warn!("{}", issue);
/// }
/// ```
pub struct MeshValidator;

impl MeshValidator {
    /// Validate mesh data, returning every issue found
    pub fn validate(points: &[Vec3], elements: &[Tetrahedron]) -> Vec<MeshIssue> {
        let mut issues = Vec::new();

        if elements.is_empty() {
            issues.push(MeshIssue::Empty);
            return issues;
        }

        let mut face_counts: HashMap<[usize; 3], usize> = HashMap::new();

        for (element, tet) in elements.iter().enumerate() {
            if let Some(&vertex) = tet.indices.iter().find(|&&v| v >= points.len()) {
                issues.push(MeshIssue::VertexOutOfRange { element, vertex });
                continue;
            }

            let canonical = tet.canonical();
            if canonical.windows(2).any(|w| w[0] == w[1]) {
                issues.push(MeshIssue::RepeatedVertex { element });
                continue;
            }

            let volume = signed_volume(points, tet).abs();
            if volume < VOLUME_EPSILON {
                issues.push(MeshIssue::DegenerateElement { element, volume });
            }

            for face in tet.faces() {
                *face_counts.entry(face).or_insert(0) += 1;
            }
        }

        let mut crowded: Vec<_> = face_counts
            .into_iter()
            .filter(|&(_, count)| count > 2)
            .collect();
        crowded.sort_unstable();
        issues.extend(
            crowded
                .into_iter()
                .map(|(face, count)| MeshIssue::NonManifoldFace { face, count }),
        );

        issues
    }

    /// Validate and return Result (Ok if no issues, Err with all issues)
    pub fn validate_or_error(
        points: &[Vec3],
        elements: &[Tetrahedron],
    ) -> Result<(), Vec<MeshIssue>> {
        let issues = Self::validate(points, elements);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

/// Signed volume of a tetrahedron (positive for right-handed orientation)
pub(crate) fn signed_volume(points: &[Vec3], tet: &Tetrahedron) -> f64 {
    let [a, b, c, d] = tet.indices.map(|i| points[i]);
    (b - a).dot((c - a).cross(d - a)) / 6.0
}
