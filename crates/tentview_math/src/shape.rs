//! Simplex primitives
//!
//! Simplices are pure index data - they refer into a vertex array owned by
//! a mesh or by renderable geometry.

/// A tetrahedron (3-simplex) defined by vertex indices
///
/// Tetrahedra are the elements of the spatial mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tetrahedron {
    /// Indices into the parent mesh's vertex array
    pub indices: [usize; 4],
}

impl Tetrahedron {
    /// Create a new tetrahedron with the given vertex indices
    #[inline]
    pub fn new(indices: [usize; 4]) -> Self {
        Self { indices }
    }

    /// Create a new tetrahedron with sorted vertex indices (canonical form)
    pub fn new_canonical(mut indices: [usize; 4]) -> Self {
        indices.sort_unstable();
        Self { indices }
    }

    /// Get the indices as a sorted array (canonical form)
    pub fn canonical(&self) -> [usize; 4] {
        let mut sorted = self.indices;
        sorted.sort_unstable();
        sorted
    }

    /// Check whether the tetrahedron uses the given vertex
    #[inline]
    pub fn contains(&self, vertex: usize) -> bool {
        self.indices.contains(&vertex)
    }

    /// Local position (0-3) of a vertex in this tetrahedron
    #[inline]
    pub fn local_index(&self, vertex: usize) -> Option<usize> {
        self.indices.iter().position(|&v| v == vertex)
    }

    /// The six edges as sorted vertex pairs
    pub fn edges(&self) -> [[usize; 2]; 6] {
        let [a, b, c, d] = self.indices;
        [
            sorted_pair(a, b),
            sorted_pair(a, c),
            sorted_pair(a, d),
            sorted_pair(b, c),
            sorted_pair(b, d),
            sorted_pair(c, d),
        ]
    }

    /// The four faces as sorted vertex triples
    ///
    /// Face `i` is opposite local vertex `i`.
    pub fn faces(&self) -> [[usize; 3]; 4] {
        let [a, b, c, d] = self.indices;
        [
            sorted_triple(b, c, d),
            sorted_triple(a, c, d),
            sorted_triple(a, b, d),
            sorted_triple(a, b, c),
        ]
    }
}

/// A 4-simplex (5-cell) defined by vertex indices
///
/// The space-time region of a tent over one element is a 4-simplex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Simplex4 {
    /// Indices into the parent geometry's vertex array
    pub indices: [usize; 5],
}

impl Simplex4 {
    /// Create a new 4-simplex with the given vertex indices
    #[inline]
    pub fn new(indices: [usize; 5]) -> Self {
        Self { indices }
    }
}

#[inline]
fn sorted_pair(a: usize, b: usize) -> [usize; 2] {
    if a < b { [a, b] } else { [b, a] }
}

#[inline]
fn sorted_triple(a: usize, b: usize, c: usize) -> [usize; 3] {
    let mut t = [a, b, c];
    t.sort_unstable();
    t
}
