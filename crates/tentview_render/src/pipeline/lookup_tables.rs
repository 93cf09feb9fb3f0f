//! Lookup tables for 4D simplex (5-cell) cross-section
//!
//! A 5-cell has 5 vertices and 10 edges. When sliced by the hyperplane
//! `t = s`, we get 2^5 = 32 possible configurations depending on which
//! vertices are above or below the plane.

/// Edge definitions for a 5-cell
/// Each edge connects two vertices (indexed 0-4)
pub const EDGES: [[usize; 2]; 10] = [
    [0, 1], // Edge 0
    [0, 2], // Edge 1
    [0, 3], // Edge 2
    [0, 4], // Edge 3
    [1, 2], // Edge 4
    [1, 3], // Edge 5
    [1, 4], // Edge 6
    [2, 3], // Edge 7
    [2, 4], // Edge 8
    [3, 4], // Edge 9
];

/// For each case (0-31), which edges are crossed by the slice plane.
/// Bit i is set if edge i is crossed (i.e., its endpoints are on opposite sides).
///
/// An edge is crossed when: (vertex_a above XOR vertex_b above)
pub const EDGE_TABLE: [u16; 32] = compute_edge_table();

/// Compute the edge table at compile time
const fn compute_edge_table() -> [u16; 32] {
    let mut table = [0u16; 32];
    let mut case_idx: usize = 0;

    while case_idx < 32 {
        let mut edge_mask = 0u16;
        let mut edge_idx = 0;

        while edge_idx < 10 {
            let v0 = EDGES[edge_idx][0];
            let v1 = EDGES[edge_idx][1];

            let v0_above = (case_idx >> v0) & 1;
            let v1_above = (case_idx >> v1) & 1;

            if v0_above != v1_above {
                edge_mask |= 1 << edge_idx;
            }

            edge_idx += 1;
        }

        table[case_idx] = edge_mask;
        case_idx += 1;
    }

    table
}

/// Case index for a set of vertex times: bit i is set when vertex i lies
/// strictly above the slice time
pub fn case_index(times: [f32; 5], slice: f32) -> usize {
    times
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t > slice)
        .fold(0, |case, (i, _)| case | (1 << i))
}

/// Get the number of edges crossed for a given case
pub const fn edge_count(case_idx: usize) -> usize {
    EDGE_TABLE[case_idx].count_ones() as usize
}

/// Get the crossed edge indices for a given case
pub fn crossed_edges(case_idx: usize) -> impl Iterator<Item = usize> {
    let mask = EDGE_TABLE[case_idx];
    (0..10).filter(move |i| (mask >> i) & 1 == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_table_extremes() {
        // All vertices below or all above - no edges crossed
        assert_eq!(EDGE_TABLE[0], 0);
        assert_eq!(EDGE_TABLE[31], 0);
    }

    #[test]
    fn test_edge_table_single_vertex() {
        // v1 above - edges connecting v1 to v0,v2,v3,v4
        let expected = 0b0001110001; // edges 0,4,5,6
        assert_eq!(EDGE_TABLE[2], expected);
        assert_eq!(crossed_edges(2).collect::<Vec<_>>(), vec![0, 4, 5, 6]);
    }

    #[test]
    fn test_edge_table_pole_above() {
        // v0,v1 above - all edges from the pole to the base are crossed
        let expected = 0b0001111110; // edges 1,2,3,4,5,6
        assert_eq!(EDGE_TABLE[3], expected);
    }

    #[test]
    fn test_edge_count_distribution() {
        let count_0 = (0..32).filter(|&i| edge_count(i) == 0).count();
        let count_4 = (0..32).filter(|&i| edge_count(i) == 4).count();
        let count_6 = (0..32).filter(|&i| edge_count(i) == 6).count();

        assert_eq!(count_0, 2);  // cases 0 and 31
        assert_eq!(count_4, 10); // C(5,1) + C(5,4)
        assert_eq!(count_6, 20); // C(5,2) + C(5,3)
    }

    #[test]
    fn test_case_index() {
        assert_eq!(case_index([0.0, 1.0, 0.0, 0.0, 0.0], 0.5), 0b00010);
        assert_eq!(case_index([0.0, 1.0, 0.2, 0.7, 0.0], 0.5), 0b01010);
        // vertices exactly on the plane count as below
        assert_eq!(case_index([0.5; 5], 0.5), 0);
    }
}
