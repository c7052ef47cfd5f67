//! Vertex adjacency graph.
//!
//! Derived wholly from an edge or face list; read-only after construction.

use crate::error::{TypesError, TypesResult};

/// Per-vertex sorted, deduplicated neighbor lists.
///
/// Degree is pre-counted before building so each neighbor list is
/// allocated exactly once. Consumed by wire detection (local neighborhood
/// gathering, flood fill, boundary regrowth).
///
/// # Example
///
/// ```
/// use pose_types::AdjacencyGraph;
///
/// // A triangle: every vertex neighbors the other two
/// let graph = AdjacencyGraph::from_edges(&[[0, 1], [1, 2], [2, 0]], 3).unwrap();
/// assert_eq!(graph.neighbors(0), &[1, 2]);
/// assert_eq!(graph.degree(1), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    neighbors: Vec<Vec<u32>>,
}

impl AdjacencyGraph {
    /// Build the graph from an unordered edge list.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::IndexOutOfBounds`] if any edge references a
    /// vertex id `>= vertex_count`. Indices are never clamped.
    pub fn from_edges(edges: &[[u32; 2]], vertex_count: usize) -> TypesResult<Self> {
        for &[a, b] in edges {
            for index in [a, b] {
                if index as usize >= vertex_count {
                    return Err(TypesError::IndexOutOfBounds {
                        index,
                        count: vertex_count,
                    });
                }
            }
        }

        // Pre-count degrees so each list allocates once
        let mut degrees = vec![0usize; vertex_count];
        for &[a, b] in edges {
            degrees[a as usize] += 1;
            degrees[b as usize] += 1;
        }

        let mut neighbors: Vec<Vec<u32>> = degrees.iter().map(|&d| Vec::with_capacity(d)).collect();
        for &[a, b] in edges {
            neighbors[a as usize].push(b);
            neighbors[b as usize].push(a);
        }

        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Ok(Self { neighbors })
    }

    /// Build the graph from a triangle face list.
    ///
    /// Each face contributes its three boundary edges.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::IndexOutOfBounds`] if any face references a
    /// vertex id `>= vertex_count`.
    pub fn from_faces(faces: &[[u32; 3]], vertex_count: usize) -> TypesResult<Self> {
        let mut edges = Vec::with_capacity(faces.len() * 3);
        for &[a, b, c] in faces {
            edges.push([a, b]);
            edges.push([b, c]);
            edges.push([c, a]);
        }
        Self::from_edges(&edges, vertex_count)
    }

    /// Sorted neighbor ids of a vertex.
    ///
    /// # Panics
    ///
    /// Panics if `vertex >= vertex_count()`.
    #[inline]
    #[must_use]
    pub fn neighbors(&self, vertex: u32) -> &[u32] {
        &self.neighbors[vertex as usize]
    }

    /// Number of vertices the graph was built over.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of distinct neighbors of a vertex.
    #[inline]
    #[must_use]
    pub fn degree(&self, vertex: u32) -> usize {
        self.neighbors[vertex as usize].len()
    }
}
