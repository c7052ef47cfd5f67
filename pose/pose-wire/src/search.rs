//! Neighborhood gathering strategies.
//!
//! Scoring needs the k nearest vertices around each source. Two notions
//! of "near" are supported: straight-line distance through space, and
//! shortest-path distance along mesh edges. The graph variant cannot jump
//! across gaps between a wire and the surface it passes close to, which
//! makes it the safer choice for suspended parts; the spatial variant is
//! cheaper on dense point sets.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashMap;
use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;

use pose_types::{AdjacencyGraph, ScanMesh};

/// Strategy for gathering the neighborhood of a vertex.
///
/// Implementations append `(vertex, distance)` pairs to `out`, never
/// including the query vertex itself, in no guaranteed order.
pub trait NeighborSearch {
    /// Collect up to `k` neighbors of `vertex` with their distances.
    fn gather(&self, vertex: u32, k: usize, out: &mut Vec<(u32, f64)>);
}

/// Neighborhoods by straight-line distance, via a KD-tree over all
/// vertex positions.
#[derive(Debug)]
pub struct SpatialSearch {
    // Bucket size (4th parameter) must exceed the number of points that
    // can share a coordinate on one axis, or kiddo panics during insert;
    // degenerate scans (e.g. a straight segment) put every vertex on one
    // axis value, so the bucket is sized generously.
    kdtree: KdTree<f64, u64, 3, 1024, u32>,
    positions: Vec<[f64; 3]>,
}

impl SpatialSearch {
    /// Build the spatial index over every vertex of the mesh.
    #[must_use]
    pub fn build(mesh: &ScanMesh) -> Self {
        let mut kdtree: KdTree<f64, u64, 3, 1024, u32> = KdTree::new();
        let mut positions = Vec::with_capacity(mesh.vertex_count());

        for (i, point) in mesh.vertices.iter().enumerate() {
            let coords = [point.x, point.y, point.z];
            kdtree.add(&coords, i as u64);
            positions.push(coords);
        }

        Self { kdtree, positions }
    }
}

impl NeighborSearch for SpatialSearch {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: vertex indices are u32, larger meshes unsupported
    fn gather(&self, vertex: u32, k: usize, out: &mut Vec<(u32, f64)>) {
        let Some(query) = self.positions.get(vertex as usize) else {
            return;
        };

        // One extra so the query vertex can be dropped from its own result
        let neighbors = self.kdtree.nearest_n::<SquaredEuclidean>(query, k + 1);
        let mut appended = 0;
        for neighbor in neighbors {
            let index = neighbor.item as u32;
            if index == vertex {
                continue;
            }
            out.push((index, neighbor.distance.sqrt()));
            appended += 1;
            if appended >= k {
                break;
            }
        }
    }
}

/// Priority-queue entry for the bounded shortest-path expansion.
#[derive(Debug, Clone, Copy)]
struct State {
    vertex: u32,
    distance: f64,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.vertex == other.vertex && (self.distance - other.distance).abs() < f64::EPSILON
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
    }
}

/// Neighborhoods by shortest-path distance along mesh edges.
///
/// Edge weights are Euclidean edge lengths; each gather runs a Dijkstra
/// expansion that stops once `k` vertices besides the source have been
/// finalized.
#[derive(Debug)]
pub struct GraphSearch {
    /// Per-vertex `(neighbor, edge length)` lists.
    weighted: Vec<Vec<(u32, f64)>>,
}

impl GraphSearch {
    /// Precompute edge lengths from the mesh and its adjacency graph.
    ///
    /// The adjacency graph must have been built for this mesh; vertices
    /// beyond the mesh's vertex count get empty neighbor lists.
    #[must_use]
    pub fn build(mesh: &ScanMesh, adjacency: &AdjacencyGraph) -> Self {
        let vertex_count = adjacency.vertex_count();
        let mut weighted = Vec::with_capacity(vertex_count);

        for vertex in 0..vertex_count {
            #[allow(clippy::cast_possible_truncation)]
            let neighbors = adjacency.neighbors(vertex as u32);
            let mut list = Vec::with_capacity(neighbors.len());
            for &neighbor in neighbors {
                let (a, b) = (vertex, neighbor as usize);
                let length = if a < mesh.vertex_count() && b < mesh.vertex_count() {
                    (mesh.vertices[b] - mesh.vertices[a]).norm()
                } else {
                    f64::INFINITY
                };
                list.push((neighbor, length));
            }
            weighted.push(list);
        }

        Self { weighted }
    }
}

impl NeighborSearch for GraphSearch {
    fn gather(&self, vertex: u32, k: usize, out: &mut Vec<(u32, f64)>) {
        let source = vertex as usize;
        if source >= self.weighted.len() {
            return;
        }

        // The expansion finalizes only ~k vertices, so distances are kept
        // for touched vertices alone; a full per-query array would make
        // one detection pass quadratic in the vertex count.
        let mut distances: HashMap<u32, f64> = HashMap::with_capacity(k.saturating_mul(4));
        let mut heap = BinaryHeap::new();
        let mut finalized = 0;

        distances.insert(vertex, 0.0);
        heap.push(State {
            vertex,
            distance: 0.0,
        });

        while let Some(State {
            vertex: current,
            distance,
        }) = heap.pop()
        {
            // Skip if we've already found a shorter path
            if distances.get(&current).is_some_and(|&d| distance > d) {
                continue;
            }

            if current != vertex {
                out.push((current, distance));
                finalized += 1;
                if finalized >= k {
                    break;
                }
            }

            for &(neighbor, edge_length) in &self.weighted[current as usize] {
                let new_distance = distance + edge_length;
                let entry = distances.entry(neighbor).or_insert(f64::INFINITY);
                if new_distance < *entry {
                    *entry = new_distance;
                    heap.push(State {
                        vertex: neighbor,
                        distance: new_distance,
                    });
                }
            }
        }
    }
}
