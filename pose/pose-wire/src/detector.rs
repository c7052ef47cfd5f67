//! Wire classification passes.
//!
//! Scoring, component pruning, and boundary regrowth. Scores come from the
//! local neighborhood covariance of each vertex; classification then works
//! purely on the mesh adjacency so that wires are removed as connected
//! runs, not as isolated speckle.

use std::collections::VecDeque;

use nalgebra::Matrix3;
use tracing::debug;

use pose_types::{AdjacencyGraph, ScanMesh};

use crate::eigen::linearity_score;
use crate::error::{WireError, WireResult};
use crate::params::WireParams;
use crate::search::NeighborSearch;

/// Distance-squared floor for vote weighting, so a source's vote for
/// itself (distance zero) dominates its own classification.
const VOTE_DISTANCE_FLOOR: f64 = 1e-12;

/// Per-vertex wire classification.
#[derive(Debug, Clone, Default)]
pub struct WireMask {
    flags: Vec<bool>,
}

impl WireMask {
    /// Number of vertices covered by the mask.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// True when the mask covers no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Whether the given vertex was classified as wire.
    ///
    /// Out-of-range vertices are treated as structural.
    #[must_use]
    pub fn is_wire(&self, vertex: u32) -> bool {
        self.flags.get(vertex as usize).copied().unwrap_or(false)
    }

    /// The raw per-vertex flags, `true` meaning wire.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }

    /// Number of vertices flagged as wire.
    #[must_use]
    pub fn wire_count(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }
}

/// Result of wire detection.
#[derive(Debug, Clone)]
pub struct WireDetection {
    /// Per-vertex classification, `true` meaning wire.
    pub mask: WireMask,

    /// Per-vertex linearity scores in `[0, 1]`.
    pub scores: Vec<f64>,

    /// Number of vertices classified as wire after all passes.
    pub wire_count: usize,

    /// Number of wire components that survived pruning.
    pub group_count: usize,

    /// Number of components reverted for being below the size floor.
    pub reverted_count: usize,

    /// Number of vertices promoted during the regrowth pass.
    pub regrown_count: usize,
}

impl WireDetection {
    /// Returns true if any vertex was classified as wire.
    #[must_use]
    pub const fn has_wires(&self) -> bool {
        self.wire_count > 0
    }
}

impl std::fmt::Display for WireDetection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wire detection: {} wire vertices in {} groups ({} reverted, {} regrown)",
            self.wire_count, self.group_count, self.reverted_count, self.regrown_count
        )
    }
}

/// Classify every vertex of a mesh as wire-like or structural.
///
/// `search` supplies the neighborhoods used for scoring; see
/// [`crate::SpatialSearch`] and [`crate::GraphSearch`]. The adjacency
/// graph drives the pruning and regrowth passes and must cover the same
/// vertices as the mesh.
///
/// An empty mesh yields an empty all-structural result rather than an
/// error.
///
/// # Errors
///
/// Returns [`WireError::AdjacencyMismatch`] when the adjacency graph was
/// built for a different vertex count, and
/// [`WireError::InvalidParameter`] when `sample_stride` is zero.
pub fn detect_wires(
    mesh: &ScanMesh,
    adjacency: &AdjacencyGraph,
    params: &WireParams,
    search: &dyn NeighborSearch,
) -> WireResult<WireDetection> {
    let vertex_count = mesh.vertex_count();

    if params.sample_stride == 0 {
        return Err(WireError::InvalidParameter {
            name: "sample_stride",
            reason: "must be at least 1".to_owned(),
        });
    }
    if adjacency.vertex_count() != vertex_count {
        return Err(WireError::AdjacencyMismatch {
            vertices: vertex_count,
            adjacency: adjacency.vertex_count(),
        });
    }

    if vertex_count == 0 {
        return Ok(WireDetection {
            mask: WireMask::default(),
            scores: Vec::new(),
            wire_count: 0,
            group_count: 0,
            reverted_count: 0,
            regrown_count: 0,
        });
    }

    let scores = score_vertices(mesh, params, search);

    let mut flags: Vec<bool> = scores
        .iter()
        .map(|&s| s > params.linearity_threshold)
        .collect();

    let (group_count, reverted_count, boundary) =
        prune_components(adjacency, &mut flags, params.min_group_size);

    let regrown_count = regrow_boundary(
        adjacency,
        &mut flags,
        &scores,
        boundary,
        params.regrowth_threshold,
    );

    let mask = WireMask { flags };
    let wire_count = mask.wire_count();

    debug!(
        vertices = vertex_count,
        wire_count, group_count, reverted_count, regrown_count, "wire detection complete"
    );

    Ok(WireDetection {
        mask,
        scores,
        wire_count,
        group_count,
        reverted_count,
        regrown_count,
    })
}

/// Per-vertex linearity scores via distance-weighted neighborhood voting.
///
/// Every `sample_stride`-th vertex is a source: its neighborhood is
/// gathered, scored once, and the score is distributed to every gathered
/// vertex (the source included) with weight `1 / d²`. Final scores are
/// the weighted averages, so with stride 1 each vertex is dominated by
/// its own neighborhood score.
#[allow(clippy::cast_precision_loss)]
// Precision: neighborhood sizes are far below 2^52
fn score_vertices(mesh: &ScanMesh, params: &WireParams, search: &dyn NeighborSearch) -> Vec<f64> {
    let vertex_count = mesh.vertex_count();
    let mut vote_sum = vec![0.0_f64; vertex_count];
    let mut weight_sum = vec![0.0_f64; vertex_count];
    let mut neighborhood = Vec::with_capacity(params.neighborhood_size + 1);

    for source in (0..vertex_count).step_by(params.sample_stride) {
        #[allow(clippy::cast_possible_truncation)]
        // Truncation: vertex indices are u32, larger meshes unsupported
        let source_u32 = source as u32;

        neighborhood.clear();
        neighborhood.push((source_u32, 0.0));
        search.gather(source_u32, params.neighborhood_size, &mut neighborhood);

        let score = neighborhood_linearity(mesh, &neighborhood);

        for &(vertex, distance) in &neighborhood {
            let weight = 1.0 / distance.mul_add(distance, VOTE_DISTANCE_FLOOR);
            vote_sum[vertex as usize] += score * weight;
            weight_sum[vertex as usize] += weight;
        }
    }

    vote_sum
        .iter()
        .zip(&weight_sum)
        .map(|(&v, &w)| if w > 0.0 { v / w } else { 0.0 })
        .collect()
}

/// Linearity of the mean-centered covariance of a gathered neighborhood.
#[allow(clippy::cast_precision_loss)]
fn neighborhood_linearity(mesh: &ScanMesh, neighborhood: &[(u32, f64)]) -> f64 {
    if neighborhood.len() < 3 {
        return 0.0;
    }

    let mut centroid = nalgebra::Vector3::zeros();
    for &(vertex, _) in neighborhood {
        centroid += mesh.vertices[vertex as usize].coords;
    }
    centroid /= neighborhood.len() as f64;

    let mut covariance = Matrix3::zeros();
    for &(vertex, _) in neighborhood {
        let diff = mesh.vertices[vertex as usize].coords - centroid;
        covariance += diff * diff.transpose();
    }
    covariance /= neighborhood.len() as f64;

    linearity_score(&covariance)
}

/// Flood fill wire components over the adjacency graph; revert small
/// groups that touch structural vertices, and collect the boundary of
/// surviving groups as regrowth seeds.
///
/// Returns `(surviving groups, reverted groups, boundary seeds)`.
#[allow(clippy::cast_possible_truncation)]
// Truncation: vertex indices are u32, larger meshes unsupported
fn prune_components(
    adjacency: &AdjacencyGraph,
    flags: &mut [bool],
    min_group_size: usize,
) -> (usize, usize, Vec<u32>) {
    let vertex_count = flags.len();
    let mut visited = vec![false; vertex_count];
    let mut queue = VecDeque::new();
    let mut group = Vec::new();
    let mut group_boundary = Vec::new();
    let mut boundary = Vec::new();
    let mut group_count = 0;
    let mut reverted_count = 0;

    for start in 0..vertex_count {
        if !flags[start] || visited[start] {
            continue;
        }

        group.clear();
        group_boundary.clear();
        let mut has_structural_neighbor = false;

        visited[start] = true;
        queue.push_back(start as u32);

        while let Some(vertex) = queue.pop_front() {
            group.push(vertex);
            let mut on_boundary = false;

            for &neighbor in adjacency.neighbors(vertex) {
                let neighbor_idx = neighbor as usize;
                if flags[neighbor_idx] {
                    if !visited[neighbor_idx] {
                        visited[neighbor_idx] = true;
                        queue.push_back(neighbor);
                    }
                } else {
                    on_boundary = true;
                }
            }

            if on_boundary {
                has_structural_neighbor = true;
                group_boundary.push(vertex);
            }
        }

        // A whole island of wire vertices has nothing to revert into, so
        // it is kept regardless of size.
        if group.len() < min_group_size && has_structural_neighbor {
            for &vertex in &group {
                flags[vertex as usize] = false;
            }
            reverted_count += 1;
        } else {
            group_count += 1;
            boundary.extend_from_slice(&group_boundary);
        }
    }

    (group_count, reverted_count, boundary)
}

/// Extend surviving wire runs across their boundary: structural neighbors
/// whose score clears the regrowth threshold are promoted, breadth first.
fn regrow_boundary(
    adjacency: &AdjacencyGraph,
    flags: &mut [bool],
    scores: &[f64],
    seeds: Vec<u32>,
    regrowth_threshold: f64,
) -> usize {
    let mut queue: VecDeque<u32> = seeds.into();
    let mut regrown = 0;

    while let Some(vertex) = queue.pop_front() {
        for &neighbor in adjacency.neighbors(vertex) {
            let neighbor_idx = neighbor as usize;
            if !flags[neighbor_idx] && scores[neighbor_idx] > regrowth_threshold {
                flags[neighbor_idx] = true;
                regrown += 1;
                queue.push_back(neighbor);
            }
        }
    }

    regrown
}
