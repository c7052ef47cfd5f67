//! Batch standardization over flattened buffers.

use nalgebra::Point3;
use rayon::prelude::*;
use tracing::info;

use pose_types::{ScanMesh, TypesError};

use crate::error::{PipelineError, PipelineResult};
use crate::params::StandardizeParams;
use crate::standardize::{standardize_object, Standardization};

/// Standardize a batch of objects supplied as flattened buffers.
///
/// `verts` and `edges` concatenate all objects back to back; `vert_counts`
/// and `edge_counts` give each object's share, in order. Edge indices are
/// global into `verts` and are rebased to each object's local vertex ids.
///
/// Objects are processed in parallel; the output order always matches the
/// input order. A zero vertex count yields the identity standardization
/// for that object.
///
/// # Errors
///
/// Fails when the count arrays disagree on the number of objects, when a
/// buffer's length does not match the sum of its counts, or when an edge
/// references a vertex outside its object.
pub fn standardize_batch(
    verts: &[Point3<f64>],
    edges: &[[u32; 2]],
    vert_counts: &[u32],
    edge_counts: &[u32],
    params: &StandardizeParams,
) -> PipelineResult<Vec<Standardization>> {
    if vert_counts.len() != edge_counts.len() {
        return Err(PipelineError::ObjectCountMismatch {
            vert_objects: vert_counts.len(),
            edge_objects: edge_counts.len(),
        });
    }

    let vert_total: usize = vert_counts.iter().map(|&c| c as usize).sum();
    if vert_total != verts.len() {
        return Err(PipelineError::CountMismatch {
            buffer: "vertex",
            actual: verts.len(),
            expected: vert_total,
        });
    }
    let edge_total: usize = edge_counts.iter().map(|&c| c as usize).sum();
    if edge_total != edges.len() {
        return Err(PipelineError::CountMismatch {
            buffer: "edge",
            actual: edges.len(),
            expected: edge_total,
        });
    }

    // Carve the flat buffers into per-object ranges up front so the
    // parallel pass works on disjoint slices.
    let mut ranges = Vec::with_capacity(vert_counts.len());
    let (mut vert_offset, mut edge_offset) = (0_usize, 0_usize);
    for (&vc, &ec) in vert_counts.iter().zip(edge_counts) {
        let (vc, ec) = (vc as usize, ec as usize);
        ranges.push((
            vert_offset..vert_offset + vc,
            edge_offset..edge_offset + ec,
        ));
        vert_offset += vc;
        edge_offset += ec;
    }

    let results: PipelineResult<Vec<Standardization>> = ranges
        .into_par_iter()
        .map(|(vert_range, edge_range)| {
            let mesh = object_mesh(verts, edges, vert_range.start, vert_range.end, &edge_range)?;
            standardize_object(&mesh, params)
        })
        .collect();

    if let Ok(results) = &results {
        info!(objects = results.len(), "batch standardized");
    }
    results
}

/// Assemble one object's mesh from the flat buffers, rebasing its edge
/// indices to local vertex ids.
#[allow(clippy::cast_possible_truncation)]
// Truncation: vertex indices are u32, larger buffers unsupported
fn object_mesh(
    verts: &[Point3<f64>],
    edges: &[[u32; 2]],
    vert_start: usize,
    vert_end: usize,
    edge_range: &std::ops::Range<usize>,
) -> PipelineResult<ScanMesh> {
    let count = vert_end - vert_start;
    let mut mesh = ScanMesh::with_capacity(count, edge_range.len());
    mesh.vertices.extend_from_slice(&verts[vert_start..vert_end]);

    let base = vert_start as u32;
    for &[a, b] in &edges[edge_range.clone()] {
        let local_a = a.checked_sub(base).filter(|&v| (v as usize) < count);
        let local_b = b.checked_sub(base).filter(|&v| (v as usize) < count);
        match (local_a, local_b) {
            (Some(a), Some(b)) => mesh.edges.push([a, b]),
            _ => {
                return Err(TypesError::IndexOutOfBounds {
                    index: a.min(b),
                    count,
                }
                .into())
            }
        }
    }

    Ok(mesh)
}
