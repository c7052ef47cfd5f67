//! End-to-end regression tests for the standardization pipeline.
//!
//! These exercise the full path from flattened multi-object buffers
//! through wire detection, hull/box fitting, and mass estimation, and
//! pin down the batch contract: output order matches input order, and a
//! zero-count object yields the identity standardization.

#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_possible_truncation)]

use approx::assert_relative_eq;
use nalgebra::{Point3, Rotation3, Vector3};
use pose_pipeline::{
    standardize_batch, standardize_object, MassParams, StandardizeParams, WireParams,
};
use pose_types::{unit_cube_mesh, ScanMesh};

/// A 2.0 x 1.0 x 0.5 grid block, rotated about Z then offset.
fn grid_block(angle: f64, offset: Vector3<f64>) -> ScanMesh {
    let (nx, ny, nz) = (9_usize, 5, 3);
    let spacing = 0.25;
    let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), angle);
    let id = |x: usize, y: usize, z: usize| (x * ny * nz + y * nz + z) as u32;

    let mut mesh = ScanMesh::new();
    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                let local = Point3::new(
                    x as f64 * spacing,
                    y as f64 * spacing,
                    z as f64 * spacing,
                );
                mesh.vertices.push(rot * local + offset);
                if x + 1 < nx {
                    mesh.edges.push([id(x, y, z), id(x + 1, y, z)]);
                }
                if y + 1 < ny {
                    mesh.edges.push([id(x, y, z), id(x, y + 1, z)]);
                }
                if z + 1 < nz {
                    mesh.edges.push([id(x, y, z), id(x, y, z + 1)]);
                }
            }
        }
    }
    mesh
}

/// Concatenate meshes into the flat batch layout with global edge indices.
fn flatten(meshes: &[ScanMesh]) -> (Vec<Point3<f64>>, Vec<[u32; 2]>, Vec<u32>, Vec<u32>) {
    let mut verts = Vec::new();
    let mut edges = Vec::new();
    let mut vert_counts = Vec::new();
    let mut edge_counts = Vec::new();
    for mesh in meshes {
        let base = verts.len() as u32;
        verts.extend_from_slice(&mesh.vertices);
        edges.extend(mesh.edges.iter().map(|&[a, b]| [base + a, base + b]));
        vert_counts.push(mesh.vertex_count() as u32);
        edge_counts.push(mesh.edge_count() as u32);
    }
    (verts, edges, vert_counts, edge_counts)
}

fn test_params() -> StandardizeParams {
    StandardizeParams::new()
        .with_wire(WireParams::default().with_neighborhood_size(8))
        .with_mass(MassParams::new().with_slice_height(0.25))
}

#[test]
fn batch_preserves_object_order() {
    let meshes: Vec<ScanMesh> = (0..6)
        .map(|i| {
            let mut cube = unit_cube_mesh();
            cube.translate(Vector3::new(f64::from(i) * 10.0, 0.0, 0.0));
            cube
        })
        .collect();
    let (verts, edges, vert_counts, edge_counts) = flatten(&meshes);

    let results =
        standardize_batch(&verts, &edges, &vert_counts, &edge_counts, &test_params()).unwrap();

    assert_eq!(results.len(), 6);
    for (i, result) in results.iter().enumerate() {
        let expected_x = -(i as f64 * 10.0 + 0.5);
        assert_relative_eq!(result.translation.x, expected_x, epsilon = 1e-9);
        assert_relative_eq!(result.translation.y, -0.5, epsilon = 1e-9);
        assert_relative_eq!(result.translation.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.mass.center_of_gravity.z, 0.5, epsilon = 1e-9);
    }
}

#[test]
fn zero_count_object_is_identity() {
    let cube = unit_cube_mesh();
    let (verts, edges, mut vert_counts, mut edge_counts) = flatten(&[cube]);
    vert_counts.insert(0, 0);
    edge_counts.insert(0, 0);

    let results =
        standardize_batch(&verts, &edges, &vert_counts, &edge_counts, &test_params()).unwrap();

    assert_eq!(results.len(), 2);
    assert_relative_eq!(results[0].rotation.angle(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(results[0].translation.norm(), 0.0, epsilon = 1e-12);
    assert!(results[0].mass.is_degenerate());
    // Real object after the placeholder remains intact.
    assert_relative_eq!(results[1].translation.x, -0.5, epsilon = 1e-9);
}

#[test]
fn rotated_blocks_square_up() {
    let angles = [0.3, -1.1];
    let meshes: Vec<ScanMesh> = angles
        .iter()
        .map(|&a| grid_block(a, Vector3::new(4.0, -2.0, 0.0)))
        .collect();
    let (verts, edges, vert_counts, edge_counts) = flatten(&meshes);

    let results =
        standardize_batch(&verts, &edges, &vert_counts, &edge_counts, &test_params()).unwrap();

    for (mesh, result) in meshes.iter().zip(&results) {
        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);
        for &v in &mesh.vertices {
            let p = result.apply(&v);
            min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }

        // Footprint centered at the origin and axis aligned.
        assert_relative_eq!(min.x + max.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(min.y + max.y, 0.0, epsilon = 1e-9);
        let mut sizes = [max.x - min.x, max.y - min.y];
        sizes.sort_by(f64::total_cmp);
        assert_relative_eq!(sizes[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(sizes[1], 2.0, epsilon = 1e-9);

        // Rotation about Z leaves heights untouched.
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(max.z, 0.5, epsilon = 1e-9);
    }
}

#[test]
fn batch_of_one_matches_single_call() {
    let mesh = grid_block(0.7, Vector3::new(1.0, 1.0, 0.0));
    let params = test_params();
    let single = standardize_object(&mesh, &params).unwrap();

    let (verts, edges, vert_counts, edge_counts) = flatten(std::slice::from_ref(&mesh));
    let batch = standardize_batch(&verts, &edges, &vert_counts, &edge_counts, &params).unwrap();

    assert_eq!(batch.len(), 1);
    assert_relative_eq!(
        batch[0].rotation.angle(),
        single.rotation.angle(),
        epsilon = 1e-12
    );
    assert_relative_eq!(
        (batch[0].translation - single.translation).norm(),
        0.0,
        epsilon = 1e-12
    );
}

#[test]
fn short_vertex_buffer_is_rejected() {
    let cube = unit_cube_mesh();
    let (mut verts, edges, vert_counts, edge_counts) = flatten(&[cube]);
    verts.pop();

    let err = standardize_batch(&verts, &edges, &vert_counts, &edge_counts, &test_params());
    assert!(err.is_err());
}
