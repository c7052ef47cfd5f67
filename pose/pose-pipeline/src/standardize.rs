//! Single-object standardization.

use nalgebra::{Point3, UnitQuaternion, Vector3};
use tracing::debug;

use pose_hull::{convex_hull_masked, minimum_bounding_box, OrientedBox};
use pose_mass::{estimate_mass_properties, MassProperties};
use pose_types::{AdjacencyGraph, ScanMesh};
use pose_wire::{detect_wires, GraphSearch, SpatialSearch, WireDetection};

use crate::error::PipelineResult;
use crate::params::{SearchStrategy, StandardizeParams};

/// The rigid transform standardizing one object, with the intermediate
/// measurements it was derived from.
#[derive(Debug, Clone)]
pub struct Standardization {
    /// Rotation about the vertical axis aligning the footprint box with
    /// the world axes.
    pub rotation: UnitQuaternion<f64>,

    /// Translation applied before the rotation.
    pub translation: Vector3<f64>,

    /// The minimal footprint box the rotation was derived from.
    pub oriented_box: OrientedBox,

    /// Estimated mass properties of the wire-free mesh.
    pub mass: MassProperties,

    /// Number of vertices excluded as wire.
    pub wire_count: usize,
}

impl Standardization {
    /// The identity transform, used for degenerate inputs.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            translation: Vector3::zeros(),
            oriented_box: OrientedBox::default(),
            mass: MassProperties::zero(),
            wire_count: 0,
        }
    }

    /// Apply the standardizing transform to a point.
    #[must_use]
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        self.rotation * (point + self.translation)
    }
}

impl std::fmt::Display for Standardization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Standardization: rotation {:.4} rad, translation ({:.4}, {:.4}, {:.4}), {} wire vertices",
            self.rotation.angle(),
            self.translation.x,
            self.translation.y,
            self.translation.z,
            self.wire_count
        )
    }
}

/// Standardize the pose of a single scanned object.
///
/// Pipeline: wire detection excludes thin structures, the remaining
/// vertices are projected to XY and hulled, and the minimal bounding box
/// of that hull gives the rotation. The translation centers the box
/// footprint at the origin (or the center of gravity, when
/// `recenter_mass` is set).
///
/// Degenerate inputs never fail: an empty mesh maps to the identity, a
/// single vertex keeps the identity rotation with the vertex itself as
/// translation, and meshes whose footprint collapses below three distinct
/// points keep the identity rotation.
///
/// # Errors
///
/// Returns an error when the mesh's edges reference missing vertices or
/// wire detection rejects its parameters.
pub fn standardize_object(
    mesh: &ScanMesh,
    params: &StandardizeParams,
) -> PipelineResult<Standardization> {
    if mesh.is_empty() {
        return Ok(Standardization::identity());
    }
    if mesh.vertex_count() == 1 {
        let vertex = mesh.vertices[0];
        return Ok(Standardization {
            translation: vertex.coords,
            ..Standardization::identity()
        });
    }

    let adjacency = AdjacencyGraph::from_edges(&mesh.edges, mesh.vertex_count())?;
    let detection = run_wire_detection(mesh, &adjacency, params)?;

    let body = mesh_without_wires(mesh, &detection);
    let mass = estimate_mass_properties(&body, &body.bounds(), &params.mass);

    let hull = convex_hull_masked(&mesh.vertices, detection.mask.as_slice());
    let oriented_box = minimum_bounding_box(&hull);

    let (rotation, translation) = if oriented_box.is_degenerate() {
        (UnitQuaternion::identity(), Vector3::zeros())
    } else {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), oriented_box.rotation);
        let translation = if params.recenter_mass {
            -mass.center_of_gravity.coords
        } else {
            let center = oriented_box.center_world();
            Vector3::new(-center.x, -center.y, 0.0)
        };
        (rotation, translation)
    };

    debug!(
        vertices = mesh.vertex_count(),
        wire_count = detection.wire_count,
        box_area = oriented_box.area,
        "object standardized"
    );

    Ok(Standardization {
        rotation,
        translation,
        oriented_box,
        mass,
        wire_count: detection.wire_count,
    })
}

/// Run wire detection with the configured neighborhood strategy.
fn run_wire_detection(
    mesh: &ScanMesh,
    adjacency: &AdjacencyGraph,
    params: &StandardizeParams,
) -> PipelineResult<WireDetection> {
    let detection = match params.search_strategy {
        SearchStrategy::GraphDistance => {
            let search = GraphSearch::build(mesh, adjacency);
            detect_wires(mesh, adjacency, &params.wire, &search)?
        }
        SearchStrategy::SpatialIndex => {
            let search = SpatialSearch::build(mesh);
            detect_wires(mesh, adjacency, &params.wire, &search)?
        }
    };
    Ok(detection)
}

/// Copy the mesh with wire vertices and their edges removed, remapping
/// indices to stay dense.
#[allow(clippy::cast_possible_truncation)]
// Truncation: vertex indices are u32, larger meshes unsupported
fn mesh_without_wires(mesh: &ScanMesh, detection: &WireDetection) -> ScanMesh {
    if detection.wire_count == 0 {
        return mesh.clone();
    }

    let mut remap: Vec<Option<u32>> = vec![None; mesh.vertex_count()];
    let mut body = ScanMesh::with_capacity(
        mesh.vertex_count() - detection.wire_count,
        mesh.edge_count(),
    );

    for (i, point) in mesh.vertices.iter().enumerate() {
        if !detection.mask.is_wire(i as u32) {
            remap[i] = Some(body.vertices.len() as u32);
            body.vertices.push(*point);
        }
    }

    for &[a, b] in &mesh.edges {
        if let (Some(a), Some(b)) = (remap[a as usize], remap[b as usize]) {
            body.edges.push([a, b]);
        }
    }

    body
}
