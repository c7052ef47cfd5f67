//! Scanned object mesh: point set plus edge connectivity.

use crate::Aabb;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A scanned object represented as a point set with edge connectivity.
///
/// Vertices are the canonical ids; edges are unordered index pairs into
/// the vertex buffer. A face list can be imported via [`ScanMesh::from_faces`],
/// which derives the three edges of every triangle.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Point3<f64>>` - positions, index = vertex id
/// - `edges`: `Vec<[u32; 2]>` - unordered vertex id pairs
/// - `normals`: optional, same length as `vertices` when present
///
/// # Example
///
/// ```
/// use pose_types::{ScanMesh, Point3};
///
/// let mut mesh = ScanMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.edges.push([0, 1]);
///
/// assert_eq!(mesh.vertex_count(), 2);
/// assert_eq!(mesh.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanMesh {
    /// Vertex positions. The index in this buffer is the vertex id.
    pub vertices: Vec<Point3<f64>>,

    /// Unordered edges as index pairs into the vertex buffer.
    pub edges: Vec<[u32; 2]>,

    /// Optional per-vertex normals, same length as `vertices` when present.
    pub normals: Option<Vec<Vector3<f64>>>,
}

impl ScanMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            normals: None,
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            edges: Vec::with_capacity(edge_count),
            normals: None,
        }
    }

    /// Create a mesh from vertex positions and an edge list.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, edges: Vec<[u32; 2]>) -> Self {
        Self {
            vertices,
            edges,
            normals: None,
        }
    }

    /// Create a mesh from vertices and a triangle face list.
    ///
    /// Each face contributes its three boundary edges. Duplicate edges from
    /// shared triangle borders are kept here; [`crate::AdjacencyGraph`]
    /// deduplicates when the graph is built.
    #[must_use]
    pub fn from_faces(vertices: Vec<Point3<f64>>, faces: &[[u32; 3]]) -> Self {
        let mut edges = Vec::with_capacity(faces.len() * 3);
        for &[a, b, c] in faces {
            edges.push([a, b]);
            edges.push([b, c]);
            edges.push([c, a]);
        }
        Self {
            vertices,
            edges,
            normals: None,
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True if the mesh has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounding box of all vertices.
    ///
    /// Returns [`Aabb::empty`] for a mesh with no vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }

    /// Translate every vertex by the given offset.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }
}

/// A unit cube from (0,0,0) to (1,1,1) as a vertex/edge mesh.
///
/// The 8 corners are densely connected along the 12 cube edges plus the
/// 4 body diagonals, so the cube is a single connected component in any
/// horizontal slice.
///
/// # Example
///
/// ```
/// use pose_types::unit_cube_mesh;
///
/// let cube = unit_cube_mesh();
/// assert_eq!(cube.vertex_count(), 8);
/// ```
#[must_use]
pub fn unit_cube_mesh() -> ScanMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];

    let edges = vec![
        // Bottom ring
        [0, 1],
        [1, 2],
        [2, 3],
        [3, 0],
        // Top ring
        [4, 5],
        [5, 6],
        [6, 7],
        [7, 4],
        // Vertical struts
        [0, 4],
        [1, 5],
        [2, 6],
        [3, 7],
        // Body diagonals
        [0, 6],
        [1, 7],
        [2, 4],
        [3, 5],
    ];

    ScanMesh::from_parts(vertices, edges)
}

/// A straight segment of `count` colinear vertices along `direction`,
/// consecutive vertices connected, starting at `origin` with the given
/// spacing. Useful as a synthetic wire probe in tests.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
// Truncation: test geometry never approaches u32::MAX vertices
pub fn segment_mesh(origin: Point3<f64>, direction: Vector3<f64>, count: usize, spacing: f64) -> ScanMesh {
    let dir = if direction.norm() > 0.0 {
        direction.normalize()
    } else {
        Vector3::z()
    };

    let mut mesh = ScanMesh::with_capacity(count, count.saturating_sub(1));
    for i in 0..count {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 * spacing;
        mesh.vertices.push(origin + dir * t);
        if i > 0 {
            mesh.edges.push([(i - 1) as u32, i as u32]);
        }
    }
    mesh
}

/// A latitude/longitude sampling of a sphere surface with ring and
/// meridian edges. Isotropic local neighborhoods everywhere, so wire
/// detection should classify every vertex as structural.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
// Truncation: test geometry never approaches u32::MAX vertices
pub fn sphere_mesh(rings: usize, segments: usize, radius: f64) -> ScanMesh {
    use std::f64::consts::PI;

    let mut mesh = ScanMesh::new();
    if rings < 2 || segments < 3 {
        return mesh;
    }

    for i in 0..rings {
        let theta = PI * i as f64 / (rings - 1) as f64;
        for j in 0..segments {
            let phi = 2.0 * PI * j as f64 / segments as f64;
            mesh.vertices.push(Point3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
            ));
        }
    }

    let id = |ring: usize, seg: usize| (ring * segments + seg % segments) as u32;
    for i in 0..rings {
        for j in 0..segments {
            // Ring edge
            mesh.edges.push([id(i, j), id(i, j + 1)]);
            // Meridian edge
            if i + 1 < rings {
                mesh.edges.push([id(i, j), id(i + 1, j)]);
            }
        }
    }

    mesh
}
