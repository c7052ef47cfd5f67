//! Core value types for scan pose standardization.
//!
//! This crate provides the foundational types shared by the pose pipeline:
//!
//! - [`ScanMesh`] - A scanned object as a point set with edge connectivity
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`AdjacencyGraph`] - Per-vertex sorted neighbor lists
//! - [`UnionFind`] - Disjoint-set structure over vertex ids
//!
//! # Layer 0 Crate
//!
//! No engine or UI dependencies. Usable from:
//! - CLI tools
//! - Servers
//! - Python bindings
//!
//! # Coordinate System
//!
//! Right-handed, Z-up:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down, the slicing axis)
//!
//! # Example
//!
//! ```
//! use pose_types::{ScanMesh, AdjacencyGraph, Point3};
//!
//! let mut mesh = ScanMesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.edges.push([0, 1]);
//!
//! let graph = AdjacencyGraph::from_edges(&mesh.edges, mesh.vertex_count()).unwrap();
//! assert_eq!(graph.neighbors(0), &[1]);
//! ```

// Safety: deny unwrap/expect in library code; tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod adjacency;
mod bounds;
mod error;
mod mesh;
mod unionfind;

pub use adjacency::AdjacencyGraph;
pub use bounds::Aabb;
pub use error::{TypesError, TypesResult};
pub use mesh::{segment_mesh, sphere_mesh, unit_cube_mesh, ScanMesh};
pub use unionfind::UnionFind;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};
