//! Thin-structure detection for scan meshes.
//!
//! Scanned objects frequently carry suspension wires, fixture pins, and
//! similar thin appendages that should not influence orientation or mass
//! estimates. This crate classifies each vertex as wire-like or structural
//! by analysing the shape of its local neighborhood: a neighborhood whose
//! covariance is dominated by a single direction is a wire.
//!
//! Detection runs in three passes: per-vertex linearity scoring, connected
//! component pruning (small wire islands attached to the body are reverted),
//! and a boundary regrowth pass that extends surviving wire runs into
//! vertices with a weaker but still elevated score.
//!
//! # Example
//!
//! ```
//! use pose_wire::{detect_wires, SpatialSearch, WireParams};
//! use pose_types::{segment_mesh, AdjacencyGraph, Vector3};
//!
//! let mesh = segment_mesh(
//!     pose_types::Point3::origin(),
//!     Vector3::new(1.0, 0.0, 0.0),
//!     30,
//!     0.1,
//! );
//! let adjacency = AdjacencyGraph::from_edges(&mesh.edges, mesh.vertex_count()).unwrap();
//! let search = SpatialSearch::build(&mesh);
//! let params = WireParams::default().with_neighborhood_size(8);
//!
//! let detection = detect_wires(&mesh, &adjacency, &params, &search).unwrap();
//! assert!(detection.wire_count > 0);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod detector;
pub mod eigen;
mod error;
pub mod params;
pub mod search;

pub use detector::{detect_wires, WireDetection, WireMask};
pub use eigen::{linearity_score, top_two_eigenvalues};
pub use error::{WireError, WireResult};
pub use params::WireParams;
pub use search::{GraphSearch, NeighborSearch, SpatialSearch};
