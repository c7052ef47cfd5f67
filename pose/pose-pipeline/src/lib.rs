//! Pose standardization for scanned objects.
//!
//! Takes a raw scan mesh in an arbitrary position and orientation and
//! produces the rigid transform that standardizes it: a rotation about
//! the vertical axis aligning the object's minimal footprint box with the
//! world axes, and a translation centering that footprint at the origin.
//!
//! Suspension wires and similar thin appendages are detected first and
//! excluded from the footprint, so the orientation reflects the object
//! itself, not its fixturing. Mass properties are estimated alongside and
//! returned with the transform.
//!
//! Batches of objects arrive as flattened vertex and edge buffers with
//! per-object counts, and are processed in parallel with the output order
//! matching the input order.
//!
//! # Example
//!
//! ```
//! use pose_pipeline::{standardize_object, StandardizeParams};
//! use pose_types::unit_cube_mesh;
//!
//! let mesh = unit_cube_mesh();
//! let result = standardize_object(&mesh, &StandardizeParams::default()).unwrap();
//! // The cube's footprint center is at (0.5, 0.5)
//! assert!((result.translation.x + 0.5).abs() < 1e-9);
//! assert!((result.translation.z).abs() < 1e-9);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod batch;
mod error;
mod params;
mod standardize;

pub use batch::standardize_batch;
pub use error::{PipelineError, PipelineResult};
pub use params::{SearchStrategy, StandardizeParams};
pub use standardize::{standardize_object, Standardization};

pub use pose_mass::MassParams;
pub use pose_wire::WireParams;
