//! Mass and centroid estimation by horizontal slicing.
//!
//! The mesh is cut into horizontal slabs; in each slab the cross-section
//! of every connected component is approximated by the convex hull of the
//! vertices inside the slab plus the points where edges pierce the slab
//! planes. Hull areas act as mass surrogates: the center of gravity is the
//! area-weighted average of slice centroids, with each slice's vertical
//! midpoint as its z.
//!
//! Estimation never fails; degenerate inputs produce a zero result.
//!
//! # Example
//!
//! ```
//! use pose_mass::{estimate_mass_properties, MassParams};
//! use pose_types::unit_cube_mesh;
//!
//! let mesh = unit_cube_mesh();
//! let bounds = mesh.bounds();
//! let props = estimate_mass_properties(&mesh, &bounds, &MassParams::default());
//! assert!((props.center_of_gravity.x - 0.5).abs() < 1e-6);
//! assert!((props.center_of_gravity.z - 0.5).abs() < 1e-6);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod estimator;
mod params;
mod properties;

pub use estimator::estimate_mass_properties;
pub use params::MassParams;
pub use properties::MassProperties;
