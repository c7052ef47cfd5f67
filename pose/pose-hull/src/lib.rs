//! 2-D convex hull and minimum-area oriented bounding box.
//!
//! This crate provides the planar geometry used to orient scanned
//! objects:
//!
//! - **Convex hull**: monotone-chain hull over a point set, optionally
//!   filtered by an exclusion mask and projected from 3-D onto the XY
//!   plane
//! - **Minimum bounding box**: rotating calipers over the hull's edge
//!   directions, returning the rotation that minimizes 2-D bounding area
//!
//! # Layer 0 Crate
//!
//! Pure geometry, no engine or UI dependencies.
//!
//! # Example
//!
//! ```
//! use pose_hull::{convex_hull, minimum_bounding_box};
//! use nalgebra::Point2;
//!
//! // A tilted rectangle's corner points
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(1.0, 3.0),
//!     Point2::new(-1.0, 1.0),
//! ];
//!
//! let hull = convex_hull(&points);
//! let obb = minimum_bounding_box(&hull);
//! // Sides 2*sqrt(2) and sqrt(2), so the minimal box has area 4
//! assert!((obb.area - 4.0).abs() < 1e-9);
//! ```

// Safety: deny unwrap/expect in library code; tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod calipers;
mod hull;

pub use calipers::{minimum_bounding_box, OrientedBox};
pub use hull::{convex_hull, convex_hull_masked, hull_contains};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};
