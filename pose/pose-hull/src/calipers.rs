//! Minimum-area oriented bounding box via edge-aligned sweeps.

use nalgebra::{Point2, Rotation2};

/// Minimum-area bounding box of a convex hull in the XY plane.
///
/// `rotation` is the angle (radians) that maps world coordinates into the
/// box-aligned frame; `min` and `max` are the box corners expressed in
/// that rotated frame. Rotating `center_world` by `-rotation` gives back
/// the world-space box center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// World-to-box rotation angle in radians.
    pub rotation: f64,
    /// Minimum corner in the rotated frame.
    pub min: Point2<f64>,
    /// Maximum corner in the rotated frame.
    pub max: Point2<f64>,
    /// Box area.
    pub area: f64,
}

impl Default for OrientedBox {
    /// Sentinel box with infinite area, replaced by the first candidate.
    fn default() -> Self {
        Self {
            rotation: 0.0,
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            area: f64::INFINITY,
        }
    }
}

impl OrientedBox {
    /// True when no candidate box has been accepted.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.area.is_finite()
    }

    /// Box center mapped back into world coordinates.
    #[must_use]
    pub fn center_world(&self) -> Point2<f64> {
        let center = Point2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        );
        Rotation2::new(-self.rotation) * center
    }

    /// Box extents (width, depth) in the rotated frame.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.max.x - self.min.x, self.max.y - self.min.y)
    }
}

/// Find the minimum-area oriented bounding box of a convex hull.
///
/// For each hull edge, the hull is rotated so that edge lies along the
/// X axis and the axis-aligned box is measured; one of these per-edge
/// boxes is always a global minimum for a convex polygon. Near-zero
/// length edges are skipped. Ties keep the first minimum encountered,
/// which makes the orientation deterministic for symmetric hulls.
///
/// A hull with fewer than 3 vertices yields the degenerate sentinel
/// ([`OrientedBox::default`]).
///
/// # Example
///
/// ```
/// use pose_hull::{convex_hull, minimum_bounding_box};
/// use nalgebra::Point2;
///
/// let hull = convex_hull(&[
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(4.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ]);
/// let obb = minimum_bounding_box(&hull);
/// assert!((obb.area - 8.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn minimum_bounding_box(hull: &[Point2<f64>]) -> OrientedBox {
    let mut best = OrientedBox::default();
    if hull.len() < 3 {
        return best;
    }

    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        let edge = b - a;
        if edge.norm_squared() <= 1e-8 {
            continue;
        }
        let angle = edge.y.atan2(edge.x);
        let rot = Rotation2::new(-angle);

        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &p in hull {
            let q = rot * p;
            min.x = min.x.min(q.x);
            min.y = min.y.min(q.y);
            max.x = max.x.max(q.x);
            max.y = max.y.max(q.y);
        }
        let area = (max.x - min.x) * (max.y - min.y);
        if area < best.area {
            best = OrientedBox {
                rotation: -angle,
                min,
                max,
                area,
            };
        }
    }

    best
}
