//! Planar convex hull construction (monotone chain).

use nalgebra::{Point2, Point3};

/// Cross product of `(b - a)` and `(c - a)`.
///
/// Positive for a counter-clockwise turn at `b`, negative for clockwise,
/// zero for collinear.
#[inline]
fn cross(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Build the convex hull of a 2-D point set.
///
/// Monotone chain: points are sorted lexicographically, then lower and
/// upper chains are built discarding points that do not keep the chain
/// strictly convex. The result is in counter-clockwise order with no
/// duplicates and no three consecutive collinear points.
///
/// Degenerate inputs (fewer than 3 distinct points) yield the distinct
/// points themselves; callers must treat `len() < 3` as "no oriented box
/// computable".
///
/// # Example
///
/// ```
/// use pose_hull::convex_hull;
/// use nalgebra::Point2;
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(0.5, 0.5), // interior, discarded
/// ];
/// let hull = convex_hull(&points);
/// assert_eq!(hull.len(), 4);
/// ```
#[must_use]
pub fn convex_hull(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut sorted: Vec<Point2<f64>> = points.to_vec();
    monotone_chain(&mut sorted)
}

/// Build the convex hull of a 3-D point set projected onto the XY plane,
/// skipping points where `excluded` is true.
///
/// `excluded` must be at least as long as `points`; this is how the wire
/// mask removes spurious thin structures before orientation. Pass an
/// all-false mask to hull every point.
#[must_use]
pub fn convex_hull_masked(points: &[Point3<f64>], excluded: &[bool]) -> Vec<Point2<f64>> {
    let mut projected: Vec<Point2<f64>> = points
        .iter()
        .enumerate()
        .filter(|(i, _)| !excluded.get(*i).copied().unwrap_or(false))
        .map(|(_, p)| Point2::new(p.x, p.y))
        .collect();
    monotone_chain(&mut projected)
}

/// Check that a point lies on or inside a counter-clockwise convex hull.
///
/// Tests the cross-product sign along every hull edge; a point is inside
/// iff it is on the left of (or on) each edge.
#[must_use]
pub fn hull_contains(hull: &[Point2<f64>], point: Point2<f64>) -> bool {
    if hull.len() < 3 {
        return false;
    }
    let eps = 1e-9;
    for i in 0..hull.len() {
        let j = (i + 1) % hull.len();
        if cross(hull[i], hull[j], point) < -eps {
            return false;
        }
    }
    true
}

/// Monotone-chain hull over caller-provided scratch storage.
///
/// Sorts and deduplicates `points` in place, then builds the two chains.
fn monotone_chain(points: &mut Vec<Point2<f64>>) -> Vec<Point2<f64>> {
    points.sort_unstable_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });
    points.dedup_by(|a, b| a.x == b.x && a.y == b.y);

    let n = points.len();
    if n < 3 {
        return points.clone();
    }

    let mut hull: Vec<Point2<f64>> = Vec::with_capacity(n + 1);

    // Lower chain
    for &p in points.iter() {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }

    // Upper chain
    let lower_len = hull.len() + 1;
    for &p in points.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }

    // The last point is the first point repeated
    hull.pop();
    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_interior() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.5, 1.5),
        ]
    }

    #[test]
    fn hull_discards_interior_points() {
        let hull = convex_hull(&square_with_interior());
        assert_eq!(hull.len(), 4);
    }

    #[test]
    fn hull_is_counter_clockwise() {
        let hull = convex_hull(&square_with_interior());
        // Signed area via shoelace must be positive for CCW
        let mut doubled_area = 0.0;
        for i in 0..hull.len() {
            let j = (i + 1) % hull.len();
            doubled_area += hull[i].x * hull[j].y - hull[j].x * hull[i].y;
        }
        assert!(doubled_area > 0.0);
    }

    #[test]
    fn hull_contains_all_inputs() {
        let points = square_with_interior();
        let hull = convex_hull(&points);
        for p in &points {
            assert!(hull_contains(&hull, *p), "point {p:?} escaped the hull");
        }
        assert!(!hull_contains(&hull, Point2::new(3.0, 3.0)));
    }

    #[test]
    fn no_three_consecutive_collinear() {
        // Grid of points: edges have many collinear candidates
        let mut points = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                points.push(Point2::new(f64::from(i), f64::from(j)));
            }
        }
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        for i in 0..hull.len() {
            let j = (i + 1) % hull.len();
            let k = (i + 2) % hull.len();
            assert!(cross(hull[i], hull[j], hull[k]).abs() > 1e-12);
        }
    }

    #[test]
    fn degenerate_two_points() {
        let hull = convex_hull(&[Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]);
        assert_eq!(hull.len(), 2);
    }

    #[test]
    fn degenerate_duplicates_collapse() {
        let p = Point2::new(1.0, 2.0);
        let hull = convex_hull(&[p, p, p]);
        assert_eq!(hull.len(), 1);
    }

    #[test]
    fn collinear_points_give_segment_endpoints() {
        let points: Vec<_> = (0..5).map(|i| Point2::new(f64::from(i), 0.0)).collect();
        let hull = convex_hull(&points);
        // All collinear: chain keeps only the two extremes
        assert_eq!(hull.len(), 2);
    }

    #[test]
    fn empty_input() {
        let hull = convex_hull(&[]);
        assert!(hull.is_empty());
    }

    #[test]
    fn masked_hull_skips_excluded() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.5),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 0.2),
            Point3::new(10.0, 10.0, 0.0), // excluded outlier
        ];
        let excluded = vec![false, false, false, false, true];
        let hull = convex_hull_masked(&points, &excluded);
        assert_eq!(hull.len(), 4);
        assert!(!hull_contains(&hull, Point2::new(10.0, 10.0)));
    }
}
