//! Slice-based center of gravity estimation.

use hashbrown::HashMap;
use nalgebra::{Point2, Point3, Vector2, Vector3};
use tracing::debug;

use pose_types::{Aabb, ScanMesh, UnionFind};

use pose_hull::convex_hull;

use crate::params::MassParams;
use crate::properties::MassProperties;

/// Hard cap on the number of slices, matching the 8-bit slice index of
/// the wire format this estimate feeds into.
const MAX_SLICES: usize = 255;

/// Hull areas below this are treated as zero; their centroid falls back
/// to the unweighted vertex average.
const AREA_EPSILON: f64 = 1e-9;

/// Estimate mass properties of a mesh by horizontal slicing.
///
/// `bounds` must enclose the mesh (normally `mesh.bounds()`); the vertical
/// span of `bounds` defines the sliced region. Never fails: meshes without
/// vertices, non-positive slice heights, and cross-section-free inputs all
/// yield [`MassProperties::zero`]-like results.
///
/// A mesh with zero vertical span is evaluated as a single slice whose
/// z is the minimum corner height.
///
/// # Example
///
/// ```
/// use pose_mass::{estimate_mass_properties, MassParams};
/// use pose_types::unit_cube_mesh;
///
/// let mesh = unit_cube_mesh();
/// let props = estimate_mass_properties(
///     &mesh,
///     &mesh.bounds(),
///     &MassParams::new().with_slice_height(0.25),
/// );
/// assert_eq!(props.slice_count, 4);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Truncation/sign: slice indices come from floor() of non-negative heights
#[allow(clippy::cast_precision_loss)]
pub fn estimate_mass_properties(
    mesh: &ScanMesh,
    bounds: &Aabb,
    params: &MassParams,
) -> MassProperties {
    let height = params.slice_height;
    if mesh.vertex_count() == 0 || bounds.is_empty() || !(height > 0.0) || !height.is_finite() {
        return MassProperties::zero();
    }

    let min_z = bounds.min.z;
    let span = bounds.height_span();

    let raw_count = if span > 0.0 {
        ((span / height).ceil() as usize).max(1)
    } else {
        1
    };
    let truncated = raw_count > MAX_SLICES;
    let slice_count = raw_count.min(MAX_SLICES);

    // Connected components over the full mesh; component identity is the
    // union-find root, which is stable across slices.
    let mut components = UnionFind::new(mesh.vertex_count());
    for &[a, b] in &mesh.edges {
        components.union(a, b);
    }

    // Bucket vertices into their containing slice and edges into every
    // slice their z-span overlaps.
    let slice_of = |z: f64| ((z - min_z) / height).floor() as usize;
    let mut vertex_buckets: Vec<Vec<u32>> = vec![Vec::new(); slice_count];
    let mut edge_buckets: Vec<Vec<usize>> = vec![Vec::new(); slice_count];

    for (i, point) in mesh.vertices.iter().enumerate() {
        let mut index = slice_of(point.z);
        if !truncated {
            // Vertices exactly at the top plane land in the last slice
            index = index.min(slice_count - 1);
        }
        if index < slice_count {
            vertex_buckets[index].push(i as u32);
        }
    }

    for (i, &[a, b]) in mesh.edges.iter().enumerate() {
        let (za, zb) = (mesh.vertices[a as usize].z, mesh.vertices[b as usize].z);
        let lo = slice_of(za.min(zb));
        let hi = slice_of(za.max(zb)).min(slice_count - 1);
        if lo >= slice_count {
            continue;
        }
        for bucket in &mut edge_buckets[lo..=hi] {
            bucket.push(i);
        }
    }

    let mut slice_areas = Vec::with_capacity(slice_count);
    let mut slice_centroids = Vec::with_capacity(slice_count);
    let mut weighted_sum = Vector3::zeros();
    let mut total_area = 0.0;

    let mut grouped: HashMap<u32, Vec<Point2<f64>>> = HashMap::new();

    for slice in 0..slice_count {
        let z_lo = min_z + slice as f64 * height;
        let z_hi = z_lo + height;
        let slice_z = if span > 0.0 {
            z_lo + 0.5 * height
        } else {
            min_z
        };

        grouped.clear();

        for &vertex in &vertex_buckets[slice] {
            let point = mesh.vertices[vertex as usize];
            let root = components.find(vertex);
            grouped
                .entry(root)
                .or_default()
                .push(Point2::new(point.x, point.y));
        }

        for &edge in &edge_buckets[slice] {
            let [a, b] = mesh.edges[edge];
            let pa = mesh.vertices[a as usize];
            let pb = mesh.vertices[b as usize];
            let root = components.find(a);
            let points = grouped.entry(root).or_default();

            // Up to two plane crossings per edge: none when both
            // endpoints sit inside the slab.
            let (z_min_e, z_max_e) = (pa.z.min(pb.z), pa.z.max(pb.z));
            if z_min_e < z_lo && z_max_e >= z_lo {
                points.push(plane_crossing(&pa, &pb, z_lo));
            }
            if z_max_e > z_hi && z_min_e <= z_hi {
                points.push(plane_crossing(&pa, &pb, z_hi));
            }
        }

        let mut slice_area = 0.0;
        let mut slice_centroid = Vector3::zeros();

        for points in grouped.values() {
            let hull = convex_hull(points);
            if hull.len() < 3 {
                continue;
            }
            let (area, centroid) = hull_area_centroid(&hull);
            slice_area += area;
            slice_centroid += area * Vector3::new(centroid.x, centroid.y, 0.0);
        }

        let centroid = if slice_area > 0.0 {
            Point2::new(
                slice_centroid.x / slice_area,
                slice_centroid.y / slice_area,
            )
        } else {
            Point2::origin()
        };

        slice_areas.push(slice_area);
        slice_centroids.push(centroid);

        weighted_sum += slice_area * Vector3::new(centroid.x, centroid.y, slice_z);
        total_area += slice_area;
    }

    let center_of_gravity = if total_area > 0.0 {
        Point3::from(weighted_sum / total_area)
    } else {
        Point3::origin()
    };

    debug!(
        slices = slice_count,
        truncated, total_area, "mass estimation complete"
    );

    MassProperties {
        center_of_gravity,
        slice_areas,
        slice_centroids,
        slice_count,
        truncated,
        total_area,
    }
}

/// Intersection of the segment `a`-`b` with the horizontal plane at `z`,
/// projected to XY. Callers guarantee the segment crosses the plane, so
/// the endpoints differ in z.
fn plane_crossing(a: &Point3<f64>, b: &Point3<f64>, z: f64) -> Point2<f64> {
    let t = (z - a.z) / (b.z - a.z);
    Point2::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

/// Unsigned area and centroid of a convex polygon via the shoelace
/// formula. Near-zero areas fall back to the unweighted vertex average.
#[allow(clippy::cast_precision_loss)]
fn hull_area_centroid(hull: &[Point2<f64>]) -> (f64, Point2<f64>) {
    let mut doubled_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for i in 0..hull.len() {
        let j = (i + 1) % hull.len();
        let cross = hull[i].x * hull[j].y - hull[j].x * hull[i].y;
        doubled_area += cross;
        cx += (hull[i].x + hull[j].x) * cross;
        cy += (hull[i].y + hull[j].y) * cross;
    }

    let area = 0.5 * doubled_area;
    if area.abs() < AREA_EPSILON {
        let sum = hull
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + Vector2::new(p.x, p.y));
        let average = sum / hull.len() as f64;
        return (0.0, Point2::new(average.x, average.y));
    }

    (area.abs(), Point2::new(cx / (6.0 * area), cy / (6.0 * area)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pose_types::{segment_mesh, unit_cube_mesh};

    fn estimate(mesh: &ScanMesh, slice_height: f64) -> MassProperties {
        estimate_mass_properties(
            mesh,
            &mesh.bounds(),
            &MassParams::new().with_slice_height(slice_height),
        )
    }

    #[test]
    fn unit_cube_cog_is_center() {
        let mesh = unit_cube_mesh();
        let props = estimate(&mesh, 0.25);

        assert_eq!(props.slice_count, 4);
        assert!(!props.truncated);
        assert_relative_eq!(props.center_of_gravity.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(props.center_of_gravity.y, 0.5, epsilon = 1e-6);
        assert_relative_eq!(props.center_of_gravity.z, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn unit_cube_slice_areas_are_unit_squares() {
        let mesh = unit_cube_mesh();
        let props = estimate(&mesh, 0.25);

        for &area in &props.slice_areas {
            assert_relative_eq!(area, 1.0, epsilon = 1e-9);
        }
        assert_relative_eq!(props.total_area, 4.0, epsilon = 1e-9);
        for centroid in &props.slice_centroids {
            assert_relative_eq!(centroid.x, 0.5, epsilon = 1e-9);
            assert_relative_eq!(centroid.y, 0.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn empty_mesh_is_zero() {
        let mesh = ScanMesh::new();
        let props = estimate_mass_properties(&mesh, &Aabb::empty(), &MassParams::default());
        assert!(props.is_degenerate());
        assert_eq!(props.slice_count, 0);
        assert_eq!(props.center_of_gravity, Point3::origin());
    }

    #[test]
    fn non_positive_slice_height_is_zero() {
        let mesh = unit_cube_mesh();
        let bounds = mesh.bounds();
        let props = estimate_mass_properties(&mesh, &bounds, &MassParams::new().with_slice_height(0.0));
        assert!(props.is_degenerate());
        let props = estimate_mass_properties(&mesh, &bounds, &MassParams::new().with_slice_height(-1.0));
        assert!(props.is_degenerate());
    }

    #[test]
    fn flat_mesh_uses_minimum_z() {
        // Unit square in the z = 2 plane
        let mut mesh = ScanMesh::new();
        mesh.vertices.push(Point3::new(0.0, 0.0, 2.0));
        mesh.vertices.push(Point3::new(1.0, 0.0, 2.0));
        mesh.vertices.push(Point3::new(1.0, 1.0, 2.0));
        mesh.vertices.push(Point3::new(0.0, 1.0, 2.0));
        mesh.edges
            .extend_from_slice(&[[0, 1], [1, 2], [2, 3], [3, 0]]);

        let props = estimate(&mesh, 0.01);
        assert_eq!(props.slice_count, 1);
        assert_relative_eq!(props.center_of_gravity.x, 0.5, epsilon = 1e-9);
        assert_relative_eq!(props.center_of_gravity.y, 0.5, epsilon = 1e-9);
        assert_relative_eq!(props.center_of_gravity.z, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn tall_mesh_is_truncated() {
        let mesh = unit_cube_mesh();
        let props = estimate(&mesh, 0.001);
        assert!(props.truncated);
        assert_eq!(props.slice_count, 255);
    }

    #[test]
    fn vertical_segment_has_no_area() {
        let mesh = segment_mesh(Point3::origin(), Vector3::new(0.0, 0.0, 1.0), 10, 0.1);
        let props = estimate(&mesh, 0.1);
        // A line has no cross-section
        assert!(props.is_degenerate());
        assert_eq!(props.center_of_gravity, Point3::origin());
    }

    #[test]
    fn two_islands_weighted_by_area() {
        // A large and a small square column, disjoint in x
        let mut mesh = ScanMesh::new();
        let mut add_column = |x0: f64, size: f64| {
            let base = mesh.vertices.len() as u32;
            for &z in &[0.0, 1.0] {
                mesh.vertices.push(Point3::new(x0, 0.0, z));
                mesh.vertices.push(Point3::new(x0 + size, 0.0, z));
                mesh.vertices.push(Point3::new(x0 + size, size, z));
                mesh.vertices.push(Point3::new(x0, size, z));
            }
            for i in 0..4 {
                let next = (i + 1) % 4;
                mesh.edges.push([base + i, base + next]); // bottom ring
                mesh.edges.push([base + 4 + i, base + 4 + next]); // top ring
                mesh.edges.push([base + i, base + 4 + i]); // verticals
            }
        };
        add_column(0.0, 2.0); // area 4
        add_column(10.0, 1.0); // area 1

        let props = estimate(&mesh, 0.5);
        // COG x = (4 * 1.0 + 1 * 10.5) / 5
        assert_relative_eq!(props.center_of_gravity.x, 14.5 / 5.0, epsilon = 1e-6);
        assert_relative_eq!(props.center_of_gravity.z, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn hull_centroid_fallback_for_degenerate_polygon() {
        let hull = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        let (area, centroid) = hull_area_centroid(&hull);
        assert_relative_eq!(area, 0.0);
        assert_relative_eq!(centroid.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(centroid.y, 0.0, epsilon = 1e-12);
    }
}
