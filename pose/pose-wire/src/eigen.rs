//! Eigenvalue extraction for 3×3 neighborhood covariance matrices.
//!
//! Wire detection only needs the two largest eigenvalues, so the primary
//! path is power iteration with one deflation step. When the iteration
//! fails to produce a finite, correctly ordered pair (near-defective
//! matrices, unlucky start vectors), the full symmetric decomposition from
//! `nalgebra` is used instead.

use nalgebra::{Matrix3, SymmetricEigen, Vector3};

/// Maximum power-iteration steps per eigenvalue.
const MAX_ITERATIONS: usize = 40;

/// Relative convergence tolerance on the Rayleigh quotient.
const TOLERANCE: f64 = 1e-10;

/// Compute the two largest eigenvalues of a symmetric 3×3 matrix.
///
/// Returns `(λ1, λ2)` with `λ1 >= λ2`.
///
/// # Example
///
/// ```
/// use pose_wire::top_two_eigenvalues;
/// use nalgebra::Matrix3;
///
/// let m = Matrix3::from_diagonal(&nalgebra::Vector3::new(3.0, 2.0, 1.0));
/// let (l1, l2) = top_two_eigenvalues(&m);
/// assert!((l1 - 3.0).abs() < 1e-8);
/// assert!((l2 - 2.0).abs() < 1e-8);
/// ```
#[must_use]
pub fn top_two_eigenvalues(matrix: &Matrix3<f64>) -> (f64, f64) {
    let start = Vector3::new(1.0, 0.57, 0.33).normalize();
    if let Some((l1, v1)) = power_iterate(matrix, start) {
        // Deflate the dominant component and iterate again. The second
        // start must overlap the remaining dominant eigenspace, so it is
        // derived from v1 and orthogonalized against it; reusing the
        // first start converges to the wrong eigenvalue whenever v1
        // absorbs its projection (any planar or isotropic spectrum).
        let deflated = matrix - l1 * v1 * v1.transpose();
        if let Some((l2, _)) = power_iterate(&deflated, orthogonal_start(&v1)) {
            if l1.is_finite() && l2.is_finite() && l2 <= l1 + TOLERANCE {
                return (l1, l1.min(l2));
            }
        }
    }
    symmetric_fallback(matrix)
}

/// A unit vector orthogonal to `v1`, biased away from symmetry axes.
fn orthogonal_start(v1: &Vector3<f64>) -> Vector3<f64> {
    let mut u = Vector3::new(v1.y - v1.z + 0.1, v1.z - v1.x + 0.1, v1.x - v1.y + 0.1);
    u -= v1 * u.dot(v1);
    let norm = u.norm();
    if norm < 1e-6 {
        // The derived vector collapsed onto v1 (happens when v1 has equal
        // components); fall back to an explicit perpendicular.
        let axis = if v1.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
        return v1.cross(&axis).normalize();
    }
    u / norm
}

/// Linearity of a neighborhood covariance: `(λ1 - λ2) / λ1`.
///
/// 1.0 means the neighborhood lies on a line, 0.0 means the two dominant
/// directions are equally strong. Returns 0.0 when the covariance has no
/// positive spread at all.
#[must_use]
pub fn linearity_score(covariance: &Matrix3<f64>) -> f64 {
    let (l1, l2) = top_two_eigenvalues(covariance);
    if l1 <= 0.0 {
        return 0.0;
    }
    ((l1 - l2) / l1).clamp(0.0, 1.0)
}

/// One power iteration run; returns the dominant eigenpair or `None` when
/// the iterate collapses or fails to converge in [`MAX_ITERATIONS`] steps.
fn power_iterate(matrix: &Matrix3<f64>, start: Vector3<f64>) -> Option<(f64, Vector3<f64>)> {
    let mut v = start;
    let mut eigenvalue = 0.0_f64;

    for _ in 0..MAX_ITERATIONS {
        let next = matrix * v;
        let norm = next.norm();
        if norm < f64::MIN_POSITIVE {
            // Matrix annihilated the iterate; eigenvalue is zero
            return Some((0.0, v));
        }
        v = next / norm;
        let rayleigh = v.dot(&(matrix * v));
        if (rayleigh - eigenvalue).abs() <= TOLERANCE * rayleigh.abs().max(1.0) {
            return Some((rayleigh, v));
        }
        eigenvalue = rayleigh;
    }

    None
}

/// Full symmetric decomposition; used when power iteration is unreliable.
fn symmetric_fallback(matrix: &Matrix3<f64>) -> (f64, f64) {
    let eigen = SymmetricEigen::new(*matrix);
    let mut values = [
        eigen.eigenvalues[0],
        eigen.eigenvalues[1],
        eigen.eigenvalues[2],
    ];
    values.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    (values[0], values[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn diagonal_matrix() {
        let m = Matrix3::from_diagonal(&Vector3::new(5.0, 3.0, 1.0));
        let (l1, l2) = top_two_eigenvalues(&m);
        assert_relative_eq!(l1, 5.0, epsilon = 1e-8);
        assert_relative_eq!(l2, 3.0, epsilon = 1e-8);
    }

    #[test]
    fn repeated_eigenvalue() {
        let m = Matrix3::from_diagonal(&Vector3::new(2.0, 2.0, 1.0));
        let (l1, l2) = top_two_eigenvalues(&m);
        assert_relative_eq!(l1, 2.0, epsilon = 1e-6);
        assert_relative_eq!(l2, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn rotated_rank_one() {
        // Covariance of points along the (1,1,1) direction
        let d = Vector3::new(1.0, 1.0, 1.0).normalize();
        let m = 4.0 * d * d.transpose();
        let (l1, l2) = top_two_eigenvalues(&m);
        assert_relative_eq!(l1, 4.0, epsilon = 1e-8);
        assert!(l2.abs() < 1e-8);
    }

    #[test]
    fn repeated_dominant_pair_with_symmetric_axis() {
        // Dominant eigenvector (1,1,1)/sqrt(3) collapses the derived
        // second start onto itself; the perpendicular fallback must kick
        // in to find the repeated eigenvalue 1.
        let d = Vector3::new(1.0, 1.0, 1.0).normalize();
        let m = 4.0 * d * d.transpose() + (Matrix3::identity() - d * d.transpose());
        let (l1, l2) = top_two_eigenvalues(&m);
        assert_relative_eq!(l1, 4.0, epsilon = 1e-6);
        assert_relative_eq!(l2, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_matrix() {
        let (l1, l2) = top_two_eigenvalues(&Matrix3::zeros());
        assert!(l1.abs() < 1e-12);
        assert!(l2.abs() < 1e-12);
    }

    #[test]
    fn linearity_of_line_is_one() {
        let d = Vector3::x();
        let m = 2.5 * d * d.transpose();
        assert_relative_eq!(linearity_score(&m), 1.0, epsilon = 1e-8);
    }

    #[test]
    fn linearity_of_plane_is_zero() {
        let m = Matrix3::from_diagonal(&Vector3::new(3.0, 3.0, 0.1));
        assert!(linearity_score(&m) < 0.01);
    }

    #[test]
    fn linearity_of_degenerate_is_zero() {
        assert_relative_eq!(linearity_score(&Matrix3::zeros()), 0.0);
    }

    #[test]
    fn eigenvalues_ordered() {
        let m = Matrix3::new(2.0, 1.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 0.5);
        let (l1, l2) = top_two_eigenvalues(&m);
        // Eigenvalues of the 2x2 block are 3 and 1
        assert!(l1 >= l2);
        assert_relative_eq!(l1, 3.0, epsilon = 1e-8);
        assert_relative_eq!(l2, 1.0, epsilon = 1e-8);
    }
}
