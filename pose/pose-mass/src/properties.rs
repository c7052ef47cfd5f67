//! Estimated mass properties.

use nalgebra::{Point2, Point3};

/// Result of slice-based mass estimation.
#[derive(Debug, Clone)]
pub struct MassProperties {
    /// Area-weighted center of gravity.
    ///
    /// The zero point for meshes with no measurable cross-section.
    pub center_of_gravity: Point3<f64>,

    /// Cross-section area of each slice, bottom to top.
    pub slice_areas: Vec<f64>,

    /// Area-weighted centroid of each slice in the XY plane.
    pub slice_centroids: Vec<Point2<f64>>,

    /// Number of slices evaluated.
    pub slice_count: usize,

    /// True when the mesh needed more slices than the 255-slice cap and
    /// only its lower portion was evaluated.
    pub truncated: bool,

    /// Sum of all slice areas.
    pub total_area: f64,
}

impl MassProperties {
    /// A zero result for degenerate inputs.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            center_of_gravity: Point3::origin(),
            slice_areas: Vec::new(),
            slice_centroids: Vec::new(),
            slice_count: 0,
            truncated: false,
            total_area: 0.0,
        }
    }

    /// True when no slice produced a measurable cross-section.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.total_area <= 0.0
    }
}

impl std::fmt::Display for MassProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Mass estimate: COG ({:.4}, {:.4}, {:.4}) over {} slices, total area {:.4}{}",
            self.center_of_gravity.x,
            self.center_of_gravity.y,
            self.center_of_gravity.z,
            self.slice_count,
            self.total_area,
            if self.truncated { " (truncated)" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_degenerate() {
        let props = MassProperties::zero();
        assert!(props.is_degenerate());
        assert_eq!(props.slice_count, 0);
        assert!(!props.truncated);
    }

    #[test]
    fn display_marks_truncation() {
        let mut props = MassProperties::zero();
        props.truncated = true;
        let text = format!("{props}");
        assert!(text.contains("truncated"));
    }
}
