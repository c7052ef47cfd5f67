//! Parameters for slice-based mass estimation.

/// Parameters for mass property estimation.
#[derive(Debug, Clone)]
pub struct MassParams {
    /// Slab height for horizontal slicing, in mesh units. Default: 0.01.
    ///
    /// The slice count is capped at 255; meshes taller than
    /// `255 * slice_height` are evaluated over their lower portion only
    /// and flagged as truncated.
    pub slice_height: f64,
}

impl Default for MassParams {
    fn default() -> Self {
        Self { slice_height: 0.01 }
    }
}

impl MassParams {
    /// Creates new parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slice height.
    #[must_use]
    pub const fn with_slice_height(mut self, height: f64) -> Self {
        self.slice_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slice_height() {
        let params = MassParams::default();
        assert!((params.slice_height - 0.01).abs() < 1e-12);
    }

    #[test]
    fn builder() {
        let params = MassParams::new().with_slice_height(0.25);
        assert!((params.slice_height - 0.25).abs() < 1e-12);
    }
}
