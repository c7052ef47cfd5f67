//! Parameters controlling wire detection.

/// Parameters for thin-structure detection.
#[derive(Debug, Clone)]
pub struct WireParams {
    /// Number of neighbors gathered around each vertex for the linearity
    /// analysis. Default: 70.
    pub neighborhood_size: usize,

    /// Linearity score above which a vertex is initially marked as wire.
    /// The score is `(λ1 - λ2) / λ1` of the neighborhood covariance, so
    /// 1.0 is a perfect line and 0.0 an isotropic blob. Default: 0.9.
    pub linearity_threshold: f64,

    /// Wire components smaller than this are reverted to structural,
    /// unless the component is an entire island with no structural
    /// boundary. Default: 10.
    pub min_group_size: usize,

    /// Score above which a structural vertex adjacent to a surviving wire
    /// run is promoted during the regrowth pass. Default: 0.1.
    pub regrowth_threshold: f64,

    /// Source sampling stride. 1 scores every vertex from its own
    /// neighborhood; larger values analyse only every Nth vertex and
    /// classify the rest from distance-weighted votes. Default: 1.
    pub sample_stride: usize,
}

impl Default for WireParams {
    fn default() -> Self {
        Self {
            neighborhood_size: 70,
            linearity_threshold: 0.9,
            min_group_size: 10,
            regrowth_threshold: 0.1,
            sample_stride: 1,
        }
    }
}

impl WireParams {
    /// Creates new parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the neighborhood size.
    #[must_use]
    pub const fn with_neighborhood_size(mut self, k: usize) -> Self {
        self.neighborhood_size = k;
        self
    }

    /// Sets the linearity threshold.
    #[must_use]
    pub const fn with_linearity_threshold(mut self, threshold: f64) -> Self {
        self.linearity_threshold = threshold;
        self
    }

    /// Sets the minimum surviving wire component size.
    #[must_use]
    pub const fn with_min_group_size(mut self, size: usize) -> Self {
        self.min_group_size = size;
        self
    }

    /// Sets the regrowth threshold.
    #[must_use]
    pub const fn with_regrowth_threshold(mut self, threshold: f64) -> Self {
        self.regrowth_threshold = threshold;
        self
    }

    /// Sets the source sampling stride.
    #[must_use]
    pub const fn with_sample_stride(mut self, stride: usize) -> Self {
        self.sample_stride = stride;
        self
    }

    /// Creates aggressive parameters that flag more vertices as wire.
    #[must_use]
    pub const fn aggressive() -> Self {
        Self {
            neighborhood_size: 70,
            linearity_threshold: 0.8,
            min_group_size: 5,
            regrowth_threshold: 0.05,
            sample_stride: 1,
        }
    }

    /// Creates conservative parameters that only flag unambiguous wires.
    #[must_use]
    pub const fn conservative() -> Self {
        Self {
            neighborhood_size: 70,
            linearity_threshold: 0.95,
            min_group_size: 20,
            regrowth_threshold: 0.3,
            sample_stride: 1,
        }
    }
}
