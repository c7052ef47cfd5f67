//! Pipeline configuration.

use pose_mass::MassParams;
use pose_wire::WireParams;

/// How wire-detection neighborhoods are gathered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Shortest-path distance along mesh edges. Cannot jump across gaps
    /// between a wire and a nearby surface, so this is the default.
    #[default]
    GraphDistance,
    /// Straight-line distance through a KD-tree. Cheaper on dense scans.
    SpatialIndex,
}

/// Parameters for pose standardization.
#[derive(Debug, Clone, Default)]
pub struct StandardizeParams {
    /// Wire detection parameters.
    pub wire: WireParams,

    /// Mass estimation parameters.
    pub mass: MassParams,

    /// Neighborhood gathering strategy for wire detection.
    pub search_strategy: SearchStrategy,

    /// When set, the translation recenters the estimated center of
    /// gravity instead of the footprint box center. Default: false.
    pub recenter_mass: bool,
}

impl StandardizeParams {
    /// Creates new parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wire detection parameters.
    #[must_use]
    pub fn with_wire(mut self, wire: WireParams) -> Self {
        self.wire = wire;
        self
    }

    /// Sets the mass estimation parameters.
    #[must_use]
    pub fn with_mass(mut self, mass: MassParams) -> Self {
        self.mass = mass;
        self
    }

    /// Sets the neighborhood search strategy.
    #[must_use]
    pub const fn with_search_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.search_strategy = strategy;
        self
    }

    /// Sets whether the translation recenters the center of gravity.
    #[must_use]
    pub const fn with_recenter_mass(mut self, recenter: bool) -> Self {
        self.recenter_mass = recenter;
        self
    }
}
