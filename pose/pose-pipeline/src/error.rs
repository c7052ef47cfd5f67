//! Error types for the standardization pipeline.

use thiserror::Error;

use pose_types::TypesError;
use pose_wire::WireError;

/// Errors that can occur during pose standardization.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A flattened batch buffer does not match its per-object counts.
    #[error("{buffer} buffer holds {actual} entries but counts sum to {expected}")]
    CountMismatch {
        /// Which buffer is inconsistent ("vertex" or "edge").
        buffer: &'static str,
        /// Entries actually present in the buffer.
        actual: usize,
        /// Sum of the per-object counts.
        expected: usize,
    },

    /// The per-object count arrays disagree on the number of objects.
    #[error("{vert_objects} vertex counts but {edge_objects} edge counts")]
    ObjectCountMismatch {
        /// Number of entries in the vertex count array.
        vert_objects: usize,
        /// Number of entries in the edge count array.
        edge_objects: usize,
    },

    /// Mesh construction failed, typically an edge index out of range.
    #[error(transparent)]
    Types(#[from] TypesError),

    /// Wire detection failed.
    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
