//! Error types for wire detection.

use thiserror::Error;

/// Errors that can occur during wire detection.
#[derive(Debug, Error)]
pub enum WireError {
    /// The adjacency graph does not cover the same vertices as the mesh.
    #[error("adjacency graph covers {adjacency} vertices but mesh has {vertices}")]
    AdjacencyMismatch {
        /// Vertex count of the mesh.
        vertices: usize,
        /// Vertex count of the adjacency graph.
        adjacency: usize,
    },

    /// A parameter value is outside its valid range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type for wire detection operations.
pub type WireResult<T> = Result<T, WireError>;
