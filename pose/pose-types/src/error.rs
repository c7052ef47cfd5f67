//! Error types for the core value types.

use thiserror::Error;

/// Errors raised while building derived structures from caller buffers.
#[derive(Debug, Error)]
pub enum TypesError {
    /// An edge or face references a vertex id past the end of the vertex
    /// buffer. This is a caller contract violation; indices are never
    /// silently clamped.
    #[error("vertex index {index} out of bounds (vertex count {count})")]
    IndexOutOfBounds {
        /// The offending vertex id.
        index: u32,
        /// Number of vertices in the buffer.
        count: usize,
    },
}

/// Result type for core type construction.
pub type TypesResult<T> = std::result::Result<T, TypesError>;
