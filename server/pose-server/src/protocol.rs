//! JSON-lines request and response types.

use serde::{Deserialize, Serialize};

/// Sentinel line that shuts the server down cleanly.
pub const QUIT_SENTINEL: &str = "__quit__";

/// One request line.
#[derive(Debug, Deserialize)]
pub struct Request {
    /// Caller-chosen id, echoed back in the response.
    pub id: u64,

    /// Operation name; only "prepare" is understood.
    pub op: String,

    /// Name of the shared-memory region holding vertex positions.
    pub shm_verts: String,

    /// Name of the shared-memory region holding edge index pairs.
    pub shm_edges: String,

    /// Per-object vertex counts. Required; an empty batch sends `[]`.
    pub vert_counts: Vec<u32>,

    /// Per-object edge counts. Required; an empty batch sends `[]`.
    pub edge_counts: Vec<u32>,
}

/// One response line.
#[derive(Debug, Serialize)]
pub struct Response {
    /// Echo of the request id.
    pub id: u64,

    /// Whether the request succeeded.
    pub ok: bool,

    /// Per-object rotations as `[w, x, y, z]` quaternions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rots: Option<Vec<[f64; 4]>>,

    /// Per-object translations as `[x, y, z]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans: Option<Vec<[f64; 3]>>,

    /// Error message, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// A successful response carrying the computed transforms.
    #[must_use]
    pub fn success(id: u64, rots: Vec<[f64; 4]>, trans: Vec<[f64; 3]>) -> Self {
        Self {
            id,
            ok: true,
            rots: Some(rots),
            trans: Some(trans),
            error: None,
        }
    }

    /// A failed response carrying an error message.
    #[must_use]
    pub fn failure(id: u64, error: impl Into<String>) -> Self {
        Self {
            id,
            ok: false,
            rots: None,
            trans: None,
            error: Some(error.into()),
        }
    }
}
