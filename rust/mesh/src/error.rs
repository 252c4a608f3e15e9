// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for mesh operations.

use crate::keys::{EdgeKey, FaceKey, VertexKey};

/// Result type alias for mesh operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during mesh operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Vertex key not found in the mesh.
    #[error("vertex not found: {0:?}")]
    VertexNotFound(VertexKey),

    /// Edge key not found in the mesh.
    #[error("edge not found: {0:?}")]
    EdgeNotFound(EdgeKey),

    /// Face key not found in the mesh.
    #[error("face not found: {0:?}")]
    FaceNotFound(FaceKey),

    /// Both endpoints of an edge are the same vertex.
    #[error("edge endpoints are the same vertex: {0:?}")]
    DegenerateEdge(VertexKey),

    /// An edge between the two vertices already exists.
    #[error("edge already exists: {0:?}")]
    EdgeExists(EdgeKey),

    /// A face needs at least 3 distinct vertices and a non-zero area.
    #[error("degenerate face: {0}")]
    DegenerateFace(&'static str),

    /// A face over the same vertex set already exists.
    #[error("face already exists: {0:?}")]
    FaceExists(FaceKey),

    /// A host command was submitted while another one is still pending.
    #[error("host command {0} is still pending")]
    CommandPending(u64),

    /// The awaited ticket was never issued or has already been collected.
    #[error("unknown command ticket {0}")]
    UnknownTicket(u64),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
