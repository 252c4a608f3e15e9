// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the operators.
//!
//! Every variant except [`OperatorError::Mesh`] is a precondition failure:
//! it is detected before the operator touches the mesh.

use thiserror::Error;

/// Result type alias for operator code.
pub type Result<T> = std::result::Result<T, OperatorError>;

#[derive(Debug, Error)]
pub enum OperatorError {
    #[error("No active object")]
    NoActiveObject,

    #[error("Active object must be a mesh (found {0})")]
    NotAMesh(&'static str),

    #[error("Select exactly {expected} {what} (found {found})")]
    SelectionCount {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("No faces selected")]
    NoFacesSelected,

    #[error("No boundary edges found")]
    NoBoundaryEdges,

    #[error("No top edge found inside the selection")]
    NoTopEdge,

    #[error("No axis found: the boundary edges give no horizontal facing direction")]
    NoAxisFound,

    #[error("No faces share the apex")]
    NoApexFaces,

    #[error("No edges connected to the apex found")]
    NoApexEdges,

    #[error("{name} = {value} is outside [{min}, {max}]")]
    ParameterOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Mesh error: {0}")]
    Mesh(#[from] gothic_mesh::Error),
}
