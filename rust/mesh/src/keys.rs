// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element key types for arena-based mesh storage.
//!
//! Every vertex, edge and face gets a unique, type-safe key for O(1) lookup in
//! the [`EditMesh`](crate::EditMesh). Keys are created by `slotmap::SlotMap`
//! and are generational: a key held across a destructive edit (a loop cut
//! replacing the faces it crosses) reports as missing instead of silently
//! aliasing a newer element.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a vertex (point in 3D space).
    pub struct VertexKey;

    /// Key for an edge (segment between two vertices).
    pub struct EdgeKey;

    /// Key for a face (closed loop of three or more vertices).
    pub struct FaceKey;
}

/// A key that can reference any mesh element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKey {
    Vertex(VertexKey),
    Edge(EdgeKey),
    Face(FaceKey),
}

impl From<VertexKey> for ElementKey {
    fn from(k: VertexKey) -> Self {
        ElementKey::Vertex(k)
    }
}

impl From<EdgeKey> for ElementKey {
    fn from(k: EdgeKey) -> Self {
        ElementKey::Edge(k)
    }
}

impl From<FaceKey> for ElementKey {
    fn from(k: FaceKey) -> Self {
        ElementKey::Face(k)
    }
}
