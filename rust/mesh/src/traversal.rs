// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Traversal methods for navigating mesh connectivity.
//!
//! Supports both downward traversal (face → edges → vertices) and upward
//! traversal (vertex → edges → faces) via the adjacency index. Queries that
//! return several keys return them in key order so that callers iterating
//! them get the same result on every run.

use rustc_hash::FxHashSet;

use crate::arena::EditMesh;
use crate::keys::*;

// =============================================================================
// Downward traversal
// =============================================================================

impl EditMesh {
    /// Returns the start and end vertex keys of an edge.
    pub fn edge_vertices(&self, key: EdgeKey) -> Option<(VertexKey, VertexKey)> {
        self.edges.get(key).map(|e| (e.start, e.end))
    }

    /// Returns the endpoint of `edge` opposite to `vertex`.
    pub fn edge_other_vertex(&self, edge: EdgeKey, vertex: VertexKey) -> Option<VertexKey> {
        self.edges.get(edge)?.other(vertex)
    }

    /// Returns the vertex loop of a face (empty if the face does not exist).
    pub fn face_vertices(&self, key: FaceKey) -> &[VertexKey] {
        self.faces
            .get(key)
            .map(|f| f.vertices.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the edge loop of a face (empty if the face does not exist).
    pub fn face_edges(&self, key: FaceKey) -> &[EdgeKey] {
        self.faces
            .get(key)
            .map(|f| f.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if `edge` is one of the face's edges.
    pub fn face_has_edge(&self, face: FaceKey, edge: EdgeKey) -> bool {
        self.face_edges(face).contains(&edge)
    }

    /// Returns `true` if the two edges have an endpoint in common.
    pub fn edges_share_vertex(&self, a: EdgeKey, b: EdgeKey) -> bool {
        match (self.edges.get(a), self.edges.get(b)) {
            (Some(a), Some(b)) => b.has_vertex(a.start) || b.has_vertex(a.end),
            _ => false,
        }
    }

    /// For a quad, returns the edge opposite to `edge`: the one sharing no
    /// vertex with it. Returns `None` for non-quads or when `edge` is not part
    /// of the face.
    pub fn opposite_edge(&self, face: FaceKey, edge: EdgeKey) -> Option<EdgeKey> {
        let data = self.faces.get(face)?;
        if !data.is_quad() || !data.edges.contains(&edge) {
            return None;
        }
        data.edges
            .iter()
            .copied()
            .find(|&e| e != edge && !self.edges_share_vertex(e, edge))
    }
}

// =============================================================================
// Upward traversal
// =============================================================================

impl EditMesh {
    /// Returns the faces that use an edge, in key order.
    pub fn edge_faces(&self, key: EdgeKey) -> Vec<FaceKey> {
        let mut faces: Vec<FaceKey> = self
            .edge_to_faces
            .get(&key)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default();
        faces.sort();
        faces
    }

    /// Returns the number of faces that use an edge.
    pub fn edge_face_count(&self, key: EdgeKey) -> usize {
        self.edge_to_faces.get(&key).map_or(0, |s| s.len())
    }

    /// Returns the edges that use a vertex, in key order.
    pub fn vertex_edges(&self, key: VertexKey) -> Vec<EdgeKey> {
        let mut edges: Vec<EdgeKey> = self
            .vertex_to_edges
            .get(&key)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default();
        edges.sort();
        edges
    }

    /// Returns the faces that use a vertex, in key order.
    pub fn vertex_faces(&self, key: VertexKey) -> Vec<FaceKey> {
        let mut set = FxHashSet::default();
        if let Some(edges) = self.vertex_to_edges.get(&key) {
            for e in edges {
                if let Some(faces) = self.edge_to_faces.get(e) {
                    set.extend(faces.iter().copied());
                }
            }
        }
        let mut faces: Vec<FaceKey> = set.into_iter().collect();
        faces.sort();
        faces
    }

    /// Returns the vertices connected to `key` by an edge, in edge-key order.
    pub fn vertex_neighbors(&self, key: VertexKey) -> Vec<VertexKey> {
        self.vertex_edges(key)
            .into_iter()
            .filter_map(|e| self.edge_other_vertex(e, key))
            .collect()
    }

    /// Returns the edge joining two vertices, if any.
    pub fn find_edge(&self, a: VertexKey, b: VertexKey) -> Option<EdgeKey> {
        let edges = self.vertex_to_edges.get(&a)?;
        let mut found: Vec<EdgeKey> = edges
            .iter()
            .copied()
            .filter(|&e| self.edges.get(e).and_then(|d| d.other(a)) == Some(b))
            .collect();
        found.sort();
        found.first().copied()
    }

    /// Returns an existing face spanning exactly the given vertex set.
    pub fn find_face(&self, vertices: &[VertexKey]) -> Option<FaceKey> {
        let first = *vertices.first()?;
        self.vertex_faces(first).into_iter().find(|&f| {
            let loop_ = &self.faces[f].vertices;
            loop_.len() == vertices.len() && vertices.iter().all(|v| loop_.contains(v))
        })
    }

    /// Returns the face on the other side of `edge` as seen from `face`.
    ///
    /// Only the first other face is returned; callers walking non-manifold
    /// edges get a deterministic but arbitrary neighbour.
    pub fn face_across(&self, face: FaceKey, edge: EdgeKey) -> Option<FaceKey> {
        self.edge_faces(edge).into_iter().find(|&f| f != face)
    }

    /// Returns an edge shared by two faces.
    pub fn shared_edge(&self, a: FaceKey, b: FaceKey) -> Option<EdgeKey> {
        let other = self.face_edges(b);
        self.face_edges(a).iter().copied().find(|e| other.contains(e))
    }
}
