// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for an editable polygon mesh.
//!
//! The [`EditMesh`] is the central owner of all mesh data. Every element
//! (vertex, edge, face) lives inside a slot map with stable, generational keys.
//! Upward adjacency indices (vertex → edges, edge → faces) make "linked
//! faces/edges" queries O(1), which the operators rely on because they
//! re-derive boundary and ordering state from the current mesh after every
//! edit instead of working from a snapshot.
//!
//! ## Face layout
//!
//! A face stores its vertex loop and a parallel edge loop: `edges[i]` joins
//! `vertices[i]` and `vertices[(i + 1) % n]`. Reversing a face therefore
//! reverses both loops (see [`EditMesh::flip_face`]).

use nalgebra::Point3;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use crate::commands::PendingCommand;
use crate::keys::*;

/// Data stored for a vertex: a point in 3D space.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub position: Point3<f64>,
}

/// Data stored for an edge: a segment between two vertices.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub start: VertexKey,
    pub end: VertexKey,
}

impl EdgeData {
    /// Returns `true` if the edge uses the given vertex.
    #[inline]
    pub fn has_vertex(&self, v: VertexKey) -> bool {
        self.start == v || self.end == v
    }

    /// Returns the endpoint that is not `v`, or `None` if `v` is not an endpoint.
    #[inline]
    pub fn other(&self, v: VertexKey) -> Option<VertexKey> {
        if self.start == v {
            Some(self.end)
        } else if self.end == v {
            Some(self.start)
        } else {
            None
        }
    }
}

/// Data stored for a face: a closed vertex loop with its edge loop.
#[derive(Debug, Clone)]
pub struct FaceData {
    pub vertices: Vec<VertexKey>,
    pub edges: Vec<EdgeKey>,
}

impl FaceData {
    /// Number of corners (and edges) of the face.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` for a face with no corners (never stored in a mesh).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` if the face has exactly four corners.
    #[inline]
    pub fn is_quad(&self) -> bool {
        self.vertices.len() == 4
    }
}

/// The central arena that owns all mesh elements, their adjacency indices and
/// the selection state of an edit session.
///
/// # Example
///
/// ```
/// use gothic_mesh::EditMesh;
///
/// let mut mesh = EditMesh::new();
/// let v0 = mesh.add_vertex(0.0, 0.0, 0.0);
/// let v1 = mesh.add_vertex(1.0, 0.0, 0.0);
/// let v2 = mesh.add_vertex(1.0, 1.0, 0.0);
/// mesh.add_face(&[v0, v1, v2]).unwrap();
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.edge_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EditMesh {
    // Element storage
    pub(crate) vertices: SlotMap<VertexKey, VertexData>,
    pub(crate) edges: SlotMap<EdgeKey, EdgeData>,
    pub(crate) faces: SlotMap<FaceKey, FaceData>,

    // Upward adjacency: child → parents
    pub(crate) vertex_to_edges: FxHashMap<VertexKey, FxHashSet<EdgeKey>>,
    pub(crate) edge_to_faces: FxHashMap<EdgeKey, FxHashSet<FaceKey>>,

    // Selection state
    pub(crate) selected_vertices: FxHashSet<VertexKey>,
    pub(crate) selected_edges: FxHashSet<EdgeKey>,
    pub(crate) selected_faces: FxHashSet<FaceKey>,

    // Host command barrier
    pub(crate) pending: Option<PendingCommand>,
    pub(crate) next_ticket: u64,
    pub(crate) revision: u64,
}

impl EditMesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            faces: SlotMap::with_key(),

            vertex_to_edges: FxHashMap::default(),
            edge_to_faces: FxHashMap::default(),

            selected_vertices: FxHashSet::default(),
            selected_edges: FxHashSet::default(),
            selected_faces: FxHashSet::default(),

            pending: None,
            next_ticket: 1,
            revision: 0,
        }
    }

    // --- Vertex operations ---

    /// Adds a vertex at the given 3D coordinates.
    pub fn add_vertex(&mut self, x: f64, y: f64, z: f64) -> VertexKey {
        self.add_vertex_at(Point3::new(x, y, z))
    }

    /// Adds a vertex at the given point.
    pub fn add_vertex_at(&mut self, position: Point3<f64>) -> VertexKey {
        self.vertices.insert(VertexData { position })
    }

    /// Returns the vertex data for the given key, or `None` if not found.
    pub fn vertex(&self, key: VertexKey) -> Option<&VertexData> {
        self.vertices.get(key)
    }

    /// Returns the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Iterates over all vertex keys in storage order.
    pub fn vertex_keys(&self) -> impl Iterator<Item = VertexKey> + '_ {
        self.vertices.keys()
    }

    // --- Edge operations ---

    /// Returns the edge data for the given key, or `None` if not found.
    pub fn edge(&self, key: EdgeKey) -> Option<&EdgeData> {
        self.edges.get(key)
    }

    /// Returns the number of edges in the mesh.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over all edge keys in storage order.
    pub fn edge_keys(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges.keys()
    }

    // --- Face operations ---

    /// Returns the face data for the given key, or `None` if not found.
    pub fn face(&self, key: FaceKey) -> Option<&FaceData> {
        self.faces.get(key)
    }

    /// Returns the number of faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Iterates over all face keys in storage order.
    pub fn face_keys(&self) -> impl Iterator<Item = FaceKey> + '_ {
        self.faces.keys()
    }

    // --- Element existence checks ---

    /// Returns `true` if the given key references a live element.
    pub fn contains(&self, key: ElementKey) -> bool {
        match key {
            ElementKey::Vertex(k) => self.vertices.contains_key(k),
            ElementKey::Edge(k) => self.edges.contains_key(k),
            ElementKey::Face(k) => self.faces.contains_key(k),
        }
    }

    /// Monotonic counter bumped every time a host command completes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // --- Adjacency index helpers ---

    /// Register that an edge uses a vertex (upward adjacency).
    pub(crate) fn link_vertex_edge(&mut self, vertex: VertexKey, edge: EdgeKey) {
        self.vertex_to_edges
            .entry(vertex)
            .or_default()
            .insert(edge);
    }

    /// Register that a face uses an edge (upward adjacency).
    pub(crate) fn link_edge_face(&mut self, edge: EdgeKey, face: FaceKey) {
        self.edge_to_faces.entry(edge).or_default().insert(face);
    }

    pub(crate) fn unlink_vertex_edge(&mut self, vertex: VertexKey, edge: EdgeKey) {
        if let Some(set) = self.vertex_to_edges.get_mut(&vertex) {
            set.remove(&edge);
            if set.is_empty() {
                self.vertex_to_edges.remove(&vertex);
            }
        }
    }

    pub(crate) fn unlink_edge_face(&mut self, edge: EdgeKey, face: FaceKey) {
        if let Some(set) = self.edge_to_faces.get_mut(&edge) {
            set.remove(&face);
            if set.is_empty() {
                self.edge_to_faces.remove(&edge);
            }
        }
    }
}

impl Default for EditMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mesh_is_empty() {
        let mesh = EditMesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.edge_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.revision(), 0);
    }

    #[test]
    fn add_and_retrieve_vertex() {
        let mut mesh = EditMesh::new();
        let key = mesh.add_vertex(1.0, 2.0, 3.0);

        let v = mesh.vertex(key).unwrap();
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertex_count(), 1);
    }

    #[test]
    fn contains_check() {
        let mut mesh = EditMesh::new();
        let vk = mesh.add_vertex(0.0, 0.0, 0.0);
        assert!(mesh.contains(ElementKey::Vertex(vk)));

        mesh.vertices.remove(vk);
        assert!(!mesh.contains(vk.into()));
    }

    #[test]
    fn edge_data_other_endpoint() {
        let mut mesh = EditMesh::new();
        let a = mesh.add_vertex(0.0, 0.0, 0.0);
        let b = mesh.add_vertex(1.0, 0.0, 0.0);
        let c = mesh.add_vertex(2.0, 0.0, 0.0);
        let data = EdgeData { start: a, end: b };

        assert_eq!(data.other(a), Some(b));
        assert_eq!(data.other(b), Some(a));
        assert_eq!(data.other(c), None);
        assert!(data.has_vertex(a));
        assert!(!data.has_vertex(c));
    }
}
