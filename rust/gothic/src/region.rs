// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The tracked window region.
//!
//! A [`Region`] starts as the user's face selection and grows every time a
//! loop cut subdivides it. It owns the face list, the set of edges touching
//! those faces, and the boundary subset: edges whose linked-face count inside
//! the region is not 2.

use gothic_mesh::{EdgeKey, EditMesh, FaceKey};
use rustc_hash::FxHashSet;

/// How a newly created edge relates to the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRole {
    /// Touches no region face.
    Outside,
    /// On the region frontier.
    Boundary,
    /// Shared by exactly two region faces and nothing else.
    Interior,
}

#[derive(Debug, Clone, Default)]
pub struct Region {
    faces: Vec<FaceKey>,
    members: FxHashSet<FaceKey>,
    edges: FxHashSet<EdgeKey>,
    boundary: FxHashSet<EdgeKey>,
}

impl Region {
    /// Builds a region from a face patch and classifies its edges.
    pub fn from_faces(mesh: &EditMesh, faces: &[FaceKey]) -> Self {
        let mut region = Self::default();
        for &face in faces {
            if mesh.face(face).is_some() && region.members.insert(face) {
                region.faces.push(face);
            }
        }
        let edges: Vec<EdgeKey> = region
            .faces
            .iter()
            .flat_map(|&f| mesh.face_edges(f).iter().copied())
            .collect();
        for edge in edges {
            if region.edges.insert(edge) && region.linked_count(mesh, edge) != 2 {
                region.boundary.insert(edge);
            }
        }
        region
    }

    /// Region faces in the order they joined.
    pub fn faces(&self) -> &[FaceKey] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn contains_face(&self, face: FaceKey) -> bool {
        self.members.contains(&face)
    }

    #[inline]
    pub fn is_boundary(&self, edge: EdgeKey) -> bool {
        self.boundary.contains(&edge)
    }

    pub fn edges(&self) -> &FxHashSet<EdgeKey> {
        &self.edges
    }

    pub fn boundary(&self) -> &FxHashSet<EdgeKey> {
        &self.boundary
    }

    /// Number of faces linked to `edge` that belong to the region.
    pub fn linked_count(&self, mesh: &EditMesh, edge: EdgeKey) -> usize {
        mesh.edge_faces(edge)
            .iter()
            .filter(|f| self.members.contains(f))
            .count()
    }

    /// First region face that has both edges in its loop.
    pub fn face_with_edges(&self, mesh: &EditMesh, first: EdgeKey, second: EdgeKey) -> Option<FaceKey> {
        self.faces
            .iter()
            .copied()
            .find(|&f| mesh.face_has_edge(f, first) && mesh.face_has_edge(f, second))
    }

    /// Adds a face to the region. Its edges are classified separately.
    pub fn add_face(&mut self, face: FaceKey) -> bool {
        if self.members.insert(face) {
            self.faces.push(face);
            true
        } else {
            false
        }
    }

    /// Decides the role of an edge against the current face set.
    pub fn classify_new_edge(&self, mesh: &EditMesh, edge: EdgeKey) -> EdgeRole {
        let linked = mesh.edge_faces(edge);
        let inside = linked.iter().filter(|f| self.members.contains(f)).count();
        if inside == 0 {
            EdgeRole::Outside
        } else if inside != 2 || inside != linked.len() {
            EdgeRole::Boundary
        } else {
            EdgeRole::Interior
        }
    }

    /// Classifies `edge` and records it in the edge and boundary sets.
    pub fn absorb_edge(&mut self, mesh: &EditMesh, edge: EdgeKey) -> EdgeRole {
        let role = self.classify_new_edge(mesh, edge);
        match role {
            EdgeRole::Outside => {}
            EdgeRole::Boundary => {
                self.edges.insert(edge);
                self.boundary.insert(edge);
            }
            EdgeRole::Interior => {
                self.edges.insert(edge);
            }
        }
        role
    }

    /// Drops keys the mesh no longer has (faces replaced and edges split by a cut).
    pub fn prune(&mut self, mesh: &EditMesh) {
        self.faces.retain(|&f| mesh.contains(f.into()));
        self.members.retain(|&f| mesh.contains(f.into()));
        self.edges.retain(|&e| mesh.contains(e.into()));
        self.boundary.retain(|&e| mesh.contains(e.into()));
    }
}
