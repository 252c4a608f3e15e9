// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edit-mode selection state.
//!
//! Selection flags are independent per element type. Selecting a face does
//! not implicitly select its edges or vertices; the operators read and write
//! exactly the element types they document. Ordered accessors return keys in
//! storage order so a selection iterates the same way on every run.

use crate::arena::EditMesh;
use crate::keys::*;

impl EditMesh {
    pub fn select_vertex(&mut self, key: VertexKey, selected: bool) {
        if !selected {
            self.selected_vertices.remove(&key);
        } else if self.vertices.contains_key(key) {
            self.selected_vertices.insert(key);
        }
    }

    pub fn select_edge(&mut self, key: EdgeKey, selected: bool) {
        if !selected {
            self.selected_edges.remove(&key);
        } else if self.edges.contains_key(key) {
            self.selected_edges.insert(key);
        }
    }

    pub fn select_face(&mut self, key: FaceKey, selected: bool) {
        if !selected {
            self.selected_faces.remove(&key);
        } else if self.faces.contains_key(key) {
            self.selected_faces.insert(key);
        }
    }

    /// Clears every selection flag.
    pub fn deselect_all(&mut self) {
        self.selected_vertices.clear();
        self.selected_edges.clear();
        self.selected_faces.clear();
    }

    /// Selected vertices in storage order.
    pub fn selected_vertices(&self) -> Vec<VertexKey> {
        self.vertices
            .keys()
            .filter(|k| self.selected_vertices.contains(k))
            .collect()
    }

    /// Selected edges in storage order.
    pub fn selected_edges(&self) -> Vec<EdgeKey> {
        self.edges
            .keys()
            .filter(|k| self.selected_edges.contains(k))
            .collect()
    }

    /// Selected faces in storage order.
    pub fn selected_faces(&self) -> Vec<FaceKey> {
        self.faces
            .keys()
            .filter(|k| self.selected_faces.contains(k))
            .collect()
    }
}
