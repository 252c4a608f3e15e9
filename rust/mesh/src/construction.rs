// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction and removal of mesh elements.
//!
//! Every element is created through the mesh, which ensures referential
//! integrity (all referenced sub-elements must exist) and maintains the
//! upward adjacency index. Creation reports failures through [`Result`] so
//! that callers decide per call site whether a rejected face is fatal or is
//! skipped as best-effort geometry.

use nalgebra::Point3;

use crate::arena::*;
use crate::error::{Error, Result};
use crate::keys::*;

/// Faces whose Newell normal is shorter than this are rejected as zero-area.
const MIN_FACE_NORMAL: f64 = 1e-12;

impl EditMesh {
    /// Creates an edge between two existing vertices.
    ///
    /// Returns an error if either vertex does not exist, if both endpoints are
    /// the same vertex, or if the two vertices are already connected.
    pub fn add_edge(&mut self, start: VertexKey, end: VertexKey) -> Result<EdgeKey> {
        self.check_vertex(start)?;
        self.check_vertex(end)?;
        if start == end {
            return Err(Error::DegenerateEdge(start));
        }
        if let Some(existing) = self.find_edge(start, end) {
            return Err(Error::EdgeExists(existing));
        }
        Ok(self.insert_edge(start, end))
    }

    /// Returns the edge between two vertices, creating it if needed.
    pub fn ensure_edge(&mut self, start: VertexKey, end: VertexKey) -> Result<EdgeKey> {
        match self.add_edge(start, end) {
            Err(Error::EdgeExists(existing)) => Ok(existing),
            other => other,
        }
    }

    /// Creates a face from an ordered loop of vertices.
    ///
    /// Missing edges along the loop are created. The face is rejected when it
    /// has fewer than 3 distinct vertices, when a face over the same vertex set
    /// already exists, or when the loop encloses no area (collinear corners).
    pub fn add_face(&mut self, vertices: &[VertexKey]) -> Result<FaceKey> {
        if vertices.len() < 3 {
            return Err(Error::DegenerateFace("fewer than 3 vertices"));
        }
        for &v in vertices {
            self.check_vertex(v)?;
        }
        for (i, v) in vertices.iter().enumerate() {
            if vertices[i + 1..].contains(v) {
                return Err(Error::DegenerateFace("repeated vertex"));
            }
        }
        if let Some(existing) = self.find_face(vertices) {
            return Err(Error::FaceExists(existing));
        }

        let points: Vec<Point3<f64>> = vertices
            .iter()
            .map(|&v| self.vertices[v].position)
            .collect();
        if crate::geometry::newell_normal(&points).norm() < MIN_FACE_NORMAL {
            return Err(Error::DegenerateFace("zero area"));
        }

        let mut edges = Vec::with_capacity(vertices.len());
        for i in 0..vertices.len() {
            let start = vertices[i];
            let end = vertices[(i + 1) % vertices.len()];
            edges.push(self.ensure_edge(start, end)?);
        }

        let key = self.faces.insert(FaceData {
            vertices: vertices.to_vec(),
            edges: edges.clone(),
        });
        for e in edges {
            self.link_edge_face(e, key);
        }
        Ok(key)
    }

    /// Removes a face. Its edges and vertices stay in the mesh.
    pub fn remove_face(&mut self, face: FaceKey) -> Result<()> {
        let data = self.faces.remove(face).ok_or(Error::FaceNotFound(face))?;
        for e in data.edges {
            self.unlink_edge_face(e, face);
        }
        self.selected_faces.remove(&face);
        Ok(())
    }

    /// Removes an edge together with every face that uses it.
    pub fn remove_edge(&mut self, edge: EdgeKey) -> Result<()> {
        let data = self.edges.get(edge).cloned().ok_or(Error::EdgeNotFound(edge))?;
        for f in self.edge_faces(edge) {
            self.remove_face(f)?;
        }
        self.unlink_vertex_edge(data.start, edge);
        self.unlink_vertex_edge(data.end, edge);
        self.edge_to_faces.remove(&edge);
        self.selected_edges.remove(&edge);
        self.edges.remove(edge);
        Ok(())
    }

    /// Removes a vertex together with every edge and face that uses it.
    pub fn remove_vertex(&mut self, vertex: VertexKey) -> Result<()> {
        self.check_vertex(vertex)?;
        for e in self.vertex_edges(vertex) {
            self.remove_edge(e)?;
        }
        self.vertex_to_edges.remove(&vertex);
        self.selected_vertices.remove(&vertex);
        self.vertices.remove(vertex);
        Ok(())
    }

    /// Splits an edge by inserting a vertex at parameter `t` measured from the
    /// edge's start vertex.
    ///
    /// The edge is replaced by `start → new` and `new → end`. Every face using
    /// the edge keeps its key and gains the new vertex in its loop. Returns the
    /// new vertex and the two replacement edges in that order.
    pub fn split_edge(&mut self, edge: EdgeKey, t: f64) -> Result<(VertexKey, EdgeKey, EdgeKey)> {
        let EdgeData { start, end } = self.edges.get(edge).cloned().ok_or(Error::EdgeNotFound(edge))?;
        let p0 = self.vertices[start].position;
        let p1 = self.vertices[end].position;
        let vertex = self.add_vertex_at(p0 + (p1 - p0) * t);

        let first = self.insert_edge(start, vertex);
        let second = self.insert_edge(vertex, end);

        for f in self.edge_faces(edge) {
            let face = &mut self.faces[f];
            let Some(i) = face.edges.iter().position(|&e| e == edge) else {
                continue;
            };
            if face.vertices[i] == start {
                face.edges[i] = first;
                face.edges.insert(i + 1, second);
            } else {
                face.edges[i] = second;
                face.edges.insert(i + 1, first);
            }
            face.vertices.insert(i + 1, vertex);
            self.link_edge_face(first, f);
            self.link_edge_face(second, f);
        }

        if self.selected_edges.remove(&edge) {
            self.selected_edges.insert(first);
            self.selected_edges.insert(second);
            self.selected_vertices.insert(vertex);
        }
        self.edge_to_faces.remove(&edge);
        self.unlink_vertex_edge(start, edge);
        self.unlink_vertex_edge(end, edge);
        self.edges.remove(edge);

        Ok((vertex, first, second))
    }

    /// Reverses the winding of a face (and therefore its normal).
    pub fn flip_face(&mut self, face: FaceKey) -> Result<()> {
        let data = self.faces.get_mut(face).ok_or(Error::FaceNotFound(face))?;
        let n = data.edges.len();
        let old = data.edges.clone();
        data.vertices.reverse();
        data.edges = (0..n).map(|i| old[(2 * n - 2 - i) % n]).collect();
        Ok(())
    }

    /// Inserts an edge without validation; callers guarantee both vertices
    /// exist and are distinct.
    pub(crate) fn insert_edge(&mut self, start: VertexKey, end: VertexKey) -> EdgeKey {
        let key = self.edges.insert(EdgeData { start, end });
        self.link_vertex_edge(start, key);
        self.link_vertex_edge(end, key);
        key
    }

    fn check_vertex(&self, vertex: VertexKey) -> Result<()> {
        if self.vertices.contains_key(vertex) {
            Ok(())
        } else {
            Err(Error::VertexNotFound(vertex))
        }
    }
}

/// Helper to build a quad face from four corner vertices.
///
/// Returns the face and its four edges in loop order (`v0→v1`, `v1→v2`,
/// `v2→v3`, `v3→v0`).
pub fn make_quad(
    mesh: &mut EditMesh,
    v0: VertexKey,
    v1: VertexKey,
    v2: VertexKey,
    v3: VertexKey,
) -> Result<(FaceKey, [EdgeKey; 4])> {
    let face = mesh.add_face(&[v0, v1, v2, v3])?;
    let e = &mesh.faces[face].edges;
    Ok((face, [e[0], e[1], e[2], e[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(mesh: &mut EditMesh) -> [VertexKey; 4] {
        [
            mesh.add_vertex(0.0, 0.0, 0.0),
            mesh.add_vertex(1.0, 0.0, 0.0),
            mesh.add_vertex(1.0, 1.0, 0.0),
            mesh.add_vertex(0.0, 1.0, 0.0),
        ]
    }

    // --- Edge tests ---

    #[test]
    fn add_edge_valid() {
        let mut mesh = EditMesh::new();
        let v0 = mesh.add_vertex(0.0, 0.0, 0.0);
        let v1 = mesh.add_vertex(1.0, 0.0, 0.0);
        let edge = mesh.add_edge(v0, v1).unwrap();

        let data = mesh.edge(edge).unwrap();
        assert_eq!(data.start, v0);
        assert_eq!(data.end, v1);
        assert_eq!(mesh.edge_count(), 1);
    }

    #[test]
    fn add_edge_invalid_vertex() {
        let mut mesh = EditMesh::new();
        let v0 = mesh.add_vertex(0.0, 0.0, 0.0);

        // A stale key: the generation counter makes it invalid after removal.
        let v_temp = mesh.add_vertex(99.0, 99.0, 99.0);
        mesh.remove_vertex(v_temp).unwrap();

        assert!(matches!(mesh.add_edge(v0, v_temp), Err(Error::VertexNotFound(_))));
    }

    #[test]
    fn add_edge_rejects_duplicates_and_loops() {
        let mut mesh = EditMesh::new();
        let v0 = mesh.add_vertex(0.0, 0.0, 0.0);
        let v1 = mesh.add_vertex(1.0, 0.0, 0.0);
        let e = mesh.add_edge(v0, v1).unwrap();

        assert!(matches!(mesh.add_edge(v1, v0), Err(Error::EdgeExists(k)) if k == e));
        assert!(matches!(mesh.add_edge(v0, v0), Err(Error::DegenerateEdge(_))));
        assert_eq!(mesh.ensure_edge(v1, v0).unwrap(), e);
    }

    #[test]
    fn add_edge_registers_upward_adjacency() {
        let mut mesh = EditMesh::new();
        let v0 = mesh.add_vertex(0.0, 0.0, 0.0);
        let v1 = mesh.add_vertex(1.0, 0.0, 0.0);
        let v2 = mesh.add_vertex(0.0, 1.0, 0.0);

        let e0 = mesh.add_edge(v0, v1).unwrap();
        let e1 = mesh.add_edge(v0, v2).unwrap();

        let v0_edges = &mesh.vertex_to_edges[&v0];
        assert!(v0_edges.contains(&e0));
        assert!(v0_edges.contains(&e1));
        assert_eq!(v0_edges.len(), 2);
    }

    // --- Face tests ---

    #[test]
    fn add_face_creates_edges() {
        let mut mesh = EditMesh::new();
        let v = unit_square(&mut mesh);
        let (face, edges) = make_quad(&mut mesh, v[0], v[1], v[2], v[3]).unwrap();

        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.edge_vertices(edges[1]), Some((v[1], v[2])));
        for e in edges {
            assert_eq!(mesh.edge_faces(e), vec![face]);
        }
    }

    #[test]
    fn adjacent_faces_share_edges() {
        let mut mesh = EditMesh::new();
        let v = unit_square(&mut mesh);
        let v4 = mesh.add_vertex(2.0, 0.0, 0.0);
        let v5 = mesh.add_vertex(2.0, 1.0, 0.0);
        mesh.add_face(&[v[0], v[1], v[2], v[3]]).unwrap();
        mesh.add_face(&[v[1], v4, v5, v[2]]).unwrap();

        assert_eq!(mesh.edge_count(), 7);
        let shared = mesh.find_edge(v[1], v[2]).unwrap();
        assert_eq!(mesh.edge_faces(shared).len(), 2);
    }

    #[test]
    fn add_face_rejections() {
        let mut mesh = EditMesh::new();
        let v = unit_square(&mut mesh);
        let face = mesh.add_face(&[v[0], v[1], v[2]]).unwrap();

        assert!(matches!(mesh.add_face(&[v[0], v[1]]), Err(Error::DegenerateFace(_))));
        assert!(matches!(
            mesh.add_face(&[v[0], v[1], v[0]]),
            Err(Error::DegenerateFace(_))
        ));
        assert!(matches!(
            mesh.add_face(&[v[2], v[0], v[1]]),
            Err(Error::FaceExists(k)) if k == face
        ));

        let a = mesh.add_vertex(0.0, 0.0, 5.0);
        let b = mesh.add_vertex(1.0, 0.0, 5.0);
        let c = mesh.add_vertex(2.0, 0.0, 5.0);
        assert!(matches!(mesh.add_face(&[a, b, c]), Err(Error::DegenerateFace("zero area"))));
        // Rejected faces leave no stray edges behind.
        assert!(mesh.find_edge(a, b).is_none());
    }

    // --- Removal tests ---

    #[test]
    fn remove_edge_removes_linked_faces() {
        let mut mesh = EditMesh::new();
        let v = unit_square(&mut mesh);
        let (_, edges) = make_quad(&mut mesh, v[0], v[1], v[2], v[3]).unwrap();

        mesh.remove_edge(edges[0]).unwrap();
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.edge_count(), 3);
        assert!(mesh.edge_faces(edges[1]).is_empty());
    }

    #[test]
    fn remove_vertex_cascades() {
        let mut mesh = EditMesh::new();
        let v = unit_square(&mut mesh);
        make_quad(&mut mesh, v[0], v[1], v[2], v[3]).unwrap();

        mesh.remove_vertex(v[0]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.edge_count(), 2);
        assert_eq!(mesh.face_count(), 0);
    }

    // --- Split tests ---

    #[test]
    fn split_edge_patches_faces_in_place() {
        let mut mesh = EditMesh::new();
        let v = unit_square(&mut mesh);
        let v4 = mesh.add_vertex(2.0, 0.0, 0.0);
        let v5 = mesh.add_vertex(2.0, 1.0, 0.0);
        let left = mesh.add_face(&[v[0], v[1], v[2], v[3]]).unwrap();
        let right = mesh.add_face(&[v[1], v4, v5, v[2]]).unwrap();
        let shared = mesh.find_edge(v[1], v[2]).unwrap();

        let (mid, a, b) = mesh.split_edge(shared, 0.25).unwrap();

        assert_eq!(mesh.vertex_point(mid), Some(Point3::new(1.0, 0.25, 0.0)));
        assert!(mesh.edge(shared).is_none());
        assert_eq!(mesh.face_vertices(left).len(), 5);
        assert_eq!(mesh.face_vertices(right).len(), 5);
        assert_eq!(mesh.face_vertices(left)[2], mid);
        assert_eq!(mesh.face_vertices(right)[4], mid);
        assert_eq!(mesh.edge_faces(a).len(), 2);
        assert_eq!(mesh.edge_faces(b).len(), 2);

        // Edge loops stay parallel to vertex loops.
        for f in [left, right] {
            let data = mesh.face(f).unwrap();
            for i in 0..data.len() {
                let e = mesh.edge(data.edges[i]).unwrap();
                assert!(e.has_vertex(data.vertices[i]));
                assert!(e.has_vertex(data.vertices[(i + 1) % data.len()]));
            }
        }
    }

    #[test]
    fn flip_face_keeps_edge_loop_aligned() {
        let mut mesh = EditMesh::new();
        let v = unit_square(&mut mesh);
        let face = mesh.add_face(&[v[0], v[1], v[2], v[3]]).unwrap();
        let before = mesh.face_normal(face).unwrap();

        mesh.flip_face(face).unwrap();

        let data = mesh.face(face).unwrap();
        for i in 0..4 {
            let e = mesh.edge(data.edges[i]).unwrap();
            assert!(e.has_vertex(data.vertices[i]));
            assert!(e.has_vertex(data.vertices[(i + 1) % 4]));
        }
        assert!((mesh.face_normal(face).unwrap() + before).norm() < 1e-12);
    }
}
