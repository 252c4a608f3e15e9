// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometric queries on mesh elements.
//!
//! Computes lengths, centres, normals, areas and enclosed volumes with plain
//! computational geometry. Sorting keys used by the operators (average edge
//! height, centres) are derived here on demand and never stored.

use nalgebra::{Point3, Vector3};

use crate::arena::EditMesh;
use crate::keys::*;

/// Unnormalized polygon normal by Newell's method.
///
/// The length equals twice the polygon's area for planar loops, so a
/// near-zero result identifies collinear or degenerate corners.
pub fn newell_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let mut normal = Vector3::zeros();
    let n = points.len();
    for i in 0..n {
        let curr = points[i];
        let next = points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

impl EditMesh {
    /// Returns the position of a vertex.
    pub fn vertex_point(&self, key: VertexKey) -> Option<Point3<f64>> {
        self.vertices.get(key).map(|v| v.position)
    }

    /// Moves a vertex to a new position. Returns `false` if the vertex is gone.
    pub fn set_vertex_position(&mut self, key: VertexKey, position: Point3<f64>) -> bool {
        match self.vertices.get_mut(key) {
            Some(v) => {
                v.position = position;
                true
            }
            None => false,
        }
    }

    /// Vector from an edge's start vertex to its end vertex.
    pub fn edge_vector(&self, key: EdgeKey) -> Option<Vector3<f64>> {
        let edge = self.edges.get(key)?;
        Some(self.vertex_point(edge.end)? - self.vertex_point(edge.start)?)
    }

    /// Euclidean length of an edge.
    pub fn edge_length(&self, key: EdgeKey) -> Option<f64> {
        self.edge_vector(key).map(|v| v.norm())
    }

    /// Midpoint of an edge.
    pub fn edge_center(&self, key: EdgeKey) -> Option<Point3<f64>> {
        let edge = self.edges.get(key)?;
        let p0 = self.vertex_point(edge.start)?;
        let p1 = self.vertex_point(edge.end)?;
        Some(nalgebra::center(&p0, &p1))
    }

    /// Average height (Z) of an edge's two endpoints.
    pub fn edge_avg_z(&self, key: EdgeKey) -> Option<f64> {
        self.edge_center(key).map(|c| c.z)
    }

    /// Corner positions of a face in loop order.
    pub fn face_points(&self, key: FaceKey) -> Option<Vec<Point3<f64>>> {
        let face = self.faces.get(key)?;
        face.vertices.iter().map(|&v| self.vertex_point(v)).collect()
    }

    /// Unit face normal by Newell's method.
    ///
    /// Works for any planar polygon (convex or concave). The direction follows
    /// the right-hand rule relative to the vertex winding. Returns `None` for
    /// degenerate faces.
    pub fn face_normal(&self, key: FaceKey) -> Option<Vector3<f64>> {
        let normal = newell_normal(&self.face_points(key)?);
        let len = normal.norm();
        if len < 1e-15 {
            return None;
        }
        Some(normal / len)
    }

    /// Area of a (planar) face.
    pub fn face_area(&self, key: FaceKey) -> Option<f64> {
        Some(newell_normal(&self.face_points(key)?).norm() / 2.0)
    }

    /// Signed volume enclosed by a set of faces, using the tetrahedron fan
    /// against the origin. Positive when the faces wind outward around a
    /// closed surface.
    pub fn signed_volume(&self, faces: &[FaceKey]) -> f64 {
        let mut volume = 0.0;
        for &fk in faces {
            let Some(points) = self.face_points(fk) else {
                continue;
            };
            if points.len() < 3 {
                continue;
            }
            let p0 = points[0];
            for i in 1..points.len() - 1 {
                volume += p0.coords.dot(&points[i].coords.cross(&points[i + 1].coords));
            }
        }
        volume / 6.0
    }
}
