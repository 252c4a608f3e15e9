// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rigid transformations on vertex sets.
//!
//! Transforms modify vertex coordinates in place. Edges and faces reference
//! vertices through keys, so moving vertices moves everything built on them.
//! Vertex lists are deduplicated first so a vertex shared by two edges of the
//! same wall is moved once.

use nalgebra::{Point3, UnitQuaternion, Vector3};
use rustc_hash::FxHashSet;

use crate::arena::EditMesh;
use crate::keys::*;

impl EditMesh {
    /// Translates every listed vertex by `offset`.
    pub fn translate_vertices(&mut self, vertices: &[VertexKey], offset: &Vector3<f64>) {
        for vk in unique(vertices) {
            if let Some(v) = self.vertices.get_mut(vk) {
                v.position += offset;
            }
        }
    }

    /// Rotates every listed vertex about `pivot`.
    pub fn rotate_vertices(
        &mut self,
        vertices: &[VertexKey],
        pivot: &Point3<f64>,
        rotation: &UnitQuaternion<f64>,
    ) {
        for vk in unique(vertices) {
            if let Some(v) = self.vertices.get_mut(vk) {
                let local = v.position - pivot;
                v.position = pivot + rotation * local;
            }
        }
    }

    /// Collects the distinct vertices of a set of edges, in first-seen order.
    pub fn edges_vertices(&self, edges: &[EdgeKey]) -> Vec<VertexKey> {
        let mut out = Vec::with_capacity(edges.len() * 2);
        for &ek in edges {
            if let Some(e) = self.edges.get(ek) {
                out.push(e.start);
                out.push(e.end);
            }
        }
        unique(&out)
    }
}

fn unique(vertices: &[VertexKey]) -> Vec<VertexKey> {
    let mut seen = FxHashSet::default();
    vertices.iter().copied().filter(|v| seen.insert(*v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn translate_shared_vertex_once() {
        let mut mesh = EditMesh::new();
        let a = mesh.add_vertex(0.0, 0.0, 0.0);
        let b = mesh.add_vertex(1.0, 0.0, 0.0);
        let c = mesh.add_vertex(2.0, 0.0, 0.0);
        let e0 = mesh.add_edge(a, b).unwrap();
        let e1 = mesh.add_edge(b, c).unwrap();

        let verts = mesh.edges_vertices(&[e0, e1]);
        assert_eq!(verts, vec![a, b, c]);

        mesh.translate_vertices(&[a, b, b, c], &Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(mesh.vertex_point(b), Some(Point3::new(1.0, 0.0, 2.0)));
    }

    #[test]
    fn rotate_about_midpoint() {
        let mut mesh = EditMesh::new();
        let a = mesh.add_vertex(-1.0, 0.0, 5.0);
        let b = mesh.add_vertex(1.0, 0.0, 5.0);
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2);

        mesh.rotate_vertices(&[a, b], &Point3::new(0.0, 0.0, 5.0), &rotation);

        let pa = mesh.vertex_point(a).unwrap();
        let pb = mesh.vertex_point(b).unwrap();
        assert_relative_eq!(pa.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pa.y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(pb.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(pb.z, 5.0, epsilon = 1e-12);
    }
}
