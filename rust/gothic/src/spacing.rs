// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertical and horizontal spacing of wall edges.
//!
//! The lowest wall of a side marks where the straight part of the window
//! ends. Walls above it are spread linearly in height up to the top and eased
//! sideways towards the top edge, which produces the pointed arch profile.
//! Every move translates a whole wall rigidly.

use gothic_mesh::{EdgeKey, EditMesh};
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::classify::sort_vertically;
use crate::params::Bounds;
use crate::primitives::{align_edge_to_vector, fast_in_out_ease_clamped};

/// Moves both vertices of `wall` so that its midpoint lands on `goal`.
pub fn move_wall_to(mesh: &mut EditMesh, wall: EdgeKey, goal: &Point3<f64>) -> bool {
    let Some(center) = mesh.edge_center(wall) else {
        return false;
    };
    let vertices = mesh.edges_vertices(&[wall]);
    mesh.translate_vertices(&vertices, &(*goal - center));
    true
}

/// Spacing settings shared by both sides of one window.
#[derive(Debug, Clone)]
pub struct WallSpacer {
    /// Facing direction every wall is aligned to before vertical spacing.
    pub forward: Vector3<f64>,
    pub min_z: f64,
    pub max_z: f64,
    pub start_fraction: f64,
    pub sharpness_in: f64,
    pub sharpness_out: f64,
    pub ease_clamp: Bounds,
    /// The canonical top edge; horizontal spacing runs towards its midpoint.
    pub top_edge: EdgeKey,
    /// Midpoint of the top edge when the walls were partitioned. Used for ordering.
    pub top_center: Point3<f64>,
}

impl WallSpacer {
    /// Height at which the walls stop being straight.
    #[inline]
    pub fn curve_start(&self) -> f64 {
        self.min_z + (self.max_z - self.min_z) * self.start_fraction
    }

    /// Aligns the walls to `forward`, puts the lowest at [`curve_start`](Self::curve_start)
    /// and spreads the rest linearly up to `max_z`. X and Y stay untouched.
    pub fn space_vertically(&self, mesh: &mut EditMesh, walls: &[EdgeKey]) {
        if walls.is_empty() {
            return;
        }
        for &wall in walls {
            align_edge_to_vector(mesh, wall, &self.forward);
        }

        let sorted = sort_vertically(mesh, walls, &self.top_center);
        let Some((&straight, curve)) = sorted.split_first() else {
            return;
        };
        let start = self.curve_start();
        self.move_vertically(mesh, straight, start);

        let steps = (curve.len() + 1) as f64;
        let span = self.max_z - start;
        for (i, &wall) in curve.iter().enumerate() {
            let fraction = (i + 1) as f64 / steps;
            self.move_vertically(mesh, wall, start + fraction * span);
        }
        debug!(walls = walls.len(), start, "spaced walls vertically");
    }

    /// Eases every wall above the lowest one along `direction`, from the
    /// lowest wall towards the top edge. Z stays untouched.
    pub fn space_horizontally(&self, mesh: &mut EditMesh, walls: &[EdgeKey], direction: &Vector3<f64>) {
        let sorted = sort_vertically(mesh, walls, &self.top_center);
        let Some((&straight, curve)) = sorted.split_first() else {
            return;
        };
        let Some(mut from) = mesh.edge_center(straight) else {
            return;
        };
        let mut to = mesh.edge_center(self.top_edge).unwrap_or(self.top_center);
        from.z = 0.0;
        to.z = 0.0;
        let distance = (to - from).norm();

        let steps = (curve.len() + 1) as f64;
        for (i, &wall) in curve.iter().enumerate() {
            let Some(center) = mesh.edge_center(wall) else {
                continue;
            };
            let fraction = fast_in_out_ease_clamped(
                (i + 1) as f64 / steps,
                self.sharpness_in,
                self.sharpness_out,
                self.ease_clamp,
            );
            let planar = from + direction * (fraction * distance);
            move_wall_to(mesh, wall, &Point3::new(planar.x, planar.y, center.z));
        }
        debug!(walls = walls.len(), distance, "spaced walls horizontally");
    }

    fn move_vertically(&self, mesh: &mut EditMesh, wall: EdgeKey, z: f64) {
        if let Some(center) = mesh.edge_center(wall) {
            move_wall_to(mesh, wall, &Point3::new(center.x, center.y, z));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Four walls along Y at x = -1 (z = 2, 2.5, 3, 3.5) and a top edge at x = 0, z = 4.
    fn side() -> (EditMesh, Vec<EdgeKey>, WallSpacer) {
        let mut mesh = EditMesh::new();
        let wall = |mesh: &mut EditMesh, x: f64, z: f64| {
            let a = mesh.add_vertex(x, 0.0, z);
            let b = mesh.add_vertex(x, 1.0, z);
            mesh.add_edge(a, b).unwrap()
        };
        // Stored out of order on purpose.
        let walls = vec![
            wall(&mut mesh, -1.0, 3.0),
            wall(&mut mesh, -1.0, 2.0),
            wall(&mut mesh, -1.0, 3.5),
            wall(&mut mesh, -1.0, 2.5),
        ];
        let top_edge = wall(&mut mesh, 0.0, 4.0);
        let spacer = WallSpacer {
            forward: Vector3::y(),
            min_z: 2.0,
            max_z: 4.0,
            start_fraction: 0.5,
            sharpness_in: 0.0,
            sharpness_out: 0.0,
            ease_clamp: crate::primitives::EASE_CLAMP,
            top_edge,
            top_center: Point3::new(0.0, 0.5, 4.0),
        };
        (mesh, walls, spacer)
    }

    fn centers(mesh: &EditMesh, walls: &[EdgeKey]) -> Vec<Point3<f64>> {
        walls.iter().map(|&w| mesh.edge_center(w).unwrap()).collect()
    }

    #[test]
    fn vertical_spacing_is_linear_and_keeps_xy() {
        let (mut mesh, walls, spacer) = side();
        let before = centers(&mesh, &walls);

        spacer.space_vertically(&mut mesh, &walls);

        let after = centers(&mesh, &walls);
        for (b, a) in before.iter().zip(&after) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        }
        // Input order: z 3, 2, 3.5, 2.5 -> ranks 2, 0, 3, 1.
        for (a, expected) in after.iter().zip([3.5, 3.0, 3.75, 3.25]) {
            assert_relative_eq!(a.z, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn horizontal_spacing_is_eased_and_keeps_z() {
        let (mut mesh, walls, spacer) = side();
        let before = centers(&mesh, &walls);

        spacer.space_horizontally(&mut mesh, &walls, &Vector3::x());

        let after = centers(&mesh, &walls);
        for (b, a) in before.iter().zip(&after) {
            assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
            assert_relative_eq!(a.y, 0.5, epsilon = 1e-12);
        }
        // Flat controls make the ease a cube.
        for (a, expected) in after.iter().zip([8.0, 0.0, 27.0, 1.0]) {
            assert_relative_eq!(a.x, -1.0 + expected / 64.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn vertical_spacing_preserves_order() {
        let (mut mesh, walls, spacer) = side();
        let order = sort_vertically(&mesh, &walls, &spacer.top_center);

        spacer.space_vertically(&mut mesh, &walls);

        let heights: Vec<f64> = order.iter().map(|&w| mesh.edge_avg_z(w).unwrap()).collect();
        assert!(heights.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn walls_are_aligned_and_moved_rigidly() {
        let mut mesh = EditMesh::new();
        let a = mesh.add_vertex(-1.0, 0.0, 2.0);
        let b = mesh.add_vertex(-0.5, 0.5, 2.0);
        let skewed = mesh.add_edge(a, b).unwrap();
        let length = mesh.edge_length(skewed).unwrap();
        let (_, _, spacer) = side();

        spacer.space_vertically(&mut mesh, &[skewed]);

        let v = mesh.edge_vector(skewed).unwrap();
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.norm(), length, epsilon = 1e-12);
        assert_relative_eq!(mesh.edge_avg_z(skewed).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_walls_are_ignored() {
        let (mut mesh, _, spacer) = side();
        let before = mesh.vertex_count();
        spacer.space_vertically(&mut mesh, &[]);
        spacer.space_horizontally(&mut mesh, &[], &Vector3::x());
        assert_eq!(mesh.vertex_count(), before);
    }
}
