// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry primitives shared by the operators.

use gothic_mesh::{EdgeKey, EditMesh};
use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::params::Bounds;

/// Edges shorter than this are left alone by [`align_edge_to_vector`].
const MIN_EDGE_LENGTH: f64 = 1e-12;

/// Default clamp applied to both easing control points.
pub const EASE_CLAMP: Bounds = Bounds::new(-2.0, 2.0);

/// Linear interpolation. `t` outside `[0, 1]` extrapolates.
#[inline]
pub fn lerp(a: &Point3<f64>, b: &Point3<f64>, t: f64) -> Point3<f64> {
    a + (b - a) * t
}

/// Cubic Bézier over scalar control values.
#[inline]
pub fn bezier_eval(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Fast-in/fast-out easing with the default `[-2, 2]` sharpness clamp.
///
/// `t` is clamped to `[0, 1]`. The curve runs from 0 to 1 with the two
/// sharpness values as inner control points, so `ease(0) == 0` and
/// `ease(1) == 1` for every sharpness.
pub fn fast_in_out_ease(t: f64, sharpness_in: f64, sharpness_out: f64) -> f64 {
    fast_in_out_ease_clamped(t, sharpness_in, sharpness_out, EASE_CLAMP)
}

/// [`fast_in_out_ease`] with explicit sharpness bounds.
pub fn fast_in_out_ease_clamped(t: f64, sharpness_in: f64, sharpness_out: f64, clamp: Bounds) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let p1 = clamp.clamp(sharpness_in);
    let p2 = clamp.clamp(sharpness_out);
    bezier_eval(t, 0.0, p1, p2, 1.0)
}

/// Rotates an edge about its midpoint so that it points along `target`.
///
/// When the edge is more than 90° away from `target`, it is aligned with
/// `-target` instead so it never turns around. Zero-length edges and a zero
/// target are skipped. Returns `true` if the edge was rotated.
pub fn align_edge_to_vector(mesh: &mut EditMesh, edge: EdgeKey, target: &Vector3<f64>) -> bool {
    let Some((start, end)) = mesh.edge_vertices(edge) else {
        return false;
    };
    let (Some(p0), Some(p1)) = (mesh.vertex_point(start), mesh.vertex_point(end)) else {
        return false;
    };
    let current = p1 - p0;
    if current.norm() < MIN_EDGE_LENGTH || target.norm() < MIN_EDGE_LENGTH {
        return false;
    }
    let current = current.normalize();
    let mut target = target.normalize();
    if current.angle(&target) > std::f64::consts::FRAC_PI_2 {
        target = -target;
    }

    // At most 90° apart after the flip, so `None` only means nothing to do.
    let Some(rotation) = UnitQuaternion::rotation_between(&current, &target) else {
        return false;
    };
    let midpoint = nalgebra::center(&p0, &p1);
    mesh.rotate_vertices(&[start, end], &midpoint, &rotation);
    true
}
