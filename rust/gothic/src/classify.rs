// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge/face classification of a selected patch.
//!
//! Splits the edges of a face patch into boundary, top and wall edges,
//! detects the window's facing direction and lateral axis, and provides the
//! orderings the spacer and the loop cutter rely on.

use std::cmp::Ordering;

use gothic_mesh::{EdgeKey, EditMesh, FaceKey};
use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{OperatorError, Result};

/// Below this the cross product of two boundary edges counts as parallel.
const MIN_AXIS_MAGNITUDE: f64 = 1e-12;

/// Relative difference under which two cross products count as equally large.
pub const AXIS_TIE_TOLERANCE: f64 = 1e-9;

/// Edge sets derived from a face patch. Every list is in mesh storage order.
#[derive(Debug, Clone)]
pub struct Classification {
    pub selected_faces: Vec<FaceKey>,
    /// Edges linked to at least one selected face.
    pub selected_edges: Vec<EdgeKey>,
    pub boundary_edges: Vec<EdgeKey>,
    /// Non-boundary edges at the highest average Z.
    pub top_edges: Vec<EdgeKey>,
    /// Everything else.
    pub wall_edges: Vec<EdgeKey>,
    pub min_z: f64,
    pub max_z: f64,
}

impl Classification {
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_z - self.min_z
    }

    /// Top and wall edges: every edge shared by two faces of the patch.
    pub fn interior_edges(&self) -> Vec<EdgeKey> {
        self.top_edges.iter().chain(&self.wall_edges).copied().collect()
    }
}

/// An edge is a boundary edge when it is not shared by exactly two faces of the patch.
pub fn is_boundary(mesh: &EditMesh, edge: EdgeKey, faces: &FxHashSet<FaceKey>) -> bool {
    mesh.edge_faces(edge).iter().filter(|f| faces.contains(f)).count() != 2
}

/// Classifies the edges of a face patch.
///
/// `tolerance` is the absolute Z distance from the maximum within which a
/// non-boundary edge counts as a top edge.
pub fn classify(mesh: &EditMesh, faces: &[FaceKey], tolerance: f64) -> Result<Classification> {
    let patch: FxHashSet<FaceKey> = faces.iter().copied().filter(|&f| mesh.face(f).is_some()).collect();
    if patch.is_empty() {
        return Err(OperatorError::NoFacesSelected);
    }
    let selected_faces: Vec<FaceKey> = mesh.face_keys().filter(|f| patch.contains(f)).collect();

    let mut selected_edges = Vec::new();
    let mut boundary_edges = Vec::new();
    for edge in mesh.edge_keys() {
        let linked = mesh.edge_faces(edge).iter().filter(|f| patch.contains(f)).count();
        if linked > 0 {
            selected_edges.push(edge);
            if linked != 2 {
                boundary_edges.push(edge);
            }
        }
    }
    if boundary_edges.is_empty() {
        return Err(OperatorError::NoBoundaryEdges);
    }

    let avg_z = |e: EdgeKey| mesh.edge_avg_z(e).unwrap_or(0.0);
    let (min_z, max_z) = selected_edges
        .iter()
        .map(|&e| avg_z(e))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), z| (lo.min(z), hi.max(z)));

    let boundary: FxHashSet<EdgeKey> = boundary_edges.iter().copied().collect();
    let mut top_edges = Vec::new();
    let mut wall_edges = Vec::new();
    for &edge in &selected_edges {
        if boundary.contains(&edge) {
            continue;
        }
        if (avg_z(edge) - max_z).abs() < tolerance {
            top_edges.push(edge);
        } else {
            wall_edges.push(edge);
        }
    }

    debug!(
        faces = selected_faces.len(),
        edges = selected_edges.len(),
        boundary = boundary_edges.len(),
        top = top_edges.len(),
        walls = wall_edges.len(),
        min_z,
        max_z,
        "classified patch"
    );

    Ok(Classification {
        selected_faces,
        selected_edges,
        boundary_edges,
        top_edges,
        wall_edges,
        min_z,
        max_z,
    })
}

/// Facing direction of the window and the horizontal axis across it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    pub forward: Vector3<f64>,
    /// `(-forward.y, forward.x, 0)`, normalized.
    pub perp: Vector3<f64>,
}

/// Finds the pair of boundary edges with the largest cross product and
/// derives the axes from it.
///
/// Pairs whose cross product is within [`AXIS_TIE_TOLERANCE`] of the largest
/// tie. Among tied pairs the direction most parallel to the `guides` (the
/// patch's interior edges, which run through the window's depth) wins; the
/// first tied pair in storage order wins when there are no guides.
///
/// Fails with [`OperatorError::NoAxisFound`] when there are fewer than two
/// edges, when every pair is parallel, or when the forward direction is
/// vertical (no horizontal lateral axis).
pub fn detect_axes(mesh: &EditMesh, boundary: &[EdgeKey], guides: &[EdgeKey]) -> Result<Axes> {
    let vectors: Vec<Vector3<f64>> = boundary.iter().filter_map(|&e| mesh.edge_vector(e)).collect();
    if vectors.len() < 2 {
        return Err(OperatorError::NoAxisFound);
    }

    let mut crosses = Vec::new();
    for (i, a) in vectors.iter().enumerate() {
        for b in &vectors[i + 1..] {
            crosses.push(a.cross(b));
        }
    }
    let best_magnitude = crosses.iter().map(|c| c.norm()).fold(0.0, f64::max);
    if best_magnitude <= MIN_AXIS_MAGNITUDE {
        return Err(OperatorError::NoAxisFound);
    }

    let directions: Vec<Vector3<f64>> = guides
        .iter()
        .filter_map(|&e| mesh.edge_vector(e))
        .filter_map(|v| v.try_normalize(MIN_AXIS_MAGNITUDE))
        .collect();
    let alignment = |axis: &Vector3<f64>| directions.iter().map(|d| d.dot(axis).abs()).sum::<f64>();

    let mut forward: Option<(Vector3<f64>, f64)> = None;
    for cross in &crosses {
        let magnitude = cross.norm();
        if magnitude < best_magnitude * (1.0 - AXIS_TIE_TOLERANCE) {
            continue;
        }
        let axis = cross / magnitude;
        let score = alignment(&axis);
        if forward.map_or(true, |(_, best)| score > best + AXIS_TIE_TOLERANCE) {
            forward = Some((axis, score));
        }
    }
    let Some((forward, _)) = forward else {
        return Err(OperatorError::NoAxisFound);
    };

    let lateral = Vector3::new(-forward.y, forward.x, 0.0);
    let norm = lateral.norm();
    if norm < MIN_AXIS_MAGNITUDE {
        return Err(OperatorError::NoAxisFound);
    }

    let axes = Axes {
        forward,
        perp: lateral / norm,
    };
    debug!(forward = ?axes.forward, perp = ?axes.perp, "detected axes");
    Ok(axes)
}

/// Projection of the edge midpoint onto `axis`.
pub fn lateral_key(mesh: &EditMesh, edge: EdgeKey, axis: &Vector3<f64>) -> f64 {
    mesh.edge_center(edge).map(|c| c.coords.dot(axis)).unwrap_or(0.0)
}

/// Sorts edges by [`lateral_key`], ascending.
pub fn sort_laterally(mesh: &EditMesh, edges: &mut [EdgeKey], axis: &Vector3<f64>) {
    edges.sort_by(|&a, &b| lateral_key(mesh, a, axis).total_cmp(&lateral_key(mesh, b, axis)));
}

/// Splits walls into the side at `+perp` from `top_center` (left) and the rest (right).
pub fn partition_sides(
    mesh: &EditMesh,
    walls: &[EdgeKey],
    top_center: &Point3<f64>,
    perp: &Vector3<f64>,
) -> (Vec<EdgeKey>, Vec<EdgeKey>) {
    walls.iter().copied().partition(|&e| {
        mesh.edge_center(e)
            .map(|c| (c - *top_center).dot(perp) > 0.0)
            .unwrap_or(false)
    })
}

/// Vertical ordering key: average Z, then distance from the top center with
/// the farthest edge first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalOrder {
    pub avg_z: f64,
    pub distance: f64,
}

impl VerticalOrder {
    pub fn of(mesh: &EditMesh, edge: EdgeKey, top_center: &Point3<f64>) -> Self {
        let avg_z = mesh.edge_avg_z(edge).unwrap_or(0.0);
        let distance = mesh
            .edge_center(edge)
            .map(|c| (*top_center - c).norm())
            .unwrap_or(0.0);
        Self { avg_z, distance }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        self.avg_z
            .total_cmp(&other.avg_z)
            .then_with(|| other.distance.total_cmp(&self.distance))
    }
}

/// Returns the walls ordered bottom to top.
pub fn sort_vertically(mesh: &EditMesh, walls: &[EdgeKey], top_center: &Point3<f64>) -> Vec<EdgeKey> {
    let mut keyed: Vec<(VerticalOrder, EdgeKey)> = walls
        .iter()
        .map(|&e| (VerticalOrder::of(mesh, e, top_center), e))
        .collect();
    keyed.sort_by(|a, b| a.0.compare(&b.0));
    keyed.into_iter().map(|(_, e)| e).collect()
}
