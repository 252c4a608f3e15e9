// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Region-tracking loop cut.
//!
//! Cuts edge loops across the quad that lies between two edges of a region,
//! then works out which of the new faces and edges belong to the region.

use gothic_mesh::{Command, CommandHost, CommandOutcome, EdgeKey, EditMesh, FaceKey};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::error::Result;
use crate::region::{EdgeRole, Region};

/// Geometry a [`loopcut_between`] call added to the region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CutResult {
    /// New window faces, ordered from the starting edge to the ending edge.
    pub faces: Vec<FaceKey>,
    /// New edges shared by two region faces only.
    pub edges: Vec<EdgeKey>,
}

impl CutResult {
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.edges.is_empty()
    }
}

/// Inserts `cuts` edge loops between `first` and `second`.
///
/// Both edges must lie on one region face. The loop cut is driven through
/// another edge of that face, so the new loops run parallel to `first` and
/// `second`. Afterwards the region is pruned of invalidated keys, grows by the
/// new faces lying between the two edges, and absorbs the new edges. Interior
/// edges come back in the result so the caller can add them to its walls.
///
/// Finding no common face, or a cut that creates nothing between the edges,
/// is a no-op and yields an empty result.
pub fn loopcut_between(
    mesh: &mut EditMesh,
    first: EdgeKey,
    second: EdgeKey,
    cuts: usize,
    region: &mut Region,
) -> Result<CutResult> {
    let Some(face) = region.face_with_edges(mesh, first, second) else {
        debug!(?first, ?second, "no region face holds both edges");
        return Ok(CutResult::default());
    };
    let Some(reference) = mesh
        .face_edges(face)
        .iter()
        .copied()
        .find(|&e| e != first && e != second)
    else {
        return Ok(CutResult::default());
    };

    let old_faces: FxHashSet<FaceKey> = mesh.face_keys().collect();
    let outcome = match mesh.run(Command::LoopCut { edge: reference, cuts })? {
        CommandOutcome::LoopCut(outcome) => outcome,
        _ => return Ok(CutResult::default()),
    };
    if outcome.is_empty() {
        debug!(?reference, cuts, "loop cut created nothing");
        return Ok(CutResult::default());
    }
    region.prune(mesh);

    let window = window_faces_between(mesh, first, second, &outcome.new_faces, &old_faces);
    for &f in &window {
        region.add_face(f);
    }

    let mut edges = Vec::new();
    for &edge in &outcome.new_edges {
        if region.absorb_edge(mesh, edge) == EdgeRole::Interior {
            edges.push(edge);
        }
    }

    info!(
        cuts,
        faces = window.len(),
        interior_edges = edges.len(),
        region_faces = region.face_count(),
        "loop cut between edges"
    );
    Ok(CutResult { faces: window, edges })
}

/// Walks the new faces lying between `first` and `second`.
///
/// Starts at a new face touching `first` (or `second` when none does) and
/// steps across the edge opposite the one it entered through. The walk ends
/// on the face touching the other edge, which is included, and stops early on
/// a face it has already visited, a face from `old_faces`, or a missing
/// neighbour.
pub fn window_faces_between(
    mesh: &EditMesh,
    first: EdgeKey,
    second: EdgeKey,
    new_faces: &[FaceKey],
    old_faces: &FxHashSet<FaceKey>,
) -> Vec<FaceKey> {
    let touching = |edge: EdgeKey| new_faces.iter().copied().find(|&f| mesh.face_has_edge(f, edge));
    let (start, entry, end) = match (touching(first), touching(second)) {
        (Some(face), _) => (face, first, second),
        (None, Some(face)) => (face, second, first),
        (None, None) => return Vec::new(),
    };

    let mut walked = vec![start];
    let mut face = start;
    let mut entry = entry;
    while !mesh.face_has_edge(face, end) {
        let Some(exit) = mesh.opposite_edge(face, entry) else {
            break;
        };
        let Some(next) = mesh.face_across(face, exit) else {
            break;
        };
        if walked.contains(&next) || old_faces.contains(&next) {
            break;
        }
        walked.push(next);
        face = next;
        entry = exit;
    }
    walked
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gothic_mesh::construction::make_quad;
    use gothic_mesh::VertexKey;

    /// A 1×3 column of quads in the XZ plane, all selected as the region.
    /// Returns the mesh, the region, and the bottom and top horizontal edges.
    fn column() -> (EditMesh, Region, EdgeKey, EdgeKey) {
        let mut mesh = EditMesh::new();
        let left: Vec<VertexKey> = (0..4).map(|z| mesh.add_vertex(0.0, 0.0, z as f64)).collect();
        let right: Vec<VertexKey> = (0..4).map(|z| mesh.add_vertex(1.0, 0.0, z as f64)).collect();
        let mut faces = Vec::new();
        for z in 0..3 {
            let (face, _) = make_quad(&mut mesh, left[z], right[z], right[z + 1], left[z + 1]).unwrap();
            faces.push(face);
        }
        let region = Region::from_faces(&mesh, &faces);
        let bottom = mesh.find_edge(left[1], right[1]).unwrap();
        let top = mesh.find_edge(left[2], right[2]).unwrap();
        (mesh, region, bottom, top)
    }

    #[test]
    fn single_cut_adds_one_quad() {
        let (mut mesh, mut region, bottom, top) = column();
        let edges_before = region.edges().len();

        let result = loopcut_between(&mut mesh, bottom, top, 1, &mut region).unwrap();

        assert_eq!(result.faces.len(), 2);
        assert_eq!(result.edges.len(), 1);
        assert_eq!(region.face_count(), 4);
        assert_relative_eq!(mesh.edge_avg_z(result.edges[0]).unwrap(), 1.5);
        // The middle edge plus the two halves of each split side edge.
        assert_eq!(region.edges().len(), edges_before - 2 + 4 + 1);
        assert!(!region.is_boundary(result.edges[0]));
        for &e in region.edges() {
            assert_eq!(region.is_boundary(e), region.linked_count(&mesh, e) != 2);
        }
    }

    #[test]
    fn multi_cut_walk_reaches_the_far_edge() {
        let (mut mesh, mut region, bottom, top) = column();

        let result = loopcut_between(&mut mesh, bottom, top, 3, &mut region).unwrap();

        assert_eq!(result.faces.len(), 4);
        assert!(mesh.face_has_edge(result.faces[0], bottom));
        assert!(mesh.face_has_edge(result.faces[3], top));
        let mut heights: Vec<f64> = result.edges.iter().map(|&e| mesh.edge_avg_z(e).unwrap()).collect();
        heights.sort_by(f64::total_cmp);
        assert_eq!(heights.len(), 3);
        for (h, expected) in heights.iter().zip([1.25, 1.5, 1.75]) {
            assert_relative_eq!(*h, expected, epsilon = 1e-12);
        }
        assert_eq!(region.face_count(), 6);
    }

    #[test]
    fn edges_without_common_face_are_a_noop() {
        let (mut mesh, mut region, bottom, _) = column();
        let faces_before = mesh.face_count();
        let far = {
            let keys: Vec<EdgeKey> = mesh.edge_keys().collect();
            keys.into_iter()
                .find(|&e| mesh.edge_avg_z(e) == Some(3.0) && mesh.edge_length(e) == Some(1.0))
                .unwrap()
        };

        let result = loopcut_between(&mut mesh, bottom, far, 1, &mut region).unwrap();

        assert!(result.is_empty());
        assert_eq!(mesh.face_count(), faces_before);
        assert_eq!(region.face_count(), 3);
    }

    #[test]
    fn walk_stops_at_old_faces() {
        let (mesh, _, bottom, top) = column();
        let all: Vec<FaceKey> = mesh.face_keys().collect();
        let old: FxHashSet<FaceKey> = all.iter().copied().collect();
        // Only the middle quad counts as new: the walk starts there and ends on it.
        let middle = mesh
            .face_keys()
            .find(|&f| mesh.face_has_edge(f, bottom) && mesh.face_has_edge(f, top))
            .unwrap();
        assert_eq!(window_faces_between(&mesh, bottom, top, &[middle], &old), vec![middle]);
        assert!(window_faces_between(&mesh, bottom, top, &[], &old).is_empty());
    }
}
