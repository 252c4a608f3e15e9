// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan-to-lancet conversion.

use std::f64::consts::TAU;

use gothic_mesh::{EditMesh, FaceKey, Scene, VertexKey};
use nalgebra::Vector3;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use super::{active_mesh, Operator};
use crate::error::{OperatorError, Result};
use crate::params::FanToLancetParams;

/// Rewrites the fan around the selected apex into a smaller center fan and
/// an outer ring of quads.
///
/// Every spike edge is cut at `fraction` of its length from the apex. Each
/// original face `[apex, u, .., w]` becomes the triangle `[apex, m_u, m_w]`
/// and the outer face `[m_u, u, .., w, m_w]`, keeping its winding. The faces
/// touching the new middle loop end up selected.
#[derive(Debug, Clone, Default)]
pub struct ConvertFanToLancet {
    pub params: FanToLancetParams,
}

impl ConvertFanToLancet {
    pub fn new(params: FanToLancetParams) -> Self {
        Self { params }
    }
}

/// Angles within this of zero count as zero when folding into `[0, 2π)`.
const ANGLE_EPS: f64 = 1e-9;

/// Angle of each vertex around `apex`, measured in the plane normal to
/// `normal` from the direction of the first vertex. Sorted ascending in `[0, 2π)`.
fn sort_around(
    mesh: &EditMesh,
    apex: VertexKey,
    border: &[VertexKey],
    normal: &Vector3<f64>,
) -> Vec<(VertexKey, f64)> {
    let Some(center) = mesh.vertex_point(apex) else {
        return Vec::new();
    };
    let in_plane = |v: VertexKey| {
        mesh.vertex_point(v).map(|p| {
            let d = p - center;
            d - normal * d.dot(normal)
        })
    };
    let reference = border
        .iter()
        .find_map(|&v| in_plane(v).and_then(|d| d.try_normalize(1e-12)))
        .unwrap_or_else(Vector3::x);
    let side = normal.cross(&reference);

    let mut ordered: Vec<(VertexKey, f64)> = border
        .iter()
        .map(|&v| {
            let d = in_plane(v).unwrap_or_else(Vector3::zeros);
            let angle = d.dot(&side).atan2(d.dot(&reference));
            (v, if angle < -ANGLE_EPS { angle + TAU } else { angle.max(0.0) })
        })
        .collect();
    ordered.sort_by(|a, b| a.1.total_cmp(&b.1));
    ordered
}

/// Loop of `face` rotated so that `apex` comes first.
fn from_apex(mesh: &EditMesh, face: FaceKey, apex: VertexKey) -> Option<Vec<VertexKey>> {
    let loop_ = mesh.face_vertices(face);
    let i = loop_.iter().position(|&v| v == apex)?;
    Some(loop_[i..].iter().chain(&loop_[..i]).copied().collect())
}

impl Operator for ConvertFanToLancet {
    const ID: &'static str = "mesh.convert_fan_to_lancet";
    const LABEL: &'static str = "Convert Fan to Lancet";

    fn execute(&self, scene: &mut Scene) -> Result<String> {
        self.params.validate()?;
        let mesh = active_mesh(scene)?;

        let apex = match mesh.selected_vertices().as_slice() {
            [apex] => *apex,
            selected => {
                return Err(OperatorError::SelectionCount {
                    what: "vertex as apex",
                    expected: 1,
                    found: selected.len(),
                })
            }
        };
        let faces = mesh.vertex_faces(apex);
        if faces.is_empty() {
            return Err(OperatorError::NoApexFaces);
        }
        let spikes = mesh.vertex_edges(apex);
        if spikes.is_empty() {
            return Err(OperatorError::NoApexEdges);
        }

        let normal = faces
            .iter()
            .filter_map(|&f| mesh.face_normal(f))
            .sum::<Vector3<f64>>()
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::z);
        let border: Vec<VertexKey> = spikes
            .iter()
            .filter_map(|&e| mesh.edge_other_vertex(e, apex))
            .collect();
        let ring = sort_around(mesh, apex, &border, &normal);
        let angle: FxHashMap<VertexKey, f64> = ring.iter().copied().collect();

        // Face loops in ring order, captured before the faces go away.
        let mut loops: Vec<(f64, Vec<VertexKey>)> = faces
            .iter()
            .filter_map(|&f| from_apex(mesh, f, apex))
            .map(|l| (l.get(1).and_then(|v| angle.get(v)).copied().unwrap_or(0.0), l))
            .collect();
        loops.sort_by(|a, b| a.0.total_cmp(&b.0));

        for &face in &faces {
            mesh.remove_face(face)?;
        }

        let fraction = self.params.fraction;
        let mut middle: FxHashMap<VertexKey, VertexKey> = FxHashMap::default();
        for &(border_vertex, _) in &ring {
            let Some(spike) = mesh.find_edge(apex, border_vertex) else {
                continue;
            };
            let Some((start, _)) = mesh.edge_vertices(spike) else {
                continue;
            };
            let t = if start == apex { fraction } else { 1.0 - fraction };
            let (vertex, _, _) = mesh.split_edge(spike, t)?;
            middle.insert(border_vertex, vertex);
        }

        let mut created = Vec::new();
        for (_, loop_) in &loops {
            let (Some(&u), Some(&w)) = (loop_.get(1), loop_.last()) else {
                continue;
            };
            let (Some(&mu), Some(&mw)) = (middle.get(&u), middle.get(&w)) else {
                continue;
            };
            let mut outer = vec![mu];
            outer.extend_from_slice(&loop_[1..]);
            outer.push(mw);
            for face_loop in [vec![apex, mu, mw], outer] {
                match mesh.add_face(&face_loop) {
                    Ok(face) => created.push(face),
                    Err(err) => warn!(%err, "skipped fan face"),
                }
            }
        }

        let middle_loop: FxHashSet<VertexKey> = middle.values().copied().collect();
        let touching: Vec<FaceKey> = mesh
            .face_keys()
            .filter(|&f| mesh.face_vertices(f).iter().any(|v| middle_loop.contains(v)))
            .collect();
        mesh.deselect_all();
        for &face in &touching {
            mesh.select_face(face, true);
        }
        debug!(
            spikes = middle.len(),
            faces = created.len(),
            selected = touching.len(),
            "rebuilt fan"
        );

        Ok(format!(
            "Converted fan of {} faces into a lancet with {} middle vertices",
            faces.len(),
            middle.len()
        ))
    }
}
