// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inset-to-lancet-window conversion.
//!
//! The selected faces of an inset window are classified, the crown is
//! reduced to a single top edge, each side is optionally subdivided towards
//! it, and the walls of both sides are spaced into a pointed arch.

use gothic_mesh::{Command, CommandHost, EdgeKey, EditMesh, Scene};
use nalgebra::{Point3, Vector3};
use tracing::{debug, info};

use super::{active_mesh, Operator};
use crate::classify::{classify, detect_axes, partition_sides, sort_laterally, sort_vertically};
use crate::error::{OperatorError, Result};
use crate::loopcut::loopcut_between;
use crate::params::LancetParams;
use crate::primitives::align_edge_to_vector;
use crate::region::Region;
use crate::spacing::WallSpacer;

#[derive(Debug, Clone, Default)]
pub struct ConvertInsetToLancetWindow {
    pub params: LancetParams,
}

impl ConvertInsetToLancetWindow {
    pub fn new(params: LancetParams) -> Self {
        Self { params }
    }

    /// Picks the middle top edge by lateral position. An even count is first
    /// made odd by cutting one loop between the two middle edges.
    fn canonical_top_edge(
        &self,
        mesh: &mut EditMesh,
        region: &mut Region,
        top_edges: &mut Vec<EdgeKey>,
        perp: &Vector3<f64>,
    ) -> Result<EdgeKey> {
        sort_laterally(mesh, top_edges, perp);
        if top_edges.len() > 1 && top_edges.len() % 2 == 0 {
            let middle = top_edges.len() / 2;
            let (first, second) = (top_edges[middle], top_edges[middle - 1]);
            let cut = loopcut_between(mesh, first, second, 1, region)?;
            debug!(added = cut.edges.len(), "merged the two middle top edges");
            top_edges.extend(cut.edges);
            top_edges.retain(|&e| mesh.edge(e).is_some());
            sort_laterally(mesh, top_edges, perp);
        }
        top_edges
            .get(top_edges.len() / 2)
            .copied()
            .ok_or(OperatorError::NoTopEdge)
    }

    /// Cuts `curve_segments` loops between the highest wall of `side` and the
    /// top edge, adding the new walls to `side`.
    fn subdivide(
        &self,
        mesh: &mut EditMesh,
        region: &mut Region,
        side: &mut Vec<EdgeKey>,
        top_edge: EdgeKey,
        top_center: &Point3<f64>,
        reverse: bool,
    ) -> Result<()> {
        if side.is_empty() || self.params.curve_segments < 1 {
            return Ok(());
        }
        let Some(&highest) = sort_vertically(mesh, side, top_center).last() else {
            return Ok(());
        };
        let (first, second) = if reverse {
            (top_edge, highest)
        } else {
            (highest, top_edge)
        };
        let cut = loopcut_between(mesh, first, second, self.params.curve_segments, region)?;
        side.extend(cut.edges);
        side.retain(|&e| mesh.edge(e).is_some());
        Ok(())
    }
}

impl Operator for ConvertInsetToLancetWindow {
    const ID: &'static str = "mesh.convert_inset_to_lancet_window";
    const LABEL: &'static str = "Convert Inset to Lancet Window";

    fn execute(&self, scene: &mut Scene) -> Result<String> {
        let params = &self.params;
        params.validate()?;
        let mesh = active_mesh(scene)?;

        let selected = mesh.selected_faces();
        let classification = classify(mesh, &selected, params.top_tolerance)?;
        let axes = detect_axes(mesh, &classification.boundary_edges, &classification.interior_edges())?;
        if classification.top_edges.is_empty() {
            return Err(OperatorError::NoTopEdge);
        }

        let mut region = Region::from_faces(mesh, &classification.selected_faces);
        let mut top_edges = classification.top_edges.clone();
        let top_edge = self.canonical_top_edge(mesh, &mut region, &mut top_edges, &axes.perp)?;
        align_edge_to_vector(mesh, top_edge, &axes.forward);
        let top_center = mesh.edge_center(top_edge).ok_or(OperatorError::NoTopEdge)?;

        let walls: Vec<EdgeKey> = classification
            .wall_edges
            .iter()
            .chain(&top_edges)
            .copied()
            .filter(|&e| e != top_edge && mesh.edge(e).is_some())
            .collect();
        let (mut left, mut right) = partition_sides(mesh, &walls, &top_center, &axes.perp);
        debug!(left = left.len(), right = right.len(), "partitioned walls");

        self.subdivide(mesh, &mut region, &mut left, top_edge, &top_center, false)?;
        self.subdivide(mesh, &mut region, &mut right, top_edge, &top_center, true)?;

        let spacer = WallSpacer {
            forward: axes.forward,
            min_z: classification.min_z,
            max_z: classification.max_z,
            start_fraction: params.start_fraction,
            sharpness_in: params.sharpness_in,
            sharpness_out: params.sharpness_out,
            ease_clamp: params.ease_clamp,
            top_edge,
            top_center,
        };
        spacer.space_vertically(mesh, &right);
        spacer.space_vertically(mesh, &left);
        spacer.space_horizontally(mesh, &right, &axes.perp);
        spacer.space_horizontally(mesh, &left, &-axes.perp);

        mesh.deselect_all();
        for &face in region.faces() {
            mesh.select_face(face, true);
        }
        mesh.run(Command::RecalculateNormals { inside: false })?;
        for vertex in mesh.edges_vertices(&[top_edge]) {
            mesh.select_vertex(vertex, true);
        }

        info!(
            faces = region.face_count(),
            left = left.len(),
            right = right.len(),
            "converted inset to lancet window"
        );
        Ok(format!(
            "Converted inset to Lancet Window ({} faces, {} walls)",
            region.face_count(),
            left.len() + right.len()
        ))
    }
}
