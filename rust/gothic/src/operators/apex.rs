// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Apex bisection: adds an edge loop near the tip of a cone.

use gothic_mesh::{EditMesh, Scene, VertexKey};
use tracing::debug;

use super::{active_mesh, Operator};
use crate::error::{OperatorError, Result};
use crate::params::ApexBisectParams;

/// Splits every edge touching the apex at `fraction` of its length from the apex.
///
/// Faces around the apex keep their keys and gain the new vertices, so the
/// new vertices form a loop that later loop cuts can run along.
#[derive(Debug, Clone, Default)]
pub struct AddEdgeLoopToCone {
    pub params: ApexBisectParams,
}

impl AddEdgeLoopToCone {
    pub fn new(params: ApexBisectParams) -> Self {
        Self { params }
    }

    fn find_apex(&self, mesh: &EditMesh) -> Result<VertexKey> {
        if self.params.auto_detect {
            let mut best: Option<(VertexKey, f64)> = None;
            for v in mesh.vertex_keys() {
                let z = mesh.vertex_point(v).map(|p| p.z).unwrap_or(f64::NEG_INFINITY);
                if best.map_or(true, |(_, top)| z > top) {
                    best = Some((v, z));
                }
            }
            return best.map(|(v, _)| v).ok_or(OperatorError::NoApexEdges);
        }

        match mesh.selected_vertices().as_slice() {
            [apex] => Ok(*apex),
            selected => Err(OperatorError::SelectionCount {
                what: "vertex as apex",
                expected: 1,
                found: selected.len(),
            }),
        }
    }
}

impl Operator for AddEdgeLoopToCone {
    const ID: &'static str = "mesh.add_edge_loop_to_cone";
    const LABEL: &'static str = "Add Edge Loop to Cone";

    fn execute(&self, scene: &mut Scene) -> Result<String> {
        self.params.validate()?;
        let mesh = active_mesh(scene)?;
        let apex = self.find_apex(mesh)?;
        let edges = mesh.vertex_edges(apex);
        if edges.is_empty() {
            return Err(OperatorError::NoApexEdges);
        }

        let fraction = self.params.fraction;
        for edge in edges {
            let Some((start, _)) = mesh.edge_vertices(edge) else {
                continue;
            };
            let t = if start == apex { fraction } else { 1.0 - fraction };
            let (vertex, _, _) = mesh.split_edge(edge, t)?;
            debug!(?edge, ?vertex, t, "split apex edge");
        }

        Ok(format!("Added edge loop at fraction {fraction}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gothic_mesh::{builders, SceneObject};

    #[test]
    fn auto_detect_picks_the_highest_vertex() {
        let cone = builders::cone(2.0, 1.0, 5).unwrap();
        let op = AddEdgeLoopToCone::default();
        assert_eq!(op.find_apex(&cone.mesh).unwrap(), cone.apex);
    }

    #[test]
    fn manual_apex_needs_one_selected_vertex() {
        let mut cone = builders::cone(2.0, 1.0, 5).unwrap();
        let op = AddEdgeLoopToCone::new(ApexBisectParams {
            auto_detect: false,
            ..Default::default()
        });
        assert!(matches!(
            op.find_apex(&cone.mesh),
            Err(OperatorError::SelectionCount { found: 0, .. })
        ));

        cone.mesh.select_vertex(cone.ring[2], true);
        assert_eq!(op.find_apex(&cone.mesh).unwrap(), cone.ring[2]);
    }

    #[test]
    fn isolated_apex_is_rejected() {
        let mut mesh = EditMesh::new();
        mesh.add_vertex(0.0, 0.0, 1.0);
        let mut scene = Scene::new();
        scene.add_object(SceneObject::mesh_object("Point", mesh));
        assert!(matches!(
            AddEdgeLoopToCone::default().execute(&mut scene),
            Err(OperatorError::NoApexEdges)
        ));
    }

    #[test]
    fn bad_fraction_leaves_mesh_alone() {
        let cone = builders::cone(1.0, 1.0, 8).unwrap();
        let mut scene = Scene::new();
        scene.add_object(SceneObject::mesh_object("Cone", cone.mesh));
        let op = AddEdgeLoopToCone::new(ApexBisectParams {
            fraction: 1.0,
            ..Default::default()
        });
        assert!(op.execute(&mut scene).is_err());
        assert_eq!(scene.active_object().unwrap().mesh().unwrap().vertex_count(), 9);
    }
}
