// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Buttress generators. Each run adds a new mesh object and makes it active.

use std::f64::consts::FRAC_PI_2;

use gothic_mesh::{EditMesh, Scene, SceneObject, VertexKey};
use nalgebra::Point3;
use tracing::{debug, warn};

use super::Operator;
use crate::error::Result;
use crate::params::{DivineButtressParams, FlyingButtressParams};

/// Number of segments of the flying buttress arch.
const FLYING_SEGMENTS: usize = 8;

/// Adds a wireframe flying buttress: a parabolic arch over two base vertices.
#[derive(Debug, Clone, Default)]
pub struct AddFlyingButtress {
    pub params: FlyingButtressParams,
}

impl AddFlyingButtress {
    pub fn new(params: FlyingButtressParams) -> Self {
        Self { params }
    }

    /// Point `t ∈ [0, 1]` along the arch.
    pub fn arch_point(&self, t: f64) -> Point3<f64> {
        let p = &self.params;
        Point3::new(
            (t - 0.5) * p.width,
            p.depth * t * t,
            p.height * (1.0 - (t * FRAC_PI_2).sin() * p.curvature),
        )
    }

    pub fn build(&self) -> Result<EditMesh> {
        let mut mesh = EditMesh::new();
        let half = self.params.width / 2.0;
        let base_left = mesh.add_vertex(-half, 0.0, 0.0);
        let base_right = mesh.add_vertex(half, 0.0, 0.0);

        let arch: Vec<VertexKey> = (0..=FLYING_SEGMENTS)
            .map(|i| mesh.add_vertex_at(self.arch_point(i as f64 / FLYING_SEGMENTS as f64)))
            .collect();
        for pair in arch.windows(2) {
            mesh.add_edge(pair[0], pair[1])?;
        }
        if let (Some(&first), Some(&last)) = (arch.first(), arch.last()) {
            mesh.add_edge(base_left, first)?;
            mesh.add_edge(base_right, last)?;
        }
        Ok(mesh)
    }
}

impl Operator for AddFlyingButtress {
    const ID: &'static str = "mesh.add_flying_buttress";
    const LABEL: &'static str = "Add Flying Buttress";

    fn execute(&self, scene: &mut Scene) -> Result<String> {
        self.params.validate()?;
        let mesh = self.build()?;
        debug!(vertices = mesh.vertex_count(), edges = mesh.edge_count(), "built flying buttress");
        scene.add_object(SceneObject::mesh_object("Flying_Buttress", mesh));
        Ok("Flying Buttress created".to_string())
    }
}

/// Adds a pier box with a pointed arch rib springing from its top.
#[derive(Debug, Clone, Default)]
pub struct AddDivineFlyingButtress {
    pub params: DivineButtressParams,
}

impl AddDivineFlyingButtress {
    pub fn new(params: DivineButtressParams) -> Self {
        Self { params }
    }

    pub fn build(&self) -> Result<EditMesh> {
        let p = &self.params;
        let mut mesh = EditMesh::new();

        let (w, d, h) = (p.pier_width / 2.0, p.pier_depth / 2.0, p.pier_height);
        let v = [
            mesh.add_vertex(-w, -d, 0.0),
            mesh.add_vertex(w, -d, 0.0),
            mesh.add_vertex(w, d, 0.0),
            mesh.add_vertex(-w, d, 0.0),
            mesh.add_vertex(-w, -d, h),
            mesh.add_vertex(w, -d, h),
            mesh.add_vertex(w, d, h),
            mesh.add_vertex(-w, d, h),
        ];
        for [a, b, c, e] in [
            [0, 1, 2, 3],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [1, 2, 6, 5],
            [2, 3, 7, 6],
            [3, 0, 4, 7],
        ] {
            mesh.add_face(&[v[a], v[b], v[c], v[e]])?;
        }

        // Pointed arch from the pier's right top, peaking at mid-span.
        let n = p.arch_segments;
        let arch = |i: usize| {
            let t = i as f64 / n as f64;
            let rise = 1.0 - (2.0 * t - 1.0).powi(2);
            (w + t * p.arch_span, h + p.arch_height * rise)
        };
        let front: Vec<VertexKey> = (0..=n)
            .map(|i| {
                let (x, z) = arch(i);
                mesh.add_vertex(x, 0.0, z)
            })
            .collect();
        let back: Vec<VertexKey> = (0..=n)
            .map(|i| {
                let (x, z) = arch(i);
                mesh.add_vertex(x, -p.arch_thickness, z)
            })
            .collect();

        for i in 0..n {
            mesh.add_edge(front[i], front[i + 1])?;
            mesh.add_edge(back[i], back[i + 1])?;
        }
        for i in 0..n {
            mesh.add_face(&[front[i], front[i + 1], back[i + 1], back[i]])?;
        }

        // The arch springs from the middle of the pier's top edge, so this
        // connector is usually collinear.
        if let Err(err) = mesh.add_face(&[v[5], front[0], back[0], v[6]]) {
            warn!(%err, "skipped arch-to-pier connector face");
        }
        Ok(mesh)
    }
}

impl Operator for AddDivineFlyingButtress {
    const ID: &'static str = "mesh.add_divine_flying_buttress";
    const LABEL: &'static str = "Add Divine Flying Buttress";

    fn execute(&self, scene: &mut Scene) -> Result<String> {
        self.params.validate()?;
        let mesh = self.build()?;
        debug!(
            vertices = mesh.vertex_count(),
            edges = mesh.edge_count(),
            faces = mesh.face_count(),
            "built divine flying buttress"
        );
        scene.add_object(SceneObject::mesh_object("Divine_Flying_Buttress", mesh));
        Ok("Divine Flying Buttress created".to_string())
    }
}
