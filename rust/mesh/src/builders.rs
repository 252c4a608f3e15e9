// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builders for the primitive meshes the operators start from.
//!
//! Each builder returns a fresh [`EditMesh`] with outward-consistent winding
//! plus the keys a caller typically needs next (the apex of a cone or fan).

use std::f64::consts::TAU;

use crate::arena::EditMesh;
use crate::error::Result;
use crate::keys::*;

/// A built primitive with its apex vertex.
#[derive(Debug, Clone)]
pub struct Apexed {
    pub mesh: EditMesh,
    pub apex: VertexKey,
    /// Ring vertices in counter-clockwise order (seen from +Z).
    pub ring: Vec<VertexKey>,
}

fn ring(mesh: &mut EditMesh, radius: f64, segments: usize, z: f64) -> Vec<VertexKey> {
    (0..segments)
        .map(|i| {
            let angle = TAU * i as f64 / segments as f64;
            mesh.add_vertex(radius * angle.cos(), radius * angle.sin(), z)
        })
        .collect()
}

/// A cone with its base ring at `z = 0`, apex at `(0, 0, apex_height)` and a
/// closed base cap.
pub fn cone(apex_height: f64, radius: f64, segments: usize) -> Result<Apexed> {
    let mut mesh = EditMesh::new();
    let base = ring(&mut mesh, radius, segments, 0.0);
    let apex = mesh.add_vertex(0.0, 0.0, apex_height);

    for i in 0..segments {
        let j = (i + 1) % segments;
        mesh.add_face(&[base[i], base[j], apex])?;
    }
    let cap: Vec<VertexKey> = base.iter().rev().copied().collect();
    mesh.add_face(&cap)?;

    Ok(Apexed {
        mesh,
        apex,
        ring: base,
    })
}

/// A flat fan of triangles around an apex at the origin, facing +Z.
pub fn triangle_fan(radius: f64, segments: usize) -> Result<Apexed> {
    let mut mesh = EditMesh::new();
    let apex = mesh.add_vertex(0.0, 0.0, 0.0);
    let rim = ring(&mut mesh, radius, segments, 0.0);

    for i in 0..segments {
        let j = (i + 1) % segments;
        mesh.add_face(&[apex, rim[i], rim[j]])?;
    }

    Ok(Apexed {
        mesh,
        apex,
        ring: rim,
    })
}

/// A rectangular window opening inset into a wall.
///
/// The opening spans `x ∈ [-half_width, half_width]`, `z ∈ [0, height]` and
/// reaches from the wall face at `y = 0` to a back face at `y = depth`. The
/// jambs are split into `rows` quads each, the lintel and sill into
/// `lintel_segments`. Jamb quads lying entirely at or above `select_above`
/// (and all lintel quads) start out selected, which is the selection a user
/// makes before converting the opening into a lancet window.
#[derive(Debug, Clone)]
pub struct WindowOpening {
    pub half_width: f64,
    pub height: f64,
    pub depth: f64,
    pub rows: usize,
    pub lintel_segments: usize,
    pub select_above: f64,
}

impl Default for WindowOpening {
    fn default() -> Self {
        Self {
            half_width: 1.0,
            height: 4.0,
            depth: 0.5,
            rows: 4,
            lintel_segments: 1,
            select_above: 2.0,
        }
    }
}

impl WindowOpening {
    /// Perimeter of the opening at `y = 0`: up the left jamb, across the
    /// lintel, down the right jamb and back along the sill.
    fn perimeter(&self) -> Vec<[f64; 2]> {
        let w = self.half_width;
        let h = self.height;
        let rows = self.rows.max(1);
        let span = self.lintel_segments.max(1);
        let mut points = Vec::with_capacity(2 * (rows + span));
        for k in 0..rows {
            points.push([-w, h * k as f64 / rows as f64]);
        }
        for k in 0..span {
            points.push([-w + 2.0 * w * k as f64 / span as f64, h]);
        }
        for k in 0..rows {
            points.push([w, h - h * k as f64 / rows as f64]);
        }
        for k in 0..span {
            points.push([w - 2.0 * w * k as f64 / span as f64, 0.0]);
        }
        points
    }

    pub fn build(&self) -> Result<EditMesh> {
        let mut mesh = EditMesh::new();
        let perimeter = self.perimeter();
        let n = perimeter.len();
        let rim: Vec<VertexKey> = perimeter
            .iter()
            .map(|&[x, z]| mesh.add_vertex(x, 0.0, z))
            .collect();
        let inner: Vec<VertexKey> = perimeter
            .iter()
            .map(|&[x, z]| mesh.add_vertex(x, self.depth, z))
            .collect();

        for i in 0..n {
            let j = (i + 1) % n;
            let face = mesh.add_face(&[rim[i], inner[i], inner[j], rim[j]])?;
            let low = perimeter[i][1].min(perimeter[j][1]);
            if low >= self.select_above - 1e-9 {
                mesh.select_face(face, true);
            }
        }

        let back: Vec<VertexKey> = inner.iter().rev().copied().collect();
        mesh.add_face(&back)?;
        Ok(mesh)
    }
}
