// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for meshes and scenes.
//!
//! Provides full round-trip serialization of vertices, edges, faces and their
//! selection flags. Slot-map keys are replaced by sequential integer ids so
//! that snapshots are portable and stable across runs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::arena::*;
use crate::error::{Error, Result};
use crate::keys::*;
use crate::scene::{ObjectData, Scene, SceneObject};

/// Serializable representation of a whole scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub objects: Vec<ObjectSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Mesh,
    Curve,
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub name: String,
    pub kind: ObjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshSnapshot>,
}

/// Serializable representation of an edit mesh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshSnapshot {
    pub vertices: Vec<VertexSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
    pub faces: Vec<FaceSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexSnapshot {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub id: usize,
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceSnapshot {
    pub id: usize,
    pub vertices: Vec<usize>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn lookup<K: Copy>(keys: &[K], id: usize, what: &str) -> Result<K> {
    keys.get(id)
        .copied()
        .ok_or_else(|| Error::Serialization(format!("{what} id {id} out of range")))
}

impl EditMesh {
    /// Serializes the mesh to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_snapshot())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserializes a mesh from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: MeshSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(&snapshot)
    }

    /// Creates a serializable snapshot of the mesh.
    pub fn to_snapshot(&self) -> MeshSnapshot {
        let mut vertex_ids: FxHashMap<VertexKey, usize> = FxHashMap::default();

        let vertices = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, (k, v))| {
                vertex_ids.insert(k, i);
                VertexSnapshot {
                    id: i,
                    x: v.position.x,
                    y: v.position.y,
                    z: v.position.z,
                    selected: self.selected_vertices.contains(&k),
                }
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, (k, e))| EdgeSnapshot {
                id: i,
                start: vertex_ids[&e.start],
                end: vertex_ids[&e.end],
                selected: self.selected_edges.contains(&k),
            })
            .collect();

        let faces = self
            .faces
            .iter()
            .enumerate()
            .map(|(i, (k, f))| FaceSnapshot {
                id: i,
                vertices: f.vertices.iter().map(|v| vertex_ids[v]).collect(),
                selected: self.selected_faces.contains(&k),
            })
            .collect();

        MeshSnapshot {
            vertices,
            edges,
            faces,
        }
    }

    /// Reconstructs a mesh from a snapshot.
    ///
    /// Edges are rebuilt before faces so that stored edge directions survive
    /// the round trip.
    pub fn from_snapshot(snap: &MeshSnapshot) -> Result<Self> {
        let mut mesh = EditMesh::new();

        let mut vertex_keys: Vec<VertexKey> = Vec::with_capacity(snap.vertices.len());
        for vs in &snap.vertices {
            let vk = mesh.add_vertex(vs.x, vs.y, vs.z);
            mesh.select_vertex(vk, vs.selected);
            vertex_keys.push(vk);
        }

        for es in &snap.edges {
            let start = lookup(&vertex_keys, es.start, "vertex")?;
            let end = lookup(&vertex_keys, es.end, "vertex")?;
            let ek = mesh.add_edge(start, end)?;
            mesh.select_edge(ek, es.selected);
        }

        for fs in &snap.faces {
            let loop_ = fs
                .vertices
                .iter()
                .map(|&i| lookup(&vertex_keys, i, "vertex"))
                .collect::<Result<Vec<_>>>()?;
            let fk = mesh.add_face(&loop_)?;
            mesh.select_face(fk, fs.selected);
        }

        Ok(mesh)
    }
}

impl Scene {
    /// Serializes the scene to a JSON string.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let snapshot = self.to_snapshot();
        let json = if pretty {
            serde_json::to_string_pretty(&snapshot)
        } else {
            serde_json::to_string(&snapshot)
        };
        json.map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserializes a scene from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: SceneSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(&snapshot)
    }

    pub fn to_snapshot(&self) -> SceneSnapshot {
        let objects = self
            .objects()
            .iter()
            .map(|o| {
                let (kind, mesh) = match &o.data {
                    ObjectData::Mesh(m) => (ObjectKind::Mesh, Some(m.to_snapshot())),
                    ObjectData::Curve => (ObjectKind::Curve, None),
                    ObjectData::Empty => (ObjectKind::Empty, None),
                };
                ObjectSnapshot {
                    name: o.name.clone(),
                    kind,
                    mesh,
                }
            })
            .collect();
        SceneSnapshot {
            objects,
            active: self.active_index(),
        }
    }

    pub fn from_snapshot(snap: &SceneSnapshot) -> Result<Self> {
        let mut scene = Scene::new();
        for os in &snap.objects {
            let data = match os.kind {
                ObjectKind::Mesh => ObjectData::Mesh(match &os.mesh {
                    Some(ms) => EditMesh::from_snapshot(ms)?,
                    None => EditMesh::new(),
                }),
                ObjectKind::Curve => ObjectData::Curve,
                ObjectKind::Empty => ObjectData::Empty,
            };
            scene.add_object(SceneObject::new(os.name.clone(), data));
        }
        if !scene.set_active(snap.active) {
            return Err(Error::Serialization(format!(
                "active object {:?} out of range",
                snap.active
            )));
        }
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::make_quad;

    #[test]
    fn roundtrip_empty_mesh() {
        let mesh = EditMesh::new();
        let json = mesh.to_json().unwrap();
        let restored = EditMesh::from_json(&json).unwrap();

        assert_eq!(restored.vertex_count(), 0);
        assert_eq!(restored.edge_count(), 0);
    }

    #[test]
    fn roundtrip_keeps_selection_and_edge_direction() {
        let mut mesh = EditMesh::new();
        let v = [
            mesh.add_vertex(0.0, 0.0, 0.0),
            mesh.add_vertex(1.0, 0.0, 0.0),
            mesh.add_vertex(1.0, 1.0, 0.0),
            mesh.add_vertex(0.0, 1.0, 0.0),
        ];
        let dangling = mesh.add_vertex(5.0, 5.0, 5.0);
        let wire = mesh.add_edge(dangling, v[0]).unwrap();
        let (face, _) = make_quad(&mut mesh, v[0], v[1], v[2], v[3]).unwrap();
        mesh.select_face(face, true);
        mesh.select_edge(wire, true);
        mesh.select_vertex(v[2], true);

        let json = mesh.to_json().unwrap();
        let restored = EditMesh::from_json(&json).unwrap();

        assert_eq!(restored.vertex_count(), 5);
        assert_eq!(restored.edge_count(), 5);
        assert_eq!(restored.face_count(), 1);
        assert_eq!(restored.selected_faces().len(), 1);
        assert_eq!(restored.selected_vertices().len(), 1);

        let edge = restored.selected_edges()[0];
        let (start, _) = restored.edge_vertices(edge).unwrap();
        assert_eq!(restored.vertex_point(start).unwrap().x, 5.0);
    }

    #[test]
    fn out_of_range_ids_are_rejected() {
        let json = r#"{"vertices":[{"id":0,"x":0,"y":0,"z":0}],"edges":[{"id":0,"start":0,"end":3}],"faces":[]}"#;
        assert!(matches!(EditMesh::from_json(json), Err(Error::Serialization(_))));
    }

    #[test]
    fn scene_roundtrip() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new("Path", ObjectData::Curve));
        let mut mesh = EditMesh::new();
        mesh.add_vertex(0.0, 0.0, 1.0);
        scene.add_object(SceneObject::mesh_object("Cone", mesh));
        scene.set_active(Some(0));

        let json = scene.to_json(false).unwrap();
        let restored = Scene::from_json(&json).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.active_index(), Some(0));
        assert_eq!(restored.object(1).unwrap().mesh().unwrap().vertex_count(), 1);
        assert!(restored.object(0).unwrap().mesh().is_none());
    }
}
