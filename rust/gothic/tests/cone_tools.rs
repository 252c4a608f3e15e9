// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end runs of the apex operators on built cones and fans.

use approx::assert_relative_eq;
use gothic_mesh::{builders, EdgeKey, EditMesh, ObjectData, Scene, SceneObject, VertexKey};
use gothic_tools::{
    invoke, AddEdgeLoopToCone, ApexBisectParams, ConvertFanToLancet, FanToLancetParams, Status,
};
use nalgebra::Point3;
use rustc_hash::FxHashSet;

fn scene_with(name: &str, mesh: EditMesh) -> Scene {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::mesh_object(name, mesh));
    scene
}

fn active(scene: &Scene) -> &EditMesh {
    scene.active_object().and_then(|o| o.mesh()).unwrap()
}

#[test]
fn apex_bisection_splits_every_apex_edge_at_its_midpoint() {
    let cone = builders::cone(1.0, 1.0, 8).unwrap();
    let apex_point = cone.mesh.vertex_point(cone.apex).unwrap();
    assert_eq!(apex_point, Point3::new(0.0, 0.0, 1.0));
    let old_vertices: FxHashSet<VertexKey> = cone.mesh.vertex_keys().collect();
    let old_edges: FxHashSet<EdgeKey> = cone.mesh.edge_keys().collect();
    let apex_edges = cone.mesh.vertex_edges(cone.apex);
    assert_eq!(apex_edges.len(), 8);

    let mut scene = scene_with("Cone", cone.mesh);
    let outcome = invoke(&AddEdgeLoopToCone::default(), &mut scene);
    assert_eq!(outcome.status, Status::Finished);
    assert_eq!(outcome.message(), Some("Added edge loop at fraction 0.5"));

    let mesh = active(&scene);
    let new_vertices: Vec<VertexKey> = mesh.vertex_keys().filter(|v| !old_vertices.contains(v)).collect();
    let new_edges: Vec<EdgeKey> = mesh.edge_keys().filter(|e| !old_edges.contains(e)).collect();
    assert_eq!(new_vertices.len(), 8);
    assert_eq!(new_edges.len(), 16);
    for e in apex_edges {
        assert!(mesh.edge(e).is_none());
    }

    for &ring_vertex in &cone.ring {
        let expected = nalgebra::center(&apex_point, &mesh.vertex_point(ring_vertex).unwrap());
        let hit = new_vertices
            .iter()
            .filter_map(|&v| mesh.vertex_point(v))
            .any(|p| (p - expected).norm() < 1e-12);
        assert!(hit, "no new vertex at {expected:?}");
    }
    // Every new vertex sits between the apex and one ring vertex.
    for &v in &new_vertices {
        let neighbors = mesh.vertex_neighbors(v);
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.contains(&cone.apex));
    }
    // The side faces survive with the new vertices in their loops.
    assert_eq!(mesh.face_count(), 9);
}

#[test]
fn apex_bisection_respects_fraction_from_the_apex() {
    let cone = builders::cone(2.0, 1.0, 4).unwrap();
    let mut scene = scene_with("Cone", cone.mesh);
    let op = AddEdgeLoopToCone::new(ApexBisectParams {
        fraction: 0.25,
        auto_detect: true,
    });
    assert!(invoke(&op, &mut scene).is_finished());

    let mesh = active(&scene);
    for v in mesh.vertex_neighbors(cone.apex) {
        assert_relative_eq!(mesh.vertex_point(v).unwrap().z, 1.5, epsilon = 1e-12);
    }
}

#[test]
fn manual_apex_requires_a_single_selected_vertex() {
    let cone = builders::cone(1.0, 1.0, 8).unwrap();
    let before = cone.mesh.to_json().unwrap();
    let mut scene = scene_with("Cone", cone.mesh);
    let op = AddEdgeLoopToCone::new(ApexBisectParams {
        fraction: 0.5,
        auto_detect: false,
    });

    let outcome = invoke(&op, &mut scene);
    assert_eq!(outcome.status, Status::Cancelled);
    assert!(outcome.message().unwrap().starts_with("Select exactly 1 vertex as apex"));
    assert_eq!(active(&scene).to_json().unwrap(), before);
}

#[test]
fn operators_need_an_active_mesh() {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::new("Path", ObjectData::Curve));

    let outcome = invoke(&AddEdgeLoopToCone::default(), &mut scene);
    assert_eq!(outcome.status, Status::Cancelled);
    assert_eq!(outcome.message(), Some("Active object must be a mesh (found curve)"));

    scene.set_active(None);
    let outcome = invoke(&ConvertFanToLancet::default(), &mut scene);
    assert_eq!(outcome.message(), Some("No active object"));
}

/// A 6-triangle fan with one extra quad hanging off the rim, apex selected.
fn fan_with_neighbour() -> (EditMesh, VertexKey, Vec<VertexKey>) {
    let fan = builders::triangle_fan(1.0, 6).unwrap();
    let mut mesh = fan.mesh;
    let far: Vec<VertexKey> = fan.ring[..2]
        .iter()
        .map(|&v| {
            let p = mesh.vertex_point(v).unwrap();
            mesh.add_vertex(2.0 * p.x, 2.0 * p.y, 0.0)
        })
        .collect();
    let extra = mesh.add_face(&[fan.ring[0], far[0], far[1], fan.ring[1]]).unwrap();
    mesh.select_face(extra, true);
    mesh.select_vertex(fan.apex, true);
    (mesh, fan.apex, fan.ring)
}

#[test]
fn fan_to_lancet_rebuilds_center_fan_and_outer_ring() {
    let (mesh, apex, ring) = fan_with_neighbour();
    let spikes = mesh.vertex_edges(apex);
    assert_eq!(spikes.len(), 6);
    let old_vertices: FxHashSet<VertexKey> = mesh.vertex_keys().collect();

    let mut scene = scene_with("Fan", mesh);
    let outcome = invoke(&ConvertFanToLancet::default(), &mut scene);
    assert!(outcome.is_finished(), "{:?}", outcome.reports);

    let mesh = active(&scene);
    let middle: FxHashSet<VertexKey> = mesh.vertex_keys().filter(|v| !old_vertices.contains(v)).collect();
    assert_eq!(middle.len(), 6);
    for e in spikes {
        assert!(mesh.edge(e).is_none());
    }
    for &m in &middle {
        let p = mesh.vertex_point(m).unwrap();
        assert_relative_eq!(p.coords.norm(), 0.5, epsilon = 1e-12);
    }

    let faces: Vec<_> = mesh.face_keys().collect();
    let center: Vec<_> = faces
        .iter()
        .filter(|&&f| mesh.face_vertices(f).contains(&apex))
        .collect();
    let outer: Vec<_> = faces
        .iter()
        .filter(|&&f| {
            let loop_ = mesh.face_vertices(f);
            loop_.len() == 4 && loop_.iter().any(|v| middle.contains(v))
        })
        .collect();
    assert_eq!(center.len(), 6);
    assert_eq!(outer.len(), 6);
    for &&f in &center {
        assert_eq!(mesh.face_vertices(f).len(), 3);
        assert_relative_eq!(mesh.face_normal(f).unwrap().z, 1.0, epsilon = 1e-12);
    }
    for &&f in &outer {
        let outer_corners = mesh
            .face_vertices(f)
            .iter()
            .filter(|v| ring.contains(v))
            .count();
        assert_eq!(outer_corners, 2);
    }

    // Only faces touching the middle loop stay selected.
    let selected = mesh.selected_faces();
    assert_eq!(selected.len(), 12);
    for f in selected {
        assert!(mesh.face_vertices(f).iter().any(|v| middle.contains(v)));
    }
    assert!(mesh.selected_vertices().is_empty());
}

#[test]
fn fan_to_lancet_needs_faces_at_the_apex() {
    let mut mesh = EditMesh::new();
    let lone = mesh.add_vertex(0.0, 0.0, 0.0);
    let other = mesh.add_vertex(1.0, 0.0, 0.0);
    mesh.add_edge(lone, other).unwrap();
    mesh.select_vertex(lone, true);
    let mut scene = scene_with("Wire", mesh);

    let outcome = invoke(&ConvertFanToLancet::default(), &mut scene);
    assert_eq!(outcome.status, Status::Cancelled);
    assert_eq!(outcome.message(), Some("No faces share the apex"));

    let op = ConvertFanToLancet::new(FanToLancetParams { fraction: 0.0 });
    let outcome = invoke(&op, &mut scene);
    assert!(outcome.message().unwrap().starts_with("fraction = 0"));
}
