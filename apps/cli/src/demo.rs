// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixture scenes used when no `--input` is given.

use anyhow::Result;
use clap::ValueEnum;
use gothic_mesh::builders::{self, WindowOpening};
use gothic_mesh::{Scene, SceneObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    /// Rectangular inset window with its upper jambs selected
    Window,
    /// Eight-sided cone
    Cone,
    /// Six-triangle fan with its apex selected
    Fan,
}

pub fn scene(kind: DemoKind) -> Result<Scene> {
    let object = match kind {
        DemoKind::Window => SceneObject::mesh_object("Window", WindowOpening::default().build()?),
        DemoKind::Cone => SceneObject::mesh_object("Cone", builders::cone(1.0, 1.0, 8)?.mesh),
        DemoKind::Fan => {
            let mut fan = builders::triangle_fan(1.0, 6)?;
            fan.mesh.select_vertex(fan.apex, true);
            SceneObject::mesh_object("Fan", fan.mesh)
        }
    };
    let mut scene = Scene::new();
    scene.add_object(object);
    Ok(scene)
}
