// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene objects and the active-object pointer.
//!
//! Operators act on the active object. Only mesh objects carry edit data;
//! curves and empties exist so that "wrong object type" can be reported.

use crate::arena::EditMesh;

/// Payload of a scene object.
#[derive(Debug, Clone)]
pub enum ObjectData {
    Mesh(EditMesh),
    Curve,
    Empty,
}

impl ObjectData {
    /// Lower-case type name, as used in snapshots and status lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ObjectData::Mesh(_) => "mesh",
            ObjectData::Curve => "curve",
            ObjectData::Empty => "empty",
        }
    }
}

/// A named object in the scene.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub data: ObjectData,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Convenience constructor for a mesh object.
    pub fn mesh_object(name: impl Into<String>, mesh: EditMesh) -> Self {
        Self::new(name, ObjectData::Mesh(mesh))
    }

    pub fn mesh(&self) -> Option<&EditMesh> {
        match &self.data {
            ObjectData::Mesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn mesh_mut(&mut self) -> Option<&mut EditMesh> {
        match &mut self.data {
            ObjectData::Mesh(m) => Some(m),
            _ => None,
        }
    }
}

/// The set of objects an operator can see, plus which one is active.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    active: Option<usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object and makes it the active one. Returns its index.
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        let index = self.objects.len() - 1;
        self.active = Some(index);
        index
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Changes the active object. Returns `false` (and leaves the active
    /// object unchanged) if `index` is out of range.
    pub fn set_active(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.objects.len() => false,
            _ => {
                self.active = index;
                true
            }
        }
    }

    pub fn active_object(&self) -> Option<&SceneObject> {
        self.active.and_then(|i| self.objects.get(i))
    }

    pub fn active_object_mut(&mut self) -> Option<&mut SceneObject> {
        self.active.and_then(|i| self.objects.get_mut(i))
    }

    /// Looks up an object by name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name == name)
    }
}
