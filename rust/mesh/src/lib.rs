// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Gothic Mesh
//!
//! Editable polygon mesh for the Gothic modelling tools.
//!
//! This crate models the parts of a modelling host the tools depend on: an
//! arena-based mesh whose vertices, edges and faces live in slot maps with
//! upward adjacency indices, per-element selection flags, a scene with an
//! active object, and host commands (loop cut, consistent normals) that run
//! behind an explicit submit/await barrier.
//!
//! ```
//! use gothic_mesh::{builders, Command, CommandHost, CommandOutcome};
//!
//! let mut cone = builders::cone(1.0, 1.0, 8).unwrap();
//! let outcome = cone.mesh.run(Command::RecalculateNormals { inside: false }).unwrap();
//! assert_eq!(outcome, CommandOutcome::Normals { flipped: 0 });
//! ```

pub mod arena;
pub mod builders;
pub mod commands;
pub mod construction;
pub mod error;
pub mod geometry;
pub mod keys;
pub mod scene;
pub mod selection;
pub mod serialization;
pub mod transform;
pub mod traversal;

pub use arena::{EdgeData, EditMesh, FaceData, VertexData};
pub use commands::{Command, CommandHost, CommandOutcome, LoopCutOutcome, Ticket};
pub use error::{Error, Result};
pub use keys::{EdgeKey, ElementKey, FaceKey, VertexKey};
pub use scene::{ObjectData, Scene, SceneObject};
pub use serialization::{MeshSnapshot, SceneSnapshot};
