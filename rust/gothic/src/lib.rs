// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Gothic Tools
//!
//! Mesh-editing operators for Gothic architecture, built on [`gothic_mesh`].
//!
//! The centerpiece is [`ConvertInsetToLancetWindow`], which turns the jambs
//! of a rectangular inset window into a pointed lancet profile:
//!
//! - [`classify`] splits the selected faces' edges into boundary, top and
//!   wall edges and detects the window's axes
//! - [`loopcut`] inserts edge loops between two edges while tracking which
//!   new faces and edges belong to the window [`region`]
//! - [`spacing`] moves the walls up linearly and sideways along an easing curve
//!
//! The smaller operators bisect the edges around a cone apex, rebuild a
//! triangle fan into a lancet, and generate flying buttresses.
//!
//! ```
//! use gothic_mesh::{builders::WindowOpening, Scene, SceneObject};
//! use gothic_tools::{invoke, ConvertInsetToLancetWindow};
//!
//! let mut scene = Scene::new();
//! let window = WindowOpening::default().build().unwrap();
//! scene.add_object(SceneObject::mesh_object("Window", window));
//!
//! let outcome = invoke(&ConvertInsetToLancetWindow::default(), &mut scene);
//! assert!(outcome.is_finished());
//! ```

pub mod classify;
pub mod error;
pub mod loopcut;
pub mod operators;
pub mod params;
pub mod primitives;
pub mod region;
pub mod spacing;

pub use classify::{Axes, Classification};
pub use error::{OperatorError, Result};
pub use loopcut::{loopcut_between, CutResult};
pub use operators::{
    invoke, AddDivineFlyingButtress, AddEdgeLoopToCone, AddFlyingButtress, ConvertFanToLancet,
    ConvertInsetToLancetWindow, Operator, OperatorOutcome, Report, ReportLevel, Status,
};
pub use params::{
    ApexBisectParams, Bounds, DivineButtressParams, FanToLancetParams, FlyingButtressParams,
    LancetParams,
};
pub use region::{EdgeRole, Region};
pub use spacing::WallSpacer;
