// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operator drivers.
//!
//! An operator validates its parameters and the scene, applies its edit to
//! the active object (or adds a new object), and returns a one-line status.
//! [`invoke`] wraps a run the way a host does: errors become a cancelled
//! outcome with an error report instead of propagating.

mod apex;
mod buttress;
mod fan;
mod lancet;

pub use apex::AddEdgeLoopToCone;
pub use buttress::{AddDivineFlyingButtress, AddFlyingButtress};
pub use fan::ConvertFanToLancet;
pub use lancet::ConvertInsetToLancetWindow;

use std::fmt;

use gothic_mesh::{EditMesh, Scene};
use tracing::{info, warn};

use crate::error::{OperatorError, Result};

/// An edit the user can run on the scene.
pub trait Operator {
    /// Stable identifier, e.g. `mesh.add_flying_buttress`.
    const ID: &'static str;
    /// Human-readable name.
    const LABEL: &'static str;

    /// Runs the operator and returns the status line on success.
    fn execute(&self, scene: &mut Scene) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Finished,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Error,
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLevel::Info => write!(f, "INFO"),
            ReportLevel::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub level: ReportLevel,
    pub message: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// What a host shows after running an operator.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorOutcome {
    pub status: Status,
    pub reports: Vec<Report>,
}

impl OperatorOutcome {
    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }

    /// The last report's message, if any.
    pub fn message(&self) -> Option<&str> {
        self.reports.last().map(|r| r.message.as_str())
    }
}

/// Runs an operator and turns its result into an [`OperatorOutcome`].
pub fn invoke<O: Operator>(operator: &O, scene: &mut Scene) -> OperatorOutcome {
    match operator.execute(scene) {
        Ok(message) => {
            info!(operator = O::ID, %message, "operator finished");
            OperatorOutcome {
                status: Status::Finished,
                reports: vec![Report {
                    level: ReportLevel::Info,
                    message,
                }],
            }
        }
        Err(err) => {
            warn!(operator = O::ID, error = %err, "operator cancelled");
            OperatorOutcome {
                status: Status::Cancelled,
                reports: vec![Report {
                    level: ReportLevel::Error,
                    message: err.to_string(),
                }],
            }
        }
    }
}

/// The active object's mesh, or the precondition error explaining why there is none.
pub(crate) fn active_mesh(scene: &mut Scene) -> Result<&mut EditMesh> {
    let object = scene.active_object_mut().ok_or(OperatorError::NoActiveObject)?;
    let kind = object.data.kind();
    object.mesh_mut().ok_or(OperatorError::NotAMesh(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gothic_mesh::{ObjectData, SceneObject};

    struct Echo(bool);

    impl Operator for Echo {
        const ID: &'static str = "test.echo";
        const LABEL: &'static str = "Echo";

        fn execute(&self, scene: &mut Scene) -> Result<String> {
            if self.0 {
                active_mesh(scene)?;
            }
            Ok("done".to_string())
        }
    }

    #[test]
    fn success_reports_info() {
        let mut scene = Scene::new();
        let outcome = invoke(&Echo(false), &mut scene);
        assert!(outcome.is_finished());
        assert_eq!(outcome.message(), Some("done"));
        assert_eq!(outcome.reports[0].to_string(), "[INFO] done");
    }

    #[test]
    fn missing_mesh_cancels() {
        let mut scene = Scene::new();
        let outcome = invoke(&Echo(true), &mut scene);
        assert_eq!(outcome.status, Status::Cancelled);
        assert_eq!(outcome.reports[0].level, ReportLevel::Error);
        assert_eq!(outcome.message(), Some("No active object"));

        scene.add_object(SceneObject::new("Path", ObjectData::Curve));
        let outcome = invoke(&Echo(true), &mut scene);
        assert!(outcome.message().unwrap().starts_with("Active object must be a mesh"));
    }
}
