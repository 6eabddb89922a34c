//! Runtime transform gizmos
//!
//! Pick detection with an exclusive capture latch, plus translate, rotate,
//! scale and view-cube tools driven by polled per-tick input.
//!
//! Each tick runs in two phases: [`PickSystem::update`] hit-tests the pointer
//! against handle colliders and settles which detector owns the press, then
//! each tool reads its detectors and mutates the scene. [`GizmoSuite`] runs
//! both phases for a rig built by [`GizmoRig::build`].

pub mod axis;
pub mod camera;
pub mod collision;
pub mod constants;
pub mod pick;
pub mod rig;
pub mod suite;
pub mod tools;

#[cfg(test)]
mod testing;

pub use axis::{Axis, AxisDrive, PointerComponent};
pub use camera::PickingCamera;
pub use collision::{Ray, RaycastHit, raycast_all};
pub use pick::{CaptureArbiter, DetectorId, DragSession, PickDetector, PickSystem};
pub use rig::{GizmoRig, RigNodes};
pub use suite::{GizmoSuite, ToolKind};
pub use tools::{
    GizmoTool, RotateTool, ScaleHandle, ScaleTool, ToolAction, ToolContext, TranslateTool,
    ViewFace, ViewFaceHandle, ViewTool,
};
