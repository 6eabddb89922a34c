//! Runtime gizmo core types
//!
//! Scene graph, transforms, input and configuration shared by the gizmo
//! tools in `rg-gizmo`. Nothing here knows about picking or dragging.

pub mod bounds;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod scene;
pub mod transform;

pub use bounds::BoundingBox;
pub use config::{
    ConfigError, GizmoConfig, PickConfig, RotateConfig, RotateConvention, ScaleConfig,
    TranslateConfig, ViewConfig,
};
pub use error::GizmoError;
pub use input::{ButtonState, FrameInput, InputScript};
pub use scene::{
    Collider, GizmoSpace, LabelId, LayerMask, MaterialId, MeshRenderer, Node, NodeId, Scene,
};
pub use transform::Transform;
