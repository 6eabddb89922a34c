//! Setup errors for gizmo tools

use crate::scene::NodeId;

/// Configuration defects detected while wiring tools to a scene.
///
/// These are raised at construction; nothing in the per-tick path returns them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GizmoError {
    #[error("{tool}: node for '{role}' ({id}) is not in the scene")]
    MissingNode {
        tool: &'static str,
        role: &'static str,
        id: NodeId,
    },
    #[error("{tool}: node '{name}' has no mesh renderer")]
    MissingRenderer { tool: &'static str, name: String },
    #[error("{tool}: detector {index} is not registered with the pick system")]
    MissingDetector { tool: &'static str, index: usize },
    #[error("{tool}: label {index} was never created")]
    MissingLabel { tool: &'static str, index: usize },
    #[error("detector '{name}' has no target nodes")]
    EmptyTargets { name: String },
}
