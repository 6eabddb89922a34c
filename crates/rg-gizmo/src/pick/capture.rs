//! Exclusive ownership of the current drag gesture

use rg_core::{MaterialId, NodeId, Scene};

use super::DetectorId;

/// Materials swapped out for the highlight while one detector holds the drag.
///
/// Created when a detector captures a press and consumed when the press ends,
/// so no highlight state outlives the gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    owner: DetectorId,
    saved: Vec<(NodeId, MaterialId)>,
}

impl DragSession {
    /// Highlight every enabled renderer under `targets`, remembering what was there
    pub fn highlight(
        owner: DetectorId,
        scene: &mut Scene,
        targets: &[NodeId],
        highlight: MaterialId,
    ) -> Self {
        let mut saved: Vec<(NodeId, MaterialId)> = Vec::new();
        for &target in targets {
            for node in scene.descendants(target) {
                if saved.iter().any(|(n, _)| *n == node) {
                    continue;
                }
                let Some(renderer) = scene.renderer_mut(node) else {
                    continue;
                };
                if !renderer.enabled {
                    continue;
                }
                saved.push((node, renderer.material));
                renderer.material = highlight;
            }
        }
        Self { owner, saved }
    }

    /// Detector that captured the press
    pub fn owner(&self) -> DetectorId {
        self.owner
    }

    /// Renderers and the materials they had before highlighting
    pub fn saved(&self) -> &[(NodeId, MaterialId)] {
        &self.saved
    }

    /// Put every saved material back. Returns how many renderers were restored.
    pub(super) fn restore(self, scene: &mut Scene) -> usize {
        let mut restored = 0;
        for (node, material) in self.saved {
            if let Some(renderer) = scene.renderer_mut(node) {
                renderer.material = material;
                restored += 1;
            }
        }
        restored
    }
}

/// Arbitrates which detector, if any, owns the current press.
///
/// Owned by the pick system and lent to each detector as it updates; at most
/// one [`DragSession`] exists at a time.
#[derive(Debug, Default)]
pub struct CaptureArbiter {
    session: Option<DragSession>,
}

impl CaptureArbiter {
    /// Create an arbiter with nothing captured
    pub fn new() -> Self {
        Self::default()
    }

    /// True while some detector owns the press
    pub fn is_captured(&self) -> bool {
        self.session.is_some()
    }

    /// Detector that owns the press
    pub fn owner(&self) -> Option<DetectorId> {
        self.session.as_ref().map(DragSession::owner)
    }

    /// Current session, if any
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Take the capture. Refused (returns the session back) if already held.
    pub fn begin(&mut self, session: DragSession) -> Result<(), DragSession> {
        if self.session.is_some() {
            return Err(session);
        }
        tracing::info!(
            "Detector {} captured the press ({} renderers highlighted)",
            session.owner.0,
            session.saved.len()
        );
        self.session = Some(session);
        Ok(())
    }

    /// End the capture held by `owner`, restoring its materials.
    ///
    /// Returns false if `owner` does not hold the capture.
    pub fn end(&mut self, owner: DetectorId, scene: &mut Scene) -> bool {
        if self.owner() != Some(owner) {
            return false;
        }
        if let Some(session) = self.session.take() {
            let restored = session.restore(scene);
            tracing::info!(
                "Detector {} released the press ({} renderers restored)",
                owner.0,
                restored
            );
        }
        true
    }

    /// Drop whatever capture exists, restoring its materials
    pub fn force_release(&mut self, scene: &mut Scene) -> Option<DetectorId> {
        let session = self.session.take()?;
        let owner = session.owner;
        let restored = session.restore(scene);
        tracing::warn!(
            "Force-released capture held by detector {} ({} renderers restored)",
            owner.0,
            restored
        );
        Some(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_core::{BoundingBox, MeshRenderer, Node};

    fn scene_with_handle() -> (Scene, NodeId, NodeId, MaterialId, MaterialId) {
        let mut scene = Scene::new();
        let base = scene.create_material("red");
        let highlight = scene.create_material("highlight");
        let bounds = BoundingBox::from_center_half_extents(glam::Vec3::ZERO, glam::Vec3::ONE);
        let root = scene.insert(Node::new("handle").with_renderer(MeshRenderer::new(base, bounds)));
        let child = scene
            .insert_child(root, Node::new("tip").with_renderer(MeshRenderer::new(base, bounds)))
            .unwrap();
        (scene, root, child, base, highlight)
    }

    #[test]
    fn test_highlight_and_restore() {
        let (mut scene, root, child, base, highlight) = scene_with_handle();
        let mut arbiter = CaptureArbiter::new();
        let session = DragSession::highlight(DetectorId(0), &mut scene, &[root], highlight);
        assert_eq!(session.saved().len(), 2);
        assert!(arbiter.begin(session).is_ok());
        assert_eq!(scene.renderer(child).unwrap().material, highlight);

        assert!(!arbiter.end(DetectorId(1), &mut scene));
        assert!(arbiter.end(DetectorId(0), &mut scene));
        assert!(!arbiter.is_captured());
        assert_eq!(scene.renderer(root).unwrap().material, base);
        assert_eq!(scene.renderer(child).unwrap().material, base);
    }

    #[test]
    fn test_overlapping_targets_restore_original() {
        let (mut scene, root, child, base, highlight) = scene_with_handle();
        let mut arbiter = CaptureArbiter::new();
        let session = DragSession::highlight(DetectorId(0), &mut scene, &[root, child], highlight);
        assert_eq!(session.saved().len(), 2);
        arbiter.begin(session).unwrap();
        arbiter.force_release(&mut scene);
        assert_eq!(scene.renderer(child).unwrap().material, base);
    }

    #[test]
    fn test_disabled_renderer_is_not_highlighted() {
        let (mut scene, root, child, base, highlight) = scene_with_handle();
        scene.set_renderer_enabled(child, false);
        let session = DragSession::highlight(DetectorId(0), &mut scene, &[root], highlight);
        assert_eq!(session.saved(), &[(root, base)]);
        assert_eq!(scene.renderer(child).unwrap().material, base);
    }

    #[test]
    fn test_second_capture_refused() {
        let (mut scene, root, _, _, highlight) = scene_with_handle();
        let mut arbiter = CaptureArbiter::new();
        let first = DragSession::highlight(DetectorId(0), &mut scene, &[root], highlight);
        arbiter.begin(first).unwrap();
        let second = DragSession::highlight(DetectorId(1), &mut scene, &[], highlight);
        assert!(arbiter.begin(second).is_err());
        assert_eq!(arbiter.owner(), Some(DetectorId(0)));
    }

    #[test]
    fn test_empty_session_still_releases() {
        let mut scene = Scene::new();
        let highlight = scene.create_material("highlight");
        let mut arbiter = CaptureArbiter::new();
        let session = DragSession::highlight(DetectorId(3), &mut scene, &[], highlight);
        arbiter.begin(session).unwrap();
        assert!(arbiter.end(DetectorId(3), &mut scene));
        assert!(!arbiter.is_captured());
    }
}
