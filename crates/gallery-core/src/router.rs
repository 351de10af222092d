use crate::navigation::NavigationIntent;
use crate::picking::{screen_to_ndc, Ray};
use crate::scene::{NodeId, Scene};
use crate::state::{Camera, Viewport};
use fnv::FnvHashMap;

/// Resolves pointer clicks to navigation intents.
///
/// Only the nearest intersection inside the ring subtree counts; anything
/// that is not a registered arrow is a no-op.
#[derive(Debug, Default)]
pub struct InputRouter {
    intents: FnvHashMap<NodeId, NavigationIntent>,
}

impl InputRouter {
    pub fn new(intents: FnvHashMap<NodeId, NavigationIntent>) -> Self {
        Self { intents }
    }

    #[inline]
    pub fn intent_for(&self, node: NodeId) -> Option<NavigationIntent> {
        self.intents.get(&node).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Nearest hit under `subtree`, mapped through the intent table.
    pub fn resolve_ray(&self, scene: &Scene, subtree: NodeId, ray: &Ray) -> Option<NavigationIntent> {
        let nearest = scene.raycast(subtree, ray).into_iter().next()?;
        let intent = self.intent_for(nearest.node);
        if intent.is_none() {
            log::debug!(
                "[click] nearest hit '{}' is not interactive",
                scene.node(nearest.node).name
            );
        }
        intent
    }

    /// Canvas pixel coordinates to an intent, if the click landed on an arrow.
    pub fn on_pointer_click(
        &self,
        scene: &Scene,
        subtree: Option<NodeId>,
        camera: &Camera,
        viewport: Viewport,
        sx: f32,
        sy: f32,
    ) -> Option<NavigationIntent> {
        let subtree = subtree?;
        let ndc = screen_to_ndc(sx, sy, viewport.width, viewport.height)?;
        let ray = camera.ray_from_ndc(ndc);
        self.resolve_ray(scene, subtree, &ray)
    }
}
