use crate::builder::{self, BuildOptions, GalleryRing};
use crate::catalog::Catalog;
use crate::config::{GalleryConfig, Mode};
use crate::error::AssetError;
use crate::label::{LabelEvent, LabelState};
use crate::navigation::{
    Direction, IgnoreReason, LabelEvents, NavigateOutcome, NavigationContext,
    NavigationController, NavigationState,
};
use crate::router::InputRouter;
use crate::scene::{NodeId, Reflector, Scene, TextureId};
use crate::state::{Camera, Viewport};
use crate::texture::{DecodedImage, TextureSlots};
use std::time::Duration;

/// The whole carousel: scene, ring, navigation, input routing and viewport.
///
/// The frontend owns one of these, calls [`Gallery::tick`] once per frame
/// before drawing, and forwards clicks, resizes and texture loads.
pub struct Gallery {
    catalog: Catalog,
    config: GalleryConfig,
    scene: Scene,
    ring: Option<GalleryRing>,
    light: NodeId,
    reflector: NodeId,
    router: InputRouter,
    navigation: NavigationController,
    textures: TextureSlots,
    camera: Camera,
    viewport: Viewport,
    label: LabelState,
}

impl Gallery {
    pub fn new(catalog: Catalog, config: GalleryConfig, viewport: Viewport) -> Self {
        let mut scene = Scene::new();
        let built = builder::build(
            &mut scene,
            &catalog,
            BuildOptions {
                with_arrows: config.navigation_enabled(),
            },
            viewport,
        );

        let mut textures = TextureSlots::new(catalog.len());
        for (i, entry) in catalog.iter().enumerate() {
            if entry.image_ref.trim().is_empty() {
                let reference = format!("entry {} ({})", i, entry.title);
                textures.resolve(TextureId(i), &reference, Err(AssetError::EmptyReference));
            }
        }

        let label = catalog.get(0).map(LabelState::showing).unwrap_or_default();
        let navigation = NavigationController::new(catalog.len(), config.transition, config.easing);

        Self {
            camera: Camera::gallery(viewport.aspect()),
            router: InputRouter::new(built.intents),
            ring: built.ring,
            light: built.light,
            reflector: built.reflector,
            catalog,
            config,
            scene,
            navigation,
            textures,
            viewport,
            label,
        }
    }

    /// Per-frame update. Returns label changes in the order they happened.
    pub fn tick(&mut self, dt: Duration) -> LabelEvents {
        let mut events = LabelEvents::new();
        let ring_root = self.ring_root();
        match self.config.mode {
            Mode::Idle => {
                self.navigation
                    .spin(self.config.idle_spin_per_frame, &mut self.scene, ring_root);
            }
            Mode::Interactive => {
                let ctx = NavigationContext {
                    scene: &mut self.scene,
                    ring_root,
                    label: &mut self.label,
                    catalog: &self.catalog,
                };
                self.navigation.advance(dt, ctx, &mut events);
            }
        }
        events
    }

    pub fn navigate(&mut self, direction: Direction, target: usize) -> (NavigateOutcome, LabelEvents) {
        let mut events = LabelEvents::new();
        if self.config.mode == Mode::Idle {
            return (NavigateOutcome::Ignored(IgnoreReason::IdleMode), events);
        }
        let ctx = NavigationContext {
            ring_root: self.ring_root(),
            scene: &mut self.scene,
            label: &mut self.label,
            catalog: &self.catalog,
        };
        let outcome = self.navigation.navigate(direction, target, ctx, &mut events);
        (outcome, events)
    }

    /// Route a click in canvas pixels. `None` when nothing navigable was hit.
    pub fn click(&mut self, sx: f32, sy: f32) -> Option<(NavigateOutcome, LabelEvents)> {
        if self.config.mode == Mode::Idle {
            return None;
        }
        let intent = self.router.on_pointer_click(
            &self.scene,
            self.ring_root(),
            &self.camera,
            self.viewport,
            sx,
            sy,
        )?;
        log::info!("[click] {:?} arrow -> {}", intent.direction, intent.target);
        Some(self.navigate(intent.direction, intent.target))
    }

    /// Adapt camera, output surface and reflection target to a new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        if viewport.is_empty() || viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        if let Some(r) = self.scene.reflector_mut(self.reflector) {
            r.target_width = width;
            r.target_height = height;
        }
        log::debug!("[resize] {}x{} aspect={:.3}", width, height, self.camera.aspect);
    }

    pub fn resolve_texture(&mut self, index: usize, result: Result<DecodedImage, AssetError>) {
        let reference = self
            .catalog
            .get(index)
            .map(|e| e.image_ref.as_str())
            .unwrap_or("<unknown>");
        self.textures.resolve(TextureId(index), reference, result);
    }

    /// Replay the current label as a single reveal, for initial DOM sync.
    pub fn label_snapshot(&self) -> LabelEvent {
        if self.label.is_visible() {
            LabelEvent::Reveal {
                title: self.label.title.clone(),
                artist: self.label.artist.clone(),
            }
        } else {
            LabelEvent::Hide
        }
    }

    #[inline]
    pub fn ring_root(&self) -> Option<NodeId> {
        self.ring.as_ref().map(|r| r.root)
    }

    #[inline]
    pub fn ring(&self) -> Option<&GalleryRing> {
        self.ring.as_ref()
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn label(&self) -> &LabelState {
        &self.label
    }

    #[inline]
    pub fn navigation_state(&self) -> NavigationState {
        self.navigation.state()
    }

    #[inline]
    pub fn textures(&self) -> &TextureSlots {
        &self.textures
    }

    #[inline]
    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    #[inline]
    pub fn light(&self) -> NodeId {
        self.light
    }

    #[inline]
    pub fn reflector_node(&self) -> NodeId {
        self.reflector
    }

    pub fn reflector(&self) -> Option<&Reflector> {
        self.scene.reflector(self.reflector)
    }
}
