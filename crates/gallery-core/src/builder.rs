//! Builds the ring of framed panels plus light and reflective floor.

use crate::catalog::Catalog;
use crate::constants::*;
use crate::navigation::{Direction, NavigationIntent};
use crate::scene::{
    Geometry, Glyph, Material, Mesh, Node, NodeId, NodeKind, Reflector, Scene, SpotLight,
    TextureId, Transform,
};
use crate::state::Viewport;
use fnv::FnvHashMap;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Angular offset of slot `i` on a ring of `n` panels.
#[inline]
pub fn slot_angle(i: usize, n: usize) -> f32 {
    i as f32 * (TAU / n as f32)
}

/// Angle between two neighbouring slots.
#[inline]
pub fn slot_step(n: usize) -> f32 {
    TAU / n as f32
}

#[inline]
pub fn previous_index(i: usize, n: usize) -> usize {
    (i + n - 1) % n
}

#[inline]
pub fn next_index(i: usize, n: usize) -> usize {
    (i + 1) % n
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrowPair {
    pub previous: NodeId,
    pub next: NodeId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PanelSlot {
    pub index: usize,
    pub angle: f32,
    pub base: NodeId,
    pub border: NodeId,
    pub artwork: NodeId,
    pub arrows: Option<ArrowPair>,
}

/// Evenly spaced panels hanging from a single rotatable root.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryRing {
    pub root: NodeId,
    pub slots: Vec<PanelSlot>,
}

impl GalleryRing {
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BuildOptions {
    pub with_arrows: bool,
}

/// Handles produced by [`build`] for the other components.
#[derive(Debug)]
pub struct BuiltScene {
    /// `None` when the catalog is empty.
    pub ring: Option<GalleryRing>,
    pub light: NodeId,
    pub reflector: NodeId,
    pub intents: FnvHashMap<NodeId, NavigationIntent>,
}

pub fn build(
    scene: &mut Scene,
    catalog: &Catalog,
    options: BuildOptions,
    viewport: Viewport,
) -> BuiltScene {
    let mut intents = FnvHashMap::default();
    let ring = if catalog.is_empty() {
        log::warn!("[gallery] empty catalog; skipping ring construction");
        None
    } else {
        Some(build_ring(scene, catalog, options, &mut intents))
    };

    let light = scene.add(
        scene.root(),
        Node::new(
            "spotlight",
            Transform::from_translation(spot_position_vec3()),
            NodeKind::SpotLight(SpotLight {
                color: [1.0, 1.0, 1.0],
                intensity: SPOT_INTENSITY,
                distance: SPOT_DISTANCE,
                angle: SPOT_ANGLE,
                penumbra: SPOT_PENUMBRA,
                decay: SPOT_DECAY,
                target: spot_target_vec3(),
            }),
        ),
    );

    // Disc lies in local XY; tip it flat so it faces up.
    let reflector = scene.add(
        scene.root(),
        Node::new(
            "reflector",
            Transform {
                translation: Vec3::new(0.0, REFLECTOR_Y, 0.0),
                rotation: Vec3::new(-FRAC_PI_2, 0.0, 0.0),
            },
            NodeKind::Reflector(Reflector {
                radius: REFLECTOR_RADIUS,
                color: REFLECTOR_COLOR,
                target_width: viewport.width,
                target_height: viewport.height,
            }),
        ),
    );

    log::info!(
        "[gallery] built {} panels (arrows={}) nodes={}",
        catalog.len(),
        options.with_arrows,
        scene.len()
    );

    BuiltScene {
        ring,
        light,
        reflector,
        intents,
    }
}

fn build_ring(
    scene: &mut Scene,
    catalog: &Catalog,
    options: BuildOptions,
    intents: &mut FnvHashMap<NodeId, NavigationIntent>,
) -> GalleryRing {
    let n = catalog.len();
    let root = scene.add(scene.root(), Node::group("ring", Transform::default()));
    let forward = Vec3::new(0.0, 0.0, PANEL_FORWARD_Z);

    let slots = (0..n)
        .map(|i| {
            let angle = slot_angle(i, n);
            // Laid out against the turn direction: a ring angle of `angle` faces slot i.
            let base = scene.add(
                root,
                Node::group(format!("slot-{i}"), Transform::from_rotation_y(-angle)),
            );
            let border = scene.add(
                base,
                Node::new(
                    format!("border-{i}"),
                    Transform::from_translation(forward),
                    NodeKind::Mesh(Mesh {
                        geometry: Geometry::cuboid(BORDER_SIZE),
                        material: Material::solid(BORDER_COLOR),
                    }),
                ),
            );
            let artwork = scene.add(
                base,
                Node::new(
                    format!("artwork-{i}"),
                    Transform::from_translation(forward),
                    NodeKind::Mesh(Mesh {
                        geometry: Geometry::cuboid(ARTWORK_SIZE),
                        material: Material {
                            color: ARTWORK_FALLBACK_COLOR,
                            texture: Some(TextureId(i)),
                            glyph: Glyph::None,
                        },
                    }),
                ),
            );
            let arrows = options.with_arrows.then(|| {
                let previous = add_arrow(scene, base, i, Direction::Previous);
                let next = add_arrow(scene, base, i, Direction::Next);
                intents.insert(
                    previous,
                    NavigationIntent {
                        direction: Direction::Previous,
                        target: previous_index(i, n),
                    },
                );
                intents.insert(
                    next,
                    NavigationIntent {
                        direction: Direction::Next,
                        target: next_index(i, n),
                    },
                );
                ArrowPair { previous, next }
            });
            PanelSlot {
                index: i,
                angle,
                base,
                border,
                artwork,
                arrows,
            }
        })
        .collect();

    GalleryRing { root, slots }
}

fn add_arrow(scene: &mut Scene, base: NodeId, i: usize, direction: Direction) -> NodeId {
    let (name, x, glyph) = match direction {
        Direction::Previous => (format!("arrow-prev-{i}"), -ARROW_OFFSET_X, Glyph::ChevronLeft),
        Direction::Next => (format!("arrow-next-{i}"), ARROW_OFFSET_X, Glyph::ChevronRight),
    };
    scene.add(
        base,
        Node::new(
            name,
            Transform::from_translation(Vec3::new(x, 0.0, PANEL_FORWARD_Z)),
            NodeKind::Mesh(Mesh {
                geometry: Geometry::cuboid(ARROW_SIZE),
                material: Material {
                    color: ARROW_COLOR,
                    texture: None,
                    glyph,
                },
            }),
        ),
    )
}
