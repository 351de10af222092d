// Host-side tests for click routing through the camera and scene.

use gallery_core::picking::Ray;
use gallery_core::*;
use glam::{Vec3, Vec4};

const W: u32 = 1600;
const H: u32 = 900;

fn make_gallery() -> Gallery {
    Gallery::new(
        Catalog::default_collection(),
        GalleryConfig::default(),
        Viewport::new(W, H),
    )
}

/// Project a world point to canvas pixels with the gallery camera.
fn to_screen(g: &Gallery, p: Vec3) -> (f32, f32) {
    let clip = g.camera().view_proj() * Vec4::new(p.x, p.y, p.z, 1.0);
    let ndc = clip.truncate() / clip.w;
    let vp = g.viewport();
    (
        (ndc.x + 1.0) * 0.5 * vp.width as f32,
        (1.0 - ndc.y) * 0.5 * vp.height as f32,
    )
}

fn arrow_screen(g: &Gallery, slot: usize, next: bool) -> (f32, f32) {
    let arrows = g.ring().unwrap().slots[slot].arrows.unwrap();
    let node = if next { arrows.next } else { arrows.previous };
    to_screen(g, g.scene().world_position(node))
}

#[test]
fn clicking_next_arrow_navigates_forward() {
    let mut g = make_gallery();
    let (sx, sy) = arrow_screen(&g, 0, true);
    assert!(sx > W as f32 / 2.0);
    let (outcome, events) = g.click(sx, sy).expect("arrow hit");
    match outcome {
        NavigateOutcome::Started { target, .. } => assert_eq!(target, 1),
        other => panic!("expected start, got {other:?}"),
    }
    assert_eq!(events.as_slice(), &[LabelEvent::Hide]);
}

#[test]
fn clicking_previous_arrow_wraps_to_last() {
    let mut g = make_gallery();
    let (sx, sy) = arrow_screen(&g, 0, false);
    assert!(sx < W as f32 / 2.0);
    let (outcome, _) = g.click(sx, sy).expect("arrow hit");
    assert!(matches!(outcome, NavigateOutcome::Started { target: 5, .. }));
}

#[test]
fn clicking_artwork_or_empty_space_does_nothing() {
    let mut g = make_gallery();
    // Dead center is the front artwork.
    assert!(g.click(W as f32 / 2.0, H as f32 / 2.0).is_none());
    // Above every panel.
    assert!(g.click(W as f32 / 2.0, 5.0).is_none());
    assert!(!g.navigation_state().in_flight);
    assert_eq!(g.label().opacity, 1.0);
}

#[test]
fn malformed_coordinates_are_ignored() {
    let mut g = make_gallery();
    assert!(g.click(f32::NAN, 10.0).is_none());
    assert!(g.click(10.0, f32::INFINITY).is_none());
    assert!(g.click(-1.0, 10.0).is_none());
    assert!(g.click(W as f32 + 1.0, 10.0).is_none());
    assert!(!g.navigation_state().in_flight);
}

#[test]
fn only_the_nearest_hit_counts() {
    let g = make_gallery();
    let root = g.ring_root().unwrap();
    // Straight through slot 0's next arrow and, further on, slot 3's previous arrow.
    let ray = Ray::new(Vec3::new(ARROW_OFFSET_X, 0.0, -10.0), Vec3::Z);

    let hits = g.scene().raycast(root, &ray);
    assert_eq!(hits.len(), 2);
    assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    let slot0 = g.ring().unwrap().slots[0].arrows.unwrap();
    let slot3 = g.ring().unwrap().slots[3].arrows.unwrap();
    assert_eq!(hits[0].node, slot0.next);
    assert_eq!(hits[1].node, slot3.previous);

    let intent = g.router().resolve_ray(g.scene(), root, &ray).unwrap();
    assert_eq!(intent.direction, Direction::Next);
    assert_eq!(intent.target, 1);
}

/// Slot whose artwork sits closest to the spot straight ahead of the camera.
fn front_slot(g: &Gallery) -> usize {
    let front = Vec3::new(0.0, 0.0, PANEL_FORWARD_Z);
    let ring = g.ring().unwrap();
    let slot = ring
        .slots
        .iter()
        .min_by(|a, b| {
            let da = (g.scene().world_position(a.artwork) - front).length();
            let db = (g.scene().world_position(b.artwork) - front).length();
            da.total_cmp(&db)
        })
        .unwrap();
    assert!((g.scene().world_position(slot.artwork) - front).length() < 1e-3);
    slot.index
}

fn settle(g: &mut Gallery) {
    while g.navigation_state().in_flight {
        g.tick(std::time::Duration::from_millis(16));
    }
}

#[test]
fn facing_panel_matches_the_caption() {
    let mut g = make_gallery();
    assert_eq!(front_slot(&g), 0);

    g.navigate(Direction::Next, 1);
    settle(&mut g);
    assert_eq!(front_slot(&g), 1);
    assert_eq!(g.label().title, g.catalog().entry(1).title);

    g.navigate(Direction::Previous, 0);
    settle(&mut g);
    g.navigate(Direction::Previous, 5);
    settle(&mut g);
    let current = g.navigation_state().current_index;
    assert_eq!(current, 5);
    assert_eq!(front_slot(&g), current);
    assert_eq!(g.label().title, g.catalog().entry(current).title);
    assert_eq!(g.label().title, "A Sunday on La Grande Jatte");

    g.navigate(Direction::Next, 0);
    settle(&mut g);
    assert_eq!(front_slot(&g), 0);
    assert_eq!(g.label().title, g.catalog().entry(0).title);
}

#[test]
fn arrows_follow_the_ring_after_rotation() {
    let mut g = make_gallery();
    g.navigate(Direction::Next, 1);
    settle(&mut g);
    let slot = front_slot(&g);

    let (sx, sy) = arrow_screen(&g, slot, true);
    assert!(sx > W as f32 / 2.0);
    let (outcome, _) = g.click(sx, sy).expect("arrow hit");
    match outcome {
        NavigateOutcome::Started { target, .. } => assert_eq!(target, (slot + 1) % 6),
        other => panic!("expected start, got {other:?}"),
    }
}

#[test]
fn camera_ray_through_center_points_down_negative_z() {
    let g = make_gallery();
    let ray = g.camera().ray_from_ndc(glam::Vec2::ZERO);
    assert!(ray.origin.length() < 1e-6);
    assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
}
