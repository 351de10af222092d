// Host-side tests for catalog handling and ring construction.

use gallery_core::builder::{next_index, previous_index, slot_angle};
use gallery_core::navigation::Direction;
use gallery_core::scene::NodeKind;
use gallery_core::*;
use std::f32::consts::TAU;

fn catalog_of(n: usize) -> Catalog {
    let images: Vec<String> = (0..n).map(|i| format!("/img{i}.jpg")).collect();
    let titles: Vec<String> = (0..n).map(|i| format!("Title {i}")).collect();
    let artists: Vec<String> = (0..n).map(|i| format!("Artist {i}")).collect();
    Catalog::from_parallel(&images, &titles, &artists).unwrap()
}

fn make_gallery(n: usize) -> Gallery {
    Gallery::new(catalog_of(n), GalleryConfig::default(), Viewport::new(1600, 900))
}

#[test]
fn default_collection_is_aligned() {
    let c = Catalog::default_collection();
    assert_eq!(c.len(), 6);
    assert_eq!(c.entry(0).title, "The Death of Socrates");
    assert_eq!(c.entry(0).artist, "Jacques-Louis David");
    assert_eq!(c.entry(5).image_ref, "/sunday.jpg");
    assert_eq!(c.entry(5).artist, "George Seurat");
}

#[test]
fn misaligned_lists_are_rejected() {
    let err = Catalog::from_parallel(&["a", "b"], &["t"], &["x", "y"]).unwrap_err();
    assert_eq!(
        err,
        GalleryError::CatalogMisaligned {
            images: 2,
            titles: 1,
            artists: 2
        }
    );
}

#[test]
#[should_panic]
fn out_of_range_entry_is_a_programming_error() {
    let c = catalog_of(3);
    let _ = c.entry(3);
}

#[test]
fn slot_offsets_are_evenly_spaced() {
    for n in 1..=12 {
        let g = make_gallery(n);
        let ring = g.ring().unwrap();
        assert_eq!(ring.len(), n);
        for (i, slot) in ring.slots.iter().enumerate() {
            let expected = i as f32 * TAU / n as f32;
            assert!((slot.angle - expected).abs() < 1e-6, "n={n} i={i}");
            assert_eq!(slot.angle, slot_angle(i, n));
            assert_eq!(g.scene().rotation_y(slot.base), slot.angle);
        }
        for pair in ring.slots.windows(2) {
            let step = pair[1].angle - pair[0].angle;
            assert!((step - TAU / n as f32).abs() < 1e-5, "n={n}");
        }
    }
}

#[test]
fn panels_share_the_ring_root() {
    let g = make_gallery(6);
    let ring = g.ring().unwrap();
    let root = g.scene().node(ring.root);
    assert_eq!(root.children().len(), 6);
    for slot in &ring.slots {
        assert_eq!(g.scene().node(slot.base).parent(), Some(ring.root));
        assert_eq!(g.scene().node(slot.artwork).parent(), Some(slot.base));
        assert_eq!(g.scene().node(slot.border).parent(), Some(slot.base));
    }
    // Light and floor do not spin with the ring.
    assert_eq!(g.scene().node(g.light()).parent(), Some(g.scene().root()));
    assert_eq!(
        g.scene().node(g.reflector_node()).parent(),
        Some(g.scene().root())
    );
}

#[test]
fn arrow_payloads_wrap_around() {
    let n = 6;
    let g = make_gallery(n);
    let ring = g.ring().unwrap();
    for slot in &ring.slots {
        let arrows = slot.arrows.expect("interactive mode builds arrows");
        let prev = g.router().intent_for(arrows.previous).unwrap();
        let next = g.router().intent_for(arrows.next).unwrap();
        assert_eq!(prev.direction, Direction::Previous);
        assert_eq!(next.direction, Direction::Next);
        assert_eq!(prev.target, (slot.index + n - 1) % n);
        assert_eq!(next.target, (slot.index + 1) % n);
    }
    assert_eq!(previous_index(0, n), 5);
    assert_eq!(next_index(n - 1, n), 0);
    let first = ring.slots[0].arrows.unwrap();
    let last = ring.slots[n - 1].arrows.unwrap();
    assert_eq!(g.router().intent_for(first.previous).unwrap().target, 5);
    assert_eq!(g.router().intent_for(last.next).unwrap().target, 0);
}

#[test]
fn single_panel_ring_points_at_itself() {
    let g = make_gallery(1);
    let arrows = g.ring().unwrap().slots[0].arrows.unwrap();
    assert_eq!(g.router().intent_for(arrows.previous).unwrap().target, 0);
    assert_eq!(g.router().intent_for(arrows.next).unwrap().target, 0);
}

#[test]
fn artwork_sits_in_front_of_its_border() {
    let g = make_gallery(6);
    let slot = &g.ring().unwrap().slots[0];
    let art = g.scene().world_position(slot.artwork);
    assert!((art.z - PANEL_FORWARD_Z).abs() < 1e-6);
    match &g.scene().node(slot.artwork).kind {
        NodeKind::Mesh(mesh) => assert_eq!(mesh.material.texture, Some(TextureId(0))),
        other => panic!("artwork is not a mesh: {other:?}"),
    }
}

#[test]
fn idle_mode_builds_no_arrows() {
    let cfg = GalleryConfig {
        mode: Mode::Idle,
        ..GalleryConfig::default()
    };
    let g = Gallery::new(catalog_of(4), cfg, Viewport::new(800, 600));
    assert!(g.router().is_empty());
    assert!(g.ring().unwrap().slots.iter().all(|s| s.arrows.is_none()));
}

#[test]
fn empty_catalog_renders_an_empty_scene() {
    let mut g = make_gallery(0);
    assert!(g.ring().is_none());
    assert!(g.scene().draw_list().is_empty());
    assert!(g.reflector().is_some());
    assert!(!g.label().is_visible());
    let (outcome, events) = g.navigate(Direction::Next, 0);
    assert!(!outcome.is_started());
    assert!(events.is_empty());
    assert!(g.click(800.0, 450.0).is_none());
    assert!(g.tick(std::time::Duration::from_millis(16)).is_empty());
}

#[test]
fn empty_image_reference_fails_only_that_panel() {
    let catalog = Catalog::from_parallel(&["/a.jpg", "", "/c.jpg"], &["A", "B", "C"], &["x", "y", "z"])
        .unwrap();
    let g = Gallery::new(catalog, GalleryConfig::default(), Viewport::new(800, 600));
    assert_eq!(g.ring().unwrap().len(), 3);
    assert!(g.textures().get(TextureId(0)).unwrap().is_pending());
    assert!(matches!(
        g.textures().get(TextureId(1)),
        Some(TextureState::Failed(AssetError::EmptyReference))
    ));
    assert!(g.textures().get(TextureId(2)).unwrap().is_pending());
}
