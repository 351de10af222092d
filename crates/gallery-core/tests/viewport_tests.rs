// Host-side tests for resize handling and texture resolution.

use gallery_core::*;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::time::Duration;

fn make_gallery() -> Gallery {
    Gallery::new(
        Catalog::default_collection(),
        GalleryConfig::default(),
        Viewport::new(1600, 900),
    )
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([200, 10, 30, 255])));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn resize_updates_camera_and_reflection_target() {
    let mut g = make_gallery();
    g.resize(1280, 1024);
    assert_eq!(g.viewport(), Viewport::new(1280, 1024));
    assert!((g.camera().aspect - 1.25).abs() < 1e-6);
    let r = g.reflector().unwrap();
    assert_eq!((r.target_width, r.target_height), (1280, 1024));
}

#[test]
fn resize_leaves_ring_and_navigation_alone() {
    let mut g = make_gallery();
    g.navigate(Direction::Next, 1);
    g.tick(Duration::from_millis(300));
    let before_state = g.navigation_state();
    let before: Vec<_> = g.scene().draw_list().iter().map(|d| (d.node, d.world)).collect();

    g.resize(640, 480);

    assert_eq!(g.navigation_state(), before_state);
    let after: Vec<_> = g.scene().draw_list().iter().map(|d| (d.node, d.world)).collect();
    assert_eq!(before, after);
    for slot in &g.ring().unwrap().slots {
        assert_eq!(g.scene().rotation_y(slot.base), slot.angle);
    }
}

#[test]
fn degenerate_resize_is_ignored() {
    let mut g = make_gallery();
    g.resize(0, 500);
    g.resize(500, 0);
    assert_eq!(g.viewport(), Viewport::new(1600, 900));
    assert!((g.camera().aspect - 16.0 / 9.0).abs() < 1e-6);
    let r = g.reflector().unwrap();
    assert_eq!((r.target_width, r.target_height), (1600, 900));
}

#[test]
fn decode_accepts_png_and_rejects_garbage() {
    let img = decode_image("/red.png", &png_bytes(3, 2)).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(img.rgba.len(), 3 * 2 * 4);
    assert_eq!(&img.rgba[..4], &[200, 10, 30, 255]);

    match decode_image("/broken.jpg", b"definitely not an image") {
        Err(AssetError::Decode { reference, .. }) => assert_eq!(reference, "/broken.jpg"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn oversized_images_are_downscaled_to_fit() {
    let wide = decode_image("/huge.png", &png_bytes(9000, 2)).unwrap();
    assert_eq!(wide.width, MAX_TEXTURE_EDGE);
    assert!(wide.height >= 1 && wide.height <= 2);
    assert_eq!(wide.rgba.len(), (wide.width * wide.height * 4) as usize);

    let tall = decode_image("/tall.png", &png_bytes(3, 9000)).unwrap();
    assert_eq!(tall.height, MAX_TEXTURE_EDGE);
    assert!(tall.width >= 1 && tall.width <= 3);

    let mut g = make_gallery();
    g.resolve_texture(1, Ok(wide));
    let loaded = g.textures().get(TextureId(1)).and_then(|s| s.image()).expect("loaded");
    assert!(loaded.width <= MAX_TEXTURE_EDGE && loaded.height <= MAX_TEXTURE_EDGE);
}

#[test]
fn texture_results_land_in_their_slot() {
    let mut g = make_gallery();
    let gen0 = g.textures().generation();

    let img = decode_image("/socrates.jpg", &png_bytes(4, 4)).unwrap();
    g.resolve_texture(0, Ok(img));
    g.resolve_texture(
        2,
        Err(AssetError::Fetch {
            reference: "/scream.jpg".into(),
            reason: "404".into(),
        }),
    );

    assert_eq!(g.textures().generation(), gen0 + 2);
    let loaded = g.textures().get(TextureId(0)).unwrap().image().unwrap();
    assert_eq!(loaded.width, 4);
    assert!(matches!(
        g.textures().get(TextureId(2)),
        Some(TextureState::Failed(AssetError::Fetch { .. }))
    ));
    // Other panels are untouched and the scene still draws.
    assert!(g.textures().get(TextureId(1)).unwrap().is_pending());
    assert!(!g.scene().draw_list().is_empty());
}

#[test]
fn stray_texture_result_is_dropped() {
    let mut g = make_gallery();
    let gen0 = g.textures().generation();
    g.resolve_texture(42, Err(AssetError::EmptyReference));
    assert_eq!(g.textures().generation(), gen0);
    assert_eq!(g.textures().len(), 6);
}
