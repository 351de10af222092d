// Host-side tests for navigation transitions and label sequencing.

use gallery_core::navigation::IgnoreReason;
use gallery_core::*;
use std::f32::consts::TAU;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn make_gallery() -> Gallery {
    Gallery::new(
        Catalog::default_collection(),
        GalleryConfig::default(),
        Viewport::new(1600, 900),
    )
}

fn ring_angle(g: &Gallery) -> f32 {
    g.scene().rotation_y(g.ring_root().unwrap())
}

/// Tick until the in-flight transition lands, collecting label events.
fn run_to_completion(g: &mut Gallery) -> Vec<LabelEvent> {
    let mut events = Vec::new();
    for _ in 0..1000 {
        events.extend(g.tick(FRAME));
        if !g.navigation_state().in_flight {
            return events;
        }
    }
    panic!("transition never completed");
}

#[test]
fn next_from_zero_targets_one_and_rotates_forward() {
    let mut g = make_gallery();
    let (outcome, _) = g.navigate(Direction::Next, 1);
    match outcome {
        NavigateOutcome::Started {
            target,
            from_angle,
            to_angle,
        } => {
            assert_eq!(target, 1);
            assert_eq!(from_angle, 0.0);
            assert!((to_angle - TAU / 6.0).abs() < 1e-6);
        }
        other => panic!("expected start, got {other:?}"),
    }
    run_to_completion(&mut g);
    assert_eq!(g.navigation_state().current_index, 1);
    assert!((ring_angle(&g) - TAU / 6.0).abs() < 1e-6);
}

#[test]
fn previous_from_zero_wraps_to_last() {
    let mut g = make_gallery();
    // Click target of the first panel's previous arrow.
    let arrows = g.ring().unwrap().slots[0].arrows.unwrap();
    let intent = g.router().intent_for(arrows.previous).unwrap();
    assert_eq!(intent.target, 5);
    let (outcome, _) = g.navigate(intent.direction, intent.target);
    assert!(outcome.is_started());
    run_to_completion(&mut g);
    assert_eq!(g.navigation_state().current_index, 5);
    assert!((ring_angle(&g) + TAU / 6.0).abs() < 1e-6);
    assert_eq!(g.label().title, "A Sunday on La Grande Jatte");
    assert_eq!(g.label().artist, "George Seurat");
}

#[test]
fn label_hides_at_start_and_reveals_once_at_completion() {
    let mut g = make_gallery();
    assert_eq!(g.label().opacity, 1.0);
    assert_eq!(g.label().title, "The Death of Socrates");

    let (_, start_events) = g.navigate(Direction::Next, 1);
    assert_eq!(start_events.as_slice(), &[LabelEvent::Hide]);
    assert_eq!(g.label().opacity, 0.0);
    // Rotation has not moved yet when the label goes dark.
    assert_eq!(ring_angle(&g), 0.0);

    let mut reveals = 0;
    let mut frames = 0;
    while g.navigation_state().in_flight {
        let before = g.label().title.clone();
        let events = g.tick(FRAME);
        frames += 1;
        for ev in &events {
            match ev {
                LabelEvent::Reveal { title, artist } => {
                    reveals += 1;
                    assert_eq!(title, "Starry Night");
                    assert_eq!(artist, "Vincent Van Gogh");
                    // Reveal comes only after the ring reached its final angle.
                    assert!((ring_angle(&g) - TAU / 6.0).abs() < 1e-6);
                }
                LabelEvent::Hide => panic!("unexpected second hide"),
            }
        }
        if g.navigation_state().in_flight {
            assert_eq!(g.label().opacity, 0.0);
            assert_eq!(g.label().title, before);
        }
        assert!(frames < 1000);
    }
    assert_eq!(reveals, 1);
    assert_eq!(g.label().opacity, 1.0);
    assert_eq!(g.label().title, "Starry Night");
}

#[test]
fn rotation_is_eased_and_monotonic() {
    let mut g = make_gallery();
    g.navigate(Direction::Next, 1);
    let mut prev = ring_angle(&g);
    let mut deltas = Vec::new();
    while g.navigation_state().in_flight {
        g.tick(FRAME);
        let a = ring_angle(&g);
        assert!(a >= prev);
        deltas.push(a - prev);
        prev = a;
    }
    // Ease-in-out: the middle frames move faster than the first one.
    let mid = deltas[deltas.len() / 2];
    assert!(mid > deltas[0]);
}

#[test]
fn angle_accumulates_without_wrapping() {
    let mut g = make_gallery();
    let n = 6;
    let k = 9;
    for step in 0..k {
        let target = (g.navigation_state().current_index + 1) % n;
        let (outcome, _) = g.navigate(Direction::Next, target);
        assert!(outcome.is_started(), "step {step}");
        run_to_completion(&mut g);
    }
    let expected = k as f32 * TAU / n as f32;
    assert!(expected > TAU);
    assert!((g.navigation_state().ring_angle - expected).abs() < 1e-4);
    assert!((ring_angle(&g) - expected).abs() < 1e-4);
    assert_eq!(g.navigation_state().current_index, k % n);
}

#[test]
fn requests_during_a_transition_are_ignored() {
    let mut g = make_gallery();
    g.navigate(Direction::Next, 1);
    g.tick(FRAME);
    let mid_angle = ring_angle(&g);

    let (outcome, events) = g.navigate(Direction::Previous, 5);
    assert_eq!(outcome, NavigateOutcome::Ignored(IgnoreReason::InFlight));
    assert!(events.is_empty());
    assert_eq!(ring_angle(&g), mid_angle);

    let events = run_to_completion(&mut g);
    assert_eq!(events.len(), 1);
    assert_eq!(g.navigation_state().current_index, 1);
    assert!((ring_angle(&g) - TAU / 6.0).abs() < 1e-6);

    // Once settled, new requests go through again.
    assert!(g.navigate(Direction::Previous, 0).0.is_started());
}

#[test]
fn zero_duration_transition_completes_on_next_tick() {
    let cfg = GalleryConfig {
        transition: Duration::ZERO,
        ..GalleryConfig::default()
    };
    let mut g = Gallery::new(Catalog::default_collection(), cfg, Viewport::new(640, 480));
    g.navigate(Direction::Next, 1);
    assert_eq!(g.label().opacity, 0.0);
    let events = g.tick(Duration::ZERO);
    assert_eq!(events.len(), 1);
    assert_eq!(g.label().opacity, 1.0);
}

#[test]
#[should_panic]
fn out_of_range_target_is_a_programming_error() {
    let mut g = make_gallery();
    g.navigate(Direction::Next, 6);
}

#[test]
fn idle_mode_spins_and_never_navigates() {
    let cfg = GalleryConfig {
        mode: Mode::Idle,
        ..GalleryConfig::default()
    };
    let mut g = Gallery::new(Catalog::default_collection(), cfg, Viewport::new(800, 600));
    for _ in 0..10 {
        assert!(g.tick(FRAME).is_empty());
    }
    assert!((ring_angle(&g) - 10.0 * IDLE_SPIN_PER_FRAME).abs() < 1e-6);
    let (outcome, _) = g.navigate(Direction::Next, 1);
    assert_eq!(outcome, NavigateOutcome::Ignored(IgnoreReason::IdleMode));
    assert_eq!(g.label().opacity, 1.0);
    assert!(g.click(400.0, 300.0).is_none());
}

#[test]
fn config_from_query() {
    let cfg = GalleryConfig::from_query("?mode=idle&duration=250&easing=linear&bogus=1");
    assert_eq!(cfg.mode, Mode::Idle);
    assert_eq!(cfg.transition, Duration::from_millis(250));
    assert_eq!(cfg.easing, tween::Easing::Linear);

    let cfg = GalleryConfig::from_query("duration=abc&mode=");
    assert_eq!(cfg, GalleryConfig::default());
    assert!(GalleryConfig::from_query("").navigation_enabled());
}
