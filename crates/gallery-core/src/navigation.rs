//! Index-to-angle navigation with an eased, frame-driven transition.
//!
//! A transition goes through three explicit steps:
//! 1. `navigate` accepts the request and hides the label before any rotation.
//! 2. `advance` moves the ring along the tween once per frame.
//! 3. The final `advance` pins the ring to the end angle, then swaps and
//!    reveals the label.
//!
//! Requests that arrive while a transition is in flight are ignored.

use crate::builder::slot_step;
use crate::catalog::Catalog;
use crate::label::{LabelEvent, LabelState};
use crate::scene::{NodeId, Scene};
use crate::tween::{Easing, Tween};
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Previous => -1.0,
            Direction::Next => 1.0,
        }
    }
}

/// Typed payload of a clickable arrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationIntent {
    pub direction: Direction,
    pub target: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavigationState {
    pub current_index: usize,
    /// Cumulative ring rotation; never wrapped.
    pub ring_angle: f32,
    pub in_flight: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    InFlight,
    EmptyRing,
    IdleMode,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavigateOutcome {
    Started {
        target: usize,
        from_angle: f32,
        to_angle: f32,
    },
    Ignored(IgnoreReason),
}

impl NavigateOutcome {
    #[inline]
    pub fn is_started(&self) -> bool {
        matches!(self, NavigateOutcome::Started { .. })
    }
}

/// The pieces of the world a navigation touches.
pub struct NavigationContext<'a> {
    pub scene: &'a mut Scene,
    pub ring_root: Option<NodeId>,
    pub label: &'a mut LabelState,
    pub catalog: &'a Catalog,
}

pub type LabelEvents = SmallVec<[LabelEvent; 2]>;

struct Transition {
    tween: Tween,
    target: usize,
}

pub struct NavigationController {
    state: NavigationState,
    slot_count: usize,
    duration: Duration,
    easing: Easing,
    transition: Option<Transition>,
}

impl NavigationController {
    pub fn new(slot_count: usize, duration: Duration, easing: Easing) -> Self {
        Self {
            state: NavigationState::default(),
            slot_count,
            duration,
            easing,
            transition: None,
        }
    }

    #[inline]
    pub fn state(&self) -> NavigationState {
        self.state
    }

    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.transition.is_some()
    }

    /// Start a rotation of `direction * 2π/N` toward `target`.
    ///
    /// On acceptance the label is hidden immediately and a `Hide` event is
    /// pushed to `events`.
    pub fn navigate(
        &mut self,
        direction: Direction,
        target: usize,
        ctx: NavigationContext<'_>,
        events: &mut LabelEvents,
    ) -> NavigateOutcome {
        if self.slot_count == 0 || ctx.ring_root.is_none() {
            return NavigateOutcome::Ignored(IgnoreReason::EmptyRing);
        }
        assert!(
            target < self.slot_count,
            "navigation target {} out of range (ring of {})",
            target,
            self.slot_count
        );
        if self.transition.is_some() {
            log::debug!("[nav] ignoring request for {} while in flight", target);
            return NavigateOutcome::Ignored(IgnoreReason::InFlight);
        }

        let from_angle = self.state.ring_angle;
        let to_angle = from_angle + direction.sign() * slot_step(self.slot_count);
        events.push(ctx.label.hide());
        self.transition = Some(Transition {
            tween: Tween::new(from_angle, to_angle, self.duration, self.easing),
            target,
        });
        self.state.in_flight = true;
        log::info!(
            "[nav] {:?} -> {} ({:.3} -> {:.3} rad)",
            direction,
            target,
            from_angle,
            to_angle
        );
        NavigateOutcome::Started {
            target,
            from_angle,
            to_angle,
        }
    }

    /// Move an in-flight transition forward by `dt`.
    pub fn advance(&mut self, dt: Duration, ctx: NavigationContext<'_>, events: &mut LabelEvents) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        let step = transition.tween.advance(dt);
        self.state.ring_angle = step.value;
        if let Some(root) = ctx.ring_root {
            ctx.scene.set_rotation_y(root, step.value);
        }
        if step.finished {
            let target = transition.target;
            self.transition = None;
            self.state.in_flight = false;
            self.state.current_index = target;
            events.push(ctx.label.reveal(ctx.catalog.entry(target)));
            log::debug!("[nav] arrived at {}", target);
        }
    }

    /// Idle-mode driver: add `delta` to the ring angle directly.
    pub fn spin(&mut self, delta: f32, scene: &mut Scene, ring_root: Option<NodeId>) {
        debug_assert!(self.transition.is_none());
        self.state.ring_angle += delta;
        if let Some(root) = ring_root {
            scene.set_rotation_y(root, self.state.ring_angle);
        }
    }
}
