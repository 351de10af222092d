use crate::constants::{IDLE_SPIN_PER_FRAME, TRANSITION_MILLIS};
use crate::tween::Easing;
use std::time::Duration;

/// Which driver owns the ring rotation. The two never run together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Arrows are built and clicks drive eased transitions.
    #[default]
    Interactive,
    /// The ring spins by a constant amount every frame; no arrows.
    Idle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    pub mode: Mode,
    pub transition: Duration,
    pub easing: Easing,
    pub idle_spin_per_frame: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Interactive,
            transition: Duration::from_millis(TRANSITION_MILLIS),
            easing: Easing::QuadraticInOut,
            idle_spin_per_frame: IDLE_SPIN_PER_FRAME,
        }
    }
}

impl GalleryConfig {
    #[inline]
    pub fn navigation_enabled(&self) -> bool {
        self.mode == Mode::Interactive
    }

    /// Build a config from a URL query string such as `?mode=idle&duration=800`.
    ///
    /// Unknown keys and unparsable values keep their defaults.
    pub fn from_query(query: &str) -> Self {
        let mut cfg = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "mode" => match value {
                    "idle" => cfg.mode = Mode::Idle,
                    "interactive" => cfg.mode = Mode::Interactive,
                    _ => log::warn!("[config] unknown mode '{}'", value),
                },
                "duration" => match value.parse::<u64>() {
                    Ok(ms) => cfg.transition = Duration::from_millis(ms),
                    Err(_) => log::warn!("[config] bad duration '{}'", value),
                },
                "easing" => match Easing::from_name(value) {
                    Some(e) => cfg.easing = e,
                    None => log::warn!("[config] unknown easing '{}'", value),
                },
                "spin" => match value.parse::<f32>() {
                    Ok(s) if s.is_finite() => cfg.idle_spin_per_frame = s,
                    _ => log::warn!("[config] bad spin '{}'", value),
                },
                _ => log::warn!("[config] ignoring unknown key '{}'", key),
            }
        }
        cfg
    }
}
