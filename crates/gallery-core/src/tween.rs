use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    #[default]
    QuadraticInOut,
    CubicInOut,
}

impl Easing {
    /// Map normalized time `t` in \[0, 1\] to eased progress in \[0, 1\].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Easing::Linear),
            "quad" | "quadratic" => Some(Easing::QuadraticInOut),
            "cubic" => Some(Easing::CubicInOut),
            _ => None,
        }
    }
}

/// Result of advancing a tween by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenStep {
    pub value: f32,
    pub finished: bool,
}

/// Eased interpolation from `start` to `end`, driven by elapsed time.
#[derive(Clone, Debug)]
pub struct Tween {
    start: f32,
    end: f32,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            end,
            elapsed: Duration::ZERO,
            duration,
            easing,
        }
    }

    #[inline]
    pub fn start(&self) -> f32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt`. The final step always lands exactly on `end`.
    pub fn advance(&mut self, dt: Duration) -> TweenStep {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.is_finished() {
            return TweenStep {
                value: self.end,
                finished: true,
            };
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        TweenStep {
            value: self.start + (self.end - self.start) * self.easing.apply(t),
            finished: false,
        }
    }
}
