//! Easing curves and time-based tweens.

use std::f32::consts::TAU;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    Power1Out,
    ExpoOut,
    /// Decaying sine that overshoots the target before settling.
    ElasticOut { amplitude: f32, period: f32 },
}

impl Ease {
    /// Map normalized time to progress. `apply(0) == 0`, `apply(1) == 1`;
    /// elastic curves may leave `[0, 1]` in between.
    pub fn apply(self, t: f32) -> f32 {
        if !(t > 0.0) {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::ExpoOut => 1.0 - 2f32.powf(-10.0 * t),
            Ease::ElasticOut { amplitude, period } => {
                let a = amplitude.max(1.0);
                let base = if period > 0.0 { period } else { 0.3 };
                let p = base / amplitude.clamp(f32::EPSILON, 1.0);
                let shift = p / TAU * (1.0 / a).asin();
                a * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / p).sin() + 1.0
            }
        }
    }
}

/// Scalar interpolation over wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start: Duration,
    pub duration: Duration,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            ease,
        }
    }

    /// A tween that already sits at `value`.
    pub fn fixed(value: f32) -> Self {
        Self::new(value, value, Duration::ZERO, Duration::ZERO, Ease::Linear)
    }

    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn sample(&self, now: Duration) -> f32 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        let k = self.ease.apply(t);
        self.from + (self.to - self.from) * k
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    /// Restart toward `to` from wherever the tween currently is.
    pub fn retarget(&mut self, to: f32, now: Duration, duration: Duration, ease: Ease) {
        *self = Tween::new(self.sample(now), to, now, duration, ease);
    }
}
