//! Decorative particles drifting behind the control.
//!
//! The pool runs its own `Idle <-> Scrolling` machine, independent of the
//! amplitude integrator: a qualifying sample switches to `Scrolling` and the
//! indicator re-arms a short timer whose expiry switches back to `Idle`.
//! Visibility and drift speed follow an eased blend between the two modes.

use crate::constants::{
    AMBIENT_ACTIVE_OPACITY, AMBIENT_ACTIVE_SPEED, AMBIENT_FADE, AMBIENT_IDLE_OPACITY,
    AMBIENT_IDLE_SPEED, AMBIENT_RADIUS_MAX, AMBIENT_RADIUS_MIN, AMBIENT_SPEED_MAX,
    AMBIENT_SPEED_MIN, AMBIENT_WARP, VIEW_HEIGHT, VIEW_WIDTH,
};
use crate::easing::{Ease, Tween};
use crate::motion::Direction;
use glam::Vec2;
use rand::prelude::*;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AmbientMode {
    #[default]
    Idle,
    Scrolling,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientElement {
    pub lane_x: f32,
    pub y: f32,
    pub speed: f32,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientView {
    pub position: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug)]
pub struct AmbientField {
    elements: Vec<AmbientElement>,
    mode: AmbientMode,
    direction: Direction,
    visibility: Tween,
}

impl AmbientField {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let lane = VIEW_WIDTH / (count.max(1) as f32 + 1.0);
        let elements = (0..count)
            .map(|i| AmbientElement {
                lane_x: lane * (i as f32 + 1.0) + rng.gen_range(-0.25..0.25) * lane,
                y: rng.gen_range(0.0..VIEW_HEIGHT),
                speed: rng.gen_range(AMBIENT_SPEED_MIN..AMBIENT_SPEED_MAX),
                radius: rng.gen_range(AMBIENT_RADIUS_MIN..AMBIENT_RADIUS_MAX),
            })
            .collect();
        Self {
            elements,
            mode: AmbientMode::Idle,
            direction: Direction::Down,
            visibility: Tween::fixed(AMBIENT_IDLE_OPACITY),
        }
    }

    pub fn mode(&self) -> AmbientMode {
        self.mode
    }

    pub fn elements(&self) -> &[AmbientElement] {
        &self.elements
    }

    pub fn on_sample(&mut self, direction: Direction, now: Duration) {
        self.direction = direction;
        if self.mode == AmbientMode::Idle {
            log::trace!("[ambient] idle -> scrolling");
            self.mode = AmbientMode::Scrolling;
            self.visibility.retarget(AMBIENT_ACTIVE_OPACITY, now, AMBIENT_FADE, Ease::Power1Out);
        }
    }

    pub fn on_window_elapsed(&mut self, now: Duration) {
        if self.mode == AmbientMode::Scrolling {
            log::trace!("[ambient] scrolling -> idle");
            self.mode = AmbientMode::Idle;
            self.visibility.retarget(AMBIENT_IDLE_OPACITY, now, AMBIENT_FADE, Ease::Power1Out);
        }
    }

    /// 0 when fully idle, 1 when fully scrolling.
    fn blend(&self, now: Duration) -> f32 {
        let span = AMBIENT_ACTIVE_OPACITY - AMBIENT_IDLE_OPACITY;
        ((self.visibility.sample(now) - AMBIENT_IDLE_OPACITY) / span).clamp(0.0, 1.0)
    }

    /// Drift every element by `dt`, wrapping around the travel range.
    pub fn advance(&mut self, now: Duration, dt: Duration) {
        let b = self.blend(now);
        let factor = AMBIENT_IDLE_SPEED + (AMBIENT_ACTIVE_SPEED - AMBIENT_IDLE_SPEED) * b;
        let step = factor * self.direction.sign() * dt.as_secs_f32();
        for e in &mut self.elements {
            e.y = (e.y + e.speed * step).rem_euclid(VIEW_HEIGHT);
        }
    }

    pub fn needs_frames(&self, now: Duration) -> bool {
        !self.elements.is_empty()
            && (self.mode == AmbientMode::Scrolling || !self.visibility.is_finished(now))
    }

    pub fn views(&self, now: Duration, warp: f32) -> Vec<AmbientView> {
        let opacity = self.visibility.sample(now).clamp(0.0, 1.0);
        let sway = warp * AMBIENT_WARP;
        self.elements
            .iter()
            .map(|e| AmbientView {
                position: Vec2::new(e.lane_x + sway, e.y),
                radius: e.radius,
                opacity,
            })
            .collect()
    }
}
