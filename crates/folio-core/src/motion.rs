//! Scroll-driven leaky integrator.
//!
//! The indicator's only persistent numeric state. Samples set the velocity;
//! every frame the velocity is fed into an amplitude that decays
//! geometrically. There is no restoring force: the amplitude simply leaks
//! away once input stops, and the state machine drops back to
//! [`MotionPhase::Resting`].

use crate::config::IndicatorConfig;
use crate::constants::{
    MAX_WARP_AMPLITUDE, OFFSET_GAIN, OFFSET_LIMIT, ROTATION_GAIN, ROTATION_LIMIT, VELOCITY_SNAP,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MotionPhase {
    #[default]
    Resting,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Down,
    Up,
}

impl Direction {
    #[inline]
    pub fn of(delta: f32) -> Self {
        if delta < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Down => 1.0,
            Direction::Up => -1.0,
        }
    }
}

/// Deformation inputs derived from one motion step.
///
/// `warp` is the signed, clamped amplitude; its sign selects which way the
/// shapes bow. Offset and rotation follow the instantaneous velocity.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Pose {
    pub warp: f32,
    pub offset_y: f32,
    pub rotation_deg: f32,
}

impl Pose {
    pub const RESTING: Pose = Pose {
        warp: 0.0,
        offset_y: 0.0,
        rotation_deg: 0.0,
    };

    /// Force every field into its legal range; NaN collapses to rest.
    pub fn clamped(self) -> Self {
        Self {
            warp: finite_clamp(self.warp, MAX_WARP_AMPLITUDE),
            offset_y: finite_clamp(self.offset_y, OFFSET_LIMIT),
            rotation_deg: finite_clamp(self.rotation_deg, ROTATION_LIMIT),
        }
    }

    pub fn is_resting(&self) -> bool {
        *self == Pose::RESTING
    }
}

#[inline]
fn finite_clamp(v: f32, limit: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-limit, limit)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionTick {
    pub pose: Pose,
    /// The continuation test failed on this tick; state is now Resting.
    pub settled: bool,
}

#[derive(Clone, Debug, Default)]
pub struct MotionState {
    velocity: f32,
    direction: Direction,
    amplitude: f32,
    phase: MotionPhase,
}

impl MotionState {
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == MotionPhase::Active
    }

    /// Feed one scroll delta. Returns `false` (and changes nothing) when the
    /// delta is below the noise floor or not a number.
    pub fn ingest(&mut self, delta: f32, cfg: &IndicatorConfig) -> bool {
        if delta.is_nan() || delta.abs() < cfg.noise_floor {
            return false;
        }
        let delta = delta.clamp(-cfg.max_sample_delta, cfg.max_sample_delta);
        self.velocity = delta;
        self.direction = Direction::of(delta);
        if self.phase == MotionPhase::Resting {
            log::debug!("[motion] resting -> active (v={:.1})", delta);
        }
        self.phase = MotionPhase::Active;
        true
    }

    /// One simulation step.
    pub fn tick(&mut self, cfg: &IndicatorConfig) -> MotionTick {
        if self.phase == MotionPhase::Resting {
            return MotionTick {
                pose: Pose::RESTING,
                settled: false,
            };
        }

        self.amplitude = self.amplitude * cfg.damping + self.velocity.abs() * cfg.excitation;
        let abs_amplitude = self.amplitude;

        let pose = Pose {
            warp: self.direction.sign() * abs_amplitude.min(MAX_WARP_AMPLITUDE),
            offset_y: self.velocity * OFFSET_GAIN,
            rotation_deg: self.velocity * ROTATION_GAIN,
        }
        .clamped();

        self.velocity *= cfg.velocity_decay;
        if self.velocity.abs() < VELOCITY_SNAP {
            self.velocity = 0.0;
        }

        let settled =
            !(abs_amplitude > cfg.rest_amplitude || self.velocity.abs() > cfg.rest_velocity);
        if settled {
            log::debug!("[motion] active -> resting (amp={:.3})", abs_amplitude);
            self.amplitude = 0.0;
            self.velocity = 0.0;
            self.phase = MotionPhase::Resting;
        }
        MotionTick { pose, settled }
    }

    /// Resume from a deformation already on screen (an interrupted settle)
    /// instead of from zero. Only the part bowing along the current
    /// direction can be carried; an opposite overshoot is dropped.
    pub fn carry(&mut self, warp: f32) {
        let along = warp * self.direction.sign();
        if along > 0.0 {
            self.amplitude = self.amplitude.max(along.min(MAX_WARP_AMPLITUDE));
        }
    }

    /// Drop back to rest without a settle step.
    pub fn reset(&mut self) {
        *self = MotionState {
            direction: self.direction,
            ..MotionState::default()
        };
    }
}
