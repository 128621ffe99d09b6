use crate::constants::{ENTRANCE_BLUR_FROM, ENTRANCE_DURATION, ENTRANCE_SCALE_FROM};
use crate::easing::{Ease, Tween};
use std::time::Duration;

/// Container-level scale/opacity/blur, animated once on mount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresenceView {
    pub scale: f32,
    pub opacity: f32,
    pub blur_px: f32,
}

impl PresenceView {
    pub const SHOWN: PresenceView = PresenceView {
        scale: 1.0,
        opacity: 1.0,
        blur_px: 0.0,
    };
}

#[derive(Clone, Debug)]
pub struct Presence {
    progress: Tween,
}

impl Presence {
    pub fn entrance(now: Duration) -> Self {
        Self {
            progress: Tween::new(0.0, 1.0, now, ENTRANCE_DURATION, Ease::ExpoOut),
        }
    }

    pub fn shown() -> Self {
        Self {
            progress: Tween::fixed(1.0),
        }
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        !self.progress.is_finished(now)
    }

    pub fn view(&self, now: Duration) -> PresenceView {
        let k = self.progress.sample(now).clamp(0.0, 1.0);
        PresenceView {
            scale: ENTRANCE_SCALE_FROM + (1.0 - ENTRANCE_SCALE_FROM) * k,
            opacity: k,
            blur_px: ENTRANCE_BLUR_FROM * (1.0 - k),
        }
    }
}
