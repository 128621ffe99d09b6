//! Transient directional label.
//!
//! A qualifying sample swaps the caption for a directional cue and dims it
//! slightly. Once the quiet-period timer (owned by the indicator) expires,
//! the label brightens again and the caption returns when that fade ends.

use crate::constants::{CUE_DOWN, CUE_UP, LABEL_CUE_FADE, LABEL_CUE_OPACITY, LABEL_REVERT_FADE};
use crate::easing::{Ease, Tween};
use crate::motion::Direction;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPhase {
    Caption,
    Cue(Direction),
    Reverting(Direction),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelView {
    pub text: String,
    pub opacity: f32,
}

#[derive(Clone, Debug)]
pub struct Label {
    caption: String,
    phase: LabelPhase,
    opacity: Tween,
    reversions: u32,
}

impl Label {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            phase: LabelPhase::Caption,
            opacity: Tween::fixed(1.0),
            reversions: 0,
        }
    }

    pub fn phase(&self) -> LabelPhase {
        self.phase
    }

    /// Number of quiet-period expiries handled so far.
    pub fn reversions(&self) -> u32 {
        self.reversions
    }

    pub fn text(&self) -> &str {
        match self.phase {
            LabelPhase::Caption => &self.caption,
            LabelPhase::Cue(dir) | LabelPhase::Reverting(dir) => cue_text(dir),
        }
    }

    pub fn on_sample(&mut self, direction: Direction, now: Duration) {
        self.phase = LabelPhase::Cue(direction);
        self.opacity.retarget(LABEL_CUE_OPACITY, now, LABEL_CUE_FADE, Ease::Power1Out);
    }

    /// Quiet period elapsed. Returns `false` when there was nothing to revert.
    pub fn on_quiet(&mut self, now: Duration) -> bool {
        let LabelPhase::Cue(dir) = self.phase else {
            return false;
        };
        self.reversions += 1;
        self.phase = LabelPhase::Reverting(dir);
        self.opacity.retarget(1.0, now, LABEL_REVERT_FADE, Ease::Power1Out);
        log::trace!("[label] reverting to caption");
        true
    }

    /// Complete the revert once its fade has finished.
    pub fn advance(&mut self, now: Duration) {
        if let LabelPhase::Reverting(_) = self.phase {
            if self.opacity.is_finished(now) {
                self.phase = LabelPhase::Caption;
            }
        }
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        !self.opacity.is_finished(now) || matches!(self.phase, LabelPhase::Reverting(_))
    }

    pub fn view(&self, now: Duration) -> LabelView {
        LabelView {
            text: self.text().to_string(),
            opacity: self.opacity.sample(now).clamp(0.0, 1.0),
        }
    }
}

pub fn cue_text(direction: Direction) -> &'static str {
    match direction {
        Direction::Down => CUE_DOWN,
        Direction::Up => CUE_UP,
    }
}
