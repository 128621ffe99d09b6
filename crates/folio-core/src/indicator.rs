//! The scroll-reactive navigation indicator.
//!
//! Two schedules drive it, and they never share state:
//!
//! * a per-frame pump (`on_frame`), requested lazily on the first qualifying
//!   sample and dropped as soon as nothing is animating;
//! * wall-clock debounce timers (`on_timer`) for the label quiet period and
//!   the ambient scrolling window.
//!
//! The instance owns every handle it acquires. `unmount` (also run on drop)
//! releases all of them, after which callbacks are ignored.

use crate::ambient::AmbientField;
use crate::config::IndicatorConfig;
use crate::constants::{
    MAX_FRAME_STEP, SETTLE_CONTAINER_PERIOD, SETTLE_ELASTIC_AMPLITUDE, SETTLE_PATH_PERIOD,
};
use crate::easing::{Ease, Tween};
use crate::error::ConfigError;
use crate::frame::RenderFrame;
use crate::host::{FrameHandle, Host, TimerHandle, TimerSlot};
use crate::label::Label;
use crate::motion::{MotionState, Pose};
use crate::navigation::{navigate_with_transition, Navigator, TransitionEffect};
use crate::presence::Presence;
use std::time::Duration;

/// Elastic return of shapes and container to rest after the motion settles.
#[derive(Clone, Debug)]
struct Settle {
    warp: Tween,
    offset_y: Tween,
    rotation: Tween,
}

impl Settle {
    fn from_pose(pose: Pose, now: Duration, duration: Duration) -> Self {
        let path_ease = Ease::ElasticOut {
            amplitude: SETTLE_ELASTIC_AMPLITUDE,
            period: SETTLE_PATH_PERIOD,
        };
        let container_ease = Ease::ElasticOut {
            amplitude: SETTLE_ELASTIC_AMPLITUDE,
            period: SETTLE_CONTAINER_PERIOD,
        };
        Self {
            warp: Tween::new(pose.warp, 0.0, now, duration, path_ease),
            offset_y: Tween::new(pose.offset_y, 0.0, now, duration, container_ease),
            rotation: Tween::new(pose.rotation_deg, 0.0, now, duration, container_ease),
        }
    }

    fn sample(&self, now: Duration) -> (Pose, Pose) {
        let warp = self.warp.sample(now);
        let container = Pose {
            warp,
            offset_y: self.offset_y.sample(now),
            rotation_deg: self.rotation.sample(now),
        };
        (
            Pose {
                warp,
                ..Pose::RESTING
            },
            container,
        )
    }

    fn is_finished(&self, now: Duration) -> bool {
        self.warp.is_finished(now)
            && self.offset_y.is_finished(now)
            && self.rotation.is_finished(now)
    }
}

pub struct ScrollReactiveIndicator<H: Host> {
    config: IndicatorConfig,
    host: H,
    motion: MotionState,
    label: Label,
    ambient: AmbientField,
    presence: Presence,
    settle: Option<Settle>,
    shape_pose: Pose,
    container_pose: Pose,
    last_position: f32,
    last_frame_at: Option<Duration>,
    frame: Option<FrameHandle>,
    label_timer: Option<TimerHandle>,
    ambient_timer: Option<TimerHandle>,
    mounted: bool,
}

impl<H: Host> ScrollReactiveIndicator<H> {
    /// Create a resting indicator. `initial_position` seeds the delta
    /// computation so the first sample is measured against the page's
    /// scroll offset at mount time.
    pub fn mount(
        config: IndicatorConfig,
        host: H,
        initial_position: f32,
        now: Duration,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let presence = if config.entrance {
            Presence::entrance(now)
        } else {
            Presence::shown()
        };
        let mut indicator = Self {
            label: Label::new(config.caption.clone()),
            ambient: AmbientField::new(config.ambient_count, config.seed),
            config,
            host,
            motion: MotionState::default(),
            presence,
            settle: None,
            shape_pose: Pose::RESTING,
            container_pose: Pose::RESTING,
            last_position: if initial_position.is_finite() {
                initial_position
            } else {
                0.0
            },
            last_frame_at: None,
            frame: None,
            label_timer: None,
            ambient_timer: None,
            mounted: true,
        };
        if indicator.presence.is_animating(now) {
            indicator.ensure_frame();
        }
        log::debug!("[indicator] mounted at y={:.1}", indicator.last_position);
        Ok(indicator)
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn ambient(&self) -> &AmbientField {
        &self.ambient
    }

    pub fn is_active(&self) -> bool {
        self.motion.is_active()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn label_reversions(&self) -> u32 {
        self.label.reversions()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Feed the current scroll offset. Returns whether the sample qualified.
    pub fn on_scroll_sample(&mut self, position: f32, now: Duration) -> bool {
        if !self.mounted || !position.is_finite() {
            return false;
        }
        let delta = position - self.last_position;
        self.last_position = position;
        if !self.motion.ingest(delta, &self.config) {
            return false;
        }
        if let Some(settle) = self.settle.take() {
            let (shape, _) = settle.sample(now);
            self.motion.carry(shape.warp);
        }

        let direction = self.motion.direction();
        self.label.on_sample(direction, now);
        self.ambient.on_sample(direction, now);
        let label_quiet = self.config.label_quiet;
        let ambient_window = self.config.ambient_window;
        self.rearm(TimerSlot::Label, label_quiet);
        self.rearm(TimerSlot::Ambient, ambient_window);
        self.ensure_frame();
        true
    }

    /// Frame callback: one simulation tick plus overlay animation.
    ///
    /// Returns `None` for stale handles and after unmount.
    pub fn on_frame(&mut self, handle: FrameHandle, now: Duration) -> Option<RenderFrame> {
        if !self.mounted || self.frame != Some(handle) {
            return None;
        }
        self.frame = None;
        let dt = self
            .last_frame_at
            .map(|t| now.saturating_sub(t))
            .unwrap_or(Duration::ZERO)
            .min(MAX_FRAME_STEP);
        self.last_frame_at = Some(now);

        if self.motion.is_active() {
            let tick = self.motion.tick(&self.config);
            self.shape_pose = tick.pose;
            self.container_pose = tick.pose;
            self.settle = tick
                .settled
                .then(|| Settle::from_pose(tick.pose, now, self.config.settle_duration));
        } else if let Some(settle) = &self.settle {
            let (shape, container) = settle.sample(now);
            self.shape_pose = shape;
            self.container_pose = container;
            if settle.is_finished(now) {
                self.settle = None;
                self.shape_pose = Pose::RESTING;
                self.container_pose = Pose::RESTING;
            }
        }

        self.label.advance(now);
        self.ambient.advance(now, dt);
        let frame = self.render(now);

        if self.needs_frame(now) {
            self.ensure_frame();
        } else {
            self.last_frame_at = None;
            log::trace!("[indicator] frame pump idle");
        }
        Some(frame)
    }

    /// Timer callback for either debounce slot. Stale handles are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle, now: Duration) {
        if !self.mounted {
            return;
        }
        if self.label_timer == Some(handle) {
            self.label_timer = None;
            if self.label.on_quiet(now) {
                self.ensure_frame();
            }
        } else if self.ambient_timer == Some(handle) {
            self.ambient_timer = None;
            self.ambient.on_window_elapsed(now);
            self.ensure_frame();
        }
    }

    /// Current frame, without advancing any state.
    pub fn render(&self, now: Duration) -> RenderFrame {
        RenderFrame::compose(
            self.shape_pose,
            self.container_pose,
            self.label.view(now),
            self.ambient.views(now, self.shape_pose.warp),
            self.presence.view(now),
        )
    }

    /// The control was activated; navigate regardless of animation state.
    pub fn activate<N>(&self, navigator: &N, effect: Option<&dyn TransitionEffect>)
    where
        N: Navigator + Clone + 'static,
    {
        navigate_with_transition(&self.config.route, navigator, effect);
    }

    /// Release the frame request and both timers. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if let Some(h) = self.frame.take() {
            self.host.cancel_frame(h);
        }
        if let Some(h) = self.label_timer.take() {
            self.host.clear_timer(h);
        }
        if let Some(h) = self.ambient_timer.take() {
            self.host.clear_timer(h);
        }
        self.settle = None;
        self.motion.reset();
        log::debug!("[indicator] unmounted");
    }

    fn needs_frame(&self, now: Duration) -> bool {
        self.motion.is_active()
            || self.settle.is_some()
            || self.label.is_animating(now)
            || self.ambient.needs_frames(now)
            || self.presence.is_animating(now)
    }

    fn ensure_frame(&mut self) {
        if self.frame.is_none() {
            self.frame = Some(self.host.request_frame());
        }
    }

    fn rearm(&mut self, slot: TimerSlot, delay: Duration) {
        let held = match slot {
            TimerSlot::Label => &mut self.label_timer,
            TimerSlot::Ambient => &mut self.ambient_timer,
        };
        if let Some(h) = held.take() {
            self.host.clear_timer(h);
        }
        let handle = self.host.set_timer(slot, delay);
        match slot {
            TimerSlot::Label => self.label_timer = Some(handle),
            TimerSlot::Ambient => self.ambient_timer = Some(handle),
        }
    }
}

impl<H: Host> Drop for ScrollReactiveIndicator<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
