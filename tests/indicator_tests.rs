// Host-side tests for the full indicator lifecycle, driven by a manual host.

use folio_core::constants::{CUE_DOWN, CUE_UP, OFFSET_LIMIT, ROTATION_LIMIT};
use folio_core::host::PendingTimer;
use folio_core::{
    AmbientMode, FrameHandle, Host, IndicatorConfig, ManualHost, MotionPhase, Navigator,
    RenderFrame, ScrollReactiveIndicator, TimerHandle, TimerSlot, TransitionEffect,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn quiet_config() -> IndicatorConfig {
    IndicatorConfig {
        entrance: false,
        ..IndicatorConfig::default()
    }
}

struct Driver {
    ind: ScrollReactiveIndicator<ManualHost>,
    now: Duration,
    frames_run: u32,
    timers_run: u32,
    last_frame: Option<RenderFrame>,
}

impl Driver {
    fn new(config: IndicatorConfig) -> Self {
        let ind = ScrollReactiveIndicator::mount(config, ManualHost::new(), 0.0, Duration::ZERO)
            .expect("valid config");
        Self {
            ind,
            now: Duration::ZERO,
            frames_run: 0,
            timers_run: 0,
            last_frame: None,
        }
    }

    fn scroll(&mut self, y: f32) -> bool {
        self.ind.host_mut().set_now(self.now);
        self.ind.on_scroll_sample(y, self.now)
    }

    /// Advance the clock by one frame: due timers first, then the pending frame.
    fn step(&mut self) {
        self.now += FRAME;
        let now = self.now;
        self.ind.host_mut().set_now(now);
        let due: Vec<PendingTimer> = self.ind.host_mut().take_due_timers(now);
        for t in due {
            self.timers_run += 1;
            self.ind.on_timer(t.handle, now);
        }
        if let Some(h) = self.ind.host_mut().take_frame() {
            self.frames_run += 1;
            if let Some(frame) = self.ind.on_frame(h, now) {
                self.last_frame = Some(frame);
            }
        }
    }

    fn run_until(&mut self, t: Duration) {
        while self.now < t {
            self.step();
        }
    }
}

fn last_bow(d: &Driver) -> f32 {
    let frame = d.last_frame.as_ref().expect("a frame was rendered");
    folio_core::geometry::boundary_bow(&frame.boundary).unwrap()
}

#[test]
fn mount_rejects_invalid_config() {
    let cfg = IndicatorConfig {
        damping: 2.0,
        ..IndicatorConfig::default()
    };
    assert!(ScrollReactiveIndicator::mount(cfg, ManualHost::new(), 0.0, Duration::ZERO).is_err());
}

#[test]
fn without_samples_nothing_is_scheduled() {
    let mut d = Driver::new(quiet_config());
    let first = d.ind.render(d.now);
    assert!(first.is_resting_geometry());
    d.run_until(ms(3000));
    assert_eq!(d.frames_run, 0);
    assert_eq!(d.timers_run, 0);
    assert_eq!(d.ind.host().frames_requested, 0);
    assert_eq!(d.ind.motion().phase(), MotionPhase::Resting);
    assert_eq!(d.ind.render(d.now), first);
}

#[test]
fn entrance_runs_then_stops() {
    let mut d = Driver::new(IndicatorConfig::default());
    let start = d.ind.render(Duration::ZERO);
    assert_eq!(start.presence.opacity, 0.0);
    assert!(start.presence.scale < 1.0);
    assert!(d.ind.has_pending_frame());
    d.run_until(ms(2500));
    assert!(!d.ind.has_pending_frame());
    let end = d.last_frame.clone().unwrap();
    assert_eq!(end.presence, folio_core::PresenceView::SHOWN);
    assert!(end.is_resting_geometry());
    assert!(!d.ind.is_active());
}

#[test]
fn noise_sample_does_not_wake_resting_indicator() {
    let mut d = Driver::new(quiet_config());
    assert!(!d.scroll(1.5));
    assert!(!d.scroll(-0.4));
    assert!(!d.ind.has_pending_frame());
    assert!(d.ind.host().pending_timers().is_empty());
    assert_eq!(d.ind.host().frames_requested, 0);
    assert_eq!(d.ind.motion().velocity(), 0.0);
    assert!(!d.ind.is_active());
}

#[test]
fn noise_is_measured_against_previous_sample() {
    let mut d = Driver::new(quiet_config());
    // 1.5 then 3.0: each step is below the floor even though the total is not
    assert!(!d.scroll(1.5));
    assert!(!d.scroll(3.0));
    assert!(d.scroll(10.0));
}

#[test]
fn qualifying_sample_activates_and_schedules_once() {
    let mut d = Driver::new(quiet_config());
    assert!(d.scroll(40.0));
    assert!(d.ind.is_active());
    assert!(d.scroll(80.0));
    assert!(d.scroll(120.0));
    assert_eq!(d.ind.host().pending_frames(), 1, "one frame request at a time");
    let slots: Vec<TimerSlot> = d.ind.host().pending_timers().iter().map(|t| t.slot).collect();
    assert_eq!(slots.len(), 2);
    assert!(slots.contains(&TimerSlot::Label) && slots.contains(&TimerSlot::Ambient));
}

#[test]
fn single_sample_settles_back_to_rest() {
    let mut d = Driver::new(quiet_config());
    d.scroll(40.0);
    d.step();
    let moving = d.last_frame.clone().unwrap();
    assert!(!moving.is_resting_geometry());
    assert!(moving.offset_y > 0.0);

    d.run_until(ms(5000));
    assert_eq!(d.ind.motion().phase(), MotionPhase::Resting);
    assert!(!d.ind.has_pending_frame(), "no frames once everything is at rest");
    assert!(d.last_frame.as_ref().unwrap().is_resting_geometry());
    assert!(d.ind.render(d.now).is_resting_geometry());

    let frames = d.frames_run;
    assert!(frames < 300, "frame pump ran {frames} frames");
    d.run_until(ms(8000));
    assert_eq!(d.frames_run, frames);
}

#[test]
fn settle_overshoots_rest_before_stopping() {
    let cfg = IndicatorConfig {
        damping: 0.5,
        velocity_decay: 0.0,
        ..quiet_config()
    };
    let mut d = Driver::new(cfg);
    d.scroll(200.0);
    let mut saw_positive = false;
    let mut saw_negative = false;
    for _ in 0..150 {
        d.step();
        if let Some(f) = &d.last_frame {
            let bow = folio_core::geometry::boundary_bow(&f.boundary).unwrap();
            saw_positive |= bow > 1e-3;
            saw_negative |= bow < -1e-3;
        }
    }
    assert!(saw_positive && saw_negative, "elastic settle should cross rest");
}

#[test]
fn sample_during_settle_continues_from_current_shape() {
    let cfg = IndicatorConfig {
        damping: 0.5,
        velocity_decay: 0.0,
        ..quiet_config()
    };
    let mut d = Driver::new(cfg);
    d.scroll(200.0);
    while d.ind.is_active() {
        d.step();
    }
    // first settle frame: still bowing downward
    d.step();
    let bow = last_bow(&d);
    assert!(bow > 0.0);

    assert!(d.scroll(203.0));
    assert!((d.ind.motion().amplitude() - bow / 1.6).abs() < 1e-3);
    d.step();
    let next = last_bow(&d);
    assert!(next > bow * 0.5, "bow fell from {bow} to {next}");
}

#[test]
fn reversed_runs_mirror_each_other() {
    let mut down = Driver::new(quiet_config());
    let mut up = Driver::new(quiet_config());
    down.scroll(25.0);
    up.scroll(-25.0);
    down.step();
    up.step();
    let a = down.last_frame.unwrap();
    let b = up.last_frame.unwrap();
    let bow_a = folio_core::geometry::boundary_bow(&a.boundary).unwrap();
    let bow_b = folio_core::geometry::boundary_bow(&b.boundary).unwrap();
    assert!(bow_a > 0.0 && bow_b < 0.0);
    assert!((bow_a + bow_b).abs() < 1e-4);
    assert_eq!(a.stroke, b.stroke);
    assert_eq!(a.offset_y, -b.offset_y);
    assert_eq!(a.label.text, CUE_DOWN);
    assert_eq!(b.label.text, CUE_UP);
}

#[test]
fn extreme_jump_stays_clamped_and_finite() {
    let mut d = Driver::new(quiet_config());
    d.scroll(1000.0);
    d.step();
    let f = d.last_frame.clone().unwrap();
    assert!(f.offset_y.abs() <= OFFSET_LIMIT);
    assert!(f.rotation_deg.abs() <= ROTATION_LIMIT);
    assert!(f.is_finite());

    for y in [3.0e38_f32, -3.0e38, f32::MAX, f32::MIN] {
        d.scroll(y);
        d.step();
        let f = d.ind.render(d.now);
        assert!(f.is_finite());
        assert!(f.offset_y.abs() <= OFFSET_LIMIT);
    }
    assert!(!d.scroll(f32::NAN));
    assert!(!d.scroll(f32::INFINITY));
}

#[test]
fn close_samples_do_not_revert_label_early() {
    let mut d = Driver::new(quiet_config());
    d.scroll(50.0);
    d.run_until(ms(500));
    d.scroll(100.0);
    d.run_until(ms(1200));
    assert_eq!(d.ind.label_reversions(), 0);
    assert_eq!(d.ind.label().text(), CUE_DOWN);

    d.run_until(ms(1450));
    assert_eq!(d.ind.label_reversions(), 1);
    d.run_until(ms(6000));
    assert_eq!(d.ind.label_reversions(), 1);
    assert_eq!(d.ind.label().text(), "View Works");
    assert_eq!(d.last_frame.as_ref().unwrap().label.opacity, 1.0);
}

#[test]
fn each_quiet_period_reverts_once() {
    let mut d = Driver::new(quiet_config());
    d.scroll(50.0);
    d.run_until(ms(3000));
    d.scroll(0.0);
    d.run_until(ms(6000));
    assert_eq!(d.ind.label_reversions(), 2);
}

#[test]
fn ambient_window_is_independent_of_motion() {
    let mut d = Driver::new(quiet_config());
    d.scroll(30.0);
    assert_eq!(d.ind.ambient().mode(), AmbientMode::Scrolling);
    d.run_until(ms(100));
    assert_eq!(d.ind.ambient().mode(), AmbientMode::Scrolling);
    d.run_until(ms(300));
    assert_eq!(d.ind.ambient().mode(), AmbientMode::Idle);
    // label quiet period is longer and still pending
    assert_eq!(d.ind.label_reversions(), 0);
    let f = d.last_frame.clone().unwrap();
    assert_eq!(f.ambient.len(), d.ind.config().ambient_count);
}

#[test]
fn unmount_cancels_everything() {
    let mut d = Driver::new(IndicatorConfig::default());
    d.scroll(60.0);
    d.step();
    assert!(d.ind.has_pending_frame());
    assert_eq!(d.ind.host().pending_timers().len(), 2);

    d.ind.unmount();
    assert!(!d.ind.is_mounted());
    assert_eq!(d.ind.host().pending_frames(), 0);
    assert!(d.ind.host().pending_timers().is_empty());
    assert_eq!(d.ind.host().frames_cancelled, 1);
    assert_eq!(d.ind.host().timers_cleared, 2);

    let (frames, timers) = (d.frames_run, d.timers_run);
    d.run_until(ms(5000));
    assert_eq!(d.frames_run, frames);
    assert_eq!(d.timers_run, timers);
    assert!(!d.scroll(500.0));
    assert_eq!(d.ind.host().pending_frames(), 0);

    // second unmount is a no-op
    d.ind.unmount();
    assert_eq!(d.ind.host().frames_cancelled, 1);
}

#[test]
fn stale_callbacks_are_ignored() {
    let mut d = Driver::new(quiet_config());
    assert!(d.ind.on_frame(FrameHandle(999), ms(16)).is_none());
    d.scroll(40.0);
    d.ind.on_timer(TimerHandle(999), ms(16));
    assert_eq!(d.ind.label_reversions(), 0);
    d.ind.unmount();
    assert!(d.ind.on_frame(FrameHandle(1), ms(32)).is_none());
}

/// Host whose bookkeeping outlives the indicator.
#[derive(Clone, Default)]
struct SharedHost(Rc<RefCell<ManualHost>>);

impl Host for SharedHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.0.borrow_mut().request_frame()
    }
    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.0.borrow_mut().cancel_frame(handle)
    }
    fn set_timer(&mut self, slot: TimerSlot, delay: Duration) -> TimerHandle {
        self.0.borrow_mut().set_timer(slot, delay)
    }
    fn clear_timer(&mut self, handle: TimerHandle) {
        self.0.borrow_mut().clear_timer(handle)
    }
}

#[test]
fn dropping_the_indicator_releases_handles() {
    let host = SharedHost::default();
    let cfg = IndicatorConfig::default();
    let mut ind = ScrollReactiveIndicator::mount(cfg, host.clone(), 0.0, Duration::ZERO).unwrap();
    ind.on_scroll_sample(80.0, Duration::ZERO);
    assert_eq!(host.0.borrow().pending_frames(), 1);
    drop(ind);
    let inner = host.0.borrow();
    assert_eq!(inner.pending_frames(), 0);
    assert!(inner.pending_timers().is_empty());
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl Navigator for Recorder {
    fn navigate(&self, route: &str) {
        self.0.borrow_mut().push(route.to_string());
    }
}

struct Deferred(RefCell<Option<Box<dyn FnOnce()>>>);

impl TransitionEffect for Deferred {
    fn wrap(&self, run: Box<dyn FnOnce()>) {
        *self.0.borrow_mut() = Some(run);
    }
}

#[test]
fn activation_is_not_blocked_by_animation() {
    let mut d = Driver::new(quiet_config());
    d.scroll(300.0);
    d.step();
    assert!(d.ind.is_active());

    let nav = Recorder::default();
    d.ind.activate(&nav, None);
    assert_eq!(*nav.0.borrow(), vec!["/works".to_string()]);

    let fx = Deferred(RefCell::new(None));
    d.ind.activate(&nav, Some(&fx));
    assert_eq!(nav.0.borrow().len(), 1);
    let run = fx.0.borrow_mut().take().unwrap();
    run();
    assert_eq!(nav.0.borrow().len(), 2);
    assert!(d.ind.is_active(), "navigation leaves the animation alone");
}

#[test]
fn activation_still_navigates_after_unmount() {
    let mut d = Driver::new(quiet_config());
    d.scroll(120.0);
    d.ind.unmount();
    let nav = Recorder::default();
    d.ind.activate(&nav, None);
    assert_eq!(*nav.0.borrow(), vec!["/works".to_string()]);
    assert_eq!(d.ind.host().pending_frames(), 0);
}
