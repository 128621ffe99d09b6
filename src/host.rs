//! Browser scheduling for the indicator.
//!
//! One persistent `requestAnimationFrame` closure and one persistent
//! `setTimeout` closure per timer slot, all owned by the host and dropped
//! with it. Each closure dispatches into the indicator through a `Weak`
//! reference together with the handle it was armed for.

use crate::render::SvgTarget;
use folio_core::{FrameHandle, Host, ScrollReactiveIndicator, TimerHandle, TimerSlot};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type IndicatorCell = Rc<RefCell<Option<ScrollReactiveIndicator<WebHost>>>>;
type IndicatorRef = Weak<RefCell<Option<ScrollReactiveIndicator<WebHost>>>>;

/// Armed callbacks: our handle plus the browser's id.
#[derive(Default)]
struct Pending {
    frame: Cell<Option<(FrameHandle, i32)>>,
    label: Cell<Option<(TimerHandle, i32)>>,
    ambient: Cell<Option<(TimerHandle, i32)>>,
}

impl Pending {
    fn slot(&self, slot: TimerSlot) -> &Cell<Option<(TimerHandle, i32)>> {
        match slot {
            TimerSlot::Label => &self.label,
            TimerSlot::Ambient => &self.ambient,
        }
    }
}

pub struct WebHost {
    window: web::Window,
    pending: Rc<Pending>,
    next_id: u32,
    on_frame: Closure<dyn FnMut(f64)>,
    on_label: Closure<dyn FnMut()>,
    on_ambient: Closure<dyn FnMut()>,
}

impl WebHost {
    pub fn new(
        window: web::Window,
        indicator: IndicatorRef,
        target: Rc<SvgTarget>,
        clock: Instant,
    ) -> Self {
        let pending = Rc::new(Pending::default());

        let on_frame = {
            let pending = pending.clone();
            let indicator = indicator.clone();
            Closure::wrap(Box::new(move |_ts: f64| {
                let Some((handle, _)) = pending.frame.take() else {
                    return;
                };
                let Some(cell) = indicator.upgrade() else {
                    return;
                };
                let mut slot = cell.borrow_mut();
                if let Some(ind) = slot.as_mut() {
                    if let Some(frame) = ind.on_frame(handle, clock.elapsed()) {
                        target.apply(&frame);
                    }
                }
            }) as Box<dyn FnMut(f64)>)
        };

        let timer = |slot: TimerSlot| {
            let pending = pending.clone();
            let indicator = indicator.clone();
            Closure::wrap(Box::new(move || {
                let Some((handle, _)) = pending.slot(slot).take() else {
                    return;
                };
                let Some(cell) = indicator.upgrade() else {
                    return;
                };
                let mut guard = cell.borrow_mut();
                if let Some(ind) = guard.as_mut() {
                    ind.on_timer(handle, clock.elapsed());
                }
            }) as Box<dyn FnMut()>)
        };
        let on_label = timer(TimerSlot::Label);
        let on_ambient = timer(TimerSlot::Ambient);

        Self {
            window,
            pending,
            next_id: 0,
            on_frame,
            on_label,
            on_ambient,
        }
    }

    fn next(&mut self) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }
}

impl Host for WebHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next());
        match self.window.request_animation_frame(self.on_frame.as_ref().unchecked_ref()) {
            Ok(id) => self.pending.frame.set(Some((handle, id))),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some((h, id)) = self.pending.frame.get() {
            if h == handle {
                _ = self.window.cancel_animation_frame(id);
                self.pending.frame.set(None);
            }
        }
    }

    fn set_timer(&mut self, slot: TimerSlot, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next());
        let callback = match slot {
            TimerSlot::Label => &self.on_label,
            TimerSlot::Ambient => &self.on_ambient,
        };
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        let armed = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            ms,
        );
        match armed {
            Ok(id) => {
                // One timer per slot; a still-armed predecessor is superseded.
                if let Some((_, old)) = self.pending.slot(slot).replace(Some((handle, id))) {
                    self.window.clear_timeout_with_handle(old);
                }
            }
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
        handle
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        for slot in [TimerSlot::Label, TimerSlot::Ambient] {
            let cell = self.pending.slot(slot);
            if let Some((h, id)) = cell.get() {
                if h == handle {
                    self.window.clear_timeout_with_handle(id);
                    cell.set(None);
                }
            }
        }
    }
}
