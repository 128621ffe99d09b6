use folio_core::{Navigator, TransitionEffect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Full-page navigation through `window.location`.
#[derive(Clone)]
pub struct LocationNavigator {
    window: web::Window,
}

impl LocationNavigator {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl Navigator for LocationNavigator {
    fn navigate(&self, route: &str) {
        if let Err(e) = self.window.location().assign(route) {
            log::error!("navigation to {route} failed: {:?}", e);
        }
    }
}

/// `document.startViewTransition` around the navigation, when the browser
/// has it. Without support the navigation runs immediately.
pub struct ViewTransition {
    document: web::Document,
}

impl ViewTransition {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    fn start_fn(&self) -> Option<js_sys::Function> {
        js_sys::Reflect::get(&self.document, &JsValue::from_str("startViewTransition"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
    }
}

impl TransitionEffect for ViewTransition {
    fn wrap(&self, run: Box<dyn FnOnce()>) {
        let Some(start) = self.start_fn() else {
            run();
            return;
        };
        let run = Rc::new(RefCell::new(Some(run)));
        let deferred = run.clone();
        let update = Closure::once_into_js(move || {
            if let Some(run) = deferred.borrow_mut().take() {
                run();
            }
        });
        if let Err(e) = start.call1(&self.document, &update) {
            log::warn!("startViewTransition failed, navigating directly: {:?}", e);
            if let Some(run) = run.borrow_mut().take() {
                run();
            }
        }
    }
}
