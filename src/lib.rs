#![cfg(target_arch = "wasm32")]
use folio_core::{IndicatorConfig, ScrollReactiveIndicator, ScrollThresholdTrigger};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod host;
mod nav;
mod render;

use constants::{AUTONAV_ATTR, CONFIG_ATTR_PREFIX, CONTAINER_ID, LINK_ID};
use host::{IndicatorCell, WebHost};
use nav::{LocationNavigator, ViewTransition};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = dom::element_by_id(&document, CONTAINER_ID)?;

    let config = IndicatorConfig::default()
        .with_overrides(dom::prefixed_attributes(&container, CONFIG_ATTR_PREFIX))?;
    let autonav = autonav_trigger(&container, &config);
    let target = Rc::new(render::SvgTarget::new(&document, config.ambient_count)?);

    let clock = Instant::now();
    let cell: IndicatorCell = Rc::new(RefCell::new(None));
    let host = WebHost::new(window.clone(), Rc::downgrade(&cell), target.clone(), clock);
    let indicator =
        ScrollReactiveIndicator::mount(config, host, scroll_y(&window), clock.elapsed())?;
    target.apply(&indicator.render(clock.elapsed()));
    *cell.borrow_mut() = Some(indicator);

    wire_scroll(&window, &document, &cell, clock, autonav);
    wire_activation(&window, &document, &cell)?;
    wire_pagehide(&window, &cell);
    log::info!("[indicator] ready");
    Ok(())
}

#[inline]
fn scroll_y(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

fn autonav_trigger(
    container: &web::Element,
    config: &IndicatorConfig,
) -> Option<ScrollThresholdTrigger> {
    let raw = container.get_attribute(AUTONAV_ATTR)?;
    if raw.trim().is_empty() {
        return Some(ScrollThresholdTrigger::with_default_threshold(
            config.route.clone(),
        ));
    }
    match raw.trim().parse::<f32>() {
        Ok(threshold) if threshold.is_finite() => {
            Some(ScrollThresholdTrigger::new(threshold, config.route.clone()))
        }
        _ => {
            log::warn!("ignoring {AUTONAV_ATTR}={raw:?}; using the default threshold");
            Some(ScrollThresholdTrigger::with_default_threshold(
                config.route.clone(),
            ))
        }
    }
}

fn wire_scroll(
    window: &web::Window,
    document: &web::Document,
    cell: &IndicatorCell,
    clock: Instant,
    mut autonav: Option<ScrollThresholdTrigger>,
) {
    let win = window.clone();
    let cell = cell.clone();
    let navigator = LocationNavigator::new(window.clone());
    let transition = ViewTransition::new(document.clone());
    dom::add_window_listener(window, "scroll", true, move |_| {
        let y = scroll_y(&win);
        if let Some(ind) = cell.borrow_mut().as_mut() {
            ind.on_scroll_sample(y, clock.elapsed());
        }
        if let Some(trigger) = autonav.as_mut() {
            trigger.observe(y, &navigator, Some(&transition));
        }
    });
}

fn wire_activation(
    window: &web::Window,
    document: &web::Document,
    cell: &IndicatorCell,
) -> anyhow::Result<()> {
    let link = dom::element_by_id(document, LINK_ID)?;
    let cell = cell.clone();
    let navigator = LocationNavigator::new(window.clone());
    let transition = ViewTransition::new(document.clone());
    dom::add_click_listener(&link, move |ev| {
        // without an indicator the link's own href navigates
        if let Some(ind) = cell.borrow().as_ref() {
            ev.prevent_default();
            ind.activate(&navigator, Some(&transition));
        }
    });
    Ok(())
}

fn wire_pagehide(window: &web::Window, cell: &IndicatorCell) {
    let cell = cell.clone();
    dom::add_window_listener(window, "pagehide", false, move |ev| {
        // a page entering the back-forward cache is frozen, not unloaded
        let persisted = ev
            .dyn_ref::<web::PageTransitionEvent>()
            .is_some_and(|e| e.persisted());
        if persisted {
            return;
        }
        // unmounted, not dropped: activation keeps working until the page is gone
        if let Some(ind) = cell.borrow_mut().as_mut() {
            ind.unmount();
            log::info!("[indicator] torn down");
        }
    });
}
