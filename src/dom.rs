use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn element_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))
}

#[inline]
pub fn set_attr(el: &web::Element, name: &str, value: &str) {
    if let Err(e) = el.set_attribute(name, value) {
        log::warn!("set_attribute({name}) failed: {:?}", e);
    }
}

/// `data-*` attributes starting with `prefix`, keyed by the remainder.
pub fn prefixed_attributes(el: &web::Element, prefix: &str) -> Vec<(String, String)> {
    el.get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| {
            let key = name.strip_prefix(prefix)?.to_string();
            let value = el.get_attribute(&name)?;
            Some((key, value))
        })
        .collect()
}

#[inline]
pub fn add_click_listener(el: &web::Element, mut handler: impl FnMut(web::Event) + 'static) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
    if let Err(e) = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
        log::error!("click listener error: {:?}", e);
    }
    closure.forget();
}

pub fn add_window_listener(
    window: &web::Window,
    event: &str,
    passive: bool,
    mut handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(passive);
    if let Err(e) = window.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    ) {
        log::error!("{event} listener error: {:?}", e);
    }
    closure.forget();
}
