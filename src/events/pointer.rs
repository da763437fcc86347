use crate::dom::Listener;
use crate::frame::SharedEngine;
use skyglow_core::InputSource;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Pointer events when the window exposes `PointerEvent`, mouse events
/// otherwise. Decided once at startup.
pub fn detect_input_source(window: &web::Window) -> InputSource {
    let supported = js_sys::Reflect::has(window, &JsValue::from_str("PointerEvent")).unwrap_or(false);
    InputSource::select(supported)
}

/// Move, exit and blur listeners feeding the engine's pointer tracker.
pub fn wire_pointer(window: &web::Window, source: InputSource, engine: &SharedEngine) -> Vec<Listener> {
    let target: &web::EventTarget = window.as_ref();
    let mut listeners = Vec::new();

    let on_move = engine.clone();
    listeners.extend(Listener::add_passive(target, source.move_event(), move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            on_move
                .borrow_mut()
                .pointer_moved(ev.client_x() as f32, ev.client_y() as f32);
        }
    }));

    for &event in source.exit_events().iter().chain(["blur"].iter()) {
        let on_exit = engine.clone();
        listeners.extend(Listener::add(target, event, move |_ev: web::Event| {
            on_exit.borrow_mut().pointer_left();
        }));
    }
    log::debug!("[pointer] listening via {:?}", source);
    listeners
}
