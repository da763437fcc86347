use crate::constants::{COARSE_POINTER_QUERY, REDUCED_MOTION_QUERY, THEME_ATTRIBUTE};
use crate::dom::{self, CssThemeSource, Listener, MarkerThemeSource};
use crate::frame::{FrameLoop, SharedEngine};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Theme-attribute observer; disconnected when dropped.
pub struct ThemeObserver {
    observer: web::MutationObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, web::MutationObserver)>,
}

impl Drop for ThemeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Every host signal subscription. Dropping it unsubscribes everything.
pub struct Lifecycle {
    _listeners: Vec<Listener>,
    _theme: Option<ThemeObserver>,
}

fn media_listener(
    window: &web::Window,
    query: &str,
    mut handler: impl FnMut(bool) + 'static,
) -> Option<Listener> {
    let mql = window.match_media(query).ok().flatten()?;
    let mql_for_cb = mql.clone();
    Listener::add(mql.as_ref(), "change", move |_ev: web::Event| {
        handler(mql_for_cb.matches());
    })
}

fn apply_theme(engine: &SharedEngine) {
    let Some(window) = web::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    match CssThemeSource::read(&window, &document) {
        Some(source) => engine.borrow_mut().apply_theme(&source),
        None => engine
            .borrow_mut()
            .apply_theme(&MarkerThemeSource(dom::theme_marker(&document))),
    }
}

fn observe_theme(document: &web::Document, engine: &SharedEngine) -> Option<ThemeObserver> {
    let root = document.document_element()?;
    let engine = engine.clone();
    let callback = Closure::wrap(Box::new(move |_records: js_sys::Array, _obs: web::MutationObserver| {
        apply_theme(&engine);
    }) as Box<dyn FnMut(js_sys::Array, web::MutationObserver)>);
    let observer = web::MutationObserver::new(callback.as_ref().unchecked_ref()).ok()?;
    let init = web::MutationObserverInit::new();
    init.set_attributes(true);
    init.set_attribute_filter(&js_sys::Array::of1(&THEME_ATTRIBUTE.into()));
    if let Err(e) = observer.observe_with_options(&root, &init) {
        log::warn!("[lifecycle] theme observer not attached: {:?}", e);
        return None;
    }
    Some(ThemeObserver {
        observer,
        _callback: callback,
    })
}

pub fn wire_lifecycle(
    window: &web::Window,
    document: &web::Document,
    engine: &SharedEngine,
    frames: &Rc<FrameLoop>,
) -> Lifecycle {
    let mut listeners = Vec::new();

    let on_resize = engine.clone();
    listeners.extend(Listener::add_passive(window.as_ref(), "resize", move |_ev: web::Event| {
        let Some(window) = web::window() else {
            return;
        };
        on_resize.borrow_mut().resize(dom::read_viewport(&window));
    }));

    let (on_visibility, frames_visibility) = (engine.clone(), frames.clone());
    let doc = document.clone();
    listeners.extend(Listener::add(document.as_ref(), "visibilitychange", move |_ev: web::Event| {
        let running = on_visibility.borrow_mut().set_visible(!doc.hidden());
        if running {
            frames_visibility.restart();
        } else {
            frames_visibility.cancel();
        }
    }));

    let (on_motion, frames_motion) = (engine.clone(), frames.clone());
    listeners.extend(media_listener(window, REDUCED_MOTION_QUERY, move |reduced| {
        log::debug!("[lifecycle] reduced motion {}", reduced);
        if on_motion.borrow_mut().set_reduced_motion(reduced) {
            frames_motion.restart();
        } else {
            frames_motion.cancel();
        }
    }));

    let on_coarse = engine.clone();
    listeners.extend(media_listener(window, COARSE_POINTER_QUERY, move |coarse| {
        log::debug!("[lifecycle] coarse pointer {}", coarse);
        on_coarse.borrow_mut().set_coarse_pointer(coarse);
    }));

    Lifecycle {
        _listeners: listeners,
        _theme: observe_theme(document, engine),
    }
}
