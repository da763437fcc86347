use crate::constants::{
    DEFAULT_HARDWARE_CORES, GALLERY_SELECTOR, GLOBE_ROOT_CLASS, THEME_ATTRIBUTE,
};
use skyglow_core::{Theme, ThemeSource, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Window inner size in CSS pixels plus the raw device pixel ratio.
pub fn read_viewport(window: &web::Window) -> Viewport {
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32
    };
    Viewport::new(
        px(window.inner_width()),
        px(window.inner_height()),
        window.device_pixel_ratio() as f32,
    )
}

pub fn media_matches(window: &web::Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}

pub fn is_gallery_page(document: &web::Document) -> bool {
    document
        .query_selector(GALLERY_SELECTOR)
        .ok()
        .flatten()
        .is_some()
}

pub fn hardware_cores(window: &web::Window) -> u32 {
    let cores = window.navigator().hardware_concurrency();
    if cores.is_finite() && cores >= 1.0 {
        cores as u32
    } else {
        DEFAULT_HARDWARE_CORES
    }
}

pub fn mark_globe_root(document: &web::Document, on: bool) {
    if let Some(root) = document.document_element() {
        let list = root.class_list();
        _ = if on {
            list.add_1(GLOBE_ROOT_CLASS)
        } else {
            list.remove_1(GLOBE_ROOT_CLASS)
        };
    }
}

/// Palette variables from the root element's computed style.
pub struct CssThemeSource {
    style: web::CssStyleDeclaration,
    theme: Theme,
}

impl CssThemeSource {
    pub fn read(window: &web::Window, document: &web::Document) -> Option<Self> {
        let root = document.document_element()?;
        let style = window.get_computed_style(&root).ok().flatten()?;
        let theme = Theme::from_marker(root.get_attribute(THEME_ATTRIBUTE).as_deref());
        Some(Self { style, theme })
    }
}

impl ThemeSource for CssThemeSource {
    fn variable(&self, name: &str) -> Option<String> {
        self.style
            .get_property_value(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn theme(&self) -> Theme {
        self.theme
    }
}

/// Theme source used when computed style is unavailable: fallback palette,
/// theme from the marker attribute only.
pub struct MarkerThemeSource(pub Theme);

impl ThemeSource for MarkerThemeSource {
    fn variable(&self, _name: &str) -> Option<String> {
        None
    }

    fn theme(&self) -> Theme {
        self.0
    }
}

pub fn theme_marker(document: &web::Document) -> Theme {
    Theme::from_marker(
        document
            .document_element()
            .and_then(|root| root.get_attribute(THEME_ATTRIBUTE))
            .as_deref(),
    )
}

/// An installed event listener; removed from its target when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn add(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        Self::install(target, event, handler, false)
    }

    /// Like [`Listener::add`], but the browser is told the handler never
    /// calls `preventDefault`, so scrolling is not held up by it.
    pub fn add_passive(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        Self::install(target, event, handler, true)
    }

    fn install(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
        passive: bool,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let callback = closure.as_ref().unchecked_ref();
        let added = if passive {
            let options = web::AddEventListenerOptions::new();
            options.set_passive(true);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                event, callback, &options,
            )
        } else {
            target.add_event_listener_with_callback(event, callback)
        };
        if let Err(e) = added {
            log::warn!("[dom] could not listen for {}: {:?}", event, e);
            return None;
        }
        Some(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
