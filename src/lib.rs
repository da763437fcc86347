#![cfg(target_arch = "wasm32")]
use skyglow_core::{Engine, Environment};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod canvas;
mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod illumination;

use canvas::CanvasSurface;
use frame::{FrameLoop, SharedEngine};

/// One running background: the engine, its frame loop and every host
/// subscription feeding it. Each background canvas on the page gets its own.
struct App {
    engine: SharedEngine,
    frames: Rc<FrameLoop>,
    lifecycle: Option<events::Lifecycle>,
    pointer: Vec<dom::Listener>,
    globe: bool,
    illumination_url: Option<String>,
}

impl App {
    fn dispose(mut self) {
        self.frames.shutdown();
        self.lifecycle.take();
        self.pointer.clear();
        self.engine.borrow_mut().dispose();
    }
}

thread_local! {
    static APPS: RefCell<Vec<App>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("skyglow-web starting");

    spawn_local(async move {
        dispose();
        let apps = match init() {
            Ok(apps) => apps,
            Err(e) => {
                log::error!("init error: {:?}", e);
                return;
            }
        };
        let loads: Vec<(SharedEngine, String)> = apps
            .iter()
            .filter(|app| app.globe)
            .filter_map(|app| Some((app.engine.clone(), app.illumination_url.clone()?)))
            .collect();
        APPS.with(|slot| *slot.borrow_mut() = apps);
        for (engine, url) in loads {
            spawn_local(load_illumination(engine, url));
        }
    });
    Ok(())
}

/// Stop every animation, remove every listener and drop the engines.
#[wasm_bindgen]
pub fn dispose() {
    let apps = APPS.with(|slot| std::mem::take(&mut *slot.borrow_mut()));
    if apps.is_empty() {
        return;
    }
    let count = apps.len();
    let globe = apps.iter().any(|app| app.globe);
    for app in apps {
        app.dispose();
    }
    if globe {
        if let Some(document) = dom::window_document() {
            dom::mark_globe_root(&document, false);
        }
    }
    log::info!("[app] disposed {} background(s)", count);
}

/// One app per background canvas on the page. Canvases without a 2D
/// context are skipped.
fn init() -> anyhow::Result<Vec<App>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let nodes = document
        .query_selector_all(constants::CANVAS_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if nodes.length() == 0 {
        log::debug!("[app] no background canvas on this page");
        return Ok(Vec::new());
    }

    let base_seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let mut apps = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        let Some(canvas_el) = nodes.item(index).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let seed = base_seed.wrapping_add(u64::from(index).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        if let Some(app) = init_canvas(&window, &document, canvas_el, seed)? {
            apps.push(app);
        }
    }
    log::info!("[app] {} background(s) running", apps.len());
    Ok(apps)
}

/// `Ok(None)` when the canvas has no 2D context.
fn init_canvas(
    window: &web::Window,
    document: &web::Document,
    canvas_el: web::Element,
    seed: u64,
) -> anyhow::Result<Option<App>> {
    let page = config::read(window, document, &canvas_el);
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let Some(surface) = CanvasSurface::new(canvas, document.clone()) else {
        log::debug!("[app] canvas has no 2d context");
        return Ok(None);
    };

    let env = Environment {
        coarse_pointer: dom::media_matches(window, constants::COARSE_POINTER_QUERY),
        reduced_motion: dom::media_matches(window, constants::REDUCED_MOTION_QUERY),
        visible: !document.hidden(),
        page_quality: page.page_quality,
    };
    let theme: Box<dyn skyglow_core::ThemeSource> = match dom::CssThemeSource::read(window, document) {
        Some(source) => Box::new(source),
        None => Box::new(dom::MarkerThemeSource(dom::theme_marker(document))),
    };
    let globe = page.engine.layers.globe;
    let engine: SharedEngine = Rc::new(RefCell::new(Engine::init(
        surface,
        page.engine,
        dom::read_viewport(window),
        env,
        theme.as_ref(),
        seed,
    )));
    if globe {
        dom::mark_globe_root(document, true);
    }

    let frames = FrameLoop::new(engine.clone());
    let lifecycle = events::wire_lifecycle(window, document, &engine, &frames);
    let source = events::detect_input_source(window);
    let pointer = events::wire_pointer(window, source, &engine);
    if engine.borrow().is_running() {
        frames.request();
    }

    Ok(Some(App {
        engine,
        frames,
        lifecycle: Some(lifecycle),
        pointer,
        globe,
        illumination_url: page.illumination_url,
    }))
}

async fn load_illumination(engine: SharedEngine, url: String) {
    let Some(document) = dom::window_document() else {
        return;
    };
    match illumination::load(&document, &url).await {
        Ok(map) => {
            let mut engine = engine.borrow_mut();
            if !engine.is_disposed() {
                engine.set_classifier(Box::new(map));
            }
        }
        Err(e) => log::warn!("[illumination] {}; keeping procedural globe: {:?}", url, e),
    }
}
