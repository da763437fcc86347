use crate::canvas::CanvasSurface;
use instant::Instant;
use skyglow_core::Engine;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedEngine = Rc<RefCell<Engine<CanvasSurface>>>;

/// `requestAnimationFrame` driver. At most one request is pending at a time;
/// restarting always cancels before rescheduling.
pub struct FrameLoop {
    raf_id: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameLoop {
    pub fn new(engine: SharedEngine) -> Rc<Self> {
        let frames = Rc::new(Self {
            raf_id: Cell::new(None),
            tick: RefCell::new(None),
        });
        let weak: Weak<Self> = Rc::downgrade(&frames);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(frames) = weak.upgrade() else {
                return;
            };
            frames.raf_id.set(None);
            let started = Instant::now();
            let step = engine.borrow_mut().tick(timestamp_ms);
            if step.draws() {
                let cost_ms = started.elapsed().as_secs_f64() * 1000.0;
                engine.borrow_mut().record_frame_cost(cost_ms);
            }
            if step.wants_next_frame() {
                frames.request();
            }
        }) as Box<dyn FnMut(f64)>);
        *frames.tick.borrow_mut() = Some(closure);
        frames
    }

    pub fn request(&self) {
        if self.raf_id.get().is_some() {
            return;
        }
        let Some(window) = web::window() else {
            return;
        };
        let tick = self.tick.borrow();
        let Some(tick) = tick.as_ref() else {
            return;
        };
        match window.request_animation_frame(tick.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id.set(Some(id)),
            Err(e) => log::warn!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }

    pub fn cancel(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(window) = web::window() {
                _ = window.cancel_animation_frame(id);
            }
        }
    }

    pub fn restart(&self) {
        self.cancel();
        self.request();
    }

    /// Cancel and release the frame callback; the loop cannot be restarted.
    pub fn shutdown(&self) {
        self.cancel();
        self.tick.borrow_mut().take();
    }
}
