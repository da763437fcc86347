use crate::constants::{POINTER_EASE, POINTER_MIN_STRENGTH, POINTER_STRENGTH_EASE};
use glam::Vec2;

/// Which family of host events feeds the tracker. Chosen once at startup:
/// pointer events when the host supports them, legacy mouse events otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Pointer,
    Mouse,
}

impl InputSource {
    pub fn select(pointer_events_supported: bool) -> Self {
        if pointer_events_supported {
            InputSource::Pointer
        } else {
            InputSource::Mouse
        }
    }

    pub fn move_event(self) -> &'static str {
        match self {
            InputSource::Pointer => "pointermove",
            InputSource::Mouse => "mousemove",
        }
    }

    /// Events that end the pointer's engagement with the page.
    pub fn exit_events(self) -> &'static [&'static str] {
        match self {
            InputSource::Pointer => &["pointerleave", "pointercancel"],
            InputSource::Mouse => &["mouseleave"],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub target: Vec2,
    pub position: Vec2,
    pub active: bool,
    pub strength: f32,
}

/// Smoothed pointer position and eased activation strength.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    state: PointerState,
    ease: f32,
    strength_ease: f32,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(POINTER_EASE, POINTER_STRENGTH_EASE)
    }
}

impl PointerTracker {
    pub fn new(ease: f32, strength_ease: f32) -> Self {
        Self {
            state: PointerState::default(),
            ease: ease.clamp(0.0, 1.0),
            strength_ease: strength_ease.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn state(&self) -> &PointerState {
        &self.state
    }

    /// Record a raw move. The first move after the pointer was inactive
    /// snaps the displayed position; strength keeps easing from where it is.
    pub fn move_to(&mut self, target: Vec2) {
        if !target.is_finite() {
            return;
        }
        self.state.target = target;
        if !self.state.active {
            self.state.position = target;
        }
        self.state.active = true;
    }

    /// Leave, cancel, window blur or tab hidden.
    pub fn release(&mut self) {
        self.state.active = false;
    }

    /// Advance one processed frame.
    pub fn step(&mut self) {
        let s = &mut self.state;
        s.position += (s.target - s.position) * self.ease;
        let goal = if s.active { 1.0 } else { 0.0 };
        s.strength = (s.strength + (goal - s.strength) * self.strength_ease).clamp(0.0, 1.0);
    }

    /// Strength that may act on particles; zero on coarse pointers.
    pub fn influence(&self, coarse_pointer: bool) -> f32 {
        if coarse_pointer || self.state.strength < POINTER_MIN_STRENGTH {
            0.0
        } else {
            self.state.strength
        }
    }

    /// Whether the pointer glow should be drawn this frame.
    pub fn glows(&self, coarse_pointer: bool) -> bool {
        self.state.active && !coarse_pointer
    }

    pub fn reset(&mut self) {
        self.state = PointerState::default();
    }
}
