use crate::constants::{
    GLOBE_CENTER, GLOBE_RADIUS, HORIZON_CENTER, HORIZON_RADII, MAX_DEVICE_PIXEL_RATIO,
    MIN_DEVICE_PIXEL_RATIO,
};
use glam::Vec2;

/// Raw viewport measurement as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    pub radii: Vec2,
}

impl Ellipse {
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.center + Vec2::new(t.cos(), t.sin()) * self.radii
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Viewport size plus the anchors every layer derives its placement from.
///
/// All lengths are CSS pixels; `backing_width`/`backing_height` are the
/// pixel-buffer dimensions after applying the clamped device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportGeometry {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
    pub horizon: Ellipse,
    pub globe: Circle,
}

impl ViewportGeometry {
    pub fn new(viewport: Viewport) -> Self {
        let width = sanitize_extent(viewport.width);
        let height = sanitize_extent(viewport.height);
        let dpr = if viewport.device_pixel_ratio.is_finite() {
            viewport
                .device_pixel_ratio
                .clamp(MIN_DEVICE_PIXEL_RATIO, MAX_DEVICE_PIXEL_RATIO)
        } else {
            MIN_DEVICE_PIXEL_RATIO
        };
        let size = Vec2::new(width, height);
        Self {
            width,
            height,
            dpr,
            horizon: Ellipse {
                center: Vec2::from(HORIZON_CENTER) * size,
                radii: Vec2::from(HORIZON_RADII) * size,
            },
            globe: Circle {
                center: Vec2::from(GLOBE_CENTER) * size,
                radius: width.min(height) * GLOBE_RADIUS,
            },
        }
    }

    pub fn backing_width(&self) -> u32 {
        (self.width * self.dpr).floor() as u32
    }

    pub fn backing_height(&self) -> u32 {
        (self.height * self.dpr).floor() as u32
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Map a viewport position to `[-1, 1]` on both axes (center = 0).
    pub fn normalized(&self, p: Vec2) -> Vec2 {
        ((p / self.size()) - 0.5) * 2.0
    }
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() {
        v.floor().max(1.0)
    } else {
        1.0
    }
}
