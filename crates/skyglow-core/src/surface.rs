//! The 2D drawing surface the renderer targets.

use crate::color::Rgb;
use crate::geometry::ViewportGeometry;
use crate::sprite::SpriteSpec;
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Blend {
    #[default]
    SourceOver,
    Screen,
    Lighter,
}

impl Blend {
    /// Canvas `globalCompositeOperation` name.
    pub fn as_str(self) -> &'static str {
        match self {
            Blend::SourceOver => "source-over",
            Blend::Screen => "screen",
            Blend::Lighter => "lighter",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgb,
    pub alpha: f32,
}

impl ColorStop {
    pub fn new(offset: f32, color: Rgb, alpha: f32) -> Self {
        Self {
            offset,
            color,
            alpha,
        }
    }
}

/// A filled disc shaded by a two-circle radial gradient.
///
/// The disc is centered on `outer` with radius `outer_radius`; the gradient
/// starts at `inner`/`inner_radius`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub inner: Vec2,
    pub inner_radius: f32,
    pub outer: Vec2,
    pub outer_radius: f32,
    pub stops: SmallVec<[ColorStop; 4]>,
}

impl RadialGradient {
    /// Concentric gradient from the center outward.
    pub fn centered(center: Vec2, radius: f32) -> Self {
        Self {
            inner: center,
            inner_radius: 0.0,
            outer: center,
            outer_radius: radius,
            stops: SmallVec::new(),
        }
    }

    pub fn offset(inner: Vec2, inner_radius: f32, outer: Vec2, outer_radius: f32) -> Self {
        Self {
            inner,
            inner_radius,
            outer,
            outer_radius,
            stops: SmallVec::new(),
        }
    }

    pub fn stop(mut self, offset: f32, color: Rgb, alpha: f32) -> Self {
        self.stops.push(ColorStop::new(offset, color, alpha));
        self
    }

    /// Largest alpha of any stop.
    pub fn peak_alpha(&self) -> f32 {
        self.stops.iter().map(|s| s.alpha).fold(0.0, f32::max)
    }
}

/// Drawing target. Coordinates are CSS pixels after `resize`.
///
/// Implementations must not panic when an underlying call fails; failures
/// degrade to a skipped draw.
pub trait Surface {
    type Sprite;

    fn resize(&mut self, geometry: &ViewportGeometry);
    fn clear(&mut self, width: f32, height: f32);
    fn set_blend(&mut self, blend: Blend);
    fn set_alpha(&mut self, alpha: f32);
    fn fill_radial(&mut self, gradient: &RadialGradient);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32, line_width: f32);
    fn create_sprite(&mut self, spec: &SpriteSpec) -> Option<Self::Sprite>;
    /// Draw `sprite` as a `size`×`size` square centered on `center`.
    fn draw_sprite(&mut self, sprite: &Self::Sprite, center: Vec2, size: f32);

    /// Restore default alpha and composite state.
    fn reset_state(&mut self) {
        self.set_alpha(1.0);
        self.set_blend(Blend::SourceOver);
    }
}
