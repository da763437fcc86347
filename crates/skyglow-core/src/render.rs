//! Frame composition in a fixed z-order:
//! background glows → stars → cloud and globe sprites → halo overlays →
//! pointer glow. Every pass restores default alpha/composite state.

use crate::color::{Palette, Rgb, Theme, ThemeCoefficients};
use crate::config::LayerSet;
use crate::constants::{
    POINTER_GLOW_ALPHA, POINTER_GLOW_MID_ALPHA, POINTER_GLOW_RADIUS_FACTOR, POINTER_RADIUS,
};
use crate::field::{ParticleField, SurfaceKind};
use crate::geometry::ViewportGeometry;
use crate::pointer::PointerState;
use crate::projection::Projected;
use crate::sprite::{SpriteKind, SpriteSet};
use crate::surface::{Blend, RadialGradient, Surface};
use glam::Vec2;

/// Borrowed view of everything one frame draws.
pub struct Scene<'a, S> {
    pub geometry: &'a ViewportGeometry,
    pub field: &'a ParticleField,
    /// Globe particles in draw order.
    pub projected: &'a [Projected],
    pub sprites: &'a SpriteSet<S>,
    pub palette: &'a Palette,
    pub theme: Theme,
    pub layers: LayerSet,
    pub pointer: &'a PointerState,
    pub pointer_glow: bool,
    pub elapsed_ms: f64,
    pub globe_yaw: f32,
}

struct GlobeTones {
    core: Rgb,
    edge: Rgb,
    glow: Rgb,
    sky: Rgb,
    aurora: Rgb,
    core_alpha: [f32; 2],
    edge_alpha: f32,
    halo_alpha: [f32; 2],
    sky_alpha: f32,
    aurora_alpha: f32,
    rim_alpha: f32,
}

const DARK_TONES: GlobeTones = GlobeTones {
    core: Rgb::new(10, 34, 72),
    edge: Rgb::new(3, 12, 28),
    glow: Rgb::new(68, 152, 232),
    sky: Rgb::new(126, 214, 255),
    aurora: Rgb::new(112, 228, 182),
    core_alpha: [0.42, 0.26],
    edge_alpha: 0.62,
    halo_alpha: [0.2, 0.12],
    sky_alpha: 0.36,
    aurora_alpha: 0.22,
    rim_alpha: 0.36,
};

const LIGHT_TONES: GlobeTones = GlobeTones {
    core: Rgb::new(110, 162, 182),
    edge: Rgb::new(70, 122, 148),
    glow: Rgb::new(118, 186, 210),
    sky: Rgb::new(110, 176, 205),
    aurora: Rgb::new(102, 176, 162),
    core_alpha: [0.22, 0.16],
    edge_alpha: 0.28,
    halo_alpha: [0.12, 0.06],
    sky_alpha: 0.2,
    aurora_alpha: 0.14,
    rim_alpha: 0.22,
};

fn tones(theme: Theme) -> &'static GlobeTones {
    match theme {
        Theme::Dark => &DARK_TONES,
        Theme::Light => &LIGHT_TONES,
    }
}

#[inline]
fn oscillate(elapsed_ms: f64, freq: f32, phase: f32, base: f32, span: f32) -> f32 {
    base + span * ((elapsed_ms as f32) * freq + phase).sin()
}

pub fn draw_frame<T: Surface>(surface: &mut T, scene: &Scene<'_, T::Sprite>) {
    let g = scene.geometry;
    surface.clear(g.width, g.height);

    if scene.layers.clouds {
        draw_cloud_bands(surface, scene);
    }
    if scene.layers.globe {
        draw_globe_base(surface, scene);
    }
    surface.reset_state();

    if scene.layers.stars {
        draw_stars(surface, scene);
        surface.reset_state();
    }

    if scene.layers.clouds {
        draw_clouds(surface, scene);
    }
    if scene.layers.globe {
        draw_globe_particles(surface, scene);
    }
    surface.reset_state();

    if scene.layers.globe {
        draw_atmosphere(surface, scene);
        surface.reset_state();
    }

    if scene.pointer_glow {
        draw_pointer_glow(surface, scene);
        surface.reset_state();
    }
}

fn draw_cloud_bands<T: Surface>(surface: &mut T, scene: &Scene<'_, T::Sprite>) {
    let bands = scene.field.band_weights.len();
    if bands == 0 {
        return;
    }
    let g = scene.geometry;
    let theme_alpha = scene.theme.coefficients().band_alpha;
    let a = scene.palette.secondary.mix(scene.palette.accent, 0.5);
    let b = scene.palette.primary.mix(scene.palette.secondary, 0.6);
    surface.set_blend(Blend::Screen);
    for (i, weight) in scene.field.band_weights.iter().enumerate() {
        let n = i as f32 / (bands.max(2) - 1) as f32;
        let sweep = scene.elapsed_ms as f32 * 0.000_035 + i as f32 * 0.8;
        let center = Vec2::new(
            g.width * (0.18 + n * 0.64) + sweep.sin() * g.width * 0.02,
            g.height * (0.78 + n * 0.16) + (sweep * 1.2).cos() * g.height * 0.02,
        );
        let radius = g.width.max(g.height) * (0.14 + n * 0.22);
        let w = weight.clamp(0.5, 1.5) * theme_alpha;
        let grad = RadialGradient::centered(center, radius)
            .stop(0.0, a, 0.08 * w)
            .stop(0.45, b, 0.04 * w)
            .stop(1.0, b, 0.0);
        surface.fill_radial(&grad);
    }
}

fn draw_globe_base<T: Surface>(surface: &mut T, scene: &Scene<'_, T::Sprite>) {
    let t = tones(scene.theme);
    let c = scene.geometry.globe.center;
    let r = scene.geometry.globe.radius;
    let body = RadialGradient::offset(c - Vec2::new(r * 0.24, r * 0.35), r * 0.14, c, r * 1.04)
        .stop(0.0, t.core, t.core_alpha[0])
        .stop(0.58, t.core, t.core_alpha[1])
        .stop(1.0, t.edge, t.edge_alpha);
    surface.fill_radial(&body);
    let halo = RadialGradient::offset(c, r * 0.66, c, r * 1.28)
        .stop(0.0, t.glow, t.halo_alpha[0])
        .stop(0.64, t.glow, t.halo_alpha[1])
        .stop(1.0, t.glow, 0.0);
    surface.fill_radial(&halo);
}

fn draw_stars<T: Surface>(surface: &mut T, scene: &Scene<'_, T::Sprite>) {
    let Some(sprite) = scene.sprites.get(SpriteKind::Star) else {
        return;
    };
    let theme_alpha = scene.theme.coefficients().star_alpha;
    surface.set_blend(Blend::Lighter);
    for s in &scene.field.stars {
        let twinkle = oscillate(scene.elapsed_ms, s.twinkle, s.phase, 0.72, 0.28);
        surface.set_alpha((s.alpha * twinkle * theme_alpha).clamp(0.0, 1.0));
        surface.draw_sprite(sprite, s.pos, s.size * 7.5);
    }
}

fn draw_clouds<T: Surface>(surface: &mut T, scene: &Scene<'_, T::Sprite>) {
    let theme_alpha = scene.theme.coefficients().cloud_alpha;
    surface.set_blend(Blend::Lighter);
    if let Some(sprite) = scene.sprites.get(SpriteKind::Cloud) {
        for p in &scene.field.clouds {
            let pulse = oscillate(scene.elapsed_ms, p.twinkle, p.phase, 0.74, 0.26);
            let alpha = p.alpha * pulse * (0.5 + p.depth * 0.7) * theme_alpha;
            surface.set_alpha(alpha.clamp(0.03, 0.78));
            surface.draw_sprite(sprite, p.pos, p.size * (12.0 + p.depth * 12.0));
        }
    }
    if let Some(sprite) = scene.sprites.get(SpriteKind::Ember) {
        for e in &scene.field.embers {
            let pulse = oscillate(scene.elapsed_ms, e.pulse, e.phase, 0.66, 0.34);
            surface.set_alpha((e.alpha * pulse * theme_alpha).clamp(0.06, 0.86));
            surface.draw_sprite(sprite, e.pos, e.size * 10.5);
        }
    }
}

fn draw_globe_particles<T: Surface>(surface: &mut T, scene: &Scene<'_, T::Sprite>) {
    let ThemeCoefficients {
        globe_sprite_scale, ..
    } = scene.theme.coefficients();
    surface.set_blend(Blend::Lighter);
    for proj in scene.projected {
        let Some(p) = scene.field.globe.get(proj.index) else {
            continue;
        };
        let front = proj.is_front();
        let twinkle = oscillate(scene.elapsed_ms, p.twinkle, p.phase, 0.72, 0.28);
        let depth_alpha = if front {
            0.28 + proj.depth * 0.9
        } else {
            0.1 + proj.depth * 0.36
        };
        let alpha = (p.alpha * twinkle * depth_alpha * p.intensity)
            .clamp(0.02, if front { 0.92 } else { 0.28 });
        let city = if p.kind == SurfaceKind::City { 1.16 } else { 1.0 };
        let size = p.size * (0.64 + proj.perspective * 1.08) * city * globe_sprite_scale * 4.0;
        // sampled colors have no prebuilt sprite; draw them as small gradients
        if let Some(tint) = p.tint {
            surface.set_alpha(alpha);
            surface.fill_radial(
                &RadialGradient::centered(proj.screen, size / 2.0)
                    .stop(0.0, tint, 0.95)
                    .stop(0.48, tint, 0.34)
                    .stop(1.0, tint, 0.0),
            );
        } else if let Some(sprite) = scene.sprites.get(SpriteKind::for_surface(p.kind)) {
            surface.set_alpha(alpha);
            surface.draw_sprite(sprite, proj.screen, size);
        }
    }
}

fn draw_atmosphere<T: Surface>(surface: &mut T, scene: &Scene<'_, T::Sprite>) {
    let t = tones(scene.theme);
    let c = scene.geometry.globe.center;
    let r = scene.geometry.globe.radius;
    let edge = Vec2::new(c.x + scene.globe_yaw.cos() * r * 0.08, c.y - r * 0.44);
    let glow = RadialGradient::centered(edge, r * 0.82)
        .stop(0.0, t.sky, t.sky_alpha)
        .stop(0.44, t.aurora, t.aurora_alpha)
        .stop(1.0, t.aurora, 0.0);
    surface.fill_radial(&glow);
    surface.stroke_circle(c, r * 1.005, t.sky, t.rim_alpha, (r * 0.012).max(1.2));
}

fn draw_pointer_glow<T: Surface>(surface: &mut T, scene: &Scene<'_, T::Sprite>) {
    let s = scene.pointer.strength;
    let accent = scene.palette.accent;
    let grad = RadialGradient::centered(scene.pointer.position, POINTER_RADIUS * POINTER_GLOW_RADIUS_FACTOR)
        .stop(0.0, accent, POINTER_GLOW_ALPHA * s)
        .stop(0.48, accent, POINTER_GLOW_MID_ALPHA * s)
        .stop(1.0, accent, 0.0);
    surface.fill_radial(&grad);
}
