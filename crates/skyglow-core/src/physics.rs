//! Per-frame particle integration.
//!
//! Each particle's frame velocity is its base velocity plus a shared wind
//! term, a small phase-driven jitter and the pointer's radial push. Only the
//! position is integrated; base velocities never accumulate forces.

use crate::constants::*;
use crate::field::{Cloud, Ember, LayerId, ParticleField, Star};
use crate::geometry::ViewportGeometry;
use glam::Vec2;

/// Inputs shared by every particle in one step.
#[derive(Clone, Copy, Debug)]
pub struct StepContext {
    /// Simulation clock in ms after this frame's advance.
    pub elapsed_ms: f64,
    /// Frame time scale (already including the reduced-motion factor).
    pub time_scale: f32,
    pub pointer: Vec2,
    /// Pointer strength that may act on particles (0 on coarse pointers).
    pub pointer_influence: f32,
}

/// Low-frequency drift shared by all particles of a layer.
#[inline]
pub fn wind(elapsed_ms: f64, freq: [f64; 2], amp: [f32; 2]) -> Vec2 {
    Vec2::new(
        (elapsed_ms * freq[0]).sin() as f32 * amp[0],
        (elapsed_ms * freq[1]).cos() as f32 * amp[1],
    )
}

/// Displacement away from the pointer for a particle at `pos`.
///
/// Falls off linearly to zero at `POINTER_RADIUS`; zero when influence is
/// zero or the particle sits exactly on the pointer.
#[inline]
pub fn pointer_push(pos: Vec2, pointer: Vec2, influence: f32, layer_scale: f32) -> Vec2 {
    if influence <= 0.0 || layer_scale <= 0.0 {
        return Vec2::ZERO;
    }
    let d = pos - pointer;
    let dist = d.length();
    if dist <= 0.001 || dist >= POINTER_RADIUS {
        return Vec2::ZERO;
    }
    let force = (1.0 - dist / POINTER_RADIUS) * POINTER_FORCE * influence * layer_scale;
    d / dist * force
}

/// Toroidal wrap into `[-margin, extent + margin]` on both axes.
#[inline]
pub fn wrap_into(pos: Vec2, geometry: &ViewportGeometry, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, geometry.width, margin),
        wrap_axis(pos.y, geometry.height, margin),
    )
}

#[inline]
fn wrap_axis(v: f32, extent: f32, margin: f32) -> f32 {
    if !v.is_finite() {
        return -margin;
    }
    if v >= -margin && v <= extent + margin {
        return v;
    }
    let span = extent + 2.0 * margin;
    let wrapped = (v + margin).rem_euclid(span) - margin;
    wrapped.clamp(-margin, extent + margin)
}

pub fn step_field(field: &mut ParticleField, geometry: &ViewportGeometry, ctx: &StepContext) {
    step_stars(&mut field.stars, geometry, ctx);
    step_clouds(&mut field.clouds, geometry, ctx);
    step_embers(&mut field.embers, geometry, ctx);
}

pub fn step_stars(stars: &mut [Star], geometry: &ViewportGeometry, ctx: &StepContext) {
    let w = wind(ctx.elapsed_ms, STAR_WIND_FREQ, STAR_WIND_AMP);
    let t = ctx.elapsed_ms as f32;
    let scale = LayerId::Star.pointer_scale();
    for s in stars.iter_mut() {
        let jitter = Vec2::new(
            (t * s.twinkle + s.phase).sin(),
            (t * s.twinkle * 0.7 + s.phase).cos(),
        ) * STAR_JITTER_AMP;
        let push = pointer_push(s.pos, ctx.pointer, ctx.pointer_influence, scale);
        s.pos += (s.vel + w + jitter + push) * ctx.time_scale;
        s.pos = wrap_into(s.pos, geometry, LayerId::Star.margin());
    }
}

pub fn step_clouds(clouds: &mut [Cloud], geometry: &ViewportGeometry, ctx: &StepContext) {
    let w = wind(ctx.elapsed_ms, CLOUD_WIND_FREQ, CLOUD_WIND_AMP);
    let t = ctx.elapsed_ms;
    let scale = LayerId::Cloud.pointer_scale();
    for p in clouds.iter_mut() {
        let wobble = (t as f32 * p.twinkle + p.phase).sin() * CLOUD_WOBBLE_AMP;
        let sway = ((t * CLOUD_SWAY_FREQ) as f32 + p.phase).cos() * CLOUD_SWAY_AMP;
        let push = pointer_push(p.pos, ctx.pointer, ctx.pointer_influence, scale);
        p.pos += (p.vel + w * p.drift + Vec2::new(wobble, sway) + push) * ctx.time_scale;
        p.pos = wrap_into(p.pos, geometry, LayerId::Cloud.margin());
    }
}

pub fn step_embers(embers: &mut [Ember], geometry: &ViewportGeometry, ctx: &StepContext) {
    let w = wind(ctx.elapsed_ms, CLOUD_WIND_FREQ, CLOUD_WIND_AMP) * Vec2::from(EMBER_WIND_FACTOR);
    let scale = LayerId::Ember.pointer_scale();
    for e in embers.iter_mut() {
        let push = pointer_push(e.pos, ctx.pointer, ctx.pointer_influence, scale);
        e.pos += (e.vel + w + push) * ctx.time_scale;
        e.pos = wrap_into(e.pos, geometry, LayerId::Ember.margin());
    }
}
