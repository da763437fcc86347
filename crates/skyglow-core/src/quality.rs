//! Device presets, resolved particle counts and adaptive quality.

use crate::color::ThemeCoefficients;
use crate::config::{Environment, LayerSet};
use crate::constants::*;
use crate::geometry::ViewportGeometry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn classify(viewport_width: f32, coarse_pointer: bool) -> Self {
        if viewport_width <= MOBILE_BREAKPOINT_PX || coarse_pointer {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn preset(self) -> &'static Preset {
        match self {
            DeviceClass::Desktop => &Preset::DESKTOP,
            DeviceClass::Mobile => &Preset::MOBILE,
        }
    }
}

/// Base counts and speeds before any scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preset {
    pub stars: usize,
    pub clouds: usize,
    pub embers: usize,
    pub globe: usize,
    pub cloud_bands: usize,
    pub star_speed: f32,
    pub cloud_speed: f32,
}

impl Preset {
    pub const DESKTOP: Self = Self {
        stars: 140,
        clouds: 360,
        embers: 90,
        globe: 1320,
        cloud_bands: 6,
        star_speed: 0.024,
        cloud_speed: 0.095,
    };
    pub const MOBILE: Self = Self {
        stars: 80,
        clouds: 220,
        embers: 52,
        globe: 820,
        cloud_bands: 4,
        star_speed: 0.017,
        cloud_speed: 0.07,
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerCounts {
    pub stars: usize,
    pub clouds: usize,
    pub embers: usize,
    pub globe: usize,
}

/// Everything generation needs to know about how much to spawn and how fast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityProfile {
    pub device: DeviceClass,
    pub counts: LayerCounts,
    pub cloud_bands: usize,
    pub star_speed: f32,
    pub cloud_speed: f32,
    pub quality_scale: f32,
    pub theme_density: f32,
}

impl QualityProfile {
    pub fn resolve(
        geometry: &ViewportGeometry,
        env: &Environment,
        layers: LayerSet,
        theme: ThemeCoefficients,
        adaptive: f32,
    ) -> Self {
        let device = DeviceClass::classify(geometry.width, env.coarse_pointer);
        let preset = device.preset();
        let quality_scale = quality_scale(env.page_quality, adaptive);
        let scaled = |enabled: bool, base: usize, density: f32, floor: usize| {
            if !enabled {
                return 0;
            }
            ((base as f32 * quality_scale * density).round() as usize).max(floor)
        };
        let counts = LayerCounts {
            stars: scaled(layers.stars, preset.stars, theme.density, MIN_STARS),
            clouds: scaled(layers.clouds, preset.clouds, theme.density, MIN_CLOUDS),
            embers: scaled(layers.clouds, preset.embers, theme.density, MIN_EMBERS),
            globe: scaled(layers.globe, preset.globe, theme.globe_density, MIN_GLOBE),
        };
        Self {
            device,
            counts,
            cloud_bands: if layers.clouds { preset.cloud_bands } else { 0 },
            star_speed: preset.star_speed,
            cloud_speed: preset.cloud_speed,
            quality_scale,
            theme_density: theme.density,
        }
    }
}

pub fn quality_scale(page_quality: f32, adaptive: f32) -> f32 {
    let q = page_quality * adaptive;
    if q.is_finite() {
        q.clamp(QUALITY_SCALE_MIN, QUALITY_SCALE_MAX)
    } else {
        QUALITY_SCALE_MAX
    }
}

/// Frame-cost monitor that nudges the quality factor up or down.
///
/// Changes are reported to the caller, which rebuilds the field between
/// frames; the monitor never touches particles itself.
#[derive(Clone, Debug)]
pub struct AdaptiveQuality {
    enabled: bool,
    level: f32,
    sum_ms: f64,
    samples: u32,
    last_adjust_ms: Option<f64>,
}

impl AdaptiveQuality {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            level: 1.0,
            sum_ms: 0.0,
            samples: 0,
            last_adjust_ms: None,
        }
    }

    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Drop partial samples (after a restart the next costs are not comparable).
    pub fn reset_window(&mut self) {
        self.sum_ms = 0.0;
        self.samples = 0;
    }

    /// Record one frame's work cost. Returns `true` when the level changed.
    pub fn record(&mut self, cost_ms: f64, now_ms: f64) -> bool {
        if !self.enabled || !cost_ms.is_finite() || cost_ms < 0.0 {
            return false;
        }
        self.sum_ms += cost_ms;
        self.samples += 1;
        if self.samples < ADAPTIVE_WINDOW {
            return false;
        }
        let mean = self.sum_ms / self.samples as f64;
        self.reset_window();
        if let Some(last) = self.last_adjust_ms {
            if now_ms - last < ADAPTIVE_COOLDOWN_MS {
                return false;
            }
        }
        let next = if mean > ADAPTIVE_SLOW_MS {
            (self.level - ADAPTIVE_STEP_DOWN).max(QUALITY_SCALE_MIN)
        } else if mean < ADAPTIVE_FAST_MS {
            (self.level + ADAPTIVE_STEP_UP).min(QUALITY_SCALE_MAX)
        } else {
            self.level
        };
        if (next - self.level).abs() < f32::EPSILON {
            return false;
        }
        log::debug!("[quality] adaptive {:.2} -> {:.2} (mean {:.1}ms)", self.level, next, mean);
        self.level = next;
        self.last_adjust_ms = Some(now_ms);
        true
    }
}
