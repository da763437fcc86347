//! Engine configuration and runtime environment.

use crate::constants::{POINTER_EASE, POINTER_STRENGTH_EASE};
use crate::error::ConfigError;
use std::str::FromStr;

/// Which layer kinds are generated and drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerSet {
    pub stars: bool,
    /// Cloud particles, embers and the band glows behind them.
    pub clouds: bool,
    pub globe: bool,
}

impl Default for LayerSet {
    fn default() -> Self {
        Self {
            stars: true,
            clouds: true,
            globe: false,
        }
    }
}

impl FromStr for LayerSet {
    type Err = ConfigError;

    /// Comma or whitespace separated list, e.g. `"stars, globe"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = LayerSet {
            stars: false,
            clouds: false,
            globe: false,
        };
        for name in s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|n| !n.is_empty())
        {
            match name.to_ascii_lowercase().as_str() {
                "stars" | "star" => set.stars = true,
                "clouds" | "cloud" | "nebula" => set.clouds = true,
                "globe" | "planet" => set.globe = true,
                other => return Err(ConfigError::UnknownLayer(other.to_string())),
            }
        }
        Ok(set)
    }
}

/// How globe particles are ordered for drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GlobeOrder {
    /// Back hemisphere (z < 0) first, then front (z >= 0).
    #[default]
    TwoPass,
    /// Full ascending sort by rotated depth.
    DepthSort,
}

impl FromStr for GlobeOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two-pass" | "twopass" | "hemispheres" => Ok(GlobeOrder::TwoPass),
            "depth-sort" | "depthsort" | "sorted" => Ok(GlobeOrder::DepthSort),
            other => Err(ConfigError::UnknownGlobeOrder(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub layers: LayerSet,
    pub globe_order: GlobeOrder,
    pub pointer_ease: f32,
    pub strength_ease: f32,
    pub adaptive_quality: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layers: LayerSet::default(),
            globe_order: GlobeOrder::default(),
            pointer_ease: POINTER_EASE,
            strength_ease: POINTER_STRENGTH_EASE,
            adaptive_quality: false,
        }
    }
}

/// Host capabilities and preferences that change at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    pub coarse_pointer: bool,
    pub reduced_motion: bool,
    pub visible: bool,
    pub page_quality: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            coarse_pointer: false,
            reduced_motion: false,
            visible: true,
            page_quality: 1.0,
        }
    }
}

/// Parse a page quality factor in `(0, 1]`.
pub fn parse_quality(s: &str) -> Result<f32, ConfigError> {
    match s.trim().parse::<f32>() {
        Ok(q) if q.is_finite() && q > 0.0 && q <= 1.0 => Ok(q),
        _ => Err(ConfigError::InvalidQuality(s.to_string())),
    }
}

pub fn parse_flag(s: &str) -> Result<bool, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(s.to_string())),
    }
}

/// Page quality factor from host hints: gallery pages and low core counts
/// get fewer particles.
pub fn page_quality(gallery_page: bool, hardware_cores: u32) -> f32 {
    let core_scale = match hardware_cores {
        0..=2 => 0.72,
        3..=4 => 0.86,
        _ => 1.0,
    };
    (if gallery_page { 0.8 } else { 1.0 }) * core_scale
}
