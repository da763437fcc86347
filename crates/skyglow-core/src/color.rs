//! Theme-aware palette resolution.
//!
//! The page exposes three color variables as whitespace separated channel
//! triplets (`"68 99 107"`). Anything that does not parse into three finite
//! values in `[0, 255]` resolves to the fallback color for that slot.

use crate::constants::{FALLBACK_ACCENT, FALLBACK_PRIMARY, FALLBACK_SECONDARY};
use std::fmt;

/// Style variable names read for the three palette slots.
pub const PRIMARY_VAR: &str = "--network-dot-rgb";
pub const SECONDARY_VAR: &str = "--network-line-rgb";
pub const ACCENT_VAR: &str = "--network-pointer-rgb";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend toward `other`, rounded per channel.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let lerp = |a: u8, b: u8| {
            let v = a as f32 + (b as f32 - a as f32) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }

    /// Per-channel `c * scale + offset`, clamped to a valid channel.
    pub fn affine(self, scale: [f32; 3], offset: [f32; 3]) -> Rgb {
        let ch = |c: u8, i: usize| (c as f32 * scale[i] + offset[i]).round().clamp(0.0, 255.0) as u8;
        Rgb::new(ch(self.r, 0), ch(self.g, 1), ch(self.b, 2))
    }

    /// CSS `rgba()` string with the given alpha.
    pub fn css(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha.clamp(0.0, 1.0))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

/// Parse a `"r g b"` channel list.
///
/// Every value must be a finite number in `[0, 255]` and there must be at
/// least three of them, otherwise the result is `None`. Values past the third
/// are validated but ignored.
pub fn parse_channels(value: &str) -> Option<Rgb> {
    let channels = value
        .split_whitespace()
        .map(|part| {
            part.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && (0.0..=255.0).contains(v))
                .map(|v| v.round() as u8)
        })
        .collect::<Option<Vec<u8>>>()?;
    match channels.as_slice() {
        [r, g, b, ..] => Some(Rgb::new(*r, *g, *b)),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_marker(marker: Option<&str>) -> Self {
        match marker {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn coefficients(self) -> ThemeCoefficients {
        match self {
            Theme::Dark => ThemeCoefficients::DARK,
            Theme::Light => ThemeCoefficients::LIGHT,
        }
    }
}

/// Scale factors applied to alpha, sprite size and particle density per theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeCoefficients {
    pub star_alpha: f32,
    pub band_alpha: f32,
    pub cloud_alpha: f32,
    pub globe_sprite_scale: f32,
    pub density: f32,
    pub globe_density: f32,
}

impl ThemeCoefficients {
    pub const DARK: Self = Self {
        star_alpha: 1.0,
        band_alpha: 1.0,
        cloud_alpha: 1.0,
        globe_sprite_scale: 1.0,
        density: 1.0,
        globe_density: 1.0,
    };
    pub const LIGHT: Self = Self {
        star_alpha: 0.62,
        band_alpha: 0.44,
        cloud_alpha: 0.5,
        globe_sprite_scale: 0.86,
        density: 0.58,
        globe_density: 0.62,
    };
}

/// Where theme variables come from (computed style in the browser).
pub trait ThemeSource {
    fn variable(&self, name: &str) -> Option<String>;
    fn theme(&self) -> Theme;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl Palette {
    pub const FALLBACK: Self = Self {
        primary: FALLBACK_PRIMARY,
        secondary: FALLBACK_SECONDARY,
        accent: FALLBACK_ACCENT,
    };

    pub fn resolve(source: &dyn ThemeSource) -> Self {
        let slot = |name: &str, fallback: Rgb| {
            source
                .variable(name)
                .as_deref()
                .and_then(parse_channels)
                .unwrap_or(fallback)
        };
        Self {
            primary: slot(PRIMARY_VAR, FALLBACK_PRIMARY),
            secondary: slot(SECONDARY_VAR, FALLBACK_SECONDARY),
            accent: slot(ACCENT_VAR, FALLBACK_ACCENT),
        }
    }
}
