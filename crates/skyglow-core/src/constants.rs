//! Tuning constants for the background engine.
//!
//! These express intended behavior (ease factors, clamp limits, presets) and
//! keep magic numbers out of the simulation and render code.

use crate::color::Rgb;

// Device classification
pub const MOBILE_BREAKPOINT_PX: f32 = 760.0; // width at or below this is mobile
pub const MAX_DEVICE_PIXEL_RATIO: f32 = 2.0;
pub const MIN_DEVICE_PIXEL_RATIO: f32 = 1.0;

// Quality scale bounds (page quality × adaptive quality)
pub const QUALITY_SCALE_MIN: f32 = 0.5;
pub const QUALITY_SCALE_MAX: f32 = 1.0;

// Per-layer count floors after scaling
pub const MIN_STARS: usize = 22;
pub const MIN_CLOUDS: usize = 64;
pub const MIN_EMBERS: usize = 10;
pub const MIN_GLOBE: usize = 240;

// Pointer field
pub const POINTER_RADIUS: f32 = 210.0;
pub const POINTER_FORCE: f32 = 0.11;
pub const POINTER_MIN_STRENGTH: f32 = 0.01; // below this the field is ignored
pub const POINTER_EASE: f32 = 0.14; // displayed position per processed frame
pub const POINTER_STRENGTH_EASE: f32 = 0.08; // activation per processed frame
pub const POINTER_GLOW_RADIUS_FACTOR: f32 = 0.85;
pub const POINTER_GLOW_ALPHA: f32 = 0.08;
pub const POINTER_GLOW_MID_ALPHA: f32 = 0.032;

// Per-layer pointer response
pub const STAR_POINTER_SCALE: f32 = 0.28;
pub const CLOUD_POINTER_SCALE: f32 = 0.55;
pub const EMBER_POINTER_SCALE: f32 = 0.65;

// Wrap margins (css px beyond the viewport before wrapping)
pub const STAR_MARGIN: f32 = 8.0;
pub const CLOUD_MARGIN: f32 = 80.0;
pub const EMBER_MARGIN: f32 = 60.0;

// Frame pacing
pub const NOMINAL_FRAME_MS: f64 = 16.666;
pub const MIN_FRAME_INTERVAL_MS: f64 = 16.0;
pub const REDUCED_MIN_FRAME_INTERVAL_MS: f64 = 66.0;
pub const FRAME_SCALE_MIN: f32 = 0.6;
pub const FRAME_SCALE_MAX: f32 = 1.8;
pub const REDUCED_MOTION_SCALE: f32 = 0.3;

// Wind (shared low-frequency drift, per ms of simulation time)
pub const STAR_WIND_FREQ: [f64; 2] = [0.000_25, 0.000_19];
pub const STAR_WIND_AMP: [f32; 2] = [0.012, 0.01];
pub const CLOUD_WIND_FREQ: [f64; 2] = [0.000_15, 0.000_12];
pub const CLOUD_WIND_AMP: [f32; 2] = [0.06, 0.03];
pub const EMBER_WIND_FACTOR: [f32; 2] = [0.5, 0.35];
pub const CLOUD_WOBBLE_AMP: f32 = 0.0042; // 0.14 * 0.03
pub const CLOUD_SWAY_FREQ: f64 = 0.000_09;
pub const CLOUD_SWAY_AMP: f32 = 0.012;
pub const STAR_JITTER_AMP: f32 = 0.004;

// Horizon ellipse (fractions of viewport)
pub const HORIZON_CENTER: [f32; 2] = [0.5, 1.07];
pub const HORIZON_RADII: [f32; 2] = [0.9, 0.42];
pub const HORIZON_ARC: [f32; 2] = [-0.95, -0.05]; // in units of π

// Globe anchors (fractions of viewport; radius of min(width, height))
pub const GLOBE_CENTER: [f32; 2] = [0.57, 0.61];
pub const GLOBE_RADIUS: f32 = 0.47;
pub const GLOBE_SHELL: [f32; 2] = [0.68, 1.02];

// Globe motion
pub const GLOBE_SPIN_PER_MS: f32 = 0.000_06;
pub const GLOBE_TILT: f32 = 0.32;
pub const GLOBE_TILT_WOBBLE: f32 = 0.035;
pub const GLOBE_TILT_WOBBLE_FREQ: f64 = 0.000_11;
pub const GLOBE_POINTER_YAW: f32 = 0.18;
pub const GLOBE_POINTER_PITCH: f32 = 0.06;

// Projection (perspective = PERSPECTIVE_BASE + depth * PERSPECTIVE_SPAN)
pub const PERSPECTIVE_BASE: f32 = 0.62;
pub const PERSPECTIVE_SPAN: f32 = 0.44;

// Continent classifier thresholds
pub const LAND_THRESHOLD: f32 = 0.18;
pub const CITY_THRESHOLD: f32 = 0.44;
pub const CITY_SHARE: f32 = 0.36;

// Illumination image classification (mean channel value)
pub const ILLUMINATION_LAND_LUMA: f32 = 15.0;
pub const ILLUMINATION_CITY_LUMA: f32 = 60.0;
pub const ILLUMINATION_WARM: Rgb = Rgb::new(255, 187, 51); // sampled colors lean toward this
pub const ILLUMINATION_WARM_MIX: f32 = 0.6;
pub const GLOBE_PLACEMENT_ATTEMPTS: usize = 24; // per particle before accepting any point

// Adaptive quality
pub const ADAPTIVE_WINDOW: u32 = 90;
pub const ADAPTIVE_SLOW_MS: f64 = 12.0;
pub const ADAPTIVE_FAST_MS: f64 = 6.0;
pub const ADAPTIVE_STEP_DOWN: f32 = 0.1;
pub const ADAPTIVE_STEP_UP: f32 = 0.05;
pub const ADAPTIVE_COOLDOWN_MS: f64 = 4000.0;

// Fallback palette (primary, secondary, accent)
pub const FALLBACK_PRIMARY: Rgb = Rgb::new(68, 99, 107);
pub const FALLBACK_SECONDARY: Rgb = Rgb::new(86, 126, 137);
pub const FALLBACK_ACCENT: Rgb = Rgb::new(62, 105, 117);

// Fixed warm tones for embers and city lights
pub const EMBER_CORE: Rgb = Rgb::new(255, 206, 128);
pub const EMBER_OUTER: Rgb = Rgb::new(255, 172, 92);
pub const CITY_CORE: Rgb = Rgb::new(255, 216, 154);
pub const CITY_OUTER: Rgb = Rgb::new(255, 170, 90);
