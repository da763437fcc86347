//! Particle layers and their procedural generation.
//!
//! Arrays are always produced in full batches; a rebuild replaces them
//! wholesale and the per-frame step only mutates particles in place.

use crate::color::Rgb;
use crate::constants::*;
use crate::geometry::ViewportGeometry;
use crate::physics::wrap_into;
use crate::projection::spherical_to_unit;
use crate::quality::QualityProfile;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerId {
    Star,
    Cloud,
    Ember,
    Globe,
}

impl LayerId {
    /// Distance past the viewport edge before a particle wraps.
    pub fn margin(self) -> f32 {
        match self {
            LayerId::Star => STAR_MARGIN,
            LayerId::Cloud => CLOUD_MARGIN,
            LayerId::Ember => EMBER_MARGIN,
            LayerId::Globe => 0.0,
        }
    }

    pub fn pointer_scale(self) -> f32 {
        match self {
            LayerId::Star => STAR_POINTER_SCALE,
            LayerId::Cloud => CLOUD_POINTER_SCALE,
            LayerId::Ember => EMBER_POINTER_SCALE,
            LayerId::Globe => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub twinkle: f32,
    pub phase: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cloud {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub twinkle: f32,
    pub phase: f32,
    /// 0 = far (faint, small), 1 = near.
    pub depth: f32,
    pub drift: f32,
    pub band: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ember {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub pulse: f32,
    pub phase: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Ocean,
    Land,
    City,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobeParticle {
    pub lon: f32,
    pub lat: f32,
    pub unit: Vec3,
    pub shell: f32,
    pub kind: SurfaceKind,
    pub intensity: f32,
    /// Own color instead of the kind's sprite (sampled from an image).
    pub tint: Option<Rgb>,
    pub size: f32,
    pub alpha: f32,
    pub twinkle: f32,
    pub phase: f32,
}

/// Decides what lies under a point of the globe.
pub trait Classifier {
    fn classify(&self, lon: f32, lat: f32) -> SurfaceKind;

    /// Brightness multiplier in `[0, 1]` for the particle at this point.
    fn intensity(&self, _lon: f32, _lat: f32) -> f32 {
        1.0
    }

    /// Whether a particle may be placed here. Rejected points are resampled.
    fn accepts(&self, _lon: f32, _lat: f32) -> bool {
        true
    }

    fn tint(&self, _lon: f32, _lat: f32) -> Option<Rgb> {
        None
    }
}

/// Stable pseudo-continents from a few summed sinusoids.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoiseClassifier;

impl NoiseClassifier {
    pub fn landness(lon: f32, lat: f32) -> f32 {
        let p = spherical_to_unit(lon, lat);
        let n1 = ((p.x + 0.19) * 5.8).sin() * 0.9
            + ((p.y - 0.13) * 6.2).cos() * 0.82
            + ((p.z + 0.05) * 4.9).sin() * 0.75;
        let n2 = ((p.x + p.y) * 7.4).sin() * 0.52
            + ((p.x - p.z) * 6.9).cos() * 0.44
            + ((p.y + p.z) * 8.1).sin() * 0.38;
        (n1 + n2) / 2.6 + p.y * 0.1 - p.z.abs() * 0.08
    }
}

impl Classifier for NoiseClassifier {
    fn classify(&self, lon: f32, lat: f32) -> SurfaceKind {
        let landness = Self::landness(lon, lat);
        if landness > CITY_THRESHOLD && hash01(lon, lat) < CITY_SHARE {
            SurfaceKind::City
        } else if landness > LAND_THRESHOLD {
            SurfaceKind::Land
        } else {
            SurfaceKind::Ocean
        }
    }
}

// Deterministic value in [0, 1) per coordinate pair.
#[inline]
fn hash01(lon: f32, lat: f32) -> f32 {
    let h = ((lon * 12.9898 + lat * 78.233).sin() * 43758.545).fract();
    h.abs()
}

#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    pub stars: Vec<Star>,
    pub clouds: Vec<Cloud>,
    pub embers: Vec<Ember>,
    pub globe: Vec<GlobeParticle>,
    /// Share of clouds per band glow, normalized so the mean weight is 1.
    pub band_weights: Vec<f32>,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(
        geometry: &ViewportGeometry,
        profile: &QualityProfile,
        classifier: &dyn Classifier,
        rng: &mut R,
    ) -> Self {
        let counts = profile.counts;
        let stars = (0..counts.stars)
            .map(|_| make_star(geometry, profile.star_speed, rng))
            .collect();
        let bands = profile.cloud_bands.max(1);
        let clouds: Vec<Cloud> = (0..counts.clouds)
            .map(|_| make_cloud(geometry, profile.cloud_speed, bands, rng))
            .collect();
        let embers = (0..counts.embers)
            .map(|_| make_ember(geometry, profile.cloud_speed, rng))
            .collect();
        let band_weights = band_weights(&clouds, profile.cloud_bands);
        let globe = generate_globe(counts.globe, classifier, rng);
        Self {
            stars,
            clouds,
            embers,
            globe,
            band_weights,
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len() + self.clouds.len() + self.embers.len() + self.globe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn generate_globe<R: Rng + ?Sized>(
    count: usize,
    classifier: &dyn Classifier,
    rng: &mut R,
) -> Vec<GlobeParticle> {
    (0..count)
        .map(|_| {
            let (mut lon, mut lat) = sphere_point(rng);
            for _ in 1..GLOBE_PLACEMENT_ATTEMPTS {
                if classifier.accepts(lon, lat) {
                    break;
                }
                (lon, lat) = sphere_point(rng);
            }
            GlobeParticle {
                lon,
                lat,
                unit: spherical_to_unit(lon, lat),
                shell: between(rng, GLOBE_SHELL[0], GLOBE_SHELL[1]),
                kind: classifier.classify(lon, lat),
                intensity: classifier.intensity(lon, lat).clamp(0.0, 1.0),
                tint: classifier.tint(lon, lat),
                size: between(rng, 0.52, 1.5),
                alpha: between(rng, 0.2, 0.94),
                twinkle: between(rng, 0.0012, 0.0058),
                phase: between(rng, 0.0, TAU),
            }
        })
        .collect()
}

fn sphere_point<R: Rng + ?Sized>(rng: &mut R) -> (f32, f32) {
    let lon = between(rng, 0.0, TAU).rem_euclid(TAU);
    // asin of a uniform value gives equal density per unit of surface area
    let lat = between(rng, -1.0, 1.0).clamp(-1.0, 1.0).asin();
    (lon, lat)
}

fn band_weights(clouds: &[Cloud], bands: usize) -> Vec<f32> {
    if bands == 0 {
        return Vec::new();
    }
    let mut counts = vec![0usize; bands];
    for c in clouds {
        counts[c.band.min(bands - 1)] += 1;
    }
    let mean = clouds.len().max(1) as f32 / bands as f32;
    counts.into_iter().map(|n| n as f32 / mean).collect()
}

#[inline]
fn between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

fn horizon_point<R: Rng + ?Sized>(geometry: &ViewportGeometry, rng: &mut R) -> Vec2 {
    let t = between(rng, HORIZON_ARC[0] * PI, HORIZON_ARC[1] * PI);
    geometry.horizon.point_at(t)
}

fn make_star<R: Rng + ?Sized>(geometry: &ViewportGeometry, speed: f32, rng: &mut R) -> Star {
    let heading = between(rng, 0.0, TAU);
    let v = between(rng, 0.34, 0.92) * speed;
    Star {
        pos: Vec2::new(rng.gen::<f32>() * geometry.width, rng.gen::<f32>() * geometry.height),
        vel: Vec2::new(heading.cos(), heading.sin()) * v,
        size: between(rng, 0.45, 1.9),
        alpha: between(rng, 0.12, 0.44),
        twinkle: between(rng, 0.0015, 0.007),
        phase: between(rng, 0.0, TAU),
    }
}

fn make_cloud<R: Rng + ?Sized>(
    geometry: &ViewportGeometry,
    speed: f32,
    bands: usize,
    rng: &mut R,
) -> Cloud {
    let seed = horizon_point(geometry, rng);
    let jitter = Vec2::new(
        between(rng, -0.03, 0.03) * geometry.width,
        between(rng, -0.025, 0.02) * geometry.height,
    );
    Cloud {
        pos: wrap_into(seed + jitter, geometry, CLOUD_MARGIN),
        vel: Vec2::new(between(rng, -0.4, 0.4), between(rng, -0.12, 0.1)) * speed,
        size: between(rng, 0.5, 1.5),
        alpha: between(rng, 0.08, 0.46),
        twinkle: between(rng, 0.0012, 0.004),
        phase: between(rng, 0.0, TAU),
        depth: rng.gen::<f32>(),
        drift: between(rng, 0.2, 1.1),
        band: rng.gen_range(0..bands),
    }
}

fn make_ember<R: Rng + ?Sized>(geometry: &ViewportGeometry, speed: f32, rng: &mut R) -> Ember {
    let seed = horizon_point(geometry, rng);
    let jitter = Vec2::new(
        between(rng, -0.02, 0.02) * geometry.width,
        between(rng, -0.012, 0.012) * geometry.height,
    );
    Ember {
        pos: wrap_into(seed + jitter, geometry, EMBER_MARGIN),
        vel: Vec2::new(between(rng, -0.3, 0.3), between(rng, -0.08, 0.08)) * speed,
        size: between(rng, 0.55, 1.4),
        alpha: between(rng, 0.12, 0.5),
        pulse: between(rng, 0.002, 0.006),
        phase: between(rng, 0.0, TAU),
    }
}
