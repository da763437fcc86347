//! Globe classification from an equirectangular night-lights image.

use crate::color::Rgb;
use crate::constants::{
    ILLUMINATION_CITY_LUMA, ILLUMINATION_LAND_LUMA, ILLUMINATION_WARM, ILLUMINATION_WARM_MIX,
};
use crate::error::IlluminationError;
use crate::field::{Classifier, SurfaceKind};
use std::f32::consts::{PI, TAU};

/// RGBA pixels of an equirectangular map (longitude across, latitude down).
#[derive(Clone, Debug)]
pub struct IlluminationMap {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl IlluminationMap {
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, IlluminationError> {
        if width == 0 || height == 0 {
            return Err(IlluminationError::EmptyImage { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(IlluminationError::BufferSize {
                expected,
                actual: rgba.len(),
            });
        }
        let pixels = bytemuck::try_cast_slice::<u8, [u8; 4]>(rgba)
            .map_err(|_| IlluminationError::BufferSize {
                expected,
                actual: rgba.len(),
            })?
            .to_vec();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texture coordinates for a point: `u` follows longitude, `v` runs
    /// from the north pole (0) to the south pole (1).
    #[inline]
    pub fn uv(lon: f32, lat: f32) -> (f32, f32) {
        let u = lon.rem_euclid(TAU) / TAU;
        let v = 0.5 - lat / PI;
        (u, v.clamp(0.0, 1.0))
    }

    pub fn sample(&self, lon: f32, lat: f32) -> [u8; 4] {
        let (u, v) = Self::uv(lon, lat);
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }

    /// Mean of the color channels, `0..=255`.
    pub fn luminance(&self, lon: f32, lat: f32) -> f32 {
        let [r, g, b, _] = self.sample(lon, lat);
        (r as f32 + g as f32 + b as f32) / 3.0
    }
}

impl Classifier for IlluminationMap {
    fn classify(&self, lon: f32, lat: f32) -> SurfaceKind {
        let luma = self.luminance(lon, lat);
        if luma > ILLUMINATION_CITY_LUMA {
            SurfaceKind::City
        } else if luma > ILLUMINATION_LAND_LUMA {
            SurfaceKind::Land
        } else {
            SurfaceKind::Ocean
        }
    }

    fn intensity(&self, lon: f32, lat: f32) -> f32 {
        0.35 + 0.65 * self.luminance(lon, lat) / 255.0
    }

    /// Only lit pixels carry particles; dark ocean is left empty.
    fn accepts(&self, lon: f32, lat: f32) -> bool {
        self.luminance(lon, lat) > ILLUMINATION_LAND_LUMA
    }

    fn tint(&self, lon: f32, lat: f32) -> Option<Rgb> {
        let [r, g, b, _] = self.sample(lon, lat);
        Some(Rgb::new(r, g, b).mix(ILLUMINATION_WARM, ILLUMINATION_WARM_MIX))
    }
}
