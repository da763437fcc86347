//! Pre-rendered radial-gradient sprites per particle kind.

use crate::color::{Palette, Rgb};
use crate::constants::{CITY_CORE, CITY_OUTER, EMBER_CORE, EMBER_OUTER};
use crate::field::SurfaceKind;
use crate::surface::Surface;
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Star,
    Cloud,
    Ember,
    Ocean,
    Land,
    City,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 6] = [
        SpriteKind::Star,
        SpriteKind::Cloud,
        SpriteKind::Ember,
        SpriteKind::Ocean,
        SpriteKind::Land,
        SpriteKind::City,
    ];

    pub fn for_surface(kind: SurfaceKind) -> Self {
        match kind {
            SurfaceKind::Ocean => SpriteKind::Ocean,
            SurfaceKind::Land => SpriteKind::Land,
            SurfaceKind::City => SpriteKind::City,
        }
    }
}

/// Recipe for one sprite bitmap: `inner` at the center fading through
/// `outer` at `mid_stop` to fully transparent `outer` at the edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSpec {
    pub kind: SpriteKind,
    /// Bitmap edge length in backing pixels.
    pub size_px: u32,
    pub inner: Rgb,
    pub outer: Rgb,
    pub inner_alpha: f32,
    pub outer_alpha: f32,
    pub mid_stop: f32,
}

impl SpriteSpec {
    pub fn new(kind: SpriteKind, palette: &Palette, dpr: f32) -> Self {
        let Palette {
            primary,
            secondary,
            accent,
        } = *palette;
        let (base_size, inner, outer, inner_alpha, outer_alpha, mid_stop) = match kind {
            SpriteKind::Star => (
                30,
                primary.mix(accent, 0.62),
                secondary.mix(accent, 0.35),
                0.95,
                0.48,
                0.42,
            ),
            SpriteKind::Cloud => (
                42,
                secondary.mix(accent, 0.55),
                primary.mix(secondary, 0.62),
                0.92,
                0.38,
                0.42,
            ),
            SpriteKind::Ember => (34, EMBER_CORE, EMBER_OUTER, 0.95, 0.28, 0.42),
            SpriteKind::Ocean => (
                26,
                secondary.mix(accent, 0.56),
                primary.mix(secondary, 0.54),
                0.9,
                0.36,
                0.48,
            ),
            SpriteKind::Land => {
                let core = accent.affine([0.62, 0.78, 0.6], [18.0, 28.0, 16.0]);
                (24, core, core.mix(secondary, 0.48), 0.94, 0.34, 0.48)
            }
            SpriteKind::City => (30, CITY_CORE, CITY_OUTER, 0.95, 0.34, 0.48),
        };
        Self {
            kind,
            size_px: ((base_size as f32) * dpr.max(1.0)).round() as u32,
            inner,
            outer,
            inner_alpha,
            outer_alpha,
            mid_stop,
        }
    }
}

/// Sprites built for the current palette and backing scale.
///
/// A kind whose bitmap could not be created is simply absent; draw code
/// skips it.
pub struct SpriteSet<S> {
    sprites: FnvHashMap<SpriteKind, S>,
}

impl<S> Default for SpriteSet<S> {
    fn default() -> Self {
        Self {
            sprites: FnvHashMap::default(),
        }
    }
}

impl<S> SpriteSet<S> {
    pub fn build<T>(surface: &mut T, palette: &Palette, dpr: f32) -> Self
    where
        T: Surface<Sprite = S>,
    {
        let mut sprites = FnvHashMap::default();
        for kind in SpriteKind::ALL {
            let spec = SpriteSpec::new(kind, palette, dpr);
            match surface.create_sprite(&spec) {
                Some(sprite) => {
                    sprites.insert(kind, sprite);
                }
                None => log::warn!("[sprites] could not create {:?} sprite", kind),
            }
        }
        Self { sprites }
    }

    #[inline]
    pub fn get(&self, kind: SpriteKind) -> Option<&S> {
        self.sprites.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
