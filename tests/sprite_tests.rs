// Host-side tests for sprite recipes and when sprite sets are rebuilt.

mod common;

use common::{desktop_engine, MapThemeSource, RecordingSurface};
use skyglow_core::color::ACCENT_VAR;
use skyglow_core::constants::{EMBER_CORE, EMBER_OUTER};
use skyglow_core::{Palette, Rgb, SpriteKind, SpriteSet, SpriteSpec, Viewport};

fn palette() -> Palette {
    Palette {
        primary: Rgb::new(200, 40, 10),
        secondary: Rgb::new(20, 120, 220),
        accent: Rgb::new(90, 250, 60),
    }
}

#[test]
fn star_core_mixes_primary_toward_accent() {
    let p = palette();
    let star = SpriteSpec::new(SpriteKind::Star, &p, 1.0);
    assert_eq!(star.kind, SpriteKind::Star);
    assert_eq!(star.inner, p.primary.mix(p.accent, 0.62));
    assert_eq!(star.outer, p.secondary.mix(p.accent, 0.35));
    assert!(star.inner_alpha > star.outer_alpha);
    assert!(star.mid_stop > 0.0 && star.mid_stop < 1.0);
}

#[test]
fn ember_colors_ignore_palette() {
    let a = SpriteSpec::new(SpriteKind::Ember, &palette(), 1.0);
    let b = SpriteSpec::new(SpriteKind::Ember, &Palette::FALLBACK, 1.0);
    assert_eq!((a.inner, a.outer), (EMBER_CORE, EMBER_OUTER));
    assert_eq!((a.inner, a.outer), (b.inner, b.outer));
}

#[test]
fn bitmap_size_follows_backing_scale() {
    let p = palette();
    for kind in SpriteKind::ALL {
        let one = SpriteSpec::new(kind, &p, 1.0).size_px;
        assert!(one > 0);
        assert_eq!(SpriteSpec::new(kind, &p, 2.0).size_px, one * 2);
        assert_eq!(SpriteSpec::new(kind, &p, 0.5).size_px, one);
    }
}

#[test]
fn set_builds_every_kind_once() {
    let mut surface = RecordingSurface::new();
    let set = SpriteSet::build(&mut surface, &palette(), 1.0);
    assert_eq!(set.len(), SpriteKind::ALL.len());
    assert_eq!(surface.sprites_created, SpriteKind::ALL.len());
    for kind in SpriteKind::ALL {
        assert_eq!(set.get(kind), Some(&kind));
    }
}

#[test]
fn resize_to_new_backing_scale_rebuilds_sprites() {
    let mut e = desktop_engine();
    let before = e.surface().sprites_created;
    e.resize(Viewport::new(1920.0, 1080.0, 2.0));
    assert_eq!(e.surface().sprites_created, before + SpriteKind::ALL.len());
    assert_eq!(e.sprites().len(), SpriteKind::ALL.len());
}

#[test]
fn palette_change_reaches_sprite_recipe() {
    let mut e = desktop_engine();
    e.apply_theme(&MapThemeSource::dark().with(ACCENT_VAR, "255 0 0"));
    let spec = SpriteSpec::new(SpriteKind::Star, e.palette(), 1.0);
    assert_eq!(spec.inner, e.palette().primary.mix(Rgb::new(255, 0, 0), 0.62));
}
