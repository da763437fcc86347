// Host-side tests for canvas configuration parsing and quality resolution.

use skyglow_core::config::{page_quality, parse_flag, parse_quality};
use skyglow_core::constants::{MIN_CLOUDS, MIN_EMBERS, MIN_GLOBE, MIN_STARS};
use skyglow_core::quality::Preset;
use skyglow_core::{
    AdaptiveQuality, ConfigError, DeviceClass, EngineConfig, Environment, GlobeOrder, LayerSet,
    QualityProfile, Theme, Viewport, ViewportGeometry,
};

#[test]
fn layer_lists_parse_with_aliases() {
    let set: LayerSet = "stars, globe".parse().unwrap();
    assert_eq!(
        set,
        LayerSet {
            stars: true,
            clouds: false,
            globe: true
        }
    );
    let set: LayerSet = "Nebula planet".parse().unwrap();
    assert!(!set.stars && set.clouds && set.globe);
    let empty: LayerSet = "".parse().unwrap();
    assert!(!empty.stars && !empty.clouds && !empty.globe);
}

#[test]
fn unknown_layer_is_rejected() {
    assert_eq!(
        "stars,comets".parse::<LayerSet>(),
        Err(ConfigError::UnknownLayer("comets".to_string()))
    );
}

#[test]
fn globe_order_parses() {
    assert_eq!("two-pass".parse::<GlobeOrder>(), Ok(GlobeOrder::TwoPass));
    assert_eq!(" Depth-Sort ".parse::<GlobeOrder>(), Ok(GlobeOrder::DepthSort));
    assert!(matches!(
        "random".parse::<GlobeOrder>(),
        Err(ConfigError::UnknownGlobeOrder(_))
    ));
    assert_eq!(GlobeOrder::default(), GlobeOrder::TwoPass);
}

#[test]
fn quality_must_be_in_unit_interval() {
    assert_eq!(parse_quality("0.75"), Ok(0.75));
    assert_eq!(parse_quality(" 1 "), Ok(1.0));
    for bad in ["0", "-0.2", "1.5", "NaN", "fast"] {
        assert!(parse_quality(bad).is_err(), "{} accepted", bad);
    }
}

#[test]
fn flags_accept_common_spellings() {
    for on in ["", "true", "ON", "1", "yes"] {
        assert_eq!(parse_flag(on), Ok(true));
    }
    for off in ["false", "Off", "0", "no"] {
        assert_eq!(parse_flag(off), Ok(false));
    }
    assert_eq!(parse_flag("maybe"), Err(ConfigError::InvalidFlag("maybe".to_string())));
}

#[test]
fn page_quality_combines_gallery_and_core_hints() {
    assert_eq!(page_quality(false, 8), 1.0);
    assert_eq!(page_quality(true, 8), 0.8);
    assert_eq!(page_quality(false, 4), 0.86);
    assert!((page_quality(true, 2) - 0.8 * 0.72).abs() < 1e-6);
    assert_eq!(page_quality(false, 0), 0.72);
}

#[test]
fn default_config_draws_stars_and_clouds_only() {
    let config = EngineConfig::default();
    assert!(config.layers.stars && config.layers.clouds && !config.layers.globe);
    assert_eq!(config.globe_order, GlobeOrder::TwoPass);
    assert!(!config.adaptive_quality);
    let env = Environment::default();
    assert!(env.visible && !env.reduced_motion && !env.coarse_pointer);
    assert_eq!(env.page_quality, 1.0);
}

fn profile(width: f32, env: Environment, theme: Theme) -> QualityProfile {
    let geometry = ViewportGeometry::new(Viewport::new(width, 800.0, 1.0));
    let layers = LayerSet {
        stars: true,
        clouds: true,
        globe: true,
    };
    QualityProfile::resolve(&geometry, &env, layers, theme.coefficients(), 1.0)
}

#[test]
fn device_class_uses_breakpoint_and_pointer() {
    assert_eq!(DeviceClass::classify(760.0, false), DeviceClass::Mobile);
    assert_eq!(DeviceClass::classify(761.0, false), DeviceClass::Desktop);
    assert_eq!(DeviceClass::classify(2560.0, true), DeviceClass::Mobile);
}

#[test]
fn counts_never_drop_below_floors() {
    let env = Environment {
        page_quality: 0.5,
        ..Environment::default()
    };
    let p = profile(400.0, env, Theme::Light);
    assert_eq!(p.device, DeviceClass::Mobile);
    assert_eq!(p.quality_scale, 0.5);
    assert!(p.counts.stars >= MIN_STARS);
    assert!(p.counts.clouds >= MIN_CLOUDS);
    assert!(p.counts.embers >= MIN_EMBERS);
    assert!(p.counts.globe >= MIN_GLOBE);
    assert_eq!(p.counts.stars, (Preset::MOBILE.stars as f32 * 0.5 * 0.58).round() as usize);
}

#[test]
fn disabled_layers_get_no_particles() {
    let geometry = ViewportGeometry::new(Viewport::new(1600.0, 900.0, 1.0));
    let layers = LayerSet {
        stars: false,
        clouds: false,
        globe: true,
    };
    let p = QualityProfile::resolve(&geometry, &Environment::default(), layers, Theme::Dark.coefficients(), 1.0);
    assert_eq!((p.counts.stars, p.counts.clouds, p.counts.embers), (0, 0, 0));
    assert_eq!(p.cloud_bands, 0);
    assert_eq!(p.counts.globe, Preset::DESKTOP.globe);
}

#[test]
fn adaptive_quality_steps_down_then_cools_down() {
    let mut a = AdaptiveQuality::new(true);
    for _ in 0..89 {
        assert!(!a.record(20.0, 0.0));
    }
    assert!(a.record(20.0, 0.0));
    assert!((a.level() - 0.9).abs() < 1e-6);

    // a second slow window inside the cooldown is ignored
    for _ in 0..90 {
        assert!(!a.record(20.0, 1000.0));
    }
    assert!((a.level() - 0.9).abs() < 1e-6);

    for _ in 0..89 {
        a.record(2.0, 10_000.0);
    }
    assert!(a.record(2.0, 10_000.0));
    assert!((a.level() - 0.95).abs() < 1e-6);
}

#[test]
fn disabled_adaptive_quality_ignores_costs() {
    let mut a = AdaptiveQuality::new(false);
    for _ in 0..500 {
        assert!(!a.record(100.0, 0.0));
    }
    assert_eq!(a.level(), 1.0);
}
