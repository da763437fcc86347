// Host-side tests for globe sampling, projection ordering and surface
// classification.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use skyglow_core::constants::{
    ILLUMINATION_WARM, ILLUMINATION_WARM_MIX, PERSPECTIVE_BASE, PERSPECTIVE_SPAN,
};
use skyglow_core::field::generate_globe;
use skyglow_core::geometry::Circle;
use skyglow_core::projection::{project_ordered, spherical_to_unit};
use skyglow_core::{
    Classifier, GlobeOrder, IlluminationError, IlluminationMap, NoiseClassifier, Orientation, Rgb,
    SurfaceKind,
};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

fn globe() -> Circle {
    Circle {
        center: Vec2::new(500.0, 400.0),
        radius: 300.0,
    }
}

fn orientations() -> Vec<Orientation> {
    (0..12)
        .map(|i| Orientation::at(i as f32 * 0.7, i as f64 * 3100.0, Vec2::new(0.4, -0.3), i as f32 / 12.0))
        .collect()
}

#[test]
fn unit_vectors_have_unit_length() {
    for (lon, lat) in [(0.0, 0.0), (1.2, 0.4), (5.9, -1.1), (3.0, FRAC_PI_2)] {
        assert!((spherical_to_unit(lon, lat).length() - 1.0).abs() < 1e-5);
    }
    assert!((spherical_to_unit(0.3, FRAC_PI_2).y - 1.0).abs() < 1e-6);
}

#[test]
fn globe_sampling_is_uniform_by_area() {
    let mut rng = StdRng::seed_from_u64(21);
    let particles = generate_globe(20_000, &NoiseClassifier, &mut rng);
    let n = particles.len() as f32;
    // uniform in sin(lat): half of the surface lies within |sin lat| < 0.5
    let band = particles.iter().filter(|p| p.lat.sin().abs() < 0.5).count() as f32 / n;
    assert!((band - 0.5).abs() < 0.02, "equatorial share {}", band);
    let mean_sin = particles.iter().map(|p| p.lat.sin()).sum::<f32>() / n;
    assert!(mean_sin.abs() < 0.02);
    for p in &particles {
        assert!((0.0..TAU).contains(&p.lon));
        assert!((0.68..=1.02).contains(&p.shell));
        assert!((0.0..=1.0).contains(&p.intensity));
    }
}

#[test]
fn two_pass_puts_every_back_particle_before_every_front_one() {
    let mut rng = StdRng::seed_from_u64(4);
    let particles = generate_globe(1500, &NoiseClassifier, &mut rng);
    let mut out = Vec::new();
    for orientation in orientations() {
        let back = project_ordered(&particles, &orientation, &globe(), GlobeOrder::TwoPass, &mut out);
        assert_eq!(out.len(), particles.len());
        assert_eq!(back, out.iter().filter(|p| p.z < 0.0).count());
        assert!(out[..back].iter().all(|p| p.z < 0.0 && !p.is_front()));
        assert!(out[back..].iter().all(|p| p.z >= 0.0 && p.is_front()));
    }
}

#[test]
fn depth_sort_is_ascending() {
    let mut rng = StdRng::seed_from_u64(8);
    let particles = generate_globe(800, &NoiseClassifier, &mut rng);
    let mut out = Vec::new();
    for orientation in orientations() {
        let back = project_ordered(&particles, &orientation, &globe(), GlobeOrder::DepthSort, &mut out);
        assert_eq!(back, 0);
        assert!(out.windows(2).all(|w| w[0].z <= w[1].z));
    }
}

#[test]
fn projections_stay_near_the_globe_and_front_is_larger() {
    let mut rng = StdRng::seed_from_u64(9);
    let particles = generate_globe(1000, &NoiseClassifier, &mut rng);
    let mut out = Vec::new();
    let g = globe();
    project_ordered(&particles, &Orientation::default(), &g, GlobeOrder::DepthSort, &mut out);
    for p in &out {
        assert!((p.screen - g.center).length() <= g.radius * 1.02 * 1.06 + 1e-3);
        assert!((0.0..=1.0).contains(&p.depth));
    }
    let (first, last) = (out[0], out[out.len() - 1]);
    assert!(first.perspective < last.perspective);
}

#[test]
fn every_index_is_projected_once() {
    let mut rng = StdRng::seed_from_u64(10);
    let particles = generate_globe(300, &NoiseClassifier, &mut rng);
    let mut out = Vec::new();
    project_ordered(&particles, &Orientation::default(), &globe(), GlobeOrder::TwoPass, &mut out);
    let mut seen: Vec<usize> = out.iter().map(|p| p.index).collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..300).collect::<Vec<_>>());
}

#[test]
fn noise_classifier_is_stable_and_produces_continents() {
    let c = NoiseClassifier;
    let mut kinds = [0usize; 3];
    for i in 0..120 {
        for j in 0..60 {
            let lon = i as f32 / 120.0 * TAU;
            let lat = (j as f32 / 60.0 - 0.5) * 3.1;
            let kind = c.classify(lon, lat);
            assert_eq!(kind, c.classify(lon, lat));
            kinds[kind as usize] += 1;
        }
    }
    assert!(kinds.iter().all(|&n| n > 0), "kinds {:?}", kinds);
}

fn map() -> IlluminationMap {
    // 4x2: top row dark ocean, faint land, bright city, mid land; bottom row dark
    let mut rgba = vec![
        0, 0, 0, 255, 30, 30, 30, 255, 250, 240, 200, 255, 40, 20, 30, 255,
    ];
    rgba.extend_from_slice(&[5; 16]);
    IlluminationMap::from_rgba(4, 2, &rgba).expect("valid map")
}

#[test]
fn illumination_map_classifies_by_luminance() {
    let m = map();
    let lon = |x: f32| (x + 0.5) / 4.0 * TAU;
    let north = 0.8;
    assert_eq!(m.classify(lon(0.0), north), SurfaceKind::Ocean);
    assert_eq!(m.classify(lon(1.0), north), SurfaceKind::Land);
    assert_eq!(m.classify(lon(2.0), north), SurfaceKind::City);
    assert_eq!(m.classify(lon(3.0), north), SurfaceKind::Land);
    assert_eq!(m.classify(lon(2.0), -0.8), SurfaceKind::Ocean);
    assert!((m.intensity(lon(0.0), north) - 0.35).abs() < 1e-6);
    assert!(m.intensity(lon(2.0), north) > 0.9);
}

#[test]
fn illumination_uv_wraps_longitude() {
    let (u, v) = IlluminationMap::uv(-0.5 * TAU, 0.0);
    assert!((u - 0.5).abs() < 1e-6);
    assert!((v - 0.5).abs() < 1e-6);
    assert_eq!(IlluminationMap::uv(0.0, FRAC_PI_2).1, 0.0);
    assert_eq!(IlluminationMap::uv(0.0, -FRAC_PI_2).1, 1.0);
    let m = map();
    assert_eq!(m.sample(TAU - 1e-4, -FRAC_PI_2), [5, 5, 5, 5]);
}

#[test]
fn illumination_map_rejects_bad_buffers() {
    assert_eq!(
        IlluminationMap::from_rgba(0, 4, &[]).unwrap_err(),
        IlluminationError::EmptyImage { width: 0, height: 4 }
    );
    assert_eq!(
        IlluminationMap::from_rgba(2, 2, &[0; 15]).unwrap_err(),
        IlluminationError::BufferSize {
            expected: 16,
            actual: 15
        }
    );
}

#[test]
fn illuminated_globe_sits_on_lit_pixels_with_warm_tint() {
    // west half lit, east half dark
    let lit = [200u8, 100, 50, 255];
    let mut rgba = lit.to_vec();
    rgba.extend_from_slice(&[0, 0, 0, 255]);
    let m = IlluminationMap::from_rgba(2, 1, &rgba).expect("valid map");
    let warm = Rgb::new(200, 100, 50).mix(ILLUMINATION_WARM, ILLUMINATION_WARM_MIX);
    assert_eq!(m.tint(0.5, 0.0), Some(warm));
    assert!(!m.accepts(4.0, 0.0));

    let mut rng = StdRng::seed_from_u64(12);
    let particles = generate_globe(400, &m, &mut rng);
    assert_eq!(particles.len(), 400);
    for p in &particles {
        assert!(p.lon < PI, "placed on dark pixel at lon {}", p.lon);
        assert_eq!(p.tint, Some(warm));
        assert_eq!(p.kind, SurfaceKind::City);
    }
}

#[test]
fn procedural_globe_has_no_tint() {
    let mut rng = StdRng::seed_from_u64(13);
    assert!(generate_globe(200, &NoiseClassifier, &mut rng)
        .iter()
        .all(|p| p.tint.is_none()));
}

#[test]
fn perspective_grows_linearly_with_depth() {
    let mut rng = StdRng::seed_from_u64(4);
    let particles = generate_globe(300, &NoiseClassifier, &mut rng);
    let mut out = Vec::new();
    project_ordered(&particles, &Orientation::default(), &globe(), GlobeOrder::DepthSort, &mut out);
    for p in &out {
        assert!((p.perspective - (PERSPECTIVE_BASE + p.depth * PERSPECTIVE_SPAN)).abs() < 1e-5);
        assert!(p.perspective >= PERSPECTIVE_BASE - 1e-5);
        assert!(p.perspective <= PERSPECTIVE_BASE + PERSPECTIVE_SPAN + 1e-5);
    }
}
