//! The owning engine instance: all mutable background state lives here and
//! every external signal funnels into [`Engine::invalidate`].

use crate::color::{Palette, Theme, ThemeSource};
use crate::config::{EngineConfig, Environment};
use crate::constants::GLOBE_SPIN_PER_MS;
use crate::field::{generate_globe, Classifier, NoiseClassifier, ParticleField};
use crate::geometry::{Viewport, ViewportGeometry};
use crate::physics::{step_field, StepContext};
use crate::pointer::PointerTracker;
use crate::projection::{project_ordered, Orientation, Projected};
use crate::quality::{AdaptiveQuality, QualityProfile};
use crate::render::{draw_frame, Scene};
use crate::scheduler::{FrameScheduler, FrameStep, SchedulerState};
use crate::sprite::SpriteSet;
use crate::surface::Surface;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::{BitOr, BitOrAssign};

/// What must be recomputed. Dependent work is implied: geometry implies a
/// profile, sprite and field rebuild; a changed profile implies a field
/// rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Invalidation(u8);

impl Invalidation {
    pub const NONE: Self = Self(0);
    pub const GEOMETRY: Self = Self(1);
    pub const PROFILE: Self = Self(1 << 1);
    pub const SPRITES: Self = Self(1 << 2);
    pub const FIELD: Self = Self(1 << 3);
    pub const GLOBE: Self = Self(1 << 4);
    pub const REDRAW: Self = Self(1 << 5);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Invalidation {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Invalidation {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

pub struct Engine<S: Surface> {
    surface: S,
    config: EngineConfig,
    env: Environment,
    viewport: Viewport,
    geometry: ViewportGeometry,
    theme: Theme,
    palette: Palette,
    profile: QualityProfile,
    sprites: SpriteSet<S::Sprite>,
    field: ParticleField,
    projected: Vec<Projected>,
    pointer: PointerTracker,
    scheduler: FrameScheduler,
    adaptive: AdaptiveQuality,
    classifier: Box<dyn Classifier>,
    rng: StdRng,
    elapsed_ms: f64,
    spin: f32,
    disposed: bool,
}

impl<S: Surface> Engine<S> {
    /// Cold start: resolve palette and geometry, build sprites and particles,
    /// draw once and start the scheduler (if the page is visible).
    pub fn init(
        surface: S,
        config: EngineConfig,
        viewport: Viewport,
        env: Environment,
        theme_source: &dyn ThemeSource,
        seed: u64,
    ) -> Self {
        let theme = theme_source.theme();
        let geometry = ViewportGeometry::new(viewport);
        let adaptive = AdaptiveQuality::new(config.adaptive_quality);
        let profile = QualityProfile::resolve(
            &geometry,
            &env,
            config.layers,
            theme.coefficients(),
            adaptive.level(),
        );
        let mut engine = Self {
            surface,
            pointer: PointerTracker::new(config.pointer_ease, config.strength_ease),
            scheduler: FrameScheduler::new(env.reduced_motion),
            config,
            env,
            viewport,
            geometry,
            theme,
            palette: Palette::resolve(theme_source),
            profile,
            sprites: SpriteSet::default(),
            field: ParticleField::default(),
            projected: Vec::new(),
            adaptive,
            classifier: Box::new(NoiseClassifier),
            rng: StdRng::seed_from_u64(seed),
            elapsed_ms: 0.0,
            spin: 0.0,
            disposed: false,
        };
        engine.invalidate(Invalidation::GEOMETRY | Invalidation::REDRAW);
        if engine.env.visible {
            engine.scheduler.start();
        }
        log::info!(
            "[engine] init {}x{}@{} {:?} palette=({}) ({}) ({})",
            engine.geometry.width,
            engine.geometry.height,
            engine.geometry.dpr,
            engine.profile.device,
            engine.palette.primary,
            engine.palette.secondary,
            engine.palette.accent,
        );
        engine
    }

    /// Single rebuild entry point; work runs once per call in dependency
    /// order (geometry → profile → sprites → field → redraw).
    pub fn invalidate(&mut self, what: Invalidation) {
        if self.disposed {
            return;
        }
        let mut what = what;
        if what.contains(Invalidation::GEOMETRY) {
            self.geometry = ViewportGeometry::new(self.viewport);
            self.surface.resize(&self.geometry);
            what |= Invalidation::PROFILE | Invalidation::SPRITES | Invalidation::FIELD;
        }
        if what.contains(Invalidation::PROFILE) {
            let profile = QualityProfile::resolve(
                &self.geometry,
                &self.env,
                self.config.layers,
                self.theme.coefficients(),
                self.adaptive.level(),
            );
            if profile != self.profile {
                what |= Invalidation::FIELD;
            }
            self.profile = profile;
        }
        if what.contains(Invalidation::SPRITES) {
            self.sprites = SpriteSet::build(&mut self.surface, &self.palette, self.geometry.dpr);
        }
        if what.contains(Invalidation::FIELD) {
            self.field = ParticleField::generate(
                &self.geometry,
                &self.profile,
                self.classifier.as_ref(),
                &mut self.rng,
            );
            self.projected = Vec::with_capacity(self.field.globe.len());
            log::debug!(
                "[engine] rebuilt field stars={} clouds={} embers={} globe={}",
                self.field.stars.len(),
                self.field.clouds.len(),
                self.field.embers.len(),
                self.field.globe.len()
            );
        } else if what.contains(Invalidation::GLOBE) {
            self.field.globe =
                generate_globe(self.profile.counts.globe, self.classifier.as_ref(), &mut self.rng);
            log::debug!("[engine] rebuilt globe={}", self.field.globe.len());
        }
        if what.contains(Invalidation::REDRAW) && self.env.visible {
            self.draw();
        }
    }

    /// One frame callback. The caller requests another frame iff the
    /// returned step wants one.
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameStep {
        if self.disposed {
            return FrameStep::Halted;
        }
        let step = self.scheduler.on_frame(timestamp_ms);
        match step {
            FrameStep::Halted | FrameStep::Skip => return step,
            FrameStep::Baseline => {}
            FrameStep::Advance {
                delta_ms,
                time_scale,
            } => self.advance(delta_ms, time_scale),
        }
        self.draw();
        step
    }

    fn advance(&mut self, delta_ms: f64, time_scale: f32) {
        self.elapsed_ms += delta_ms;
        self.spin = (self.spin
            + delta_ms as f32 * GLOBE_SPIN_PER_MS * self.scheduler.pacing().motion_scale)
            % std::f32::consts::TAU;
        self.pointer.step();
        let state = self.pointer.state();
        let ctx = StepContext {
            elapsed_ms: self.elapsed_ms,
            time_scale,
            pointer: state.position,
            pointer_influence: self.pointer.influence(self.env.coarse_pointer),
        };
        step_field(&mut self.field, &self.geometry, &ctx);
    }

    fn draw(&mut self) {
        let influence = self.pointer.influence(self.env.coarse_pointer);
        let orientation = Orientation::at(
            self.spin,
            self.elapsed_ms,
            self.geometry.normalized(self.pointer.state().position),
            influence,
        );
        if self.config.layers.globe {
            project_ordered(
                &self.field.globe,
                &orientation,
                &self.geometry.globe,
                self.config.globe_order,
                &mut self.projected,
            );
        } else {
            self.projected.clear();
        }
        let scene = Scene {
            geometry: &self.geometry,
            field: &self.field,
            projected: &self.projected,
            sprites: &self.sprites,
            palette: &self.palette,
            theme: self.theme,
            layers: self.config.layers,
            pointer: self.pointer.state(),
            pointer_glow: self.pointer.glows(self.env.coarse_pointer),
            elapsed_ms: self.elapsed_ms,
            globe_yaw: orientation.yaw,
        };
        draw_frame(&mut self.surface, &scene);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.invalidate(Invalidation::GEOMETRY | Invalidation::REDRAW);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.move_to(Vec2::new(x, y));
    }

    pub fn pointer_left(&mut self) {
        self.pointer.release();
    }

    /// Returns `true` when the host should (re)request frames.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if self.disposed {
            return false;
        }
        self.env.visible = visible;
        if visible {
            self.scheduler.start();
            self.adaptive.reset_window();
            log::debug!("[engine] visible, scheduler restarted");
        } else {
            self.scheduler.stop();
            self.pointer.release();
            log::debug!("[engine] hidden, scheduler stopped");
        }
        self.is_running()
    }

    /// Returns `true` when the host should (re)request frames.
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) -> bool {
        if self.disposed {
            return false;
        }
        self.env.reduced_motion = reduced_motion;
        self.scheduler.set_reduced_motion(reduced_motion);
        if self.env.visible {
            self.scheduler.start();
        }
        self.is_running()
    }

    pub fn set_coarse_pointer(&mut self, coarse_pointer: bool) {
        self.env.coarse_pointer = coarse_pointer;
        if coarse_pointer {
            self.pointer.release();
        }
        self.invalidate(Invalidation::GEOMETRY | Invalidation::REDRAW);
    }

    /// Theme marker changed: re-resolve palette, rebuild sprites and, when
    /// the theme switched, the density-dependent field.
    pub fn apply_theme(&mut self, source: &dyn ThemeSource) {
        self.palette = Palette::resolve(source);
        let theme = source.theme();
        let mut what = Invalidation::SPRITES | Invalidation::REDRAW;
        if theme != self.theme {
            self.theme = theme;
            what |= Invalidation::PROFILE;
        }
        log::debug!("[engine] theme {:?}", self.theme);
        self.invalidate(what);
    }

    pub fn set_page_quality(&mut self, page_quality: f32) {
        self.env.page_quality = page_quality;
        self.invalidate(Invalidation::PROFILE | Invalidation::REDRAW);
    }

    /// Swap the globe surface classifier (e.g. once an illumination map has
    /// loaded) and regenerate the globe layer.
    pub fn set_classifier(&mut self, classifier: Box<dyn Classifier>) {
        self.classifier = classifier;
        if self.config.layers.globe {
            self.invalidate(Invalidation::GLOBE | Invalidation::REDRAW);
        }
    }

    /// Feed one frame's work cost; may lower or raise quality between frames.
    pub fn record_frame_cost(&mut self, cost_ms: f64) {
        if self.adaptive.record(cost_ms, self.elapsed_ms) {
            self.invalidate(Invalidation::PROFILE);
        }
    }

    pub fn dispose(&mut self) {
        self.scheduler.stop();
        self.pointer.reset();
        self.field = ParticleField::default();
        self.sprites = SpriteSet::default();
        self.projected = Vec::new();
        self.disposed = true;
        log::debug!("[engine] disposed");
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.scheduler.state() == SchedulerState::Running
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn profile(&self) -> &QualityProfile {
        &self.profile
    }

    pub fn geometry(&self) -> &ViewportGeometry {
        &self.geometry
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn sprites(&self) -> &SpriteSet<S::Sprite> {
        &self.sprites
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
