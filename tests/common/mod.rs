// Shared test doubles: a Surface that records its command stream and a theme
// source backed by a map.

#![allow(dead_code)]
use glam::Vec2;
use skyglow_core::{
    Blend, EngineConfig, Engine, Environment, Rgb, RadialGradient, SpriteKind, SpriteSpec, Surface,
    Theme, ThemeSource, Viewport, ViewportGeometry,
};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Resize { width: u32, height: u32 },
    Clear,
    Blend(Blend),
    Alpha(f32),
    FillRadial { center: Vec2, radius: f32, peak_alpha: f32, blend: Blend },
    StrokeCircle { center: Vec2, radius: f32, color: Rgb, alpha: f32 },
    Sprite { kind: SpriteKind, center: Vec2, size: f32, alpha: f32, blend: Blend },
}

pub struct RecordingSurface {
    pub commands: Vec<Command>,
    pub sprites_created: usize,
    pub fail_sprites: bool,
    alpha: f32,
    blend: Blend,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            sprites_created: 0,
            fail_sprites: false,
            alpha: 1.0,
            blend: Blend::SourceOver,
        }
    }

    pub fn failing_sprites() -> Self {
        Self {
            fail_sprites: true,
            ..Self::new()
        }
    }

    pub fn frame_count(&self) -> usize {
        self.commands.iter().filter(|c| **c == Command::Clear).count()
    }

    /// Commands from the last `Clear` onward.
    pub fn last_frame(&self) -> &[Command] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == Command::Clear)
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn sprite_alphas(frame: &[Command], of: SpriteKind) -> Vec<f32> {
        frame
            .iter()
            .filter_map(|c| match c {
                Command::Sprite { kind, alpha, .. } if *kind == of => Some(*alpha),
                _ => None,
            })
            .collect()
    }

    pub fn current_alpha(&self) -> f32 {
        self.alpha
    }

    pub fn current_blend(&self) -> Blend {
        self.blend
    }
}

impl Surface for RecordingSurface {
    type Sprite = SpriteKind;

    fn resize(&mut self, geometry: &ViewportGeometry) {
        self.commands.push(Command::Resize {
            width: geometry.backing_width(),
            height: geometry.backing_height(),
        });
    }

    fn clear(&mut self, _width: f32, _height: f32) {
        self.commands.push(Command::Clear);
    }

    fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
        self.commands.push(Command::Blend(blend));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.commands.push(Command::Alpha(alpha));
    }

    fn fill_radial(&mut self, gradient: &RadialGradient) {
        self.commands.push(Command::FillRadial {
            center: gradient.outer,
            radius: gradient.outer_radius,
            peak_alpha: gradient.peak_alpha(),
            blend: self.blend,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32, _line_width: f32) {
        self.commands.push(Command::StrokeCircle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn create_sprite(&mut self, spec: &SpriteSpec) -> Option<SpriteKind> {
        if self.fail_sprites {
            return None;
        }
        self.sprites_created += 1;
        Some(spec.kind)
    }

    fn draw_sprite(&mut self, sprite: &SpriteKind, center: Vec2, size: f32) {
        self.commands.push(Command::Sprite {
            kind: *sprite,
            center,
            size,
            alpha: self.alpha,
            blend: self.blend,
        });
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapThemeSource {
    pub vars: HashMap<String, String>,
    pub dark: bool,
}

impl MapThemeSource {
    pub fn dark() -> Self {
        Self {
            vars: HashMap::new(),
            dark: true,
        }
    }

    pub fn light() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl ThemeSource for MapThemeSource {
    fn variable(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn theme(&self) -> Theme {
        if self.dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

pub const DESKTOP: Viewport = Viewport {
    width: 1920.0,
    height: 1080.0,
    device_pixel_ratio: 1.0,
};

pub fn engine(config: EngineConfig, viewport: Viewport, env: Environment) -> Engine<RecordingSurface> {
    Engine::init(
        RecordingSurface::new(),
        config,
        viewport,
        env,
        &MapThemeSource::dark(),
        7,
    )
}

pub fn desktop_engine() -> Engine<RecordingSurface> {
    engine(EngineConfig::default(), DESKTOP, Environment::default())
}

pub fn with_globe() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.layers.globe = true;
    config
}
