//! Platform-independent core of the skyglow ambient background: particle
//! generation, motion, globe projection, frame pacing and draw ordering.
//!
//! The web front-end supplies a [`Surface`] and forwards browser signals to
//! an [`Engine`].

pub mod color;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod field;
pub mod geometry;
pub mod illumination;
pub mod physics;
pub mod pointer;
pub mod projection;
pub mod quality;
pub mod render;
pub mod scheduler;
pub mod sprite;
pub mod surface;

pub use color::{parse_channels, Palette, Rgb, Theme, ThemeCoefficients, ThemeSource};
pub use config::{EngineConfig, Environment, GlobeOrder, LayerSet};
pub use engine::{Engine, Invalidation};
pub use error::{ConfigError, IlluminationError};
pub use field::{Classifier, LayerId, NoiseClassifier, ParticleField, SurfaceKind};
pub use geometry::{Viewport, ViewportGeometry};
pub use illumination::IlluminationMap;
pub use pointer::{InputSource, PointerState, PointerTracker};
pub use projection::{Orientation, Projected};
pub use quality::{AdaptiveQuality, DeviceClass, QualityProfile};
pub use scheduler::{FrameScheduler, FrameStep, Pacing, SchedulerState};
pub use sprite::{SpriteKind, SpriteSet, SpriteSpec};
pub use surface::{Blend, ColorStop, RadialGradient, Surface};
