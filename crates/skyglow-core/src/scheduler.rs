//! Two-state frame scheduler with minimum-interval pacing.
//!
//! The host owns the actual frame request; the scheduler decides what each
//! callback does and whether another one should be requested.

use crate::constants::{
    FRAME_SCALE_MAX, FRAME_SCALE_MIN, MIN_FRAME_INTERVAL_MS, NOMINAL_FRAME_MS,
    REDUCED_MIN_FRAME_INTERVAL_MS, REDUCED_MOTION_SCALE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// Pacing limits for one motion preference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pacing {
    pub min_interval_ms: f64,
    pub motion_scale: f32,
}

impl Pacing {
    pub fn for_motion(reduced_motion: bool) -> Self {
        if reduced_motion {
            Self {
                min_interval_ms: REDUCED_MIN_FRAME_INTERVAL_MS,
                motion_scale: REDUCED_MOTION_SCALE,
            }
        } else {
            Self {
                min_interval_ms: MIN_FRAME_INTERVAL_MS,
                motion_scale: 1.0,
            }
        }
    }

    /// Time scale for `delta_ms` of real time: the elapsed ratio to a nominal
    /// frame, clamped, times the motion factor.
    pub fn time_scale(&self, delta_ms: f64) -> f32 {
        let ratio = (delta_ms / NOMINAL_FRAME_MS) as f32;
        ratio.clamp(FRAME_SCALE_MIN, FRAME_SCALE_MAX) * self.motion_scale
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameStep {
    /// Scheduler is stopped; do not request another frame.
    Halted,
    /// Too soon since the last processed frame; request the next one only.
    Skip,
    /// First frame after a (re)start: draw without advancing simulation time.
    Baseline,
    /// Advance simulation by `delta_ms` of real time, then draw.
    Advance { delta_ms: f64, time_scale: f32 },
}

impl FrameStep {
    pub fn wants_next_frame(&self) -> bool {
        !matches!(self, FrameStep::Halted)
    }

    pub fn draws(&self) -> bool {
        matches!(self, FrameStep::Baseline | FrameStep::Advance { .. })
    }
}

#[derive(Clone, Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    pacing: Pacing,
    last_frame_ms: Option<f64>,
    frames: u64,
}

impl FrameScheduler {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            state: SchedulerState::Stopped,
            pacing: Pacing::for_motion(reduced_motion),
            last_frame_ms: None,
            frames: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[inline]
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Frames processed (drawn) since the last start.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Enter Running with a fresh baseline. Also used as a clean restart.
    pub fn start(&mut self) {
        self.state = SchedulerState::Running;
        self.last_frame_ms = None;
        self.frames = 0;
    }

    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
        self.last_frame_ms = None;
    }

    /// Motion preference changed: swap pacing and restart from a clean
    /// baseline if running.
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.pacing = Pacing::for_motion(reduced_motion);
        if self.state == SchedulerState::Running {
            self.start();
        }
    }

    pub fn on_frame(&mut self, timestamp_ms: f64) -> FrameStep {
        if self.state == SchedulerState::Stopped {
            return FrameStep::Halted;
        }
        let Some(last) = self.last_frame_ms else {
            self.last_frame_ms = Some(timestamp_ms);
            self.frames += 1;
            return FrameStep::Baseline;
        };
        let delta_ms = timestamp_ms - last;
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            // clock went backwards (timestamp source changed); rebase
            self.last_frame_ms = Some(timestamp_ms);
            return FrameStep::Skip;
        }
        if delta_ms < self.pacing.min_interval_ms {
            return FrameStep::Skip;
        }
        self.last_frame_ms = Some(timestamp_ms);
        self.frames += 1;
        FrameStep::Advance {
            delta_ms,
            time_scale: self.pacing.time_scale(delta_ms),
        }
    }
}
