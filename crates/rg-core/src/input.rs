//! Polled per-tick input

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Primary button state for one tick.
///
/// `pressed` and `released` are edges; `held` is the level. On the tick the
/// button goes down both `pressed` and `held` are true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonState {
    #[serde(default)]
    pub pressed: bool,
    #[serde(default)]
    pub held: bool,
    #[serde(default)]
    pub released: bool,
}

impl ButtonState {
    pub const IDLE: Self = Self {
        pressed: false,
        held: false,
        released: false,
    };
    pub const PRESS: Self = Self {
        pressed: true,
        held: true,
        released: false,
    };
    pub const HOLD: Self = Self {
        pressed: false,
        held: true,
        released: false,
    };
    pub const RELEASE: Self = Self {
        pressed: false,
        held: false,
        released: true,
    };
}

/// Everything a tool may read during one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Pointer position in viewport pixels, origin top-left
    pub pointer: Vec2,
    /// Relative pointer motion this tick; x grows right, y grows up
    #[serde(default)]
    pub delta: Vec2,
    #[serde(default)]
    pub button: ButtonState,
    /// Tick duration in seconds
    pub dt: f32,
    /// Seconds since start-up
    pub time: f64,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            pointer: Vec2::ZERO,
            delta: Vec2::ZERO,
            button: ButtonState::IDLE,
            dt: 1.0 / 60.0,
            time: 0.0,
            viewport: Vec2::new(800.0, 600.0),
        }
    }
}

impl FrameInput {
    pub fn at(pointer: Vec2, button: ButtonState) -> Self {
        Self {
            pointer,
            button,
            ..Default::default()
        }
    }

    pub fn with_delta(mut self, delta: Vec2) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_time(mut self, time: f64, dt: f32) -> Self {
        self.time = time;
        self.dt = dt;
        self
    }

    pub fn with_viewport(mut self, viewport: Vec2) -> Self {
        self.viewport = viewport;
        self
    }
}

/// A recorded sequence of ticks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub frames: Vec<FrameInput>,
}
