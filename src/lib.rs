//! Flappy - a side-scrolling flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring)
//! - `config`: Screen geometry and difficulty tuning
//! - `render`: Per-frame draw instances for an external renderer

pub mod config;
pub mod render;
pub mod sim;

pub use config::{ConfigError, DecorPolicy, GameConfig};
pub use sim::{GamePhase, Session, TickInput, tick};

/// Game configuration constants
///
/// Values are in reference pixels (800x600 screen) per tick and get
/// multiplied by the session scale where noted.
pub mod consts {
    /// Fixed simulation interval (50 Hz)
    pub const TICK_MS: u64 = 20;

    /// Reference screen the scale factor is computed against
    pub const REFERENCE_WIDTH: f32 = 800.0;
    pub const REFERENCE_HEIGHT: f32 = 600.0;

    /// Avatar physics
    pub const GRAVITY: f32 = 1.0;
    /// Upward impulse; replaces the current velocity, unscaled
    pub const JUMP_VELOCITY: f32 = -10.0;
    /// Degrees of tilt per unit of velocity
    pub const ROTATION_SPEED: f32 = 5.0;
    /// Exponential easing factor toward the target tilt
    pub const ROTATION_SMOOTHING: f32 = 0.15;
    pub const AVATAR_SIZE: f32 = 40.0;

    /// Avatar animation
    pub const FRAME_DELAY: u32 = 5;
    pub const WING_SPEED: f32 = 0.6;
    pub const WING_RANGE: f32 = 70.0;

    /// Thrust particles
    pub const JUMP_PARTICLES: usize = 15;
    pub const PARTICLE_LIFE: u32 = 25;
    pub const PARTICLE_GRAVITY: f32 = 0.15;
    pub const PARTICLE_SPIN: f32 = 0.1;

    /// "+1" popups
    pub const POPUP_LIFE: u32 = 30;
    pub const POPUP_RISE: f32 = -2.0;
    pub const POPUP_GRAVITY: f32 = 0.1;

    /// Obstacles
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    /// Minimum distance between the gap and the screen top / ground line
    pub const GAP_MARGIN: f32 = 50.0;

    /// Difficulty
    pub const SPEED_INCREASE: f32 = 0.5;
    /// Spacing lost per level past the first
    pub const SPACING_STEP: f32 = 20.0;
    /// Level-up banner duration (ticks)
    pub const LEVEL_BANNER_TICKS: u32 = 60;

    /// Scenery
    pub const CLOUD_COUNT: usize = 5;
    pub const CLOUD_SIZE: f32 = 60.0;
    pub const CLOUD_BASE_SPEED: f32 = 0.5;
    pub const GROUND_SCROLL: f32 = 0.5;
}
