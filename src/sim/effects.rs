//! Cosmetic effects: thrust particles and floating score popups
//!
//! Nothing here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A thrust particle shed by the avatar on each flap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    /// Spin (radians)
    pub rotation: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, rotation: f32) -> Self {
        Self {
            pos,
            vel,
            life: PARTICLE_LIFE,
            rotation,
        }
    }

    /// Spawn with a random sideways spray and downward push
    pub fn spray(pos: Vec2, rng: &mut impl Rng) -> Self {
        let vx = -5.0 + rng.random::<f32>() * 10.0;
        let vy = 4.0 + rng.random::<f32>() * 5.0;
        let rotation = rng.random::<f32>() * std::f32::consts::TAU;
        Self::new(pos, Vec2::new(vx, vy), rotation)
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
        self.rotation += PARTICLE_SPIN;
    }

    /// Remaining life in [0, 1]
    pub fn alpha(&self) -> f32 {
        self.life as f32 / PARTICLE_LIFE as f32
    }

    /// Particles swell as they fade
    pub fn growth(&self) -> f32 {
        1.0 + (1.0 - self.alpha()) * 0.5
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// Floating "+1" shown where an obstacle was cleared
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub vel_y: f32,
    pub life: u32,
}

impl ScorePopup {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel_y: POPUP_RISE,
            life: POPUP_LIFE,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.vel_y;
        self.vel_y += POPUP_GRAVITY;
        self.life = self.life.saturating_sub(1);
    }

    pub fn alpha(&self) -> f32 {
        self.life as f32 / POPUP_LIFE as f32
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}
