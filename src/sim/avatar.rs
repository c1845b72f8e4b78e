//! The player-controlled falling body

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects::Particle;
use super::rect::Rect;
use crate::consts::*;

/// The avatar: falls under gravity, flaps upward on input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Center position
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub velocity: f32,
    /// Tilt in degrees, eased toward the velocity
    pub rotation: f32,
    /// Hit box, always centered on `pos`
    pub bounds: Rect,
    /// Sprite frame counter, wraps at `3 * FRAME_DELAY`
    pub frame: u32,
    /// Wing flap angle (degrees)
    pub wing_angle: f32,
    /// Thrust particles
    pub particles: Vec<Particle>,
    frame_count: u32,
    scale: f32,
}

impl Avatar {
    pub fn new(pos: Vec2, scale: f32) -> Self {
        Self {
            pos,
            velocity: 0.0,
            rotation: 0.0,
            bounds: Rect::from_center(pos, Vec2::splat(Self::side(scale))),
            frame: 0,
            wing_angle: 0.0,
            particles: Vec::new(),
            frame_count: 0,
            scale,
        }
    }

    /// Hit box side length
    #[inline]
    pub fn side(scale: f32) -> f32 {
        AVATAR_SIZE * scale
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Integrate one tick of gravity and animation
    pub fn update(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);

        self.velocity += GRAVITY * self.scale;
        self.pos.y += self.velocity * self.scale;
        self.bounds.recenter(self.pos);

        let target = self.velocity * ROTATION_SPEED;
        self.rotation += (target - self.rotation) * ROTATION_SMOOTHING;

        self.frame = (self.frame + 1) % (3 * FRAME_DELAY);
        self.wing_angle = (self.frame_count as f32 * WING_SPEED).sin() * WING_RANGE * self.scale;

        self.update_particles();
    }

    /// Advance thrust particles only (used while the body is frozen)
    pub fn update_particles(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.update();
        }
        self.particles.retain(Particle::is_alive);
    }

    /// Upward impulse: velocity is replaced, not accumulated
    pub fn jump(&mut self, rng: &mut impl Rng) {
        self.velocity = JUMP_VELOCITY;

        let half = Self::side(self.scale) / 2.0;
        let origin = Vec2::new(self.pos.x - half, self.pos.y);
        for _ in 0..JUMP_PARTICLES {
            self.particles.push(Particle::spray(origin, rng));
        }
    }
}
