//! Gapped obstacle pairs

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::OBSTACLE_WIDTH;

/// A top/bottom barrier pair with a passable gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Y of the gap's upper edge (bottom of the top barrier)
    pub gap_top: f32,
    pub gap_height: f32,
    /// Horizontal speed, fixed at spawn
    pub speed: f32,
    /// Y of the ground line (bottom of the bottom barrier)
    pub floor: f32,
    /// Score has been credited for this obstacle
    pub passed: bool,
}

impl Obstacle {
    pub fn new(
        id: u32,
        x: f32,
        width: f32,
        gap_top: f32,
        gap_height: f32,
        speed: f32,
        floor: f32,
    ) -> Self {
        Self {
            id,
            x,
            width,
            gap_top,
            gap_height,
            speed,
            floor,
            passed: false,
        }
    }

    /// New obstacle at the right screen edge with a randomly placed gap
    pub fn spawn(id: u32, config: &GameConfig, speed: f32, rng: &mut impl Rng) -> Self {
        let (min, max) = config.gap_top_range();
        let gap_top = (min + rng.random::<f32>() * (max - min)).min(max);
        Self::new(
            id,
            config.width,
            OBSTACLE_WIDTH * config.scale(),
            gap_top,
            config.gap_height(),
            speed,
            config.ground_line(),
        )
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    /// Barrier from the screen top down to the gap
    pub fn top_rect(&self) -> Rect {
        Rect::from_span(self.x, self.width, 0.0, self.gap_top)
    }

    /// Barrier from the gap down to the ground line
    pub fn bottom_rect(&self) -> Rect {
        Rect::from_span(self.x, self.width, self.gap_bottom(), self.floor)
    }

    /// Center of the gap, where the score popup appears
    pub fn gap_center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.gap_top + self.gap_height / 2.0)
    }

    /// Fully scrolled off the left edge
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }

    /// Right edge has moved left of `x` (the avatar's center)
    pub fn is_behind(&self, x: f32) -> bool {
        self.right() < x
    }
}
