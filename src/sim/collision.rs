//! Collision detection between the avatar, the barriers and the screen bounds
//!
//! Everything is axis-aligned, so a strict rectangle overlap test is enough.
//! Any hit ends the run.

use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::obstacle::Obstacle;
use super::rect::Rect;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Hit the upper barrier of the obstacle with this id
    TopBarrier { obstacle: u32 },
    /// Hit the lower barrier of the obstacle with this id
    BottomBarrier { obstacle: u32 },
    /// Flew above the screen top
    Ceiling,
    /// Fell below the ground line
    Ground,
}

/// Test a hit box against one obstacle's barriers
pub fn obstacle_collision(bounds: &Rect, obstacle: &Obstacle) -> Option<Collision> {
    if bounds.intersects(&obstacle.top_rect()) {
        return Some(Collision::TopBarrier {
            obstacle: obstacle.id,
        });
    }
    if bounds.intersects(&obstacle.bottom_rect()) {
        return Some(Collision::BottomBarrier {
            obstacle: obstacle.id,
        });
    }
    None
}

/// Avatar center must stay within the closed interval [0, ground_line]
pub fn bounds_collision(y: f32, ground_line: f32) -> Option<Collision> {
    if y < 0.0 {
        Some(Collision::Ceiling)
    } else if y > ground_line {
        Some(Collision::Ground)
    } else {
        None
    }
}

/// First barrier the avatar overlaps, in obstacle order
pub fn avatar_collision(avatar: &Avatar, obstacles: &[Obstacle]) -> Option<Collision> {
    obstacles
        .iter()
        .find_map(|obstacle| obstacle_collision(&avatar.bounds, obstacle))
}
