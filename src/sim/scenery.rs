//! Parallax background: drifting clouds and the scrolling ground strip

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A cloud drifting slowly to the right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub speed: f32,
    /// Horizontal sway applied at draw time
    pub wobble: f32,
}

impl Cloud {
    pub fn new(pos: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            speed: CLOUD_BASE_SPEED * (0.5 + rng.random::<f32>() * 0.5),
            wobble: 0.0,
        }
    }

    pub fn update(&mut self, scale: f32) {
        self.pos.x += self.speed * scale;
        self.wobble = (self.pos.x * 0.02).sin() * 3.0 * scale;
    }

    /// Re-enter from the left at a new height
    pub fn wrap(&mut self, scale: f32, rng: &mut impl Rng) {
        self.pos.x = -CLOUD_SIZE * scale;
        self.pos.y = rng.random::<f32>() * 200.0 * scale;
    }
}

/// Background state with no gameplay interaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenery {
    pub clouds: Vec<Cloud>,
    /// Ground texture scroll (drives the grass wave)
    pub ground_offset: f32,
}

impl Scenery {
    /// Scatter clouds over the full width and the top third of the screen
    pub fn new(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let clouds = (0..CLOUD_COUNT)
            .map(|_| {
                let x = (rng.random::<f32>() * width).floor();
                let y = (rng.random::<f32>() * height / 3.0).floor();
                Cloud::new(Vec2::new(x, y), &mut *rng)
            })
            .collect();
        Self {
            clouds,
            ground_offset: 0.0,
        }
    }

    pub fn update(&mut self, width: f32, scale: f32, rng: &mut impl Rng) {
        for cloud in self.clouds.iter_mut() {
            cloud.update(scale);
            if cloud.pos.x > width {
                cloud.wrap(scale, rng);
            }
        }
        self.ground_offset += GROUND_SCROLL * scale;
    }

    /// Grass blade height offset at screen column `x`
    pub fn grass_wave(&self, x: f32, scale: f32) -> f32 {
        ((x + self.ground_offset) * 0.05).sin() * 8.0 * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_initial_clouds_in_sky() {
        let mut rng = Pcg32::seed_from_u64(3);
        let scenery = Scenery::new(800.0, 600.0, &mut rng);
        assert_eq!(scenery.clouds.len(), CLOUD_COUNT);
        for cloud in &scenery.clouds {
            assert!(cloud.pos.x >= 0.0 && cloud.pos.x < 800.0);
            assert!(cloud.pos.y >= 0.0 && cloud.pos.y < 200.0);
            assert!(cloud.speed >= 0.25 && cloud.speed <= 0.5);
        }
    }

    #[test]
    fn test_cloud_wraps_to_left() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut scenery = Scenery::new(800.0, 600.0, &mut rng);
        scenery.clouds[0].pos.x = 800.0;
        scenery.update(800.0, 1.0, &mut rng);
        assert_eq!(scenery.clouds[0].pos.x, -CLOUD_SIZE);
        assert!(scenery.clouds[0].pos.y < 200.0);
    }

    #[test]
    fn test_ground_scrolls() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut scenery = Scenery::new(800.0, 600.0, &mut rng);
        scenery.update(800.0, 2.0, &mut rng);
        assert_eq!(scenery.ground_offset, 1.0);
    }
}
