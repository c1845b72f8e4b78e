//! Scene extraction: turns a session into draw instances and HUD text
//!
//! The renderer never reads simulation internals directly.

use glam::Vec2;
use serde::Serialize;

use super::instance::{Instance, ShapeKind, colors, faded};
use crate::consts::*;
use crate::sim::{GamePhase, Obstacle, Session};

/// Barrier cap overhang on each side, and cap height
const CAP_OVERHANG: f32 = 10.0;
const CAP_HEIGHT: f32 = 30.0;
/// Fraction of the ground strip drawn as grass
const GRASS_FRACTION: f32 = 0.3;
/// Grass blade spacing, resting height and width
const GRASS_BLADE_STEP: f32 = 20.0;
const GRASS_BLADE_HEIGHT: f32 = 10.0;
const GRASS_BLADE_WIDTH: f32 = 2.0;
const PARTICLE_SIZE: f32 = 4.0;
const POPUP_SIZE: f32 = 24.0;

/// Text overlays for the current frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub best_score: u32,
    /// "Level N!" while the level-up banner is showing
    pub banner: Option<String>,
    /// Banner opacity, fading from 1 to 0 over the banner's lifetime
    pub banner_alpha: f32,
    /// Game-over panel lines, top to bottom
    pub game_over: Option<Vec<String>>,
}

impl Hud {
    pub fn from_session<R>(session: &Session<R>) -> Self {
        let banner =
            (session.level_banner_ticks > 0).then(|| format!("Level {}!", session.level));
        let game_over = (session.phase == GamePhase::GameOver).then(|| {
            vec![
                "Game Over!".to_string(),
                format!("Score: {}", session.score),
                format!("Final Level: {}", session.level),
                "Press SPACE to restart".to_string(),
            ]
        });
        Self {
            score: session.score,
            level: session.level,
            best_score: session.best_score,
            banner,
            banner_alpha: session.level_banner_ticks as f32 / LEVEL_BANNER_TICKS as f32,
            game_over,
        }
    }
}

/// Build all instances in paint order (back to front)
pub fn build_scene<R>(session: &Session<R>) -> Vec<Instance> {
    let scale = session.config.scale();
    let avatar = &session.avatar;
    let blade_step = GRASS_BLADE_STEP * scale;
    let blade_count = (session.config.width / blade_step).ceil() as usize;
    let mut out = Vec::with_capacity(
        session.scenery.clouds.len()
            + session.obstacles.len() * 4
            + 2
            + blade_count
            + avatar.particles.len()
            + 2
            + session.popups.len(),
    );

    let cloud_size = CLOUD_SIZE * scale;
    for cloud in &session.scenery.clouds {
        // Three overlapping puffs fit in a 1.5 x 1.5 box
        let center = [
            cloud.pos.x + cloud_size * 0.75 + cloud.wobble,
            cloud.pos.y + cloud_size * 0.5,
        ];
        out.push(Instance::new(
            ShapeKind::Cloud,
            center,
            [cloud_size * 1.5, cloud_size * 1.5],
            colors::CLOUD,
        ));
    }

    for obstacle in &session.obstacles {
        push_obstacle(&mut out, obstacle, scale);
    }

    let ground_top = session.config.ground_line();
    let ground_height = session.config.ground_height();
    let width = session.config.width;
    out.push(Instance::new(
        ShapeKind::Ground,
        [width / 2.0, ground_top + ground_height / 2.0],
        [width, ground_height],
        colors::GROUND,
    ));
    let grass_height = ground_height * GRASS_FRACTION;
    out.push(Instance::new(
        ShapeKind::Grass,
        [width / 2.0, ground_top + grass_height / 2.0],
        [width, grass_height],
        colors::GRASS,
    ));
    // Blades sway with the scrolling ground
    for i in 0..blade_count {
        let x = i as f32 * blade_step;
        let height = (GRASS_BLADE_HEIGHT * scale + session.scenery.grass_wave(x, scale)).max(0.0);
        out.push(Instance::new(
            ShapeKind::GrassBlade,
            [x, ground_top - height / 2.0],
            [GRASS_BLADE_WIDTH * scale, height],
            colors::GRASS,
        ));
    }

    for particle in &avatar.particles {
        let size = PARTICLE_SIZE * particle.growth();
        out.push(
            Instance::new(
                ShapeKind::Particle,
                particle.pos.to_array(),
                [size, size],
                faded(colors::PARTICLE, particle.alpha()),
            )
            .rotated(particle.rotation),
        );
    }

    let body = avatar.rotation.to_radians();
    out.push(
        Instance::new(
            ShapeKind::Avatar,
            avatar.pos.to_array(),
            avatar.bounds.size.to_array(),
            colors::AVATAR,
        )
        .rotated(body)
        .with_variant(avatar.frame / FRAME_DELAY),
    );
    // Wing hinged at the back half of the body, flapping around the body tilt
    let side = avatar.bounds.size.x;
    let hinge = avatar.pos + Vec2::from_angle(body).rotate(Vec2::new(-side / 4.0, 0.0));
    out.push(
        Instance::new(
            ShapeKind::Wing,
            hinge.to_array(),
            [side / 2.0, side / 4.0],
            colors::WING,
        )
        .rotated(body + avatar.wing_angle.to_radians()),
    );

    let popup_size = POPUP_SIZE * scale;
    for popup in &session.popups {
        out.push(Instance::new(
            ShapeKind::Popup,
            popup.pos.to_array(),
            [popup_size, popup_size],
            faded(colors::POPUP, popup.alpha()),
        ));
    }

    out
}

fn push_obstacle(out: &mut Vec<Instance>, obstacle: &Obstacle, scale: f32) {
    let cap_w = obstacle.width + 2.0 * CAP_OVERHANG * scale;
    let cap_h = CAP_HEIGHT * scale;
    let mid_x = obstacle.x + obstacle.width / 2.0;

    for rect in [obstacle.top_rect(), obstacle.bottom_rect()] {
        if rect.is_empty() {
            continue;
        }
        out.push(Instance::new(
            ShapeKind::Barrier,
            rect.center().to_array(),
            rect.size.to_array(),
            colors::BARRIER,
        ));
    }

    // Caps sit on the gap side of each barrier
    out.push(Instance::new(
        ShapeKind::BarrierCap,
        [mid_x, obstacle.gap_top - cap_h / 2.0],
        [cap_w, cap_h],
        colors::BARRIER_CAP,
    ));
    out.push(Instance::new(
        ShapeKind::BarrierCap,
        [mid_x, obstacle.gap_bottom() + cap_h / 2.0],
        [cap_w, cap_h],
        colors::BARRIER_CAP,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{TickInput, tick};

    fn count(instances: &[Instance], kind: ShapeKind) -> usize {
        instances.iter().filter(|i| i.shape() == Some(kind)).count()
    }

    #[test]
    fn test_initial_scene() {
        let session = Session::new(GameConfig::default(), 5).unwrap();
        let scene = build_scene(&session);
        assert_eq!(count(&scene, ShapeKind::Cloud), CLOUD_COUNT);
        assert_eq!(count(&scene, ShapeKind::Barrier), 2);
        assert_eq!(count(&scene, ShapeKind::BarrierCap), 2);
        assert_eq!(count(&scene, ShapeKind::Avatar), 1);
        assert_eq!(count(&scene, ShapeKind::Wing), 1);
        assert_eq!(count(&scene, ShapeKind::GrassBlade), 40);
        assert_eq!(count(&scene, ShapeKind::Particle), 0);
    }

    #[test]
    fn test_grass_blades_follow_ground_scroll() {
        let mut session = Session::new(GameConfig::default(), 5).unwrap();
        let blades = |scene: &[Instance]| -> Vec<f32> {
            scene
                .iter()
                .filter(|i| i.shape() == Some(ShapeKind::GrassBlade))
                .map(|i| i.size[1])
                .collect()
        };
        let before = blades(&build_scene(&session));
        for _ in 0..10 {
            tick(&mut session, &TickInput::default());
        }
        let after = blades(&build_scene(&session));
        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);

        let ground_top = session.config.ground_line();
        for blade in build_scene(&session)
            .iter()
            .filter(|i| i.shape() == Some(ShapeKind::GrassBlade))
        {
            // Bottom edge rests on the ground line
            assert!((blade.center[1] + blade.size[1] / 2.0 - ground_top).abs() < 1e-3);
        }
    }

    #[test]
    fn test_avatar_frame_and_wing_reach_scene() {
        let mut session = Session::new(GameConfig::default(), 5).unwrap();
        for _ in 0..7 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.avatar.frame, 7);
        let scene = build_scene(&session);
        let avatar = scene
            .iter()
            .find(|i| i.shape() == Some(ShapeKind::Avatar))
            .unwrap();
        let wing = scene
            .iter()
            .find(|i| i.shape() == Some(ShapeKind::Wing))
            .unwrap();
        assert_eq!(avatar.variant, 7 / FRAME_DELAY);
        let expected = avatar.rotation + session.avatar.wing_angle.to_radians();
        assert!((wing.rotation - expected).abs() < 1e-5);
        assert_ne!(wing.rotation, avatar.rotation);
    }

    #[test]
    fn test_avatar_drawn_after_ground() {
        let session = Session::new(GameConfig::default(), 5).unwrap();
        let scene = build_scene(&session);
        let ground = scene
            .iter()
            .position(|i| i.shape() == Some(ShapeKind::Ground))
            .unwrap();
        let avatar = scene
            .iter()
            .position(|i| i.shape() == Some(ShapeKind::Avatar))
            .unwrap();
        assert!(avatar > ground);
    }

    #[test]
    fn test_particles_fade() {
        let mut session = Session::new(GameConfig::default(), 5).unwrap();
        session.jump();
        tick(&mut session, &TickInput::default());
        let scene = build_scene(&session);
        let particles: Vec<_> = scene
            .iter()
            .filter(|i| i.shape() == Some(ShapeKind::Particle))
            .collect();
        assert_eq!(particles.len(), JUMP_PARTICLES);
        for p in particles {
            assert!(p.color[3] < colors::PARTICLE[3]);
            assert!(p.size[0] > PARTICLE_SIZE);
        }
    }

    #[test]
    fn test_hud_banner_and_game_over() {
        let mut session = Session::new(GameConfig::default(), 5).unwrap();
        let hud = Hud::from_session(&session);
        assert_eq!(hud.banner, None);
        assert_eq!(hud.banner_alpha, 0.0);
        assert_eq!(hud.game_over, None);

        session.level_up();
        let hud = Hud::from_session(&session);
        assert_eq!(hud.banner.as_deref(), Some("Level 2!"));
        assert_eq!(hud.banner_alpha, 1.0);

        session.level_banner_ticks = LEVEL_BANNER_TICKS / 2;
        assert_eq!(Hud::from_session(&session).banner_alpha, 0.5);

        session.avatar.pos.y = -10.0;
        tick(&mut session, &TickInput::default());
        let hud = Hud::from_session(&session);
        let lines = hud.game_over.unwrap();
        assert_eq!(lines[0], "Game Over!");
        assert_eq!(lines[2], "Final Level: 2");
    }
}
