//! Session state: the single owned aggregate the tick driver mutates
//!
//! Holds every entity plus score, level and difficulty. Randomness comes
//! from an injected RNG so a run is reproducible from its seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::collision::Collision;
use super::effects::ScorePopup;
use super::obstacle::Obstacle;
use super::scenery::Scenery;
use crate::config::{ConfigError, GameConfig};
use crate::consts::*;

/// Top-level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; waiting for restart input
    GameOver,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session<R = Pcg32> {
    pub config: GameConfig,
    /// Current phase
    pub phase: GamePhase,
    /// Obstacles cleared this run
    pub score: u32,
    /// Best score across restarts (in memory only)
    pub best_score: u32,
    /// Difficulty level, starts at 1
    pub level: u32,
    /// Speed given to newly spawned obstacles
    pub obstacle_speed: f32,
    /// Horizontal distance between spawned obstacles
    pub obstacle_spacing: f32,
    /// Simulation tick counter (never reset)
    pub time_ticks: u64,
    /// Ticks left on the "Level N!" banner
    pub level_banner_ticks: u32,
    /// What ended the last run
    pub collision: Option<Collision>,
    pub avatar: Avatar,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    pub popups: Vec<ScorePopup>,
    pub scenery: Scenery,
    pub(super) rng: R,
    next_id: u32,
}

impl Session<Pcg32> {
    /// Create a session seeded with `seed`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let session = Self::with_rng(config, Pcg32::seed_from_u64(seed))?;
        log::info!("Session started with seed {}", seed);
        Ok(session)
    }
}

impl<R: Rng> Session<R> {
    /// Create a session drawing from the given random source
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let scale = config.scale();
        let scenery = Scenery::new(config.width, config.height, &mut rng);
        let mut session = Self {
            phase: GamePhase::Running,
            score: 0,
            best_score: 0,
            level: 1,
            obstacle_speed: config.base_speed(),
            obstacle_spacing: config.base_spacing(),
            time_ticks: 0,
            level_banner_ticks: 0,
            collision: None,
            avatar: Avatar::new(Self::avatar_start(&config), scale),
            obstacles: Vec::new(),
            popups: Vec::new(),
            scenery,
            rng,
            next_id: 1,
            config,
        };
        session.spawn_obstacle();
        Ok(session)
    }

    /// Where the avatar starts each run
    fn avatar_start(config: &GameConfig) -> Vec2 {
        Vec2::new((config.width / 4.0).floor(), (config.height / 2.0).floor())
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.avatar.scale()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// The single player input: flap while running, restart after game over
    pub fn primary_action(&mut self) {
        match self.phase {
            GamePhase::Running => self.jump(),
            GamePhase::GameOver => self.restart(),
        }
    }

    /// Apply the upward impulse; ignored once the run is over
    pub fn jump(&mut self) {
        if self.is_running() {
            self.avatar.jump(&mut self.rng);
        }
    }

    /// Reset gameplay state for a new run
    ///
    /// Scenery and the best score carry over.
    pub fn restart(&mut self) {
        self.avatar = Avatar::new(Self::avatar_start(&self.config), self.config.scale());
        self.obstacles.clear();
        self.popups.clear();
        self.score = 0;
        self.level = 1;
        self.obstacle_speed = self.config.base_speed();
        self.obstacle_spacing = self.config.base_spacing();
        self.level_banner_ticks = 0;
        self.collision = None;
        self.phase = GamePhase::Running;
        self.spawn_obstacle();
        log::info!("Session restarted (best score {})", self.best_score);
    }

    /// Allocate a new obstacle id
    fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Append a new obstacle at the right edge using the current speed
    pub fn spawn_obstacle(&mut self) {
        let id = self.next_obstacle_id();
        let obstacle = Obstacle::spawn(id, &self.config, self.obstacle_speed, &mut self.rng);
        log::debug!(
            "Obstacle {} spawned: gap_top={:.1} speed={:.2}",
            id,
            obstacle.gap_top,
            obstacle.speed
        );
        self.obstacles.push(obstacle);
    }

    /// The newest obstacle has moved far enough left to make room
    pub fn needs_obstacle(&self) -> bool {
        self.obstacles
            .last()
            .is_none_or(|last| last.x < self.config.width - self.obstacle_spacing)
    }

    /// Credit one cleared obstacle
    pub(super) fn add_point(&mut self, popup_at: Vec2) {
        self.score += 1;
        self.popups.push(ScorePopup::new(popup_at));
        if self.score % self.config.level_up_score == 0 {
            self.level_up();
        }
    }

    /// Raise difficulty: faster obstacles, tighter spacing
    pub fn level_up(&mut self) {
        self.level += 1;
        self.obstacle_speed += SPEED_INCREASE * self.scale();
        self.obstacle_spacing = self.config.spacing_for_level(self.level);
        self.level_banner_ticks = LEVEL_BANNER_TICKS;
        log::info!(
            "Level {}: speed={:.2} spacing={:.1}",
            self.level,
            self.obstacle_speed,
            self.obstacle_spacing
        );
    }

    /// Enter the terminal state
    pub(super) fn end_run(&mut self, collision: Collision) {
        self.phase = GamePhase::GameOver;
        self.collision = Some(collision);
        self.best_score = self.best_score.max(self.score);
        log::info!(
            "Game over ({:?}): score={} level={}",
            collision,
            self.score,
            self.level
        );
    }

    /// Next obstacle the avatar still has to clear
    pub fn next_obstacle(&self) -> Option<&Obstacle> {
        let left = self.avatar.bounds.left();
        self.obstacles.iter().find(|o| o.right() >= left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(GameConfig::default(), 12345).unwrap()
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert_eq!(s.phase, GamePhase::Running);
        assert_eq!(s.score, 0);
        assert_eq!(s.level, 1);
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.avatar.pos, Vec2::new(200.0, 300.0));
        assert_eq!(s.avatar.velocity, 0.0);
        assert_eq!(s.obstacle_speed, 3.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            width: -10.0,
            ..GameConfig::default()
        };
        assert!(Session::new(config, 1).is_err());
    }

    #[test]
    fn test_level_up_every_threshold() {
        let mut s = session();
        for i in 1..=12 {
            s.add_point(Vec2::ZERO);
            assert_eq!(s.level, 1 + i / 5);
        }
        assert_eq!(s.obstacle_speed, 4.0);
        assert_eq!(s.obstacle_spacing, 280.0);
        assert_eq!(s.popups.len(), 12);
    }

    #[test]
    fn test_level_up_sets_banner() {
        let mut s = session();
        s.level_up();
        assert_eq!(s.level_banner_ticks, LEVEL_BANNER_TICKS);
    }

    #[test]
    fn test_primary_action_routes_by_phase() {
        let mut s = session();
        s.primary_action();
        assert_eq!(s.avatar.velocity, JUMP_VELOCITY);

        s.end_run(Collision::Ground);
        assert!(s.is_game_over());
        s.primary_action();
        assert!(s.is_running());
        assert_eq!(s.avatar.velocity, 0.0);
    }

    #[test]
    fn test_jump_ignored_after_game_over() {
        let mut s = session();
        s.end_run(Collision::Ceiling);
        s.jump();
        assert_eq!(s.avatar.velocity, 0.0);
        assert!(s.avatar.particles.is_empty());
    }

    #[test]
    fn test_restart_resets_run() {
        let mut s = session();
        for _ in 0..7 {
            s.add_point(Vec2::ZERO);
        }
        s.spawn_obstacle();
        s.avatar.pos.y = 10.0;
        s.avatar.velocity = 4.0;
        s.end_run(Collision::TopBarrier { obstacle: 1 });
        let first_id = s.obstacles[0].id;

        s.restart();
        assert_eq!(s.score, 0);
        assert_eq!(s.best_score, 7);
        assert_eq!(s.level, 1);
        assert_eq!(s.obstacle_speed, s.config.base_speed());
        assert_eq!(s.obstacle_spacing, s.config.base_spacing());
        assert_eq!(s.obstacles.len(), 1);
        assert_ne!(s.obstacles[0].id, first_id);
        assert!(s.popups.is_empty());
        assert_eq!(s.avatar.pos, Vec2::new(200.0, 300.0));
        assert_eq!(s.avatar.velocity, 0.0);
        assert_eq!(s.collision, None);
    }

    #[test]
    fn test_needs_obstacle() {
        let mut s = session();
        assert!(!s.needs_obstacle());
        // 800 - 320 = 480
        s.obstacles[0].x = 480.0;
        assert!(!s.needs_obstacle());
        s.obstacles[0].x = 479.0;
        assert!(s.needs_obstacle());
        s.obstacles.clear();
        assert!(s.needs_obstacle());
    }
}
