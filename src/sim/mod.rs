//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles oldest first)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod collision;
pub mod effects;
pub mod obstacle;
pub mod rect;
pub mod scenery;
pub mod state;
pub mod tick;

pub use avatar::Avatar;
pub use collision::{Collision, avatar_collision, bounds_collision, obstacle_collision};
pub use effects::{Particle, ScorePopup};
pub use obstacle::Obstacle;
pub use rect::Rect;
pub use scenery::{Cloud, Scenery};
pub use state::{GamePhase, Session};
pub use tick::{TickInput, tick};
