//! Render sink interface
//!
//! Flattens session state into draw instances; drawing itself belongs to
//! the host's rendering backend.

pub mod instance;
pub mod scene;

pub use instance::{Instance, ShapeKind, colors};
pub use scene::{Hud, build_scene};
