//! Instance types for 2D rendering
//!
//! One instance per drawn shape, laid out for direct upload to a GPU
//! instance buffer.

use bytemuck::{Pod, Zeroable};

/// Which sprite/shape an instance draws
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cloud = 0,
    Barrier = 1,
    BarrierCap = 2,
    Ground = 3,
    Grass = 4,
    Particle = 5,
    Avatar = 6,
    Popup = 7,
    Wing = 8,
    GrassBlade = 9,
}

impl ShapeKind {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(ShapeKind::Cloud),
            1 => Some(ShapeKind::Barrier),
            2 => Some(ShapeKind::BarrierCap),
            3 => Some(ShapeKind::Ground),
            4 => Some(ShapeKind::Grass),
            5 => Some(ShapeKind::Particle),
            6 => Some(ShapeKind::Avatar),
            7 => Some(ShapeKind::Popup),
            8 => Some(ShapeKind::Wing),
            9 => Some(ShapeKind::GrassBlade),
            _ => None,
        }
    }
}

/// A positioned, rotated, tinted shape
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub center: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
    /// Radians, clockwise in screen space
    pub rotation: f32,
    /// `ShapeKind` discriminant
    pub kind: u32,
    /// Sprite sheet cell (avatar animation frame), 0 otherwise
    pub variant: u32,
}

impl Instance {
    pub fn new(kind: ShapeKind, center: [f32; 2], size: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            center,
            size,
            color,
            rotation: 0.0,
            kind: kind as u32,
            variant: 0,
        }
    }

    pub fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_variant(mut self, variant: u32) -> Self {
        self.variant = variant;
        self
    }

    pub fn shape(&self) -> Option<ShapeKind> {
        ShapeKind::from_u32(self.kind)
    }
}

/// Scale a color's alpha by a fade factor in [0, 1]
pub fn faded(color: [f32; 4], fade: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * fade.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.78];
    pub const BARRIER: [f32; 4] = [0.69, 0.99, 0.22, 1.0];
    pub const BARRIER_CAP: [f32; 4] = [0.24, 0.69, 0.26, 1.0];
    pub const GROUND: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
    pub const GRASS: [f32; 4] = [0.49, 0.99, 0.0, 1.0];
    pub const AVATAR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const WING: [f32; 4] = [1.0, 0.65, 0.0, 1.0];
    pub const PARTICLE: [f32; 4] = [1.0, 1.0, 1.0, 0.78];
    pub const POPUP: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Instance>(), 44);
        let inst = Instance::new(ShapeKind::Avatar, [1.0, 2.0], [3.0, 4.0], colors::AVATAR)
            .with_variant(2);
        let bytes: &[u8] = bytemuck::bytes_of(&inst);
        assert_eq!(bytes.len(), 44);
        assert_eq!(&bytes[40..], &2u32.to_ne_bytes());
    }

    #[test]
    fn test_shape_kind_round_trip() {
        let inst = Instance::new(ShapeKind::Popup, [0.0, 0.0], [1.0, 1.0], colors::POPUP);
        assert_eq!(inst.shape(), Some(ShapeKind::Popup));
        assert_eq!(ShapeKind::from_u32(9), Some(ShapeKind::GrassBlade));
        assert_eq!(ShapeKind::from_u32(99), None);
    }

    #[test]
    fn test_faded() {
        let c = faded(colors::POPUP, 0.5);
        assert_eq!(c[3], 0.5);
        assert_eq!(faded(colors::POPUP, 2.0)[3], 1.0);
    }
}
