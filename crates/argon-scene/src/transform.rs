use argon_core::math::{Mat4, Vec2, transform_2d};

/// Position, rotation (radians, counter-clockwise) and scale of a 2D entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub sx: f32,
    pub sy: f32,
}

impl Transform2D {
    pub fn from_position(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.sx = sx;
        self.sy = sy;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Model matrix: translate * rotate * scale.
    pub fn matrix(&self) -> Mat4 {
        transform_2d(self.x, self.y, self.rotation, self.sx, self.sy)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            sx: 1.0,
            sy: 1.0,
        }
    }
}
