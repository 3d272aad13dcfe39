use argon_core::geometry::Aabb2;
use argon_core::math::{Mat4, Vec2, Vec3, ortho_2d};

/// Orthographic 2D camera.
///
/// `size` is the half height of the view in world units at zoom 1; the half
/// width follows from the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub zoom: f32,
    pub size: f32,
}

impl Camera2D {
    /// Half extents of the visible area.
    pub fn half_extents(&self, aspect: f32) -> Vec2 {
        let half_h = self.size / self.zoom;
        let half_w = self.size * aspect / self.zoom;
        Vec2::new(half_w, half_h)
    }

    /// World-space rectangle covered by the camera. Rotation is ignored.
    pub fn view_bounds(&self, aspect: f32) -> Aabb2 {
        Aabb2::from_center_half_extents(Vec2::new(self.x, self.y), self.half_extents(aspect))
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        let half = self.half_extents(aspect);
        ortho_2d(-half.x, half.x, -half.y, half.y)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_z(-self.rotation)
            * Mat4::from_translation(Vec3::new(-self.x, -self.y, 0.0))
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            zoom: 1.0,
            size: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_edges_map_to_clip_edges() {
        let camera = Camera2D {
            x: 10.0,
            y: -4.0,
            size: 2.0,
            ..Default::default()
        };
        let vp = camera.view_projection(1.5);

        let top_right = vp.transform_point3(Vec3::new(13.0, -2.0, 0.0));
        assert!((top_right.x - 1.0).abs() < 1e-5);
        assert!((top_right.y - 1.0).abs() < 1e-5);

        let center = vp.transform_point3(Vec3::new(10.0, -4.0, 0.0));
        assert!(center.truncate().length() < 1e-5);
    }

    #[test]
    fn test_zoom_shrinks_bounds() {
        let camera = Camera2D {
            zoom: 2.0,
            size: 4.0,
            ..Default::default()
        };
        assert_eq!(camera.half_extents(2.0), Vec2::new(4.0, 2.0));
    }
}
