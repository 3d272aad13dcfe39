//! Math types and the 2D matrix helpers shared by the renderer and the scene.
//!
//! Everything from [`glam`] is re-exported. Matrices are column-major, which
//! is also the layout the GLSL programs expect for `mat4` uniforms and the
//! per-instance model columns.
//!
//! ```
//! use argon_core::math::{transform_2d, Vec4};
//!
//! let model = transform_2d(1.0, 2.0, 0.0, 3.0, 3.0);
//! let p = model * Vec4::new(0.5, 0.5, 0.0, 1.0);
//! assert_eq!((p.x, p.y), (2.5, 3.5));
//! ```

pub use glam::*;

/// Model matrix for a 2D translate/rotate/scale, composed as `T * R * S`.
///
/// `rotation` is in radians around +Z.
#[inline]
pub fn transform_2d(x: f32, y: f32, rotation: f32, sx: f32, sy: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, 0.0))
        * Mat4::from_rotation_z(rotation)
        * Mat4::from_scale(Vec3::new(sx, sy, 1.0))
}

/// OpenGL-style orthographic projection with a `[-1, 1]` depth range.
#[inline]
pub fn ortho_2d(left: f32, right: f32, bottom: f32, top: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(left, right, bottom, top, -1.0, 1.0)
}
