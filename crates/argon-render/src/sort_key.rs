//! 64-bit draw ordering key.
//!
//! ```text
//! 63            32 31        16 15         0
//! +---------------+------------+------------+
//! |  shader id    | texture id | vertex arr |
//! +---------------+------------+------------+
//! ```
//!
//! Within a layer, commands sort by shader first, so state changes are
//! ordered from most to least expensive. Texture and vertex-array ids are
//! masked to 16 bits; two ids that alias only make grouping coarser.

use crate::{Material2D, Mesh};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SortKey(u64);

impl SortKey {
    pub const fn pack(shader: u32, texture: u32, vertex_array: u32) -> Self {
        Self(
            ((shader as u64) << 32)
                | (((texture & 0xFFFF) as u64) << 16)
                | (vertex_array & 0xFFFF) as u64,
        )
    }

    /// Key for drawing `mesh` with `material`. A texture only counts when the
    /// material actually samples it.
    pub fn for_draw(mesh: &Mesh, material: &Material2D) -> Self {
        let shader = material.shader.map_or(0, |s| s.program().raw());
        let texture = material.bound_texture().map_or(0, |t| t.id().raw());
        Self::pack(shader, texture, mesh.vertex_array().raw())
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn shader(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub const fn texture(self) -> u32 {
        ((self.0 >> 16) & 0xFFFF) as u32
    }

    pub const fn vertex_array(self) -> u32 {
        (self.0 & 0xFFFF) as u32
    }
}
