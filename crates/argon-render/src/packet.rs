use glam::Mat4;

use crate::{Color, MaterialHandle, Mesh, UvRect};

/// One drawable, as produced by the scene for the current frame.
///
/// Packets are transient: they borrow the mesh and refer to the material by
/// handle, and are rebuilt every frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderPacket2D<'a> {
    pub mesh: Option<&'a Mesh>,
    pub material: MaterialHandle,
    pub model: Mat4,
    /// Lower layers draw first.
    pub layer: i32,
    pub visible: bool,
    pub tint: Color,
    pub uv_rect: UvRect,
}

impl<'a> RenderPacket2D<'a> {
    pub fn new(mesh: &'a Mesh, material: MaterialHandle, model: Mat4) -> Self {
        Self {
            mesh: Some(mesh),
            material,
            model,
            ..Default::default()
        }
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_uv_rect(mut self, uv_rect: UvRect) -> Self {
        self.uv_rect = uv_rect;
        self
    }
}

impl Default for RenderPacket2D<'_> {
    fn default() -> Self {
        Self {
            mesh: None,
            material: MaterialHandle::INVALID,
            model: Mat4::IDENTITY,
            layer: 0,
            visible: true,
            tint: Color::WHITE,
            uv_rect: UvRect::FULL,
        }
    }
}
