//! Last-bound GPU state within a pass, used to skip redundant binds.

use argon_test_utils::{GraphicsDevice, VertexArrayId};

use crate::{RenderStats, Shader, Texture2D};

/// Ids of the currently bound shader, texture (unit 0) and vertex array.
///
/// Zero means nothing is bound. A fresh cache is created for every flush, so
/// the first bind of each kind in a pass is always issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStateCache {
    pub shader: u32,
    pub texture: u32,
    pub vertex_array: u32,
}

impl RenderStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `shader` if it is not current. Newly bound programs sample unit 0.
    pub fn bind_shader(&mut self, shader: &Shader, stats: &mut RenderStats) {
        let id = shader.program().raw();
        if id == self.shader {
            return;
        }
        shader.bind();
        shader.set_int("uTex", 0);
        self.shader = id;
        stats.shader_binds += 1;
    }

    /// Bind `texture` to unit 0, or clear unit 0 for `None` if anything is bound.
    pub fn bind_texture(
        &mut self,
        device: &dyn GraphicsDevice,
        texture: Option<&Texture2D>,
        stats: &mut RenderStats,
    ) {
        match texture {
            Some(texture) => {
                let id = texture.id();
                if id.raw() != self.texture {
                    device.bind_texture(0, Some(id));
                    self.texture = id.raw();
                    stats.texture_binds += 1;
                }
            }
            None => {
                if self.texture != 0 {
                    device.bind_texture(0, None);
                    self.texture = 0;
                    stats.texture_binds += 1;
                }
            }
        }
    }

    pub fn bind_vertex_array(
        &mut self,
        device: &dyn GraphicsDevice,
        vertex_array: VertexArrayId,
        stats: &mut RenderStats,
    ) {
        if vertex_array.raw() == self.vertex_array {
            return;
        }
        device.bind_vertex_array(Some(vertex_array));
        self.vertex_array = vertex_array.raw();
        stats.vertex_array_binds += 1;
    }
}
