//! Static 2D meshes: interleaved `x, y, u, v` vertices drawn as a triangle list.

use std::sync::Arc;

use argon_test_utils::{
    BufferId, GraphicsDevice, VertexArrayDescriptor, VertexArrayId, VertexBufferBinding,
};

/// Floats per vertex: position (vec2) then uv (vec2).
pub const FLOATS_PER_VERTEX: usize = 4;

/// Unit quad centered on the origin, two triangles.
#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 24] = [
    // x     y     u    v
    -0.5, -0.5,  0.0, 0.0,
     0.5, -0.5,  1.0, 0.0,
     0.5,  0.5,  1.0, 1.0,

    -0.5, -0.5,  0.0, 0.0,
     0.5,  0.5,  1.0, 1.0,
    -0.5,  0.5,  0.0, 1.0,
];

/// Vertex layout shared by every mesh and by the batcher's quad.
pub fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        // location 0: position (vec2)
        0 => Float32x2,
        // location 1: uv (vec2)
        1 => Float32x2,
    ];

    wgpu::VertexBufferLayout {
        array_stride: (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: ATTRS,
    }
}

/// Upload `vertices` into a new static vertex buffer.
pub(crate) fn create_vertex_buffer(
    device: &dyn GraphicsDevice,
    label: &str,
    vertices: &[f32],
) -> BufferId {
    let contents: &[u8] = bytemuck::cast_slice(vertices);
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: contents.len() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    device.write_buffer(buffer, 0, contents);
    buffer
}

/// A vertex buffer plus the vertex array describing it.
///
/// Meshes are owned by the application; draw commands only borrow them, and
/// two commands share a mesh when they borrow the same `Mesh` value.
pub struct Mesh {
    vertex_array: VertexArrayId,
    vertex_buffer: BufferId,
    vertex_count: u32,
}

impl Mesh {
    /// Create a mesh from interleaved `x, y, u, v` floats.
    ///
    /// A trailing partial vertex is ignored.
    pub fn new(device: &Arc<dyn GraphicsDevice>, vertices: &[f32]) -> Self {
        let vertex_count = (vertices.len() / FLOATS_PER_VERTEX) as u32;
        let used = &vertices[..vertex_count as usize * FLOATS_PER_VERTEX];

        let vertex_buffer = create_vertex_buffer(device.as_ref(), "mesh_vertices", used);
        let vertex_array = device.create_vertex_array(&VertexArrayDescriptor {
            label: Some("mesh"),
            buffers: &[VertexBufferBinding {
                buffer: vertex_buffer,
                layout: mesh_vertex_layout(),
            }],
        });

        Self {
            vertex_array,
            vertex_buffer,
            vertex_count,
        }
    }

    /// The unit quad used for sprites.
    pub fn quad(device: &Arc<dyn GraphicsDevice>) -> Self {
        Self::new(device, &QUAD_VERTICES)
    }

    pub fn vertex_array(&self) -> VertexArrayId {
        self.vertex_array
    }

    pub fn vertex_buffer(&self) -> BufferId {
        self.vertex_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

impl std::fmt::Debug for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mesh")
            .field("vertex_array", &self.vertex_array)
            .field("vertex_count", &self.vertex_count)
            .finish()
    }
}
