//! GPU-instanced sprite batching.
//!
//! Runs of commands that draw the registered sprite quad with the registered
//! instanced shader are collected into [`SpriteInstance`] records and drawn
//! with a single `draw_arrays_instanced`.

use std::sync::Arc;

use argon_core::profiling::profile_function;
use argon_test_utils::{
    BufferId, GraphicsDevice, VertexArrayDescriptor, VertexArrayId, VertexBufferBinding,
};
use glam::Mat4;

use crate::{
    Color, Material2D, Mesh, RenderStateCache, RenderStats, Shader, SortKey, UvRect,
    mesh::{QUAD_VERTICES, create_vertex_buffer, mesh_vertex_layout},
};

/// Vertices drawn per sprite (two triangles).
pub const VERTICES_PER_SPRITE: u32 = 6;

/// Default instance buffer capacity, in sprites.
pub const DEFAULT_INSTANCE_CAPACITY: usize = 20_000;

/// Per-instance data for the instanced sprite program.
///
/// Matches `instanced.vert`: model matrix columns at locations 2–5, color at
/// 6 and the UV rectangle at 7.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub uv_rect: [f32; 4],
}

static_assertions::const_assert_eq!(std::mem::size_of::<SpriteInstance>(), 96);

impl SpriteInstance {
    pub fn new(model: &Mat4, color: Color, uv_rect: UvRect) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.to_array(),
            uv_rect: uv_rect.to_array(),
        }
    }

    /// Returns the vertex buffer layout for the instance stream.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            // locations 2-5: model matrix columns
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            // location 6: color
            6 => Float32x4,
            // location 7: uv rect (u0, v0, u1, v1)
            7 => Float32x4,
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: ATTRS,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BatchResources {
    instance_buffer: BufferId,
    vertex_array: VertexArrayId,
}

/// The key and material every instance of the open batch shares.
#[derive(Debug, Clone, Copy)]
struct OpenBatch<'a> {
    key: SortKey,
    material: Material2D<'a>,
}

/// Collects instanceable sprites and draws each run in one call.
///
/// GPU resources are created on the first flush. The instance buffer grows
/// by doubling and never shrinks; every flush orphans it before writing so
/// the upload never waits on a draw still in flight.
pub struct SpriteBatcher<'a> {
    device: Arc<dyn GraphicsDevice>,
    sprite_quad: Option<&'a Mesh>,
    instanced_shader: Option<&'a Shader>,
    view_projection: Mat4,
    instances: Vec<SpriteInstance>,
    batch: Option<OpenBatch<'a>>,
    /// In sprites.
    capacity: usize,
    resources: Option<BatchResources>,
}

impl<'a> SpriteBatcher<'a> {
    pub fn new(device: Arc<dyn GraphicsDevice>, initial_capacity: usize) -> Self {
        Self {
            device,
            sprite_quad: None,
            instanced_shader: None,
            view_projection: Mat4::IDENTITY,
            instances: Vec::new(),
            batch: None,
            capacity: initial_capacity,
            resources: None,
        }
    }

    pub fn set_sprite_quad(&mut self, mesh: &'a Mesh) {
        self.sprite_quad = Some(mesh);
    }

    pub fn set_instanced_shader(&mut self, shader: &'a Shader) {
        self.instanced_shader = Some(shader);
    }

    /// Whether a draw of `mesh` with `material` can join a batch.
    ///
    /// Both must be the very objects registered with the batcher.
    pub fn can_instance(&self, mesh: &Mesh, material: &Material2D) -> bool {
        let quad = self
            .sprite_quad
            .is_some_and(|quad| std::ptr::eq(quad, mesh));
        let shader = match (self.instanced_shader, material.shader) {
            (Some(registered), Some(shader)) => std::ptr::eq(registered, shader),
            _ => false,
        };
        quad && shader
    }

    /// Start a pass. Pending instances are discarded.
    pub fn begin(&mut self, view_projection: Mat4) {
        self.view_projection = view_projection;
        self.instances.clear();
        self.batch = None;
    }

    /// Whether the open batch must be flushed before a command with `key`
    /// and `material` can join.
    ///
    /// Besides a key change, a change of texture also breaks the batch since
    /// texture ids are truncated in the key.
    pub fn breaks_batch(&self, key: SortKey, material: &Material2D) -> bool {
        let Some(batch) = &self.batch else {
            return false;
        };
        let latched = batch.material.bound_texture().map(|t| t.id());
        let incoming = material.bound_texture().map(|t| t.id());
        batch.key != key || latched != incoming
    }

    /// Append one instance. The first instance of a batch latches its key and material.
    pub fn submit(
        &mut self,
        key: SortKey,
        material: &Material2D<'a>,
        model: &Mat4,
        tint: Color,
        uv_rect: UvRect,
    ) {
        if self.batch.is_none() {
            self.batch = Some(OpenBatch {
                key,
                material: *material,
            });
        }
        self.instances
            .push(SpriteInstance::new(model, material.color * tint, uv_rect));
    }

    /// Draw the open batch, if any, and close it.
    pub fn flush(&mut self, state: &mut RenderStateCache, stats: &mut RenderStats) {
        profile_function!();

        let Some(batch) = self.batch.take() else {
            return;
        };
        if self.instances.is_empty() {
            return;
        }
        let Some(shader) = batch.material.shader else {
            self.instances.clear();
            return;
        };

        let resources = self.resources();
        let device = self.device.as_ref();

        state.bind_shader(shader, stats);
        shader.set_mat4("uPV", &self.view_projection);
        let texture = batch.material.bound_texture();
        shader.set_int("uUseTex", i32::from(texture.is_some()));
        state.bind_texture(device, texture, stats);
        state.bind_vertex_array(device, resources.vertex_array, stats);

        let needed = self.instances.len();
        if needed > self.capacity {
            let previous = self.capacity;
            while needed > self.capacity {
                self.capacity = (self.capacity * 2).max(1);
            }
            tracing::debug!(
                previous,
                capacity = self.capacity,
                needed,
                "Grew sprite instance buffer"
            );
        }

        let stride = std::mem::size_of::<SpriteInstance>() as u64;
        device.allocate_buffer(resources.instance_buffer, self.capacity as u64 * stride);
        device.write_buffer(
            resources.instance_buffer,
            0,
            bytemuck::cast_slice(&self.instances),
        );
        device.draw_arrays_instanced(0, VERTICES_PER_SPRITE, needed as u32);

        let needed = needed as u32;
        stats.draw_calls += 1;
        stats.batch_flushes += 1;
        stats.batched_vertices += needed * VERTICES_PER_SPRITE;
        stats.batched_sprites += needed;

        self.instances.clear();
    }

    fn resources(&mut self) -> BatchResources {
        if let Some(resources) = self.resources {
            return resources;
        }

        let device = self.device.as_ref();
        let quad_buffer = create_vertex_buffer(device, "sprite_quad", &QUAD_VERTICES);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sprite_instances"),
            size: (self.capacity * std::mem::size_of::<SpriteInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let vertex_array = device.create_vertex_array(&VertexArrayDescriptor {
            label: Some("sprite_batch"),
            buffers: &[
                VertexBufferBinding {
                    buffer: quad_buffer,
                    layout: mesh_vertex_layout(),
                },
                VertexBufferBinding {
                    buffer: instance_buffer,
                    layout: SpriteInstance::layout(),
                },
            ],
        });

        let resources = BatchResources {
            instance_buffer,
            vertex_array,
        };
        self.resources = Some(resources);
        resources
    }

    /// Instance buffer capacity in sprites.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Instances waiting in the open batch.
    pub fn pending(&self) -> usize {
        self.instances.len()
    }

    pub fn is_open(&self) -> bool {
        self.batch.is_some()
    }

    /// The batch's vertex array, once created.
    pub fn vertex_array(&self) -> Option<VertexArrayId> {
        self.resources.map(|r| r.vertex_array)
    }

    /// The instance buffer, once created.
    pub fn instance_buffer(&self) -> Option<BufferId> {
        self.resources.map(|r| r.instance_buffer)
    }
}
