//! Command queue, sorting and dispatch for one 2D render pass.

use std::sync::Arc;

use argon_core::profiling::profile_function;
use argon_test_utils::GraphicsDevice;
use glam::Mat4;

use crate::{
    Color, Material2D, MaterialHandle, MaterialLibrary, Mesh, RenderPacket2D, RenderStateCache,
    RenderStats, Shader, SortKey, SpriteBatcher, UvRect,
    batcher::DEFAULT_INSTANCE_CAPACITY,
};

/// Renderer construction options.
#[derive(Debug, Clone, Copy)]
pub struct RendererConfig {
    /// Initial size of the sprite instance buffer, in sprites.
    pub initial_instance_capacity: usize,
    /// Color used by [`Renderer::clear_default`].
    pub clear_color: Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            initial_instance_capacity: DEFAULT_INSTANCE_CAPACITY,
            clear_color: Color::rgb(0.1, 0.1, 0.12),
        }
    }
}

/// Everything a pass needs from the frame.
#[derive(Debug, Clone, Copy)]
pub struct PassContext2D<'p, 'a> {
    pub view_projection: Mat4,
    pub materials: &'p MaterialLibrary<'a>,
}

/// A queued draw, created by [`RenderPassEncoder::submit`].
#[derive(Debug, Clone, Copy)]
pub struct RenderCommand<'a> {
    pub mesh: &'a Mesh,
    pub model: Mat4,
    pub material: MaterialHandle,
    pub layer: i32,
    pub key: SortKey,
    pub tint: Color,
    pub uv_rect: UvRect,
}

/// Sorts queued 2D draws and dispatches them, batching sprites.
///
/// A pass is opened with [`begin_pass`](Self::begin_pass), which returns a
/// [`RenderPassEncoder`]. Commands are submitted to the encoder; ending or
/// dropping it sorts the queue by `(layer, sort key)` and issues the draws.
///
/// Draws of the registered sprite quad with the registered instanced shader
/// are merged into instanced batches. Everything else goes through one
/// `draw_arrays` per command.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use argon_render::*;
/// use argon_test_utils::{GraphicsDevice, MockGraphicsDevice};
///
/// let mock = Arc::new(MockGraphicsDevice::new());
/// let device: Arc<dyn GraphicsDevice> = mock.clone();
///
/// let quad = Mesh::quad(&device);
/// let shader = Shader::instanced(device.clone());
///
/// let mut materials = MaterialLibrary::new();
/// let white = materials.add(Material2D::flat(&shader, Color::WHITE));
///
/// let mut renderer = Renderer::new(device.clone(), RendererConfig::default());
/// renderer.set_sprite_quad(&quad);
/// renderer.set_instanced_sprite_shader(&shader);
///
/// let mut pass = renderer.begin_pass(PassContext2D {
///     view_projection: glam::Mat4::IDENTITY,
///     materials: &materials,
/// });
/// for i in 0..100 {
///     let model = glam::Mat4::from_translation(glam::vec3(i as f32, 0.0, 0.0));
///     pass.submit(&RenderPacket2D::new(&quad, white, model));
/// }
/// pass.end();
///
/// assert_eq!(renderer.stats().draw_calls, 1);
/// assert_eq!(mock.instanced_draws(), vec![100]);
/// ```
pub struct Renderer<'a> {
    device: Arc<dyn GraphicsDevice>,
    config: RendererConfig,
    batcher: SpriteBatcher<'a>,
    queue: Vec<RenderCommand<'a>>,
    stats: RenderStats,
    view_projection: Mat4,
}

impl<'a> Renderer<'a> {
    pub fn new(device: Arc<dyn GraphicsDevice>, config: RendererConfig) -> Self {
        tracing::info!(
            initial_instance_capacity = config.initial_instance_capacity,
            "Created 2D renderer"
        );
        Self {
            batcher: SpriteBatcher::new(device.clone(), config.initial_instance_capacity),
            device,
            config,
            queue: Vec::new(),
            stats: RenderStats::default(),
            view_projection: Mat4::IDENTITY,
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn device(&self) -> &Arc<dyn GraphicsDevice> {
        &self.device
    }

    /// Register the mesh whose draws may be instanced.
    pub fn set_sprite_quad(&mut self, mesh: &'a Mesh) {
        self.batcher.set_sprite_quad(mesh);
    }

    /// Register the shader whose draws may be instanced.
    pub fn set_instanced_sprite_shader(&mut self, shader: &'a Shader) {
        self.batcher.set_instanced_shader(shader);
    }

    /// Clear the current target.
    pub fn clear(&self, color: Color) {
        self.device.clear(color.to_array());
    }

    /// Clear the current target with the configured clear color.
    pub fn clear_default(&self) {
        self.clear(self.config.clear_color);
    }

    /// Statistics of the current pass, or of the last one once it ended.
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    pub fn batcher(&self) -> &SpriteBatcher<'a> {
        &self.batcher
    }

    /// Open a pass. Statistics and the command queue start empty.
    pub fn begin_pass<'r>(&'r mut self, ctx: PassContext2D<'r, 'a>) -> RenderPassEncoder<'r, 'a> {
        self.stats.reset();
        self.queue.clear();
        self.view_projection = ctx.view_projection;
        self.batcher.begin(ctx.view_projection);

        RenderPassEncoder {
            renderer: self,
            materials: ctx.materials,
        }
    }

    fn flush(&mut self, materials: &MaterialLibrary<'a>) {
        profile_function!();

        if self.queue.is_empty() {
            return;
        }

        self.queue.sort_unstable_by_key(|command| (command.layer, command.key));

        let mut state = RenderStateCache::new();
        let queue = std::mem::take(&mut self.queue);
        for command in &queue {
            let Some(material) = materials.get(command.material).filter(|m| m.shader.is_some())
            else {
                tracing::trace!(
                    material = command.material.raw(),
                    "Dropping command without a drawable material"
                );
                continue;
            };

            if !self.batcher.can_instance(command.mesh, material) {
                self.batcher.flush(&mut state, &mut self.stats);
                self.draw_immediate(command, material, &mut state);
                continue;
            }

            if self.batcher.breaks_batch(command.key, material) {
                self.batcher.flush(&mut state, &mut self.stats);
            }
            self.batcher.submit(
                command.key,
                material,
                &command.model,
                command.tint,
                command.uv_rect,
            );
        }

        self.batcher.flush(&mut state, &mut self.stats);
        self.device.bind_vertex_array(None);

        // Keep the allocation for the next pass.
        self.queue = queue;
        self.queue.clear();
    }

    fn draw_immediate(
        &mut self,
        command: &RenderCommand<'a>,
        material: &Material2D<'a>,
        state: &mut RenderStateCache,
    ) {
        let Some(shader) = material.shader else {
            return;
        };
        let device = self.device.as_ref();

        state.bind_shader(shader, &mut self.stats);

        shader.set_mat4("uMVP", &(self.view_projection * command.model));
        shader.set_vec4("uColor", (material.color * command.tint).to_array());
        shader.set_vec4("uUVRect", command.uv_rect.to_array());

        let texture = material.bound_texture();
        shader.set_int("uUseTex", i32::from(texture.is_some()));
        state.bind_texture(device, texture, &mut self.stats);
        state.bind_vertex_array(device, command.mesh.vertex_array(), &mut self.stats);

        device.draw_arrays(0, command.mesh.vertex_count());
        self.stats.draw_calls += 1;
    }
}

/// An open render pass.
///
/// Holds the renderer mutably, so nothing else can draw until the pass ends.
/// The queued commands are flushed by [`end`](Self::end) or when the encoder
/// is dropped.
pub struct RenderPassEncoder<'r, 'a> {
    renderer: &'r mut Renderer<'a>,
    materials: &'r MaterialLibrary<'a>,
}

impl<'r, 'a> RenderPassEncoder<'r, 'a> {
    /// Queue a packet for drawing.
    ///
    /// Invisible packets, packets without a mesh and packets whose material
    /// does not resolve to one with a shader are ignored.
    pub fn submit(&mut self, packet: &RenderPacket2D<'a>) {
        if !packet.visible {
            return;
        }
        let Some(mesh) = packet.mesh else {
            return;
        };
        let Some(material) = self
            .materials
            .get(packet.material)
            .filter(|m| m.shader.is_some())
        else {
            tracing::trace!(
                material = packet.material.raw(),
                "Ignoring packet without a drawable material"
            );
            return;
        };

        self.renderer.queue.push(RenderCommand {
            mesh,
            model: packet.model,
            material: packet.material,
            layer: packet.layer,
            key: SortKey::for_draw(mesh, material),
            tint: packet.tint,
            uv_rect: packet.uv_rect,
        });
        self.renderer.stats.queued_commands += 1;
    }

    /// Commands queued so far, in submission order.
    pub fn queued(&self) -> &[RenderCommand<'a>] {
        &self.renderer.queue
    }

    pub fn stats(&self) -> &RenderStats {
        &self.renderer.stats
    }

    /// Flush the queue and close the pass.
    pub fn end(self) {
        drop(self);
    }
}

impl Drop for RenderPassEncoder<'_, '_> {
    fn drop(&mut self) {
        self.renderer.flush(self.materials);
    }
}
