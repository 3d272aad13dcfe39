//! The GPU capability consumed by the Argon renderer.
//!
//! `GraphicsDevice` mirrors the small slice of a bind-to-edit graphics API the
//! 2D pipeline needs: programs with named uniforms, textures, dynamic
//! buffers, vertex arrays and two draw calls. Everything the renderer does to
//! the GPU goes through this trait, so binding decisions can be verified
//! against [`MockGraphicsDevice`](crate::MockGraphicsDevice) without a context.

use crate::gpu_types::*;
use wgpu::{BufferDescriptor, TextureDescriptor};

/// Trait abstracting GPU resource creation, binding and drawing.
///
/// # Lifetime Considerations
///
/// Methods take `&self` and return plain `Copy` ids, so the trait is
/// object-safe and a single device can be shared as `Arc<dyn GraphicsDevice>`
/// by every shader, mesh and renderer. Implementations that need to mutate
/// state use interior mutability.
///
/// # Binding Model
///
/// `use_program`, `bind_texture` and `bind_vertex_array` change ambient state
/// that later `set_uniform` and draw calls read. Implementations never skip
/// a redundant bind themselves; deduplication is the caller's job.
///
/// # Example
///
/// ```rust,no_run
/// use argon_test_utils::{GraphicsDevice, ProgramDescriptor};
///
/// fn draw_fullscreen(device: &dyn GraphicsDevice, vs: &str, fs: &str) {
///     let program = device.create_program(&ProgramDescriptor {
///         label: Some("fullscreen"),
///         vertex_source: vs,
///         fragment_source: fs,
///     });
///     device.use_program(program);
///     device.draw_arrays(0, 3);
/// }
/// ```
pub trait GraphicsDevice: Send + Sync {
    // Program operations

    /// Compile and link a program from vertex and fragment sources.
    fn create_program(&self, desc: &ProgramDescriptor) -> ProgramId;

    /// Make `program` the active program.
    fn use_program(&self, program: ProgramId);

    /// Resolve a uniform by name. `None` when the program has no such uniform.
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Upload a value to a uniform of the active program.
    fn set_uniform(&self, location: UniformLocation, value: UniformValue);

    // Texture operations

    /// Create a 2D texture.
    fn create_texture(&self, desc: &TextureDescriptor) -> TextureId;

    /// Upload tightly packed texel data covering the whole texture.
    fn write_texture(&self, texture: TextureId, data: &[u8]);

    /// Bind `texture` to a texture unit, or unbind the unit with `None`.
    fn bind_texture(&self, unit: u32, texture: Option<TextureId>);

    // Buffer operations

    /// Create a buffer. Its storage is allocated with `desc.size` bytes.
    fn create_buffer(&self, desc: &BufferDescriptor) -> BufferId;

    /// Reallocate the whole storage of `buffer` with `size` uninitialized bytes.
    ///
    /// Previous contents are orphaned: draws already queued keep reading the
    /// old storage, so a following write never waits on the GPU.
    fn allocate_buffer(&self, buffer: BufferId, size: u64);

    /// Write `data` into `buffer` at `offset`.
    fn write_buffer(&self, buffer: BufferId, offset: u64, data: &[u8]);

    // Vertex array operations

    /// Create a vertex array from buffer bindings and their layouts.
    fn create_vertex_array(&self, desc: &VertexArrayDescriptor) -> VertexArrayId;

    /// Bind a vertex array, or unbind with `None`.
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>);

    // Drawing

    /// Draw `count` vertices as a triangle list, starting at `first`.
    fn draw_arrays(&self, first: u32, count: u32);

    /// Draw `instances` instances of `count` vertices each.
    fn draw_arrays_instanced(&self, first: u32, count: u32, instances: u32);

    /// Clear the color target.
    fn clear(&self, color: [f32; 4]);
}
