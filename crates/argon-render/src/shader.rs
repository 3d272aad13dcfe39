//! Shader programs with a lazily populated uniform-location cache.

use std::sync::Arc;

use argon_core::alloc::HashMap;
use argon_test_utils::{GraphicsDevice, ProgramDescriptor, ProgramId, UniformLocation, UniformValue};
use glam::Mat4;
use parking_lot::Mutex;

/// GLSL sources of the single-draw sprite program.
pub const BASIC_VERTEX_SOURCE: &str = include_str!("../shaders/basic.vert");
pub const BASIC_FRAGMENT_SOURCE: &str = include_str!("../shaders/basic.frag");

/// GLSL sources of the instanced sprite program.
pub const INSTANCED_VERTEX_SOURCE: &str = include_str!("../shaders/instanced.vert");
pub const INSTANCED_FRAGMENT_SOURCE: &str = include_str!("../shaders/instanced.frag");

#[derive(Default)]
struct UniformCache {
    /// Misses are cached as `None` so absent names are only queried once.
    locations: HashMap<String, Option<UniformLocation>>,
    lookups: u64,
    queries: u64,
}

/// A linked shader program.
///
/// Uniforms are addressed by name. The first lookup of a name asks the device
/// and the answer, found or not, is kept for the lifetime of the shader. The
/// `set_*` methods upload to the currently bound program and do nothing when
/// the name does not resolve.
///
/// ```
/// use std::sync::Arc;
/// use argon_render::Shader;
/// use argon_test_utils::MockGraphicsDevice;
///
/// let device = Arc::new(MockGraphicsDevice::new());
/// let shader = Shader::basic(device.clone());
/// shader.bind();
/// shader.set_int("uUseTex", 0);
/// shader.set_int("uUseTex", 1);
///
/// assert_eq!(shader.uniform_lookups(), 2);
/// assert_eq!(shader.uniform_queries(), 1);
/// ```
pub struct Shader {
    device: Arc<dyn GraphicsDevice>,
    program: ProgramId,
    cache: Mutex<UniformCache>,
}

impl Shader {
    pub fn new(device: Arc<dyn GraphicsDevice>, desc: &ProgramDescriptor) -> Self {
        let program = device.create_program(desc);
        tracing::debug!(label = ?desc.label, program = program.raw(), "Created shader program");
        Self {
            device,
            program,
            cache: Mutex::new(UniformCache::default()),
        }
    }

    /// The built-in program for single, non-instanced sprite draws.
    pub fn basic(device: Arc<dyn GraphicsDevice>) -> Self {
        Self::new(
            device,
            &ProgramDescriptor {
                label: Some("sprite_basic"),
                vertex_source: BASIC_VERTEX_SOURCE,
                fragment_source: BASIC_FRAGMENT_SOURCE,
            },
        )
    }

    /// The built-in program for instanced sprite batches.
    pub fn instanced(device: Arc<dyn GraphicsDevice>) -> Self {
        Self::new(
            device,
            &ProgramDescriptor {
                label: Some("sprite_instanced"),
                vertex_source: INSTANCED_VERTEX_SOURCE,
                fragment_source: INSTANCED_FRAGMENT_SOURCE,
            },
        )
    }

    pub fn program(&self) -> ProgramId {
        self.program
    }

    /// Make this the active program. Callers deduplicate through the state cache.
    pub fn bind(&self) {
        self.device.use_program(self.program);
    }

    /// Resolve a uniform, consulting the device only on the first lookup of `name`.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        let mut cache = self.cache.lock();
        cache.lookups += 1;
        if let Some(location) = cache.locations.get(name) {
            return *location;
        }

        cache.queries += 1;
        let location = self.device.uniform_location(self.program, name);
        cache.locations.insert(name.to_owned(), location);
        location
    }

    fn set(&self, name: &str, value: UniformValue) {
        if let Some(location) = self.uniform_location(name) {
            self.device.set_uniform(location, value);
        }
    }

    pub fn set_int(&self, name: &str, value: i32) {
        self.set(name, UniformValue::Int(value));
    }

    pub fn set_float(&self, name: &str, value: f32) {
        self.set(name, UniformValue::Float(value));
    }

    pub fn set_vec4(&self, name: &str, value: [f32; 4]) {
        self.set(name, UniformValue::Vec4(value));
    }

    pub fn set_mat4(&self, name: &str, value: &Mat4) {
        self.set(name, UniformValue::Mat4(value.to_cols_array()));
    }

    /// Total uniform lookups, cached or not.
    pub fn uniform_lookups(&self) -> u64 {
        self.cache.lock().lookups
    }

    /// Lookups that had to ask the device.
    pub fn uniform_queries(&self) -> u64 {
        self.cache.lock().queries
    }

    /// Number of names in the location cache, misses included.
    pub fn cached_uniforms(&self) -> usize {
        self.cache.lock().locations.len()
    }
}

impl std::fmt::Debug for Shader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shader")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon_test_utils::{DeviceCall, MockGraphicsDevice};

    #[test]
    fn test_missing_uniform_is_cached() {
        let device = Arc::new(MockGraphicsDevice::new());
        let shader = Shader::basic(device.clone());

        assert!(shader.uniform_location("uDoesNotExist").is_none());
        assert!(shader.uniform_location("uDoesNotExist").is_none());

        assert_eq!(shader.uniform_lookups(), 2);
        assert_eq!(shader.uniform_queries(), 1);
        assert_eq!(device.count_uniform_queries(), 1);
    }

    #[test]
    fn test_set_unknown_uniform_is_silent() {
        let device = Arc::new(MockGraphicsDevice::new());
        let shader = Shader::basic(device.clone());
        shader.bind();
        device.clear_calls();

        shader.set_float("uTime", 1.0);

        assert!(
            !device
                .calls()
                .iter()
                .any(|call| matches!(call, DeviceCall::SetUniform { .. }))
        );
    }

    #[test]
    fn test_instanced_program_declares_pv() {
        let device = Arc::new(MockGraphicsDevice::new());
        let shader = Shader::instanced(device.clone());

        assert!(shader.uniform_location("uPV").is_some());
        assert!(shader.uniform_location("uMVP").is_none());
        assert_eq!(shader.cached_uniforms(), 2);
    }

    #[test]
    fn test_set_mat4_uploads_columns() {
        let device = Arc::new(MockGraphicsDevice::new());
        let shader = Shader::basic(device.clone());
        shader.bind();

        let m = Mat4::from_translation(glam::Vec3::new(2.0, 3.0, 0.0));
        shader.set_mat4("uMVP", &m);

        assert_eq!(
            device.uniform_uploads("uMVP"),
            vec![UniformValue::Mat4(m.to_cols_array())]
        );
    }
}
