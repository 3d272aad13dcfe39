//! Mock implementation of GraphicsDevice for testing.
//!
//! The mock hands out ids, keeps the contents of every buffer and records
//! each call so tests can assert on exactly which binds and draws the
//! renderer issued.

use crate::{gpu_types::*, graphics_device::GraphicsDevice};
use parking_lot::Mutex;
use wgpu::{BufferDescriptor, BufferUsages, TextureDescriptor, TextureFormat};

/// Records a device call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateProgram {
        id: ProgramId,
        label: Option<String>,
    },
    UseProgram(ProgramId),
    UniformLocation {
        program: ProgramId,
        name: String,
        found: bool,
    },
    SetUniform {
        program: Option<ProgramId>,
        name: String,
        value: UniformValue,
    },
    CreateTexture {
        id: TextureId,
        width: u32,
        height: u32,
        format: TextureFormat,
    },
    WriteTexture {
        texture: TextureId,
        size: usize,
    },
    BindTexture {
        unit: u32,
        texture: Option<TextureId>,
    },
    CreateBuffer {
        id: BufferId,
        size: u64,
        usage: BufferUsages,
    },
    AllocateBuffer {
        buffer: BufferId,
        size: u64,
    },
    WriteBuffer {
        buffer: BufferId,
        offset: u64,
        size: usize,
    },
    CreateVertexArray {
        id: VertexArrayId,
        buffers: Vec<BufferId>,
    },
    BindVertexArray(Option<VertexArrayId>),
    DrawArrays {
        first: u32,
        count: u32,
    },
    DrawArraysInstanced {
        first: u32,
        count: u32,
        instances: u32,
    },
    Clear([f32; 4]),
}

#[derive(Debug)]
struct MockProgram {
    /// Uniform names declared in either stage.
    uniforms: Vec<String>,
}

#[derive(Debug)]
struct MockUniform {
    program: ProgramId,
    name: String,
}

#[derive(Debug, Default)]
struct MockBuffer {
    size: u64,
    contents: Vec<u8>,
    allocations: usize,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<DeviceCall>,
    programs: Vec<MockProgram>,
    /// Indexed by `UniformLocation`.
    uniforms: Vec<MockUniform>,
    textures: usize,
    buffers: Vec<MockBuffer>,
    vertex_arrays: usize,
    current_program: Option<ProgramId>,
    out_of_bounds_writes: usize,
}

/// Mock implementation of GraphicsDevice for testing.
///
/// # Borrow Checking Pattern: Interior Mutability
///
/// Trait methods take `&self` but need to record calls, so all state sits
/// behind one `parking_lot::Mutex`, which also keeps the mock `Send + Sync`
/// as the trait requires.
///
/// # Uniforms
///
/// A uniform resolves only if it is declared (`uniform <type> <name>;`) in
/// one of the program's sources, matching how a real driver reports inactive
/// or misspelled names.
///
/// # Example
///
/// ```rust
/// use argon_test_utils::{GraphicsDevice, MockGraphicsDevice, ProgramDescriptor};
///
/// let mock = MockGraphicsDevice::new();
/// let program = mock.create_program(&ProgramDescriptor {
///     label: Some("flat"),
///     vertex_source: "uniform mat4 uMVP;",
///     fragment_source: "uniform vec4 uColor;",
/// });
///
/// assert!(mock.uniform_location(program, "uColor").is_some());
/// assert!(mock.uniform_location(program, "uMissing").is_none());
/// ```
pub struct MockGraphicsDevice {
    state: Mutex<MockState>,
}

impl MockGraphicsDevice {
    /// Create a new mock device.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.state.lock().calls.clone()
    }

    /// Clear recorded calls (useful between test steps). Resources are kept.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    fn count(&self, predicate: impl Fn(&DeviceCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    /// Count draw calls of both kinds.
    pub fn count_draw_calls(&self) -> usize {
        self.count(|call| {
            matches!(
                call,
                DeviceCall::DrawArrays { .. } | DeviceCall::DrawArraysInstanced { .. }
            )
        })
    }

    /// Count non-instanced draws.
    pub fn count_immediate_draws(&self) -> usize {
        self.count(|call| matches!(call, DeviceCall::DrawArrays { .. }))
    }

    /// Instance counts of every instanced draw, in call order.
    pub fn instanced_draws(&self) -> Vec<u32> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::DrawArraysInstanced { instances, .. } => Some(*instances),
                _ => None,
            })
            .collect()
    }

    /// Count `use_program` calls.
    pub fn count_program_binds(&self) -> usize {
        self.count(|call| matches!(call, DeviceCall::UseProgram(_)))
    }

    /// Count `bind_texture` calls, including unbinds.
    pub fn count_texture_binds(&self) -> usize {
        self.count(|call| matches!(call, DeviceCall::BindTexture { .. }))
    }

    /// Count `bind_vertex_array` calls that bind an object (unbinds are excluded).
    pub fn count_vertex_array_binds(&self) -> usize {
        self.count(|call| matches!(call, DeviceCall::BindVertexArray(Some(_))))
    }

    /// Count `uniform_location` queries.
    pub fn count_uniform_queries(&self) -> usize {
        self.count(|call| matches!(call, DeviceCall::UniformLocation { .. }))
    }

    /// Count buffer creations.
    pub fn count_buffer_creates(&self) -> usize {
        self.count(|call| matches!(call, DeviceCall::CreateBuffer { .. }))
    }

    /// Every value uploaded to uniforms named `name`, in call order.
    pub fn uniform_uploads(&self, name: &str) -> Vec<UniformValue> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::SetUniform {
                    name: uniform,
                    value,
                    ..
                } if uniform == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// The program made current by the last `use_program`.
    pub fn current_program(&self) -> Option<ProgramId> {
        self.state.lock().current_program
    }

    /// Current contents of a buffer.
    pub fn buffer_contents(&self, buffer: BufferId) -> Vec<u8> {
        self.state
            .lock()
            .buffers
            .get(buffer.raw() as usize - 1)
            .map(|b| b.contents.clone())
            .unwrap_or_default()
    }

    /// Current storage size of a buffer in bytes.
    pub fn buffer_size(&self, buffer: BufferId) -> u64 {
        self.state
            .lock()
            .buffers
            .get(buffer.raw() as usize - 1)
            .map(|b| b.size)
            .unwrap_or(0)
    }

    /// How many times a buffer's storage was (re)allocated, creation included.
    pub fn buffer_allocations(&self, buffer: BufferId) -> usize {
        self.state
            .lock()
            .buffers
            .get(buffer.raw() as usize - 1)
            .map(|b| b.allocations)
            .unwrap_or(0)
    }

    /// Writes that extended past the end of a buffer's storage.
    pub fn out_of_bounds_writes(&self) -> usize {
        self.state.lock().out_of_bounds_writes
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

fn declared_uniforms(source: &str) -> impl Iterator<Item = String> + '_ {
    source.lines().filter_map(|line| {
        let declaration = line.trim().strip_prefix("uniform ")?;
        let declaration = declaration.split(';').next()?;
        let name = declaration.split_whitespace().last()?;
        let name = name.split('[').next().unwrap_or(name);
        Some(name.to_string())
    })
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_program(&self, desc: &ProgramDescriptor) -> ProgramId {
        let mut state = self.state.lock();
        let uniforms = declared_uniforms(desc.vertex_source)
            .chain(declared_uniforms(desc.fragment_source))
            .collect();
        state.programs.push(MockProgram { uniforms });

        let id = ProgramId::new(state.programs.len() as u32).expect("program ids start at 1");
        state.calls.push(DeviceCall::CreateProgram {
            id,
            label: desc.label.map(|s| s.to_string()),
        });
        id
    }

    fn use_program(&self, program: ProgramId) {
        let mut state = self.state.lock();
        state.current_program = Some(program);
        state.calls.push(DeviceCall::UseProgram(program));
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let mut state = self.state.lock();
        let declared = state
            .programs
            .get(program.raw() as usize - 1)
            .is_some_and(|p| p.uniforms.iter().any(|u| u == name));

        state.calls.push(DeviceCall::UniformLocation {
            program,
            name: name.to_string(),
            found: declared,
        });

        if !declared {
            return None;
        }

        let existing = state
            .uniforms
            .iter()
            .position(|u| u.program == program && u.name == name);
        let index = match existing {
            Some(index) => index,
            None => {
                state.uniforms.push(MockUniform {
                    program,
                    name: name.to_string(),
                });
                state.uniforms.len() - 1
            }
        };
        Some(UniformLocation(index as u32))
    }

    fn set_uniform(&self, location: UniformLocation, value: UniformValue) {
        let mut state = self.state.lock();
        let name = state
            .uniforms
            .get(location.0 as usize)
            .map(|u| u.name.clone())
            .unwrap_or_default();
        let program = state.current_program;
        state.calls.push(DeviceCall::SetUniform {
            program,
            name,
            value,
        });
    }

    fn create_texture(&self, desc: &TextureDescriptor) -> TextureId {
        let mut state = self.state.lock();
        state.textures += 1;
        let id = TextureId::new(state.textures as u32).expect("texture ids start at 1");
        state.calls.push(DeviceCall::CreateTexture {
            id,
            width: desc.size.width,
            height: desc.size.height,
            format: desc.format,
        });
        id
    }

    fn write_texture(&self, texture: TextureId, data: &[u8]) {
        self.state.lock().calls.push(DeviceCall::WriteTexture {
            texture,
            size: data.len(),
        });
    }

    fn bind_texture(&self, unit: u32, texture: Option<TextureId>) {
        self.state
            .lock()
            .calls
            .push(DeviceCall::BindTexture { unit, texture });
    }

    fn create_buffer(&self, desc: &BufferDescriptor) -> BufferId {
        let mut state = self.state.lock();
        state.buffers.push(MockBuffer {
            size: desc.size,
            contents: vec![0; desc.size as usize],
            allocations: 1,
        });
        let id = BufferId::new(state.buffers.len() as u32).expect("buffer ids start at 1");
        state.calls.push(DeviceCall::CreateBuffer {
            id,
            size: desc.size,
            usage: desc.usage,
        });
        id
    }

    fn allocate_buffer(&self, buffer: BufferId, size: u64) {
        let mut state = self.state.lock();
        if let Some(b) = state.buffers.get_mut(buffer.raw() as usize - 1) {
            b.size = size;
            b.contents = vec![0; size as usize];
            b.allocations += 1;
        }
        state.calls.push(DeviceCall::AllocateBuffer { buffer, size });
    }

    fn write_buffer(&self, buffer: BufferId, offset: u64, data: &[u8]) {
        let mut state = self.state.lock();
        let mut overflow = false;
        if let Some(b) = state.buffers.get_mut(buffer.raw() as usize - 1) {
            let start = offset as usize;
            let end = start + data.len();
            if end as u64 > b.size {
                overflow = true;
                b.contents.resize(end, 0);
            }
            b.contents[start..end].copy_from_slice(data);
        }
        if overflow {
            state.out_of_bounds_writes += 1;
        }
        state.calls.push(DeviceCall::WriteBuffer {
            buffer,
            offset,
            size: data.len(),
        });
    }

    fn create_vertex_array(&self, desc: &VertexArrayDescriptor) -> VertexArrayId {
        let mut state = self.state.lock();
        state.vertex_arrays += 1;
        let id =
            VertexArrayId::new(state.vertex_arrays as u32).expect("vertex array ids start at 1");
        state.calls.push(DeviceCall::CreateVertexArray {
            id,
            buffers: desc.buffers.iter().map(|binding| binding.buffer).collect(),
        });
        id
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>) {
        self.state
            .lock()
            .calls
            .push(DeviceCall::BindVertexArray(vertex_array));
    }

    fn draw_arrays(&self, first: u32, count: u32) {
        self.state
            .lock()
            .calls
            .push(DeviceCall::DrawArrays { first, count });
    }

    fn draw_arrays_instanced(&self, first: u32, count: u32, instances: u32) {
        self.state.lock().calls.push(DeviceCall::DrawArraysInstanced {
            first,
            count,
            instances,
        });
    }

    fn clear(&self, color: [f32; 4]) {
        self.state.lock().calls.push(DeviceCall::Clear(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(mock: &MockGraphicsDevice) -> ProgramId {
        mock.create_program(&ProgramDescriptor {
            label: Some("test"),
            vertex_source: "uniform mat4 uMVP;\nuniform vec4 uUVRect; // (u0,v0,u1,v1)",
            fragment_source: "uniform sampler2D uTex;\nuniform vec4 uColor;",
        })
    }

    #[test]
    fn test_declared_uniforms_resolve() {
        let mock = MockGraphicsDevice::new();
        let program = program(&mock);

        assert!(mock.uniform_location(program, "uMVP").is_some());
        assert!(mock.uniform_location(program, "uUVRect").is_some());
        assert!(mock.uniform_location(program, "uTex").is_some());
        assert!(mock.uniform_location(program, "uNope").is_none());
        assert_eq!(mock.count_uniform_queries(), 4);
    }

    #[test]
    fn test_same_uniform_same_location() {
        let mock = MockGraphicsDevice::new();
        let program = program(&mock);

        let a = mock.uniform_location(program, "uColor");
        let b = mock.uniform_location(program, "uColor");
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_uniform_records_name() {
        let mock = MockGraphicsDevice::new();
        let program = program(&mock);
        mock.use_program(program);

        let location = mock.uniform_location(program, "uColor").unwrap();
        mock.set_uniform(location, UniformValue::Vec4([1.0, 0.0, 0.0, 1.0]));

        assert_eq!(
            mock.uniform_uploads("uColor"),
            vec![UniformValue::Vec4([1.0, 0.0, 0.0, 1.0])]
        );
    }

    #[test]
    fn test_buffer_orphan_and_write() {
        let mock = MockGraphicsDevice::new();
        let buffer = mock.create_buffer(&BufferDescriptor {
            label: Some("instances"),
            size: 8,
            usage: BufferUsages::VERTEX,
            mapped_at_creation: false,
        });

        mock.write_buffer(buffer, 0, &[1, 2, 3, 4]);
        mock.allocate_buffer(buffer, 16);
        assert_eq!(mock.buffer_contents(buffer), vec![0; 16]);

        mock.write_buffer(buffer, 4, &[9, 9]);
        assert_eq!(mock.buffer_size(buffer), 16);
        assert_eq!(mock.buffer_allocations(buffer), 2);
        assert_eq!(&mock.buffer_contents(buffer)[4..6], &[9, 9]);
        assert_eq!(mock.out_of_bounds_writes(), 0);
    }

    #[test]
    fn test_out_of_bounds_write_is_flagged() {
        let mock = MockGraphicsDevice::new();
        let buffer = mock.create_buffer(&BufferDescriptor {
            label: None,
            size: 4,
            usage: BufferUsages::VERTEX,
            mapped_at_creation: false,
        });

        mock.write_buffer(buffer, 2, &[0; 4]);
        assert_eq!(mock.out_of_bounds_writes(), 1);
    }

    #[test]
    fn test_clear_calls() {
        let mock = MockGraphicsDevice::new();
        mock.draw_arrays(0, 3);
        mock.draw_arrays_instanced(0, 6, 10);

        assert_eq!(mock.count_draw_calls(), 2);
        assert_eq!(mock.instanced_draws(), vec![10]);

        mock.clear_calls();
        assert_eq!(mock.call_count(), 0);
    }
}
