//! Identifiers and plain-data types exchanged with a [`GraphicsDevice`].
//!
//! Every object id is a non-zero `u32`, the same convention OpenGL uses for
//! object names. Zero is left free so callers can use it as "nothing bound".
//!
//! [`GraphicsDevice`]: crate::GraphicsDevice

use std::num::NonZeroU32;

macro_rules! gpu_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Wrap a raw id. Returns `None` for zero.
            pub const fn new(raw: u32) -> Option<Self> {
                match NonZeroU32::new(raw) {
                    Some(id) => Some(Self(id)),
                    None => None,
                }
            }

            /// The raw, always non-zero, id.
            pub const fn raw(self) -> u32 {
                self.0.get()
            }
        }
    };
}

gpu_id!(
    /// A linked shader program.
    ProgramId
);
gpu_id!(
    /// A 2D texture object.
    TextureId
);
gpu_id!(
    /// A GPU buffer object (vertex or instance data).
    BufferId
);
gpu_id!(
    /// A vertex array object: buffer bindings plus attribute layout.
    VertexArrayId
);

/// Location of a resolved uniform inside a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// A value uploaded to a uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec4([f32; 4]),
    /// Column-major 4x4 matrix.
    Mat4([f32; 16]),
}

/// Sources for a shader program.
#[derive(Debug, Clone, Copy)]
pub struct ProgramDescriptor<'a> {
    pub label: Option<&'a str>,
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
}

/// One buffer bound into a vertex array, with its attribute layout.
#[derive(Debug, Clone)]
pub struct VertexBufferBinding<'a> {
    pub buffer: BufferId,
    pub layout: wgpu::VertexBufferLayout<'a>,
}

/// Describes a vertex array object.
#[derive(Debug, Clone)]
pub struct VertexArrayDescriptor<'a> {
    pub label: Option<&'a str>,
    pub buffers: &'a [VertexBufferBinding<'a>],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_id_is_rejected() {
        assert!(ProgramId::new(0).is_none());
        assert!(TextureId::new(0).is_none());
    }

    #[test]
    fn test_raw_round_trip() {
        let id = VertexArrayId::new(7).unwrap();
        assert_eq!(id.raw(), 7);
    }
}
