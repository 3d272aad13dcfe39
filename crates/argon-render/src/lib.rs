//! Argon Render - 2D draw-command pipeline
//!
//! This crate provides:
//! - A render-command queue sorted by layer and a packed 64-bit sort key
//! - Handle-indexed materials ([`MaterialLibrary`])
//! - GPU-instanced sprite batching with a growable instance buffer
//! - Sprite atlases mapping named pixel rectangles to UVs
//! - A multi-pass frame pipeline that records packets only when needed
//!
//! All GPU work goes through [`argon_test_utils::GraphicsDevice`], so the
//! whole pipeline runs against `MockGraphicsDevice` in tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use argon_render::*;
//! use argon_test_utils::{GraphicsDevice, MockGraphicsDevice};
//!
//! let device: Arc<dyn GraphicsDevice> = Arc::new(MockGraphicsDevice::new());
//! let quad = Mesh::quad(&device);
//! let shader = Shader::basic(device.clone());
//!
//! let mut materials = MaterialLibrary::new();
//! let red = materials.add(Material2D::flat(&shader, Color::RED));
//!
//! let mut renderer = Renderer::new(device.clone(), RendererConfig::default());
//! let mut pass = renderer.begin_pass(PassContext2D {
//!     view_projection: glam::Mat4::IDENTITY,
//!     materials: &materials,
//! });
//! pass.submit(&RenderPacket2D::new(&quad, red, glam::Mat4::IDENTITY));
//! pass.end();
//!
//! assert_eq!(renderer.stats().draw_calls, 1);
//! ```

// Resources
mod color;
mod mesh;
mod shader;
mod texture;

// Materials and sprites
mod atlas;
mod material;

// Draw submission
mod batcher;
mod packet;
mod renderer;
mod sort_key;
mod state_cache;
mod stats;

// Frame orchestration
mod pipeline;

pub use atlas::*;
pub use batcher::*;
pub use color::*;
pub use material::*;
pub use mesh::*;
pub use packet::*;
pub use pipeline::*;
pub use renderer::*;
pub use shader::*;
pub use sort_key::*;
pub use state_cache::*;
pub use stats::*;
pub use texture::*;

pub use glam;
