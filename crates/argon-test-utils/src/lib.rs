//! Graphics device abstraction and test utilities for Argon.
//!
//! This crate provides the GPU seam of the Argon 2D renderer together with
//! the infrastructure to test against it without a graphics context.
//!
//! # Overview
//!
//! The main components are:
//!
//! - [`GraphicsDevice`] - Trait abstracting programs, textures, buffers, vertex arrays and draws
//! - GPU id types ([`ProgramId`], [`TextureId`], [`BufferId`], [`VertexArrayId`])
//! - `MockGraphicsDevice` - Recording implementation for tests (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use argon_test_utils::{GraphicsDevice, MockGraphicsDevice};
//!
//! let mock = MockGraphicsDevice::new();
//! mock.draw_arrays_instanced(0, 6, 128);
//!
//! assert_eq!(mock.count_draw_calls(), 1);
//! assert_eq!(mock.instanced_draws(), vec![128]);
//! # }
//! ```
//!
//! # Design Philosophy
//!
//! ## 1. No Lifetimes
//!
//! Devices return plain `Copy` ids, never borrowed handles, so the trait can
//! be shared as `Arc<dyn GraphicsDevice>`.
//!
//! ## 2. Interior Mutability
//!
//! The mock uses a `Mutex` so `&self` methods can record calls.
//!
//! ## 3. Object Safety
//!
//! `GraphicsDevice` is object-safe (`dyn GraphicsDevice`).

pub mod gpu_types;
pub mod graphics_device;
#[cfg(feature = "mock")]
pub mod mock_device;

// Re-export main types at crate root
pub use gpu_types::*;
pub use graphics_device::*;
#[cfg(feature = "mock")]
pub use mock_device::*;
