//! Argon - a 2D draw-command pipeline
//!
//! This facade re-exports the Argon crates behind feature flags:
//!
//! - `render` (default): materials, atlases, the sorted command queue and the
//!   instanced sprite batcher
//! - `scene` (default): entities, cameras and visibility culling
//! - `mock`: [`device::MockGraphicsDevice`], an in-memory recording device
//!
//! ```
//! # #[cfg(feature = "scene")]
//! # {
//! use std::sync::Arc;
//! use argon::prelude::*;
//! use argon::device::{GraphicsDevice, MockGraphicsDevice};
//!
//! let device: Arc<dyn GraphicsDevice> = Arc::new(MockGraphicsDevice::new());
//! let quad = Mesh::quad(&device);
//! let shader = Shader::basic(device.clone());
//!
//! let mut materials = MaterialLibrary::new();
//! let blue = materials.add(Material2D::flat(&shader, Color::BLUE));
//!
//! let mut scene = Scene::new();
//! scene.spawn(Entity {
//!     renderable: Renderable2D::new(&quad, blue),
//!     ..Default::default()
//! });
//!
//! let camera = Camera2D::default();
//! let system = RenderSystem2D::new();
//! let world = VisibleWorld2D::new(system, &scene, &camera, 1.0);
//!
//! let mut renderer = Renderer::new(device.clone(), RendererConfig::default());
//! let mut pipeline = RenderPipeline2D::new();
//! pipeline.add_pass(WorldPass2D::new());
//!
//! let frame = RenderFrame2D {
//!     view_projection: camera.view_projection(1.0),
//!     materials: &materials,
//!     world: &world,
//! };
//! assert_eq!(pipeline.execute(&frame, &mut renderer), FrameMode::Direct);
//! assert_eq!(renderer.stats().draw_calls, 1);
//! # }
//! ```

pub use argon_core as core;
pub use argon_core::math;
pub use argon_test_utils as device;

#[cfg(feature = "render")]
pub use argon_render as render;

#[cfg(feature = "scene")]
pub use argon_scene as scene;

/// Install logging and profiling from `config`.
///
/// Returns the configuration so it can be kept alongside the renderer.
pub fn init(config: argon_core::config::Config) -> argon_core::config::Config {
    config.apply();
    tracing::info!(
        benchmark = ?config.benchmark,
        "Argon {} initialized",
        env!("CARGO_PKG_VERSION")
    );
    config
}

pub mod prelude {
    pub use argon_core::config::{BenchmarkMode, Config};
    pub use argon_core::geometry::{Aabb2, Rect};
    pub use argon_core::math::{Mat4, Vec2, Vec3, Vec4};

    #[cfg(feature = "render")]
    pub use argon_render::{
        Color, FrameMode, Material2D, MaterialHandle, MaterialLibrary, Mesh, OverlayPass2D,
        PassContext2D, RenderFrame2D, RenderPacket2D, RenderPass2D, RenderPassEncoder,
        RenderPipeline2D, RenderStats, Renderer, RendererConfig, Shader, Texture2D,
        TextureAtlas, UvRect, WorldPass2D, WorldSource2D,
    };

    #[cfg(feature = "scene")]
    pub use argon_scene::{
        Camera2D, Entity, RenderSystem2D, Renderable2D, Scene, Transform2D, VisibleWorld2D,
    };
}
