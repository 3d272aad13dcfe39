//! Argon Scene - entities, cameras and visibility for the 2D renderer
//!
//! The scene is plain data: a list of [`Entity`] values, each with a
//! [`Transform2D`] and a [`Renderable2D`]. [`RenderSystem2D`] culls them
//! against a [`Camera2D`] and produces render packets, either into a buffer
//! or straight into an open pass. [`VisibleWorld2D`] packages a scene and a
//! camera as the world source of a render pipeline.

mod camera;
mod entity;
mod render_system;
mod transform;

pub use camera::*;
pub use entity::*;
pub use render_system::*;
pub use transform::*;
