//! Argon Core
//!
//! Shared building blocks for the Argon 2D renderer: logging and profiling
//! setup, engine configuration, math re-exports and small geometry helpers.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
