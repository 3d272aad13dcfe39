//! Multi-pass frame orchestration.
//!
//! A frame runs a fixed list of passes. World passes draw the scene; overlay
//! passes draw on top of it and only see the statistics of what came before.
//!
//! How world passes get their drawables depends on the pass list:
//!
//! - [`FrameMode::Direct`]: a single world pass and nobody else interested in
//!   the packets. The world source submits straight into the pass.
//! - [`FrameMode::Record`]: the visible packets are built once into a buffer
//!   owned by the pipeline, then replayed by every world pass.

use argon_core::profiling::{profile_function, profile_scope};
use glam::Mat4;

use crate::{
    MaterialLibrary, PassContext2D, RenderPacket2D, RenderPassEncoder, RenderStats, Renderer,
};

/// How world passes receive their drawables this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    /// The world source submits straight into the pass.
    Direct,
    /// Packets are materialized once and shared by every world pass.
    Record,
}

/// Produces the drawables of a frame.
pub trait WorldSource2D<'a> {
    /// Replace the contents of `out` with the packets of every visible drawable.
    fn build_packets(&self, out: &mut Vec<RenderPacket2D<'a>>);

    /// Submit every visible drawable into `pass`.
    fn submit_visible(&self, pass: &mut RenderPassEncoder<'_, 'a>);
}

/// Per-frame input to [`RenderPipeline2D::execute`].
pub struct RenderFrame2D<'f, 'a> {
    pub view_projection: Mat4,
    pub materials: &'f MaterialLibrary<'a>,
    pub world: &'f dyn WorldSource2D<'a>,
}

/// A pass that draws the world.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldPass2D {
    needs_packets: bool,
}

impl WorldPass2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// A world pass that also consumes the recorded packets, which forces
    /// [`FrameMode::Record`].
    pub fn with_packets() -> Self {
        Self {
            needs_packets: true,
        }
    }

    fn execute<'a>(
        &self,
        frame: &RenderFrame2D<'_, 'a>,
        mode: FrameMode,
        packets: &[RenderPacket2D<'a>],
        renderer: &mut Renderer<'a>,
    ) {
        let mut pass = renderer.begin_pass(PassContext2D {
            view_projection: frame.view_projection,
            materials: frame.materials,
        });

        match mode {
            FrameMode::Direct => frame.world.submit_visible(&mut pass),
            FrameMode::Record => {
                for packet in packets.iter().filter(|p| p.visible) {
                    pass.submit(packet);
                }
            }
        }

        pass.end();
    }
}

/// A pass drawn after the world that needs nothing from it.
///
/// The hook receives the statistics of the most recent render pass; this is
/// where a debug overlay plugs in.
pub struct OverlayPass2D<'a> {
    hook: Box<dyn FnMut(&RenderStats) + 'a>,
}

impl<'a> OverlayPass2D<'a> {
    pub fn new(hook: impl FnMut(&RenderStats) + 'a) -> Self {
        Self {
            hook: Box::new(hook),
        }
    }
}

impl std::fmt::Debug for OverlayPass2D<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayPass2D").finish_non_exhaustive()
    }
}

/// A pass in a [`RenderPipeline2D`].
#[derive(Debug)]
pub enum RenderPass2D<'a> {
    World(WorldPass2D),
    Overlay(OverlayPass2D<'a>),
}

impl<'a> RenderPass2D<'a> {
    pub fn needs_world(&self) -> bool {
        matches!(self, RenderPass2D::World(_))
    }

    pub fn needs_world_packets(&self) -> bool {
        match self {
            RenderPass2D::World(pass) => pass.needs_packets,
            RenderPass2D::Overlay(_) => false,
        }
    }

    fn execute(
        &mut self,
        frame: &RenderFrame2D<'_, 'a>,
        mode: FrameMode,
        packets: &[RenderPacket2D<'a>],
        renderer: &mut Renderer<'a>,
    ) {
        match self {
            RenderPass2D::World(pass) => pass.execute(frame, mode, packets, renderer),
            RenderPass2D::Overlay(pass) => (pass.hook)(renderer.stats()),
        }
    }
}

impl From<WorldPass2D> for RenderPass2D<'_> {
    fn from(pass: WorldPass2D) -> Self {
        RenderPass2D::World(pass)
    }
}

impl<'a> From<OverlayPass2D<'a>> for RenderPass2D<'a> {
    fn from(pass: OverlayPass2D<'a>) -> Self {
        RenderPass2D::Overlay(pass)
    }
}

/// Ordered list of passes run every frame.
///
/// ```
/// use argon_render::{FrameMode, OverlayPass2D, RenderPipeline2D, WorldPass2D};
///
/// let mut pipeline = RenderPipeline2D::new();
/// pipeline.add_pass(WorldPass2D::new());
/// pipeline.add_pass(OverlayPass2D::new(|_stats| {}));
/// assert_eq!(pipeline.select_mode(), FrameMode::Direct);
///
/// pipeline.add_pass(WorldPass2D::new());
/// assert_eq!(pipeline.select_mode(), FrameMode::Record);
/// ```
#[derive(Debug, Default)]
pub struct RenderPipeline2D<'a> {
    passes: Vec<RenderPass2D<'a>>,
    /// Reused across frames.
    packets: Vec<RenderPacket2D<'a>>,
    last_mode: Option<FrameMode>,
}

impl<'a> RenderPipeline2D<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pass. Passes run in the order they were added.
    pub fn add_pass(&mut self, pass: impl Into<RenderPass2D<'a>>) -> &mut Self {
        self.passes.push(pass.into());
        self
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn passes(&self) -> &[RenderPass2D<'a>] {
        &self.passes
    }

    /// Record when any pass consumes packets or more than one pass draws the world.
    pub fn select_mode(&self) -> FrameMode {
        let world_passes = self.passes.iter().filter(|p| p.needs_world()).count();
        let packet_consumers = self.passes.iter().filter(|p| p.needs_world_packets()).count();

        if packet_consumers > 0 || world_passes >= 2 {
            FrameMode::Record
        } else {
            FrameMode::Direct
        }
    }

    /// Packets recorded by the last frame that ran in [`FrameMode::Record`].
    pub fn packets(&self) -> &[RenderPacket2D<'a>] {
        &self.packets
    }

    /// Run every pass for one frame.
    pub fn execute(
        &mut self,
        frame: &RenderFrame2D<'_, 'a>,
        renderer: &mut Renderer<'a>,
    ) -> FrameMode {
        profile_function!();

        let mode = self.select_mode();
        if self.last_mode != Some(mode) {
            tracing::debug!(?mode, passes = self.passes.len(), "Render pipeline mode changed");
            self.last_mode = Some(mode);
        }

        self.packets.clear();
        if mode == FrameMode::Record {
            profile_scope!("build_packets");
            frame.world.build_packets(&mut self.packets);
        }

        for pass in &mut self.passes {
            pass.execute(frame, mode, &self.packets, renderer);
        }

        mode
    }
}
