use std::fmt;

/// Counters for one render pass, reset when the pass begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Commands accepted by `submit`.
    pub queued_commands: u32,
    /// Draw calls issued, instanced or not.
    pub draw_calls: u32,
    pub shader_binds: u32,
    /// Texture binds, including unbinds.
    pub texture_binds: u32,
    pub vertex_array_binds: u32,
    /// Instanced batches drawn.
    pub batch_flushes: u32,
    /// Vertices drawn through instancing (six per sprite).
    pub batched_vertices: u32,
    pub batched_sprites: u32,
}

impl RenderStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "queued: {}, draws: {}, shader binds: {}, texture binds: {}, ",
            self.queued_commands, self.draw_calls, self.shader_binds, self.texture_binds,
        )?;
        write!(
            f,
            "vao binds: {}, batches: {} ({} sprites)",
            self.vertex_array_binds, self.batch_flushes, self.batched_sprites,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_summary() {
        let stats = RenderStats {
            queued_commands: 12,
            draw_calls: 3,
            shader_binds: 2,
            texture_binds: 1,
            vertex_array_binds: 2,
            batch_flushes: 1,
            batched_vertices: 60,
            batched_sprites: 10,
        };
        assert_eq!(
            stats.to_string(),
            "queued: 12, draws: 3, shader binds: 2, texture binds: 1, \
             vao binds: 2, batches: 1 (10 sprites)"
        );
    }

    #[test]
    fn test_reset_zeroes_counters() {
        let mut stats = RenderStats {
            draw_calls: 4,
            ..Default::default()
        };
        stats.reset();
        assert_eq!(stats, RenderStats::default());
    }
}
