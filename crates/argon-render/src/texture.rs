//! 2D textures. Decoding image files is left to the application; a texture
//! is created from already decoded RGBA8 texels.

use std::sync::Arc;

use argon_test_utils::{GraphicsDevice, TextureId};

/// An RGBA8 texture.
pub struct Texture2D {
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture2D {
    /// Create an uninitialized texture.
    pub fn new(device: &Arc<dyn GraphicsDevice>, width: u32, height: u32) -> Self {
        let id = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("texture_2d"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        Self { id, width, height }
    }

    /// Create a texture and upload tightly packed RGBA8 texels.
    pub fn from_rgba8(
        device: &Arc<dyn GraphicsDevice>,
        width: u32,
        height: u32,
        texels: &[u8],
    ) -> Self {
        let texture = Self::new(device, width, height);
        let expected = width as usize * height as usize * 4;
        if texels.len() != expected {
            tracing::warn!(
                width,
                height,
                len = texels.len(),
                "Texel data does not match texture size; upload skipped"
            );
        } else {
            device.write_texture(texture.id, texels);
        }
        texture
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl std::fmt::Debug for Texture2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture2D")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
