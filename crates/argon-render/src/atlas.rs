//! Sprite atlas: named pixel rectangles inside one texture, mapped to UVs.
//!
//! Atlas description files are plain text, one sprite per line:
//!
//! ```text
//! # name   x   y   w   h
//! player   0   0  32  32
//! coin    32   0  16  16
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Malformed lines are
//! skipped without failing the load.
//!
//! # Example
//!
//! ```
//! use argon_render::{TextureAtlas, UvRect};
//!
//! let mut atlas = TextureAtlas::new(100, 100);
//! atlas.load_from_str("box 10 20 30 40\n");
//!
//! let id = atlas.get_id("box");
//! assert_eq!(id, 1);
//! assert_eq!(
//!     atlas.uv_rect(id),
//!     UvRect::new(10.5 / 100.0, 20.5 / 100.0, 39.5 / 100.0, 59.5 / 100.0)
//! );
//! assert_eq!(atlas.get_id("missing"), 0);
//! ```

use std::{fmt, path::Path, path::PathBuf};

use argon_core::alloc::HashMap;
use argon_core::geometry::Rect;

/// Normalized texture rectangle `(u0, v0)`–`(u1, v1)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UvRect {
    /// U coordinate of the left edge
    pub u0: f32,
    /// V coordinate of the bottom edge
    pub v0: f32,
    /// U coordinate of the right edge
    pub u1: f32,
    /// V coordinate of the top edge
    pub v1: f32,
}

impl UvRect {
    /// The whole texture.
    pub const FULL: UvRect = UvRect::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        Self { u0, v0, u1, v1 }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.u0, self.v0, self.u1, self.v1]
    }
}

impl Default for UvRect {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<UvRect> for [f32; 4] {
    fn from(uv: UvRect) -> Self {
        uv.to_array()
    }
}

/// Error loading an atlas description.
#[derive(Debug)]
pub enum AtlasError {
    /// The description file does not exist.
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The description file could not be read.
    Io {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasError::NotFound { path } => {
                write!(f, "Atlas description not found: {}", path.display())
            }
            AtlasError::Io { path, source } => {
                write!(f, "IO error loading atlas '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for AtlasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AtlasError::Io { source, .. } => Some(source),
            AtlasError::NotFound { .. } => None,
        }
    }
}

/// Outcome of one atlas load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AtlasLoadSummary {
    /// Lines accepted, including updates of known names.
    pub loaded: usize,
    /// Names seen for the first time.
    pub added: usize,
    /// Lines rejected as malformed or empty-sized.
    pub skipped: usize,
}

#[derive(Debug, Clone)]
struct AtlasSprite {
    name: String,
    rect: Rect<i32>,
    uv: UvRect,
}

/// Name → id → UV lookup for sprites packed into a single texture.
///
/// Id 0 is reserved for "whole texture" and is what unknown names map to.
/// Ids are handed out in first-seen order starting at 1 and are never
/// reused: loading a name again, from the same or another file, only moves
/// its rectangle.
///
/// UVs are inset by half a texel on every edge so linear filtering never
/// samples a neighbouring sprite.
#[derive(Debug, Clone, Default)]
pub struct TextureAtlas {
    texture_width: u32,
    texture_height: u32,
    ids: HashMap<String, u32>,
    /// Indexed by `id - 1`.
    sprites: Vec<AtlasSprite>,
}

impl TextureAtlas {
    pub fn new(texture_width: u32, texture_height: u32) -> Self {
        Self {
            texture_width,
            texture_height,
            ..Default::default()
        }
    }

    pub fn texture_size(&self) -> (u32, u32) {
        (self.texture_width, self.texture_height)
    }

    /// Change the texture dimensions and recompute every stored UV.
    pub fn set_texture_size(&mut self, width: u32, height: u32) {
        self.texture_width = width;
        self.texture_height = height;
        self.warn_if_unsized();

        for sprite in &mut self.sprites {
            sprite.uv = uv_for(sprite.rect, width, height);
        }
    }

    /// Load sprite rectangles from a description file.
    ///
    /// Fails only if the file cannot be read; malformed lines are skipped.
    pub fn load_from_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<AtlasLoadSummary, AtlasError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AtlasError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                AtlasError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let summary = self.load_from_str(&text);
        tracing::info!(
            path = %path.display(),
            loaded = summary.loaded,
            added = summary.added,
            skipped = summary.skipped,
            "Loaded texture atlas"
        );
        Ok(summary)
    }

    /// Load sprite rectangles from in-memory description text.
    pub fn load_from_str(&mut self, text: &str) -> AtlasLoadSummary {
        self.warn_if_unsized();

        let mut summary = AtlasLoadSummary::default();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((name, rect)) = parse_line(line) else {
                tracing::trace!(line = line_no + 1, "Skipping malformed atlas line");
                summary.skipped += 1;
                continue;
            };

            if self.insert(name, rect) {
                summary.added += 1;
            }
            summary.loaded += 1;
        }
        summary
    }

    /// Returns `true` if `name` was new.
    fn insert(&mut self, name: &str, rect: Rect<i32>) -> bool {
        let uv = uv_for(rect, self.texture_width, self.texture_height);

        if let Some(&id) = self.ids.get(name) {
            let sprite = &mut self.sprites[id as usize - 1];
            sprite.rect = rect;
            sprite.uv = uv;
            return false;
        }

        self.sprites.push(AtlasSprite {
            name: name.to_owned(),
            rect,
            uv,
        });
        self.ids.insert(name.to_owned(), self.sprites.len() as u32);
        true
    }

    fn warn_if_unsized(&self) {
        if self.texture_width == 0 || self.texture_height == 0 {
            tracing::warn!(
                width = self.texture_width,
                height = self.texture_height,
                "Texture atlas has no size; every sprite maps to the full texture"
            );
        }
    }

    /// Sprite id for `name`, or 0 when unknown.
    pub fn get_id(&self, name: &str) -> u32 {
        self.ids.get(name).copied().unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// UVs of a sprite. Id 0 and unknown ids give [`UvRect::FULL`].
    pub fn uv_rect(&self, id: u32) -> UvRect {
        self.sprite(id).map_or(UvRect::FULL, |s| s.uv)
    }

    pub fn uv_rect_by_name(&self, name: &str) -> UvRect {
        self.uv_rect(self.get_id(name))
    }

    /// Pixel rectangle of a sprite as loaded.
    pub fn pixel_rect(&self, id: u32) -> Option<Rect<i32>> {
        self.sprite(id).map(|s| s.rect)
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.sprite(id).map(|s| s.name.as_str())
    }

    /// Number of named sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    fn sprite(&self, id: u32) -> Option<&AtlasSprite> {
        self.sprites.get((id as usize).checked_sub(1)?)
    }
}

fn parse_line(line: &str) -> Option<(&str, Rect<i32>)> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let w: i32 = tokens.next()?.parse().ok()?;
    let h: i32 = tokens.next()?.parse().ok()?;
    if tokens.next().is_some() || w <= 0 || h <= 0 {
        return None;
    }
    Some((name, Rect::new(x, y, w, h)))
}

fn uv_for(rect: Rect<i32>, texture_width: u32, texture_height: u32) -> UvRect {
    if texture_width == 0 || texture_height == 0 {
        return UvRect::FULL;
    }

    let tw = texture_width as f32;
    let th = texture_height as f32;
    let (x, y) = (rect.x as f32, rect.y as f32);
    let (w, h) = (rect.width as f32, rect.height as f32);

    UvRect::new(
        (x + 0.5) / tw,
        (y + 0.5) / th,
        (x + w - 0.5) / tw,
        (y + h - 0.5) / th,
    )
}
