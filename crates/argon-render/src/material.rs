//! Materials and the handle-indexed material library.
//!
//! Draw submissions refer to materials by [`MaterialHandle`]. The library
//! stores value copies of [`Material2D`]; the shader and texture a material
//! points at stay owned by the application.

use crate::{Color, Shader, Texture2D};

/// How a 2D drawable is shaded.
#[derive(Debug, Clone, Copy)]
pub struct Material2D<'a> {
    /// Program used to draw. Materials without one are never drawn.
    pub shader: Option<&'a Shader>,
    pub texture: Option<&'a Texture2D>,
    pub color: Color,
    /// Sample `texture` in the fragment stage. Ignored when there is no texture.
    pub use_texture: bool,
}

impl<'a> Material2D<'a> {
    /// An untextured material with a flat color.
    pub fn flat(shader: &'a Shader, color: Color) -> Self {
        Self {
            shader: Some(shader),
            texture: None,
            color,
            use_texture: false,
        }
    }

    /// A textured material, white base color.
    pub fn textured(shader: &'a Shader, texture: &'a Texture2D) -> Self {
        Self {
            shader: Some(shader),
            texture: Some(texture),
            color: Color::WHITE,
            use_texture: true,
        }
    }

    /// The texture actually sampled, if any.
    pub fn bound_texture(&self) -> Option<&'a Texture2D> {
        if self.use_texture { self.texture } else { None }
    }
}

impl Default for Material2D<'_> {
    fn default() -> Self {
        Self {
            shader: None,
            texture: None,
            color: Color::WHITE,
            use_texture: false,
        }
    }
}

/// Opaque, 1-based index into a [`MaterialLibrary`]. Zero is never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MaterialHandle(u32);

impl MaterialHandle {
    pub const INVALID: MaterialHandle = MaterialHandle(0);

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Append-only store of materials.
///
/// Every handle returned by [`add`](Self::add) stays valid for the lifetime
/// of the library. Materials can be edited between frames through
/// [`get_mut`](Self::get_mut).
///
/// ```
/// use argon_render::{Material2D, MaterialHandle, MaterialLibrary};
///
/// let mut library = MaterialLibrary::new();
/// let handle = library.add(Material2D::default());
///
/// assert_eq!(handle.raw(), 1);
/// assert!(library.get(handle).is_some());
/// assert!(library.get(MaterialHandle::INVALID).is_none());
/// ```
#[derive(Debug, Default)]
pub struct MaterialLibrary<'a> {
    materials: Vec<Material2D<'a>>,
}

impl<'a> MaterialLibrary<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `material` and return its handle.
    pub fn add(&mut self, material: Material2D<'a>) -> MaterialHandle {
        self.materials.push(material);
        MaterialHandle(self.materials.len() as u32)
    }

    fn index(&self, handle: MaterialHandle) -> Option<usize> {
        let index = (handle.0 as usize).checked_sub(1)?;
        (index < self.materials.len()).then_some(index)
    }

    pub fn get(&self, handle: MaterialHandle) -> Option<&Material2D<'a>> {
        self.index(handle).map(|i| &self.materials[i])
    }

    pub fn get_mut(&mut self, handle: MaterialHandle) -> Option<&mut Material2D<'a>> {
        self.index(handle).map(|i| &mut self.materials[i])
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate over `(handle, material)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialHandle, &Material2D<'a>)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialHandle(i as u32 + 1), m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_one_based() {
        let mut library = MaterialLibrary::new();
        let a = library.add(Material2D::default());
        let b = library.add(Material2D::default());

        assert_eq!(a.raw(), 1);
        assert_eq!(b.raw(), 2);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_out_of_range_handles() {
        let mut library = MaterialLibrary::new();
        library.add(Material2D::default());

        assert!(library.get(MaterialHandle::INVALID).is_none());
        assert!(library.get(MaterialHandle::from_raw(2)).is_none());
        assert!(library.get(MaterialHandle::from_raw(u32::MAX)).is_none());
    }

    #[test]
    fn test_edit_between_frames() {
        let mut library = MaterialLibrary::new();
        let handle = library.add(Material2D::default());

        library.get_mut(handle).unwrap().color = Color::RED;
        assert_eq!(library.get(handle).unwrap().color, Color::RED);
    }

    #[test]
    fn test_iter_yields_handles() {
        let mut library = MaterialLibrary::new();
        library.add(Material2D::default());
        library.add(Material2D {
            color: Color::BLUE,
            ..Default::default()
        });

        let handles: Vec<u32> = library.iter().map(|(h, _)| h.raw()).collect();
        assert_eq!(handles, vec![1, 2]);
    }

    #[test]
    fn test_texture_ignored_without_flag() {
        let material = Material2D::default();
        assert!(material.bound_texture().is_none());
    }
}
