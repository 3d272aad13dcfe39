use argon_render::{Color, MaterialHandle, Mesh};

use crate::Transform2D;

/// How an entity is drawn.
#[derive(Debug, Clone, Copy)]
pub struct Renderable2D<'a> {
    /// Entities without a mesh are never drawn.
    pub mesh: Option<&'a Mesh>,
    pub material: MaterialHandle,
    pub visible: bool,
    pub layer: i32,
    pub tint: Color,
    /// Atlas sprite id; 0 samples the whole texture.
    pub sprite_id: u32,
}

impl<'a> Renderable2D<'a> {
    pub fn new(mesh: &'a Mesh, material: MaterialHandle) -> Self {
        Self {
            mesh: Some(mesh),
            material,
            ..Default::default()
        }
    }
}

impl Default for Renderable2D<'_> {
    fn default() -> Self {
        Self {
            mesh: None,
            material: MaterialHandle::INVALID,
            visible: true,
            layer: 0,
            tint: Color::WHITE,
            sprite_id: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Entity<'a> {
    pub transform: Transform2D,
    pub renderable: Renderable2D<'a>,
    /// Driven by player input.
    pub controllable: bool,
}

/// A flat list of entities.
#[derive(Debug, Clone, Default)]
pub struct Scene<'a> {
    pub entities: Vec<Entity<'a>>,
}

impl<'a> Scene<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity and return its index.
    pub fn spawn(&mut self, entity: Entity<'a>) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
