//! Visibility culling and packet production for the 2D renderer.

use argon_core::geometry::Aabb2;
use argon_core::math::Vec2;
use argon_core::profiling::profile_function;
use argon_render::{RenderPacket2D, RenderPassEncoder, TextureAtlas, UvRect, WorldSource2D};

use crate::{Camera2D, Scene};

/// Turns the visible entities of a scene into render packets.
///
/// An entity is visible when its renderable is marked visible, has a mesh,
/// and its bounds overlap the camera's view rectangle. Entity bounds are
/// centered on the entity position with half extents `|scale| / 2`; rotation
/// is ignored, as is camera rotation. Boxes that only touch count as overlapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderSystem2D<'s> {
    atlas: Option<&'s TextureAtlas>,
}

impl<'s> RenderSystem2D<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve sprite ids through `atlas`.
    pub fn with_atlas(atlas: &'s TextureAtlas) -> Self {
        Self { atlas: Some(atlas) }
    }

    /// Call `f` with a packet for every visible entity, in scene order.
    pub fn for_each_visible<'a>(
        &self,
        scene: &Scene<'a>,
        camera: &Camera2D,
        aspect: f32,
        mut f: impl FnMut(RenderPacket2D<'a>),
    ) {
        profile_function!();

        let view = camera.view_bounds(aspect);

        for entity in &scene.entities {
            let renderable = &entity.renderable;
            if !renderable.visible {
                continue;
            }
            let Some(mesh) = renderable.mesh else {
                continue;
            };

            let transform = &entity.transform;
            let half = Vec2::new(transform.sx.abs(), transform.sy.abs()) * 0.5;
            let bounds = Aabb2::from_center_half_extents(transform.position(), half);
            if !bounds.intersects(&view) {
                continue;
            }

            let uv_rect = self
                .atlas
                .map_or(UvRect::FULL, |atlas| atlas.uv_rect(renderable.sprite_id));

            f(RenderPacket2D {
                mesh: Some(mesh),
                material: renderable.material,
                model: transform.matrix(),
                layer: renderable.layer,
                visible: true,
                tint: renderable.tint,
                uv_rect,
            });
        }
    }

    /// Replace the contents of `out` with the visible packets.
    pub fn build_packets<'a>(
        &self,
        scene: &Scene<'a>,
        camera: &Camera2D,
        aspect: f32,
        out: &mut Vec<RenderPacket2D<'a>>,
    ) {
        out.clear();
        out.reserve(scene.len());
        self.for_each_visible(scene, camera, aspect, |packet| out.push(packet));
    }

    /// Submit the visible packets straight into `pass`.
    pub fn submit_visible<'a>(
        &self,
        scene: &Scene<'a>,
        camera: &Camera2D,
        aspect: f32,
        pass: &mut RenderPassEncoder<'_, 'a>,
    ) {
        self.for_each_visible(scene, camera, aspect, |packet| pass.submit(&packet));
    }
}

/// A scene seen through a camera, ready to feed a
/// [`RenderPipeline2D`](argon_render::RenderPipeline2D).
#[derive(Debug, Clone, Copy)]
pub struct VisibleWorld2D<'w, 'a> {
    pub system: RenderSystem2D<'w>,
    pub scene: &'w Scene<'a>,
    pub camera: &'w Camera2D,
    pub aspect: f32,
}

impl<'w, 'a> VisibleWorld2D<'w, 'a> {
    pub fn new(
        system: RenderSystem2D<'w>,
        scene: &'w Scene<'a>,
        camera: &'w Camera2D,
        aspect: f32,
    ) -> Self {
        Self {
            system,
            scene,
            camera,
            aspect,
        }
    }
}

impl<'a> WorldSource2D<'a> for VisibleWorld2D<'_, 'a> {
    fn build_packets(&self, out: &mut Vec<RenderPacket2D<'a>>) {
        self.system
            .build_packets(self.scene, self.camera, self.aspect, out);
    }

    fn submit_visible(&self, pass: &mut RenderPassEncoder<'_, 'a>) {
        self.system
            .submit_visible(self.scene, self.camera, self.aspect, pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entity, Renderable2D, Transform2D};
    use argon_render::{MaterialHandle, Mesh};
    use argon_test_utils::{GraphicsDevice, MockGraphicsDevice};
    use std::sync::Arc;

    fn quad() -> Mesh {
        let device: Arc<dyn GraphicsDevice> = Arc::new(MockGraphicsDevice::new());
        Mesh::quad(&device)
    }

    fn entity_at<'a>(mesh: &'a Mesh, x: f32, y: f32) -> Entity<'a> {
        Entity {
            transform: Transform2D::from_position(x, y),
            renderable: Renderable2D::new(mesh, MaterialHandle::from_raw(1)),
            controllable: false,
        }
    }

    fn visible_xs(system: &RenderSystem2D, scene: &Scene, camera: &Camera2D) -> Vec<f32> {
        let mut xs = Vec::new();
        system.for_each_visible(scene, camera, 1.0, |p| xs.push(p.model.w_axis.x));
        xs
    }

    #[test]
    fn test_culls_outside_view() {
        let mesh = quad();
        let mut scene = Scene::new();
        scene.spawn(entity_at(&mesh, 0.0, 0.0));
        scene.spawn(entity_at(&mesh, 5.0, 0.0));
        scene.spawn(entity_at(&mesh, -1.2, 0.0));

        let xs = visible_xs(&RenderSystem2D::new(), &scene, &Camera2D::default());
        assert_eq!(xs, vec![0.0, -1.2]);
    }

    #[test]
    fn test_touching_edge_is_visible() {
        let mesh = quad();
        let mut scene = Scene::new();
        // camera spans [-1, 1]; quad spans [1.0, 2.0]
        scene.spawn(entity_at(&mesh, 1.5, 0.0));
        scene.spawn(entity_at(&mesh, 1.5001, 0.0));

        let xs = visible_xs(&RenderSystem2D::new(), &scene, &Camera2D::default());
        assert_eq!(xs, vec![1.5]);
    }

    #[test]
    fn test_negative_scale_uses_magnitude() {
        let mesh = quad();
        let mut scene = Scene::new();
        let mut entity = entity_at(&mesh, 2.5, 0.0);
        entity.transform = entity.transform.with_scale(-3.0, 1.0);
        scene.spawn(entity);

        let xs = visible_xs(&RenderSystem2D::new(), &scene, &Camera2D::default());
        assert_eq!(xs, vec![2.5]);
    }

    #[test]
    fn test_hidden_and_meshless_entities_are_skipped() {
        let mesh = quad();
        let mut scene = Scene::new();
        let mut hidden = entity_at(&mesh, 0.0, 0.0);
        hidden.renderable.visible = false;
        scene.spawn(hidden);
        scene.spawn(Entity::default());

        let xs = visible_xs(&RenderSystem2D::new(), &scene, &Camera2D::default());
        assert!(xs.is_empty());
    }

    #[test]
    fn test_packet_carries_renderable_fields() {
        let mesh = quad();
        let mut atlas = TextureAtlas::new(64, 64);
        atlas.load_from_str("coin 0 0 16 16\n");

        let mut scene = Scene::new();
        let mut entity = entity_at(&mesh, 0.25, 0.0);
        entity.renderable.layer = -3;
        entity.renderable.tint = argon_render::Color::RED;
        entity.renderable.sprite_id = atlas.get_id("coin");
        scene.spawn(entity);

        let mut packets = vec![RenderPacket2D::default(); 4];
        RenderSystem2D::with_atlas(&atlas).build_packets(
            &scene,
            &Camera2D::default(),
            1.0,
            &mut packets,
        );

        assert_eq!(packets.len(), 1);
        let packet = &packets[0];
        assert!(std::ptr::eq(packet.mesh.unwrap(), &mesh));
        assert_eq!(packet.layer, -3);
        assert_eq!(packet.tint, argon_render::Color::RED);
        assert_eq!(packet.uv_rect, atlas.uv_rect_by_name("coin"));
        assert_eq!(packet.model, entity.transform.matrix());
    }

    #[test]
    fn test_without_atlas_uses_full_rect() {
        let mesh = quad();
        let mut scene = Scene::new();
        let mut entity = entity_at(&mesh, 0.0, 0.0);
        entity.renderable.sprite_id = 7;
        scene.spawn(entity);

        let mut packets = Vec::new();
        RenderSystem2D::new().build_packets(&scene, &Camera2D::default(), 1.0, &mut packets);
        assert_eq!(packets[0].uv_rect, UvRect::FULL);
    }
}
