use std::sync::Arc;

use argon::device::{GraphicsDevice, MockGraphicsDevice};
use argon::prelude::*;

#[test]
fn test_prelude_drives_a_layered_frame() {
    let mock = Arc::new(MockGraphicsDevice::new());
    let device: Arc<dyn GraphicsDevice> = mock.clone();
    let quad = Mesh::quad(&device);
    let shader = Shader::basic(device.clone());

    let mut materials = MaterialLibrary::new();
    let red = materials.add(Material2D::flat(&shader, Color::RED));

    let mut scene = Scene::new();
    for layer in [1, 0] {
        let mut renderable = Renderable2D::new(&quad, red);
        renderable.layer = layer;
        scene.spawn(Entity {
            renderable,
            ..Default::default()
        });
    }

    let camera = Camera2D::default();
    let world = VisibleWorld2D::new(RenderSystem2D::new(), &scene, &camera, 1.0);
    let mut renderer = Renderer::new(device.clone(), RendererConfig::default());
    let mut pipeline = RenderPipeline2D::new();
    pipeline
        .add_pass(WorldPass2D::new())
        .add_pass(WorldPass2D::new());

    let frame = RenderFrame2D {
        view_projection: camera.view_projection(1.0),
        materials: &materials,
        world: &world,
    };
    assert_eq!(pipeline.execute(&frame, &mut renderer), FrameMode::Record);
    assert_eq!(pipeline.packets().len(), 2);
    assert_eq!(mock.count_immediate_draws(), 4);
}

#[test]
fn test_init_returns_config() {
    let config = argon::init(Config::default());
    assert_eq!(config.benchmark, BenchmarkMode::Off);
}
