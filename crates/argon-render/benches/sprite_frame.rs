//! Benchmarks for submitting and flushing a sprite-heavy frame.

use std::sync::Arc;

use argon_core::profiling::new_frame;
use argon_render::glam::{Mat4, Vec3};
use argon_render::*;
use argon_test_utils::{GraphicsDevice, MockGraphicsDevice};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn grid(count: usize) -> Vec<Mat4> {
    (0..count)
        .map(|i| {
            let x = (i % 100) as f32 * 0.05 - 2.5;
            let y = (i / 100) as f32 * 0.05 - 1.25;
            Mat4::from_translation(Vec3::new(x, y, 0.0)) * Mat4::from_scale(Vec3::splat(0.04))
        })
        .collect()
}

fn bench_sprite_frame(c: &mut Criterion) {
    let mock = Arc::new(MockGraphicsDevice::new());
    let device: Arc<dyn GraphicsDevice> = mock.clone();
    let quad = Mesh::quad(&device);
    let basic = Shader::basic(device.clone());
    let instanced = Shader::instanced(device.clone());

    let mut materials = MaterialLibrary::new();
    let sprite = materials.add(Material2D::flat(&instanced, Color::WHITE));
    let flat = materials.add(Material2D::flat(&basic, Color::RED));

    let mut group = c.benchmark_group("sprite_frame");

    for count in [1000, 5000] {
        group.throughput(Throughput::Elements(count as u64));
        let models = grid(count);

        let mut renderer = Renderer::new(device.clone(), RendererConfig::default());
        renderer.set_sprite_quad(&quad);
        renderer.set_instanced_sprite_shader(&instanced);

        group.bench_with_input(BenchmarkId::new("instanced", count), &models, |b, models| {
            b.iter(|| {
                new_frame();
                mock.clear_calls();
                let mut pass = renderer.begin_pass(PassContext2D {
                    view_projection: Mat4::IDENTITY,
                    materials: &materials,
                });
                for model in models {
                    pass.submit(&RenderPacket2D::new(&quad, sprite, *model));
                }
                pass.end();
            });
        });

        group.bench_with_input(BenchmarkId::new("immediate", count), &models, |b, models| {
            b.iter(|| {
                new_frame();
                mock.clear_calls();
                let mut pass = renderer.begin_pass(PassContext2D {
                    view_projection: Mat4::IDENTITY,
                    materials: &materials,
                });
                for model in models {
                    pass.submit(&RenderPacket2D::new(&quad, flat, *model));
                }
                pass.end();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sprite_frame);
criterion_main!(benches);
