//! Mirror room example.
//!
//! Two facing mirrors, a glossy sphere and a frosted glass sphere, lit by a
//! point light and a spot light. Saves to PPM format.
//!
//! Run with `RUST_LOG=debug` to see tracer and blackboard diagnostics.

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use umbra_renderer::{
    AmbientLight, BlackboardSettings, Camera, Color, DVec3, ImageBuffer, Material, Plane, Point,
    PointLight, Scene, SimpleRayTracer, Sphere, SpotLight, TracerConfig, Triangle, Vector,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let start = std::time::Instant::now();
    let scene = build_scene();
    log::info!("Scene '{}' built in {:?}", scene.name, start.elapsed());

    let camera = Camera::builder()
        .with_location(Point::new(0.0, 1.0, 12.0))
        .with_direction(Vector::BACKWARD, Vector::UP)
        .with_vp_size(8.0, 4.5)
        .with_vp_distance(10.0)
        .with_resolution(320, 180)
        .with_antialiasing(3, 4)
        .build()
        .context("invalid camera")?;

    let config = TracerConfig::default().with_max_recursion_level(6).with_grid_size(5);
    let tracer = SimpleRayTracer::with_config(&scene, config);

    let mut rng = StdRng::seed_from_u64(7);
    let image = camera.render(&tracer, &mut rng);
    log::info!("Average pixel {:?}", image.average());

    let filename = "mirror_room.ppm";
    save_ppm(&image, filename).with_context(|| format!("failed to save {filename}"))?;
    log::info!("Saved to {filename}");

    Ok(())
}

fn build_scene() -> Scene {
    let mirror = Material::new()
        .with_kd(DVec3::splat(0.05))
        .with_kr(DVec3::splat(0.8));

    let floor = Material::new()
        .with_kd(DVec3::new(0.5, 0.45, 0.4))
        .with_ks(DVec3::splat(0.2))
        .with_shininess(20);

    let glossy = Material::new()
        .with_kd(DVec3::new(0.2, 0.3, 0.6))
        .with_ks(DVec3::splat(0.5))
        .with_shininess(60)
        .with_kr(DVec3::splat(0.3))
        .with_reflection_blur(BlackboardSettings::new(1.0, 0.3, 9));

    let frosted = Material::new()
        .with_kd(DVec3::splat(0.1))
        .with_ks(DVec3::splat(0.4))
        .with_shininess(100)
        .with_kt(DVec3::new(0.6, 0.7, 0.6))
        .with_transparency_blur(BlackboardSettings::new(2.0, 0.4, 9));

    Scene::new("mirror room")
        .with_background(Color::new(0.05, 0.05, 0.08))
        .with_ambient_light(AmbientLight::new(Color::splat(1.0), DVec3::splat(0.08)))
        // Floor
        .with_geometry(Plane::new(Point::new(0.0, -1.0, 0.0), Vector::UP).with_material(floor))
        // Facing mirrors
        .with_geometry(Plane::new(Point::new(-6.0, 0.0, 0.0), Vector::RIGHT).with_material(mirror.clone()))
        .with_geometry(Plane::new(Point::new(6.0, 0.0, 0.0), Vector::LEFT).with_material(mirror))
        // Emissive panel on the back wall
        .with_geometry(
            Triangle::new(
                Point::new(-2.0, 2.0, -8.0),
                Point::new(2.0, 2.0, -8.0),
                Point::new(0.0, 4.0, -8.0),
            )
            .with_emission(Color::new(0.8, 0.6, 0.3)),
        )
        .with_geometry(Sphere::new(Point::new(-1.5, 0.0, -3.0), 1.0).with_material(glossy))
        .with_geometry(Sphere::new(Point::new(1.5, 0.0, -1.0), 1.0).with_material(frosted))
        .with_light(
            PointLight::new(Color::new(1.0, 0.95, 0.9), Point::new(0.0, 5.0, 2.0))
                .with_kl(0.05)
                .with_kq(0.01),
        )
        .with_light(
            SpotLight::new(Color::splat(1.2), Point::new(3.0, 4.0, 3.0), Vector::new(-1.0, -1.5, -1.5))
                .with_kl(0.05)
                .with_narrow_beam(8),
        )
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = image.get(x, y).to_rgb8();
            writeln!(writer, "{r} {g} {b}")?;
        }
    }

    Ok(())
}
