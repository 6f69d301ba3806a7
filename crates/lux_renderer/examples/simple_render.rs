//! Simple ray casting example.
//!
//! Renders a lit sphere sitting on a box and saves it as PNG.

use lux_core::{Color, Light, Material, Mesh, Scene};
use lux_renderer::{render, Camera, RenderConfig, Vec3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Lux Ray Caster - Simple Example");
    println!("===============================");

    let sphere = Mesh::sphere(
        Vec3::new(6.0, 0.0, 0.0),
        1.0,
        48,
        24,
        Material::new(Vec3::new(0.05, 0.0, 0.1)),
    );
    let floor = Mesh::cuboid(
        Vec3::new(6.0, -1.5, 0.0),
        Vec3::new(4.0, 1.0, 4.0),
        Material::new(Vec3::new(0.02, 0.02, 0.02)),
    );
    let key = Light::new(Vec3::new(-3.0, 5.0, 0.0), Color::rgb(255, 230, 200), 1.0, 1.0)?;
    let rim = Light::new(Vec3::new(10.0, 3.0, 4.0), Color::rgb(60, 80, 200), 0.8, 1.0)?;

    let mut scene = Scene::new();
    scene.add_geometry(&sphere);
    scene.add_geometry(&floor);
    scene.add_light(&key);
    scene.add_light(&rim);

    let camera = Camera::new(Vec3::ZERO, Vec3::X, Vec3::Y, 60.0, 16.0 / 9.0, 640, 360)?;
    let config = RenderConfig {
        parallel: true,
        ..Default::default()
    };

    println!("Rendering {} triangles...", scene.total_triangle_count());
    let start = std::time::Instant::now();
    let image = render(&camera, &scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image.save_png(filename)?;
    println!("Saved to {}", filename);

    Ok(())
}
