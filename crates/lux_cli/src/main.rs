use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use lux_core::Scene;
use lux_renderer::render;

mod scene_file;

use scene_file::SceneFile;

/// Render a JSON scene description to a PNG image.
#[derive(Parser, Debug)]
#[command(name = "lux", version, about)]
struct Args {
    /// Scene description (JSON)
    scene: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Render in a single row-major pass instead of parallel buckets
    #[arg(long, default_value_t = false)]
    single_threaded: bool,

    /// Bucket edge length in pixels
    #[arg(long)]
    bucket_size: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let start = Instant::now();

    let description = SceneFile::load(&args.scene)?;
    let base_dir = args.scene.parent().unwrap_or(Path::new("."));

    let camera = description.build_camera()?;
    let lights = description.build_lights()?;
    let meshes = description.build_meshes(base_dir)?;

    let mut scene = Scene::new();
    for mesh in &meshes {
        scene.add_geometry(mesh);
    }
    for light in &lights {
        scene.add_light(light);
    }

    log::info!(
        "Loaded {} in {:?}: {} objects, {} lights",
        args.scene.display(),
        start.elapsed(),
        meshes.len(),
        lights.len()
    );

    let mut config = description.render_config();
    if args.single_threaded {
        config.parallel = false;
    }
    if let Some(bucket_size) = args.bucket_size {
        config.bucket_size = bucket_size;
    }

    let image = render(&camera, &scene, &config);
    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
