//! JSON scene descriptions.
//!
//! A scene file holds the camera, render settings, lights and a list of
//! objects. Every object is turned into an owned [`Mesh`]; the caller then
//! borrows those meshes into a [`Scene`](lux_core::Scene).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use lux_core::{load_obj, Color, Geometry, Light, Material, Mesh};
use lux_math::Vec3;
use lux_renderer::{Camera, RenderConfig, DEFAULT_BUCKET_SIZE};

#[derive(Debug, Deserialize)]
pub struct SceneFile {
    pub camera: CameraDesc,
    #[serde(default)]
    pub render: RenderDesc,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

#[derive(Debug, Deserialize)]
pub struct CameraDesc {
    #[serde(default)]
    pub origin: [f32; 3],
    pub direction: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Horizontal field of view in degrees
    pub fov: f32,
    pub width: u32,
    pub height: u32,
    /// Defaults to width / height
    pub aspect_ratio: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderDesc {
    /// RGBA
    pub background: [u8; 4],
    pub parallel: bool,
    pub bucket_size: u32,
}

impl Default for RenderDesc {
    fn default() -> Self {
        Self {
            background: [0, 0, 0, 0],
            parallel: true,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LightDesc {
    pub position: [f32; 3],
    /// RGB, or RGBA when a fourth component is given
    #[serde(default = "default_light_color")]
    pub color: Vec<u8>,
    #[serde(default = "one")]
    pub intensity: f32,
    #[serde(default = "one")]
    pub attenuation: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MaterialDesc {
    /// Unit-range RGB
    pub color: [f32; 3],
    pub reflectivity: f32,
    pub opacity: Option<f32>,
    pub diffuse: Option<f32>,
    pub roughness: f32,
}

#[derive(Debug, Deserialize)]
pub struct ObjectDesc {
    #[serde(flatten)]
    pub shape: ShapeDesc,
    #[serde(default)]
    pub material: Option<MaterialDesc>,
    /// Euler angles in degrees, applied X then Y then Z
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Rotation pivot; primitives default to their center
    #[serde(default)]
    pub pivot: Option<[f32; 3]>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDesc {
    Sphere {
        center: [f32; 3],
        radius: f32,
        #[serde(default = "default_segments")]
        segments: u32,
        #[serde(default = "default_rings")]
        rings: u32,
    },
    Cuboid {
        center: [f32; 3],
        size: [f32; 3],
    },
    Plane {
        origin: [f32; 3],
        #[serde(default = "default_up")]
        normal: [f32; 3],
        size: f32,
    },
    Obj {
        path: PathBuf,
    },
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_light_color() -> Vec<u8> {
    vec![255, 255, 255]
}

fn one() -> f32 {
    1.0
}

fn default_segments() -> u32 {
    32
}

fn default_rings() -> u32 {
    16
}

impl SceneFile {
    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid scene file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build every object. Relative OBJ paths are resolved against `base_dir`.
    pub fn build_meshes(&self, base_dir: &Path) -> Result<Vec<Mesh>> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| {
                object
                    .build(base_dir)
                    .with_context(|| format!("Failed to build object {}", i))
            })
            .collect()
    }

    pub fn build_lights(&self) -> Result<Vec<Light>> {
        self.lights
            .iter()
            .enumerate()
            .map(|(i, light)| light.build().with_context(|| format!("Invalid light {}", i)))
            .collect()
    }

    pub fn build_camera(&self) -> Result<Camera> {
        self.camera.build().context("Invalid camera")
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            background: Color::from(self.render.background),
            parallel: self.render.parallel,
            bucket_size: self.render.bucket_size,
        }
    }
}

impl CameraDesc {
    pub fn build(&self) -> Result<Camera> {
        let aspect_ratio = self
            .aspect_ratio
            .unwrap_or(self.width as f32 / self.height.max(1) as f32);

        Ok(Camera::new(
            Vec3::from(self.origin),
            Vec3::from(self.direction),
            Vec3::from(self.up),
            self.fov,
            aspect_ratio,
            self.width,
            self.height,
        )?)
    }
}

impl LightDesc {
    pub fn build(&self) -> Result<Light> {
        let color = match self.color[..] {
            [r, g, b] => Color::rgb(r, g, b),
            [r, g, b, a] => Color::rgba(r, g, b, a),
            _ => anyhow::bail!(
                "Light color needs 3 or 4 components, got {}",
                self.color.len()
            ),
        };

        Ok(Light::new(
            Vec3::from(self.position),
            color,
            self.intensity,
            self.attenuation,
        )?)
    }
}

impl MaterialDesc {
    pub fn build(&self) -> Material {
        let defaults = Material::default();
        Material::new(Vec3::from(self.color))
            .with_reflectivity(self.reflectivity)
            .with_opacity(self.opacity.unwrap_or(defaults.opacity))
            .with_diffuse(self.diffuse.unwrap_or(defaults.diffuse))
            .with_roughness(self.roughness)
    }
}

impl ObjectDesc {
    pub fn build(&self, base_dir: &Path) -> Result<Mesh> {
        let material = self
            .material
            .as_ref()
            .map(MaterialDesc::build)
            .unwrap_or_default();

        let mut mesh = match &self.shape {
            ShapeDesc::Sphere {
                center,
                radius,
                segments,
                rings,
            } => Mesh::sphere(Vec3::from(*center), *radius, *segments, *rings, material),
            ShapeDesc::Cuboid { center, size } => {
                Mesh::cuboid(Vec3::from(*center), Vec3::from(*size), material)
            }
            ShapeDesc::Plane {
                origin,
                normal,
                size,
            } => Mesh::plane(Vec3::from(*origin), Vec3::from(*normal), *size, material),
            ShapeDesc::Obj { path } => {
                let path = base_dir.join(path);
                let mut mesh = load_obj(&path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                mesh.set_material(material);
                mesh
            }
        };

        if let Some(pivot) = self.pivot {
            mesh = mesh.with_origin(Vec3::from(pivot));
        }

        let [x, y, z] = self.rotation;
        if x != 0.0 || y != 0.0 || z != 0.0 {
            mesh.rotate(x, y, z);
        }

        Ok(mesh)
    }
}
